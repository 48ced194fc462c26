use crate::binarize::binarize;
use crate::error::{Error, Result};
use crate::rle::{encode_runs, Run};

/// One frame's worth of raw pixels, plus its position in the video.
///
/// `rgb` is interleaved RGB8, row-major, and is never mutated after creation;
/// frames are handed across worker threads by value.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    pub index: usize,
    pub rgb: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(index: usize, rgb: Vec<u8>) -> Self {
        Self { index, rgb }
    }
}

/// One frame after binarization and run-length encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    pub index: usize,
    pub runs: Vec<Run>,
}

impl EncodedFrame {
    /// Number of run records. On the wire this is a u16; frames coming out
    /// of [`encode_frame`] are guaranteed to fit it.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Total pixels covered by this frame's runs. Always equals
    /// width * height for a frame produced by [`encode_frame`].
    pub fn pixel_count(&self) -> usize {
        self.runs.iter().map(|r| r.length as usize).sum()
    }
}

/// Encode one frame: threshold the pixels, then run-length encode the bits.
///
/// Pure and stateless; safe to call concurrently on disjoint frames.
pub fn encode_frame(frame: &PixelBuffer, pixel_count: usize) -> Result<EncodedFrame> {
    let bits = binarize(frame.index, &frame.rgb, pixel_count)?;
    let runs = encode_runs(frame.index, &bits)?;

    // The wire format counts runs in a u16. A frame that needs more (worst
    // case: alternating pixels, one run each) cannot be represented and must
    // abort the run rather than truncate the count.
    if runs.len() > u16::MAX as usize {
        return Err(Error::TooManyRuns {
            frame: frame.index,
            runs: runs.len(),
        });
    }

    Ok(EncodedFrame {
        index: frame.index,
        runs,
    })
}
