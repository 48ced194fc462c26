//! Convert a sequence of video frames into a compact 1-bit run-length
//! encoded stream.
//!
//! Each frame is thresholded to black/white ([`binarize`]), run-length
//! encoded ([`rle`]), and serialized as `run_count: u16 LE` followed by
//! `value: u8` + `length: u16 LE` per run ([`writer`]). Frames are encoded
//! in parallel and reassembled in frame order ([`pipeline`]).
//!
//! The core takes pixel buffers and knows nothing about video containers;
//! the `source` feature adds a numbered-image-directory frame source and the
//! `tool` feature adds a CLI that shells out to ffmpeg for extraction.

pub mod binarize;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod rle;
pub mod writer;

#[cfg(feature = "source")]
pub mod source;

#[cfg(feature = "tool")]
pub mod extract;

pub use binarize::BRIGHT_THRESHOLD;
pub use error::{Error, Result};
pub use frame::{EncodedFrame, PixelBuffer};
pub use pipeline::{EncodeConfig, Pipeline};
pub use rle::{Run, MAX_RUN_LENGTH};
pub use writer::StreamWriter;

/// Encode frames to a serialized stream in one call.
pub fn encode(frames: Vec<PixelBuffer>, config: EncodeConfig) -> Result<Vec<u8>> {
    let encoded = Pipeline::new(config)?.encode(frames)?;
    writer::encode_to_vec(&encoded)
}
