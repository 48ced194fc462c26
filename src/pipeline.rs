use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::frame::{encode_frame, EncodedFrame, PixelBuffer};

/// Fixed per-run settings, passed in explicitly instead of living in
/// process-wide state.
#[derive(Copy, Clone, Debug)]
pub struct EncodeConfig {
    pub width: usize,
    pub height: usize,
    /// Upper bound on parallel workers. 0 lets rayon pick one thread per
    /// logical CPU.
    pub workers: usize,
}

impl EncodeConfig {
    pub fn pixels_per_frame(&self) -> usize {
        self.width * self.height
    }
}

/// Fans frames out over a bounded worker pool and reassembles the results in
/// frame order.
pub struct Pipeline {
    config: EncodeConfig,
    pool: rayon::ThreadPool,
}

impl Pipeline {
    pub fn new(config: EncodeConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()?;

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Encode every frame, in parallel, and return them ordered by ascending
    /// frame index.
    ///
    /// Fail-fast: the first frame that fails to encode aborts the whole run
    /// and its error is returned; there is no partial output. Workers finish
    /// in whatever order they like, so an explicit reorder happens after
    /// collection; completion order never reaches the caller.
    pub fn encode(&self, frames: Vec<PixelBuffer>) -> Result<Vec<EncodedFrame>> {
        let pixels = self.config.pixels_per_frame();
        debug!(
            "encoding {} frames of {}x{} on {} workers",
            frames.len(),
            self.config.width,
            self.config.height,
            self.pool.current_num_threads()
        );

        let mut encoded: Vec<EncodedFrame> = self.pool.install(|| {
            frames
                .into_par_iter()
                .map(|frame| encode_frame(&frame, pixels))
                .collect::<Result<_>>()
        })?;

        // The ordering barrier. Sort by index, then check the sequence is
        // gapless before anything downstream sees it.
        encoded.sort_by_key(|frame| frame.index);
        if let Some(first) = encoded.first() {
            let origin = first.index;
            for (offset, frame) in encoded.iter().enumerate() {
                if frame.index != origin + offset {
                    return Err(Error::FrameSource {
                        frame: origin + offset,
                        message: "frame indices are not contiguous".into(),
                    });
                }
            }
        }

        debug!("encoded {} frames", encoded.len());
        Ok(encoded)
    }
}
