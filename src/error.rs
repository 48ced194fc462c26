use thiserror::Error;

/// Anything that can go wrong while turning frames into a run-length stream.
///
/// Every frame-scoped variant carries the index of the frame that failed, so
/// a run that aborts can report exactly where.
#[derive(Error, Debug)]
pub enum Error {
    #[error("frame {frame}: pixel buffer holds {actual} bytes, expected {expected} (width * height * 3)")]
    LengthMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    #[error("frame {frame}: empty bit sequence (is the configured width or height zero?)")]
    EmptySequence { frame: usize },

    #[error("frame {frame}: {runs} runs cannot fit the u16 run count field")]
    TooManyRuns { frame: usize, runs: usize },

    #[error("frame {frame}: frame source failed: {message}")]
    FrameSource { frame: usize, message: String },

    #[error("could not write output stream")]
    Write(#[from] std::io::Error),

    #[error("could not build worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
