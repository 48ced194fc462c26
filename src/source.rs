use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;

use crate::error::{Error, Result};
use crate::frame::PixelBuffer;

/// Matches image files whose stem ends in a frame number, e.g.
/// "bad_apple_1234.png" or ffmpeg's "0001.png".
pub fn default_pattern() -> Regex {
    Regex::new(r"([0-9]+)\.(?:png|jpg|jpeg|bmp)$").unwrap()
}

/// One discovered frame file: its 0-based frame index and where it lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameFile {
    pub index: usize,
    pub path: PathBuf,
}

/// Find frame files in `dir`, ordered by the number captured from their
/// filename.
///
/// The numbering may start anywhere (ffmpeg starts at 1) but must be gapless
/// and free of duplicates; frame indices are then assigned 0-based from the
/// sorted order. A hole in the numbering is an error, not a warning: a
/// missing frame has no meaningful partial output downstream.
pub fn find_frames(dir: &Path, pattern: &Regex) -> Result<Vec<FrameFile>> {
    let read_err = |e: std::io::Error| Error::FrameSource {
        frame: 0,
        message: format!("could not read {}: {e}", dir.display()),
    };

    let mut numbered: Vec<(usize, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(captures) = pattern.captures(&path.as_os_str().to_string_lossy()) {
            let id = captures.get(1).ok_or_else(|| Error::FrameSource {
                frame: 0,
                message: "frame pattern matched but captured no number".into(),
            })?;
            let id: usize = id.as_str().parse().map_err(|e| Error::FrameSource {
                frame: 0,
                message: format!("bad frame number in {}: {e}", path.display()),
            })?;
            numbered.push((id, path));
        }
    }

    numbered.sort_by_key(|(id, _)| *id);

    for (index, pair) in numbered.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.0 == prev.0 {
            return Err(Error::FrameSource {
                frame: index + 1,
                message: format!(
                    "duplicate frame number {} ({} and {})",
                    next.0,
                    prev.1.display(),
                    next.1.display()
                ),
            });
        }
        if next.0 != prev.0 + 1 {
            return Err(Error::FrameSource {
                frame: index + 1,
                message: format!("missing frame between numbers {} and {}", prev.0, next.0),
            });
        }
    }

    Ok(numbered
        .into_iter()
        .enumerate()
        .map(|(index, (_, path))| FrameFile { index, path })
        .collect())
}

/// Read the dimensions of a frame file without decoding the whole image.
pub fn probe_dimensions(file: &FrameFile) -> Result<(usize, usize)> {
    let (w, h) = image::image_dimensions(&file.path).map_err(|e| Error::FrameSource {
        frame: file.index,
        message: format!("could not probe {}: {e}", file.path.display()),
    })?;
    Ok((w as usize, h as usize))
}

/// Decode one frame file into an RGB8 [`PixelBuffer`], checking it matches
/// the configured dimensions.
pub fn load_frame(file: &FrameFile, width: usize, height: usize) -> Result<PixelBuffer> {
    let img = image::open(&file.path).map_err(|e| Error::FrameSource {
        frame: file.index,
        message: format!("could not decode {}: {e}", file.path.display()),
    })?;

    let rgb = img.to_rgb8();
    if (rgb.width() as usize, rgb.height() as usize) != (width, height) {
        return Err(Error::FrameSource {
            frame: file.index,
            message: format!(
                "{} is {}x{}, expected {width}x{height}",
                file.path.display(),
                rgb.width(),
                rgb.height()
            ),
        });
    }

    Ok(PixelBuffer::new(file.index, rgb.into_raw()))
}

/// Load every discovered frame in parallel, in index order.
pub fn load_frames(files: &[FrameFile], width: usize, height: usize) -> Result<Vec<PixelBuffer>> {
    files
        .par_iter()
        .map(|file| load_frame(file, width, height))
        .collect()
}
