use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context};

/// Decode a video into numbered still images under `frames_dir` using the
/// ffmpeg binary, sampling at `fps` frames per second.
///
/// The staging directory is recreated from scratch so stale frames from a
/// previous run can never leak into the sequence.
pub fn extract_frames(input: &Path, frames_dir: &Path, fps: u32) -> anyhow::Result<()> {
    if frames_dir.exists() {
        std::fs::remove_dir_all(frames_dir)
            .with_context(|| format!("could not clear {}", frames_dir.display()))?;
    }
    std::fs::create_dir_all(frames_dir)
        .with_context(|| format!("could not create {}", frames_dir.display()))?;

    let output_pattern = frames_dir.join("%04d.png");
    let status = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-i")
        .arg(input)
        .arg("-vf")
        .arg(format!("fps={fps}"))
        .arg(&output_pattern)
        .status()
        .context("could not run ffmpeg (is it installed?)")?;

    if !status.success() {
        bail!("ffmpeg exited with {status}");
    }

    Ok(())
}

/// Delete the staging directory once the output stream is safely written.
pub fn cleanup_frames(frames_dir: &Path) -> anyhow::Result<()> {
    std::fs::remove_dir_all(frames_dir)
        .with_context(|| format!("could not remove {}", frames_dir.display()))
}
