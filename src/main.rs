use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::*;
use rayon::prelude::*;
use regex::Regex;

use bitvideo::extract;
use bitvideo::pipeline::{EncodeConfig, Pipeline};
use bitvideo::source::{self, FrameFile};
use bitvideo::writer::encode_to_vec;

#[derive(Parser, Debug)]
struct Opts {
    /// Path to a folder of frames as numbered image files (e.g. "0001.png").
    /// When --video is given, frames are extracted here first.
    #[arg(value_name = "DIR", default_value = "frames")]
    frames_dir: PathBuf,

    /// Decode this video into the frames folder with ffmpeg before encoding
    #[arg(long, value_name = "FILE")]
    video: Option<PathBuf>,

    #[arg(short, long = "output", default_value = "out.bin")]
    output: PathBuf,

    /// Sampling rate used when extracting frames from --video
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Worker threads for the encode pool. 0 means one per logical CPU
    #[arg(long, default_value = "0")]
    workers: usize,

    /// Keep the extracted frames folder instead of deleting it afterwards
    #[arg(long)]
    keep_frames: bool,

    /// Override the filename pattern used to number frames
    #[arg(long)]
    pattern: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    if let Some(video) = &opts.video {
        println!(
            "+ Extracting frames from {} at {} fps",
            video.display(),
            opts.fps
        );
        extract::extract_frames(video, &opts.frames_dir, opts.fps)?;
        println!("+ Done");
        println!();
    }

    let pattern = match &opts.pattern {
        Some(p) => Regex::new(p).context("invalid --pattern")?,
        None => source::default_pattern(),
    };

    println!("+ Looking for frames in {:?}", opts.frames_dir.display());
    let files = source::find_frames(&opts.frames_dir, &pattern)?;
    println!("+ Found {} frames", files.len());
    anyhow::ensure!(!files.is_empty(), "no frames to encode");

    let (width, height) = source::probe_dimensions(&files[0])?;
    println!(
        "+ Dimensions: {:>5} x {:>5}",
        HumanCount(width as u64).to_string(),
        HumanCount(height as u64).to_string(),
    );

    println!("+ Loading {} frames", files.len());
    let frames = files
        .par_iter()
        .progress()
        .map(|file: &FrameFile| source::load_frame(file, width, height))
        .collect::<Result<Vec<_>, _>>()?;
    println!("+ Done");
    println!();

    println!("+ Encoding");
    let pipeline = Pipeline::new(EncodeConfig {
        width,
        height,
        workers: opts.workers,
    })?;
    let encoded = pipeline.encode(frames)?;

    let total_runs: usize = encoded.iter().map(|f| f.runs.len()).sum();
    let bytes = encode_to_vec(&encoded)?;
    println!(
        "+ Encoded {} frames ({} runs) as {}",
        encoded.len(),
        HumanCount(total_runs as u64).to_string(),
        BinaryBytes(bytes.len() as u64)
    );

    // Written in one shot only after every frame encoded, so a failed run
    // leaves no partial file behind.
    let mut output = opts.output;
    if output.is_dir() {
        output.push("out.bin");
    }
    std::fs::write(&output, &bytes)
        .with_context(|| format!("could not write {}", output.display()))?;
    println!("+ Wrote {}", output.display());

    if opts.video.is_some() && !opts.keep_frames {
        extract::cleanup_frames(&opts.frames_dir)?;
    }

    Ok(())
}
