use std::io;

use crate::error::{Error, Result};
use crate::frame::EncodedFrame;

/// Serializes encoded frames to a byte sink.
///
/// Wire layout per frame, all fields little-endian and fixed width:
/// `run_count: u16`, then `value: u8` + `length: u16` per run. There are no
/// frame markers and no global header; a reader walks runs and counts pixels
/// (width * height per frame) to find frame boundaries.
pub struct StreamWriter<W> {
    sink: W,
}

impl<W: io::Write> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Append one frame's record. Frames must be fed in ascending index
    /// order; the writer adds nothing between records.
    pub fn write_frame(&mut self, frame: &EncodedFrame) -> Result<()> {
        let run_count = u16::try_from(frame.runs.len()).map_err(|_| Error::TooManyRuns {
            frame: frame.index,
            runs: frame.runs.len(),
        })?;
        self.sink.write_all(&run_count.to_le_bytes())?;
        for run in &frame.runs {
            self.sink.write_all(&[run.value])?;
            self.sink.write_all(&run.length.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn write_all(&mut self, frames: &[EncodedFrame]) -> Result<()> {
        for frame in frames {
            self.write_frame(frame)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Serialize an ordered slice of frames into one in-memory stream.
pub fn encode_to_vec(frames: &[EncodedFrame]) -> Result<Vec<u8>> {
    let mut writer = StreamWriter::new(Vec::new());
    writer.write_all(frames)?;
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::Run;
    use pretty_assertions::assert_eq;

    #[test]
    fn two_run_frame_layout() {
        // 2x1 frame [(200,0,0), (0,0,0)]: runs (1,1), (0,1).
        let frame = EncodedFrame {
            index: 0,
            runs: vec![Run::new(true, 1), Run::new(false, 1)],
        };
        let bytes = encode_to_vec(&[frame]).unwrap();
        assert_eq!(bytes, [0x02, 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn single_run_frame_layout() {
        // All-black 4-pixel frame: one run (0,4).
        let frame = EncodedFrame {
            index: 0,
            runs: vec![Run::new(false, 4)],
        };
        let bytes = encode_to_vec(&[frame]).unwrap();
        assert_eq!(bytes, [0x01, 0x00, 0x00, 0x04, 0x00]);
    }

    #[test]
    fn records_are_concatenated_without_separators() {
        let a = EncodedFrame {
            index: 0,
            runs: vec![Run::new(false, 4)],
        };
        let b = EncodedFrame {
            index: 1,
            runs: vec![Run::new(true, 3), Run::new(false, 1)],
        };

        let bytes = encode_to_vec(&[a.clone(), b.clone()]).unwrap();
        let mut expected = encode_to_vec(&[a]).unwrap();
        expected.extend(encode_to_vec(&[b]).unwrap());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn refuses_a_frame_with_more_runs_than_the_count_field_holds() {
        let frame = EncodedFrame {
            index: 3,
            runs: (0..65536).map(|i| Run::new(i % 2 == 0, 1)).collect(),
        };

        let mut writer = StreamWriter::new(Vec::new());
        assert!(matches!(
            writer.write_frame(&frame),
            Err(crate::error::Error::TooManyRuns {
                frame: 3,
                runs: 65536
            })
        ));
        // The count is checked before anything is emitted.
        assert_eq!(writer.into_inner(), Vec::<u8>::new());
    }

    #[test]
    fn lengths_are_little_endian() {
        let frame = EncodedFrame {
            index: 0,
            runs: vec![Run::new(true, 0x1234)],
        };
        let bytes = encode_to_vec(&[frame]).unwrap();
        assert_eq!(bytes, [0x01, 0x00, 0x01, 0x34, 0x12]);
    }
}
