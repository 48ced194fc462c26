use crate::error::{Error, Result};

/// Channel threshold for binarization. A pixel maps to 1 (white) when ANY of
/// its channels is strictly greater than this; a channel value of exactly 127
/// maps to 0.
///
/// This "any channel bright" rule, not grayscale luminance, is the policy the
/// stream format is defined against. Changing it changes the output
/// bit-for-bit.
pub const BRIGHT_THRESHOLD: u8 = 127;

/// Threshold one frame of interleaved RGB8 data into one bit per pixel.
///
/// `rgb` must hold exactly `pixel_count * 3` bytes, row-major. `frame` is
/// only used to label the error.
pub fn binarize(frame: usize, rgb: &[u8], pixel_count: usize) -> Result<Vec<bool>> {
    let expected = pixel_count * 3;
    if rgb.len() != expected {
        return Err(Error::LengthMismatch {
            frame,
            expected,
            actual: rgb.len(),
        });
    }

    let bits = rgb
        .chunks_exact(3)
        .map(|px| px.iter().any(|&c| c > BRIGHT_THRESHOLD))
        .collect();

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn any_bright_channel_sets_the_bit() {
        let rgb = [
            200, 0, 0, // red only
            0, 200, 0, // green only
            0, 0, 200, // blue only
            0, 0, 0, // black
            255, 255, 255, // white
        ];
        let bits = binarize(0, &rgb, 5).unwrap();
        assert_eq!(bits, vec![true, true, true, false, true]);
    }

    #[test]
    fn threshold_is_exclusive() {
        // 127 is dark, 128 is bright.
        let rgb = [127, 127, 127, 128, 0, 0, 0, 128, 0, 0, 0, 128];
        let bits = binarize(0, &rgb, 4).unwrap();
        assert_eq!(bits, vec![false, true, true, true]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let rgb = [0_u8; 7];
        let err = binarize(3, &rgb, 4).unwrap_err();
        match err {
            Error::LengthMismatch {
                frame,
                expected,
                actual,
            } => {
                assert_eq!(frame, 3);
                assert_eq!(expected, 12);
                assert_eq!(actual, 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
