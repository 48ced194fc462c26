use crate::error::{Error, Result};

/// Longest run a single record can hold.
///
/// A logical run of identical pixels longer than this is split into multiple
/// adjacent records with the same value, broken at exactly this boundary.
/// The split position is part of the wire format.
pub const MAX_RUN_LENGTH: u16 = 65535;

/// One run of identical bits: `length` copies of `value`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// 0 or 1.
    pub value: u8,
    /// Always >= 1.
    pub length: u16,
}

impl Run {
    pub fn new(value: bool, length: u16) -> Self {
        Self {
            value: value as u8,
            length,
        }
    }
}

/// Run-length encode one frame's bit sequence.
///
/// Scans left to right: a run closes when the value changes or when its
/// length saturates [`MAX_RUN_LENGTH`]; the final open run is always emitted.
/// An empty sequence is a configuration error, not a valid frame.
pub fn encode_runs(frame: usize, bits: &[bool]) -> Result<Vec<Run>> {
    let Some(&first) = bits.first() else {
        return Err(Error::EmptySequence { frame });
    };

    let mut runs = Vec::new();
    let mut value = first;
    let mut length: u16 = 1;

    for &bit in &bits[1..] {
        if bit != value {
            runs.push(Run::new(value, length));
            value = bit;
            length = 1;
        } else if length == MAX_RUN_LENGTH {
            // Saturation split: same value, forced new record.
            runs.push(Run::new(value, length));
            length = 1;
        } else {
            length += 1;
        }
    }
    runs.push(Run::new(value, length));

    Ok(runs)
}

/// Expand runs back into the bit sequence they encode. Inverse of
/// [`encode_runs`]; mostly useful for verification.
pub fn expand_runs(runs: &[Run]) -> Vec<bool> {
    let total: usize = runs.iter().map(|r| r.length as usize).sum();
    let mut bits = Vec::with_capacity(total);
    for run in runs {
        bits.extend(std::iter::repeat(run.value != 0).take(run.length as usize));
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&[true], vec![Run::new(true, 1)])]
    #[case(&[false], vec![Run::new(false, 1)])]
    #[case(&[true, false], vec![Run::new(true, 1), Run::new(false, 1)])]
    #[case(&[false, false, false, false], vec![Run::new(false, 4)])]
    #[case(
        &[true, true, false, true, true, true],
        vec![Run::new(true, 2), Run::new(false, 1), Run::new(true, 3)]
    )]
    fn encodes_expected_runs(#[case] bits: &[bool], #[case] expected: Vec<Run>) {
        assert_eq!(encode_runs(0, bits).unwrap(), expected);
    }

    #[test]
    fn empty_sequence_is_an_error() {
        assert!(matches!(
            encode_runs(7, &[]),
            Err(Error::EmptySequence { frame: 7 })
        ));
    }

    #[test]
    fn saturation_split_at_65536() {
        let bits = vec![true; 65536];
        let runs = encode_runs(0, &bits).unwrap();
        assert_eq!(runs, vec![Run::new(true, 65535), Run::new(true, 1)]);
    }

    #[test]
    fn split_boundary_is_exact() {
        // 65535 + 2 identical bits, then one different.
        let mut bits = vec![false; 65537];
        bits.push(true);
        let runs = encode_runs(0, &bits).unwrap();
        assert_eq!(
            runs,
            vec![
                Run::new(false, 65535),
                Run::new(false, 2),
                Run::new(true, 1)
            ]
        );
    }

    #[test]
    fn round_trips_and_preserves_length() {
        // A handful of shapes, including runs that straddle the cap.
        let cases: Vec<Vec<bool>> = vec![
            vec![true],
            vec![false; 100],
            (0..1000).map(|i| i % 3 == 0).collect(),
            {
                let mut v = vec![true; 70000];
                v.extend(vec![false; 5]);
                v
            },
        ];

        for bits in cases {
            let runs = encode_runs(0, &bits).unwrap();

            let total: usize = runs.iter().map(|r| r.length as usize).sum();
            assert_eq!(total, bits.len());

            // Adjacent runs only share a value across a saturation split.
            for pair in runs.windows(2) {
                if pair[0].value == pair[1].value {
                    assert_eq!(pair[0].length, MAX_RUN_LENGTH);
                }
            }

            assert_eq!(expand_runs(&runs), bits);
        }
    }
}
