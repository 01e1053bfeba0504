// Greedy encode loop with one-step lookahead.
//
// Walks the plain buffer keeping a pending raw run. At each position
// the best RLE/LZ candidate is ranked against both the raw extension
// and the best candidate one byte later; a compress command is emitted
// only when taking it now beats raw AND deferring by one byte would not
// net more total gain. The deferral check keeps a short greedy match
// from blocking a better match that starts one byte later.

use log::{debug, trace};
use thiserror::Error;

use crate::command::{Candidate, Command, MAX_RAW_LEN, best_candidate};
use crate::finder::{find_lz, find_rle};
use crate::hash::HashIndex;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Nothing to index or encode; callers must reject empty input.
    #[error("cannot encode an empty buffer")]
    EmptyInput,
}

// ---------------------------------------------------------------------------
// Encode loop
// ---------------------------------------------------------------------------

/// Encode a plain buffer into a command list.
///
/// The command list replays to exactly `plain` and serializes into the
/// fixed bitstream layout.
pub fn encode(plain: &[u8]) -> Result<Vec<Command>, EncodeError> {
    if plain.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    let index = HashIndex::build(plain);

    let mut output = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut pos = 0usize;

    while pos < plain.len() {
        let cur_raw = raw_candidate(&pending, &plain[pos..pos + 1]);
        let cur = best_compress_at(plain, &index, pos).unwrap_or_else(|| cur_raw.clone());

        let skip_raw = raw_candidate(&pending, &plain[pos..plain.len().min(pos + 2)]);
        let skip = best_compress_at(plain, &index, pos + 1).unwrap_or(skip_raw);

        if cur.gain > cur_raw.gain && cur.gain >= cur_raw.gain + skip.gain {
            // Taking the compress command now is strictly better than raw
            // and at least as good as deferring one byte.
            if !pending.is_empty() {
                output.push(Command::Raw {
                    data: std::mem::take(&mut pending),
                });
            }
            trace!(
                "pos {pos}: emit {} (gain {}, plain_len {})",
                output_kind(&cur.command),
                cur.gain,
                cur.plain_len
            );
            pos += cur.plain_len;
            output.push(cur.command);
        } else {
            pending.push(plain[pos]);
            pos += 1;
            if pending.len() >= MAX_RAW_LEN {
                // 7-bit length field exhausted.
                output.push(Command::Raw {
                    data: std::mem::take(&mut pending),
                });
            }
        }
    }

    if !pending.is_empty() {
        output.push(Command::Raw { data: pending });
    }
    debug!(
        "encoded {} plain bytes into {} commands",
        plain.len(),
        output.len()
    );
    Ok(output)
}

/// Raw continuation candidate: the pending run extended by `extra`.
/// A lone raw byte is penalized so a 1-byte RLE/LZ alternative cannot
/// tie with it.
fn raw_candidate(pending: &[u8], extra: &[u8]) -> Candidate {
    let mut data = Vec::with_capacity(pending.len() + extra.len());
    data.extend_from_slice(pending);
    data.extend_from_slice(extra);
    let gain = if data.len() <= 1 { -1 } else { 0 };
    Candidate {
        gain,
        plain_len: data.len(),
        command: Command::Raw { data },
    }
}

/// Best RLE/LZ candidate at `pos`, RLE candidates ranked first on ties.
fn best_compress_at(plain: &[u8], index: &HashIndex, pos: usize) -> Option<Candidate> {
    let tail = &plain[pos.min(plain.len())..];
    best_candidate(find_rle(tail).into_iter().chain(find_lz(plain, index, pos)))
}

fn output_kind(command: &Command) -> &'static str {
    match command {
        Command::Raw { .. } => "raw",
        Command::Rle { .. } => "rle",
        Command::Lz { .. } => "lz",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(encode(&[]), Err(EncodeError::EmptyInput));
    }

    #[test]
    fn single_byte_is_raw() {
        assert_eq!(encode(&[99]).unwrap(), vec![Command::Raw { data: vec![99] }]);
    }

    #[test]
    fn trailing_run_becomes_rle() {
        assert_eq!(
            encode(&[1, 2, 3, 3, 3, 3]).unwrap(),
            vec![
                Command::Raw { data: vec![1, 2] },
                Command::Rle {
                    chunk: vec![3],
                    count: 4
                },
            ]
        );
    }

    #[test]
    fn zero_gain_lz_is_suppressed() {
        // The repeated [1,2,3,4] would save nothing over raw, so the
        // whole input stays one raw run.
        let plain = [1, 2, 3, 4, 97, 98, 99, 1, 2, 3, 4];
        assert_eq!(
            encode(&plain).unwrap(),
            vec![Command::Raw {
                data: plain.to_vec()
            }]
        );
    }

    #[test]
    fn lookahead_defers_to_longer_match() {
        // Emitting the 4-byte match at the first [1,2,3,4] would block
        // the 7-byte match starting one byte later; the second 9 joins
        // the raw run instead.
        let plain = [
            1, 2, 3, 4, 5, 6, 7, 81, 82, 9, 1, 2, 3, 4, 83, 84, 9, 1, 2, 3, 4, 5, 6, 7,
        ];
        assert_eq!(
            encode(&plain).unwrap(),
            vec![
                Command::Raw {
                    data: vec![1, 2, 3, 4, 5, 6, 7, 81, 82, 9, 1, 2, 3, 4, 83, 84, 9]
                },
                Command::Lz {
                    offset: 0,
                    length: 7
                },
            ]
        );
    }

    #[test]
    fn equal_gain_at_next_position_does_not_defer() {
        let plain = [
            1, 2, 3, 4, 5, 99, 2, 3, 4, 5, 6, 7, 98, 98, 98, 98, 1, 2, 3, 4, 5, 6, 7,
        ];
        assert_eq!(
            encode(&plain).unwrap(),
            vec![
                Command::Raw {
                    data: vec![1, 2, 3, 4, 5, 99, 2, 3, 4, 5, 6, 7]
                },
                Command::Rle {
                    chunk: vec![98],
                    count: 4
                },
                Command::Lz {
                    offset: 0,
                    length: 5
                },
                Command::Raw { data: vec![6, 7] },
            ]
        );
    }

    #[test]
    fn equal_gain_tie_breaks_to_longer_plain_len() {
        // At the final block an RLE of [1,2,3] x3 and an LZ of length 8
        // carry the same gain; the RLE consumes one more byte and must
        // win for the greedy parse to stay stable.
        let plain = [99, 1, 2, 3, 1, 2, 3, 1, 2, 98, 1, 2, 3, 1, 2, 3, 1, 2, 3];
        assert_eq!(
            encode(&plain).unwrap(),
            vec![
                Command::Raw { data: vec![99] },
                Command::Rle {
                    chunk: vec![1, 2, 3],
                    count: 2
                },
                Command::Raw {
                    data: vec![1, 2, 98]
                },
                Command::Rle {
                    chunk: vec![1, 2, 3],
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn long_incompressible_input_flushes_at_field_limit() {
        // 300 distinct-ish bytes with no 4-byte repeats and no runs:
        // raw runs must flush at the 127-byte field ceiling.
        let plain: Vec<u8> = (0..300u32).map(|i| (i * 7 % 251) as u8).collect();
        let commands = encode(&plain).unwrap();
        let mut total = 0usize;
        for command in &commands {
            match command {
                Command::Raw { data } => {
                    assert!(!data.is_empty() && data.len() <= MAX_RAW_LEN);
                    total += data.len();
                }
                other => total += other.plain_len(),
            }
        }
        assert_eq!(total, plain.len());
    }
}
