// Compression command model and candidate ranking.
//
// The bitstream is a sequence of three record kinds:
//   - Raw: literal bytes, 7-bit length (length 0 ends the stream)
//   - Rle: a 1..=30 byte chunk repeated `count` times (10-bit count)
//   - Lz:  copy `length` bytes starting at absolute position `offset`
//          in the decoded buffer (16-bit offset, 10-bit length)
//
// Field-width ceilings live here; the stream module enforces them.

use std::cmp::Ordering;

/// Maximum RLE chunk length. The 5-bit chunk-size field stores
/// `chunk_len - 1`, and the value 31 is reserved to mark an LZ record.
pub const MAX_CHUNK_LEN: usize = 30;

/// Chunk-size field value marking an LZ record.
pub const LZ_SENTINEL: u8 = 0x1F;

/// Maximum RLE repeat count and LZ match length (10-bit field).
pub const MAX_PLAIN_COUNT: u32 = 0x3FF;

/// Maximum LZ offset (16-bit field).
pub const MAX_OFFSET: u32 = 0xFFFF;

/// Maximum raw run length (7-bit field, zero is the end-of-stream mark).
pub const MAX_RAW_LEN: usize = 0x7F;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One decoded compression command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Literal bytes copied to the output verbatim.
    Raw { data: Vec<u8> },
    /// `chunk` appended to the output `count` times.
    Rle { chunk: Vec<u8>, count: u32 },
    /// `length` bytes copied from absolute position `offset` of the output
    /// produced so far. The copy may run past the pre-copy end of the
    /// buffer, re-reading bytes it appended itself (cyclic self-copy).
    Lz { offset: u32, length: u32 },
}

impl Command {
    /// Number of plain bytes this command expands to.
    pub fn plain_len(&self) -> usize {
        match self {
            Self::Raw { data } => data.len(),
            Self::Rle { chunk, count } => chunk.len() * *count as usize,
            Self::Lz { length, .. } => *length as usize,
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// A scored candidate produced by the RLE/LZ finders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Bytes saved versus emitting the same span as raw literals.
    pub gain: i64,
    /// Plain bytes consumed if this candidate is emitted.
    pub plain_len: usize,
    /// The command to emit if this candidate wins.
    pub command: Command,
}

impl Candidate {
    /// Two-key ranking: higher gain wins, ties go to the longer plain span.
    ///
    /// The command itself never participates in the comparison.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.gain
            .cmp(&other.gain)
            .then(self.plain_len.cmp(&other.plain_len))
    }
}

/// Pick the best candidate by `rank`. The first of equally ranked
/// candidates wins, so callers control tie order by iteration order.
pub fn best_candidate<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut best: Option<Candidate> = None;
    for cand in candidates {
        match best {
            Some(ref b) if cand.rank(b) != Ordering::Greater => {}
            _ => best = Some(cand),
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(gain: i64, plain_len: usize, offset: u32) -> Candidate {
        Candidate {
            gain,
            plain_len,
            command: Command::Lz {
                offset,
                length: plain_len as u32,
            },
        }
    }

    #[test]
    fn plain_len_per_kind() {
        assert_eq!(Command::Raw { data: vec![1, 2, 3] }.plain_len(), 3);
        assert_eq!(
            Command::Rle {
                chunk: vec![7, 8],
                count: 5
            }
            .plain_len(),
            10
        );
        assert_eq!(
            Command::Lz {
                offset: 0,
                length: 9
            }
            .plain_len(),
            9
        );
    }

    #[test]
    fn rank_prefers_gain_then_plain_len() {
        assert_eq!(cand(2, 1, 0).rank(&cand(1, 9, 0)), Ordering::Greater);
        assert_eq!(cand(2, 8, 0).rank(&cand(2, 3, 0)), Ordering::Greater);
        assert_eq!(cand(2, 3, 0).rank(&cand(2, 3, 1)), Ordering::Equal);
    }

    #[test]
    fn best_candidate_keeps_first_on_tie() {
        let picked = best_candidate([cand(1, 4, 10), cand(1, 4, 20)]).unwrap();
        assert_eq!(picked.command, Command::Lz { offset: 10, length: 4 });
    }

    #[test]
    fn best_candidate_empty_is_none() {
        assert!(best_candidate(Vec::new()).is_none());
    }
}
