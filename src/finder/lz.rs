// LZ candidate search.
//
// The prefix index narrows the search to earlier positions sharing a
// 4-byte prefix; the true match length is then measured by direct
// comparison. The needle side bounds the comparison, so a source that
// overlaps the needle keeps matching into its own copy — the same
// self-extending semantics the decoder replays.

use crate::command::{Candidate, Command, MAX_PLAIN_COUNT};
use crate::hash::HashIndex;

/// LZ record cost in bytes: flag, length, and a two-byte offset.
const LZ_OVERHEAD: i64 = 4;

/// Enumerate LZ candidates matching at `pos` in `haystack`.
///
/// Returns no candidates when `pos` falls outside the haystack or the
/// indexed window.
pub fn find_lz(haystack: &[u8], index: &HashIndex, pos: usize) -> Vec<Candidate> {
    if pos >= haystack.len().min(index.len()) {
        return Vec::new();
    }
    let mut candidates = Vec::new();
    for offset in index.matches_before(pos) {
        let length = common_run_len(haystack, offset, pos);
        candidates.push(Candidate {
            gain: length as i64 - LZ_OVERHEAD,
            plain_len: length,
            command: Command::Lz {
                offset: offset as u32,
                length: length as u32,
            },
        });
    }
    candidates
}

/// Longest common run of `haystack[offset..]` and `haystack[pos..]`,
/// limited by the bytes remaining at `pos` and the 10-bit length field.
fn common_run_len(haystack: &[u8], offset: usize, pos: usize) -> usize {
    let limit = (haystack.len() - pos).min(MAX_PLAIN_COUNT as usize);
    let mut len = 0;
    while len < limit && haystack[offset + len] == haystack[pos + len] {
        len += 1;
    }
    len
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
