// RLE candidate search.
//
// For each chunk length 1..=30, counts how many consecutive whole
// chunks at the start of the tail equal the leading chunk. One
// candidate is produced per chunk length even when the count is 0 or 1;
// such candidates carry a non-positive gain and lose the ranking.

use crate::command::{Candidate, Command, MAX_CHUNK_LEN, MAX_PLAIN_COUNT};

/// RLE header cost in bytes (flag + count), excluding the chunk itself.
const RLE_OVERHEAD: usize = 2;

/// Enumerate RLE candidates matching at the start of `tail`.
pub fn find_rle(tail: &[u8]) -> Vec<Candidate> {
    if tail.is_empty() {
        return Vec::new();
    }
    let max_chunk = MAX_CHUNK_LEN.min(tail.len());
    let mut candidates = Vec::with_capacity(max_chunk);
    for chunk_len in 1..=max_chunk {
        let chunk = &tail[..chunk_len];
        let mut count: u32 = 0;
        // chunks_exact drops the ragged final group, which can never
        // equal a whole chunk anyway.
        for group in tail.chunks_exact(chunk_len) {
            if count >= MAX_PLAIN_COUNT || group != chunk {
                break;
            }
            count += 1;
        }
        let plain_len = chunk_len * count as usize;
        let gain = plain_len as i64 - (RLE_OVERHEAD + chunk_len) as i64;
        candidates.push(Candidate {
            gain,
            plain_len,
            command: Command::Rle {
                chunk: chunk.to_vec(),
                count,
            },
        });
    }
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
