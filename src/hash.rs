// Prefix index over the LZ search window.
//
// Buckets every position of the first 65536 input bytes (the widest
// representable LZ offset, plus one) by the 4 bytes starting there.
// An LZ record costs a fixed 4-byte header, so only matches of at least
// 4 bytes can win; indexing shorter prefixes would be wasted work.
//
// Keys are exact length-tagged prefixes, so a lookup never yields a
// position whose prefix differs; match length is still measured by
// direct comparison in the LZ finder.

use std::collections::HashMap;

use crate::command::MAX_OFFSET;

/// Byte length of the indexed prefix.
pub const PREFIX_LEN: usize = 4;

/// Per-position prefix buckets over the indexed window.
pub struct HashIndex {
    /// Prefix key for each indexed position.
    keys: Vec<u64>,
    /// Positions sharing a key, ascending.
    buckets: HashMap<u64, Vec<u32>>,
}

impl HashIndex {
    /// Build the index over at most the first `MAX_OFFSET + 1` bytes of
    /// `plain`. Positions past that window are never match sources; the
    /// 16-bit offset field could not address them.
    pub fn build(plain: &[u8]) -> Self {
        let window = &plain[..plain.len().min(MAX_OFFSET as usize + 1)];
        let mut keys = Vec::with_capacity(window.len());
        let mut buckets: HashMap<u64, Vec<u32>> = HashMap::new();
        for pos in 0..window.len() {
            let key = prefix_key(&window[pos..]);
            keys.push(key);
            buckets.entry(key).or_default().push(pos as u32);
        }
        Self { keys, buckets }
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the window holds no positions.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Indexed positions before `pos` that share `pos`'s prefix key,
    /// in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`; callers bound-check first.
    pub fn matches_before(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        let key = self.keys[pos];
        self.buckets
            .get(&key)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(|&p| p as usize)
            .take_while(move |&p| p < pos)
    }
}

/// Length-tagged key over the first `PREFIX_LEN` bytes of `tail`.
/// The leading 1 bit keeps a short tail prefix distinct from any longer
/// prefix with the same bytes.
fn prefix_key(tail: &[u8]) -> u64 {
    tail.iter()
        .take(PREFIX_LEN)
        .fold(1u64, |key, &b| (key << 8) | u64::from(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
