// Candidate search for the encode loop.
//
// Two finders, both returning every candidate they see rather than a
// single winner; losing candidates are weeded out by ranking in the
// encoder, not here.
//
// - `rle` — repeating-chunk matches at the start of the tail
// - `lz`  — back-reference matches via the prefix index

pub mod lz;
pub mod rle;

pub use lz::find_lz;
pub use rle::find_rle;
