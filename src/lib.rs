//! bbpack: Raw/RLE/LZ bitstream codec for Battle B-Daman GBA data.
//!
//! The crate provides:
//! - The encoding pipeline (`hash`, `finder`, `encoder`)
//! - Bit-exact stream serialization (`stream`)
//! - Command replay back to plain bytes (`decoder`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! let plain = b"spam spam spam spam and eggs";
//!
//! let commands = bbpack::encode(plain).unwrap();
//! let packed = bbpack::serialize(&commands).unwrap();
//!
//! let (replayed, consumed) = bbpack::deserialize(&packed).unwrap();
//! assert_eq!(consumed, packed.len());
//! assert_eq!(bbpack::decode(&replayed).unwrap(), plain);
//! ```

pub mod command;
pub mod decoder;
pub mod encoder;
pub mod finder;
pub mod hash;
pub mod io;
pub mod stream;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export the pipeline entry points for convenience.
pub use command::{Candidate, Command};
pub use decoder::decode;
pub use encoder::encode;
pub use stream::{deserialize, serialize};
