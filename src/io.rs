// File-level helpers for packing and unpacking.
//
// Thin wrappers around the codec: `pack_file()` reads a plain file,
// encodes and serializes it, and writes the compressed stream;
// `unpack_file()` seeks to a block address inside a container file
// (typically a ROM), deserializes one compressed block, and writes the
// decoded bytes. Both return small stats structs for reporting.

use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::decoder::{self, DecodeError};
use crate::encoder::{self, EncodeError};
use crate::stream::{self, FieldOverflow, StreamUnderrun};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `pack_file()`.
#[derive(Debug, Clone)]
pub struct PackStats {
    /// Plain input size in bytes.
    pub plain_size: u64,
    /// Compressed output size in bytes, terminator included.
    pub packed_size: u64,
    /// Number of commands emitted.
    pub commands: usize,
}

/// Statistics returned by `unpack_file()`.
#[derive(Debug, Clone)]
pub struct UnpackStats {
    /// Compressed block size in bytes, terminator included.
    pub packed_size: u64,
    /// Decoded output size in bytes.
    pub output_size: u64,
    /// Number of commands replayed.
    pub commands: usize,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file-level operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File open, read, seek or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Encoding failed (empty input).
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    /// A command field exceeded its bit width.
    #[error("serialize error: {0}")]
    Overflow(#[from] FieldOverflow),
    /// The compressed block was truncated or corrupted.
    #[error("deserialize error: {0}")]
    Underrun(#[from] StreamUnderrun),
    /// Replaying the command list failed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// pack_file / unpack_file
// ---------------------------------------------------------------------------

/// Compress `plain_path` into a standalone compressed block at `out_path`.
pub fn pack_file(plain_path: &Path, out_path: &Path) -> Result<PackStats, IoError> {
    let plain = std::fs::read(plain_path)?;
    let commands = encoder::encode(&plain)?;
    let packed = stream::serialize(&commands)?;
    debug!(
        "packed {} -> {} bytes ({} commands)",
        plain.len(),
        packed.len(),
        commands.len()
    );

    let mut writer = BufWriter::new(File::create(out_path)?);
    writer.write_all(&packed)?;
    writer.flush()?;

    Ok(PackStats {
        plain_size: plain.len() as u64,
        packed_size: packed.len() as u64,
        commands: commands.len(),
    })
}

/// Decompress one block starting at byte `address` of `packed_path`,
/// writing the plain bytes to `out_path`.
pub fn unpack_file(
    packed_path: &Path,
    address: u64,
    out_path: &Path,
) -> Result<UnpackStats, IoError> {
    let mut file = File::open(packed_path)?;
    file.seek(SeekFrom::Start(address))?;
    let mut packed = Vec::new();
    file.read_to_end(&mut packed)?;

    let (commands, consumed) = stream::deserialize(&packed)?;
    let plain = decoder::decode(&commands)?;
    debug!(
        "unpacked {} -> {} bytes ({} commands) at {address:#X}",
        consumed,
        plain.len(),
        commands.len()
    );

    let mut writer = BufWriter::new(File::create(out_path)?);
    writer.write_all(&plain)?;
    writer.flush()?;

    Ok(UnpackStats {
        packed_size: consumed as u64,
        output_size: plain.len() as u64,
        commands: commands.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
