// Bit-exact bitstream serialization and deserialization.
//
// Record layouts (multi-byte fields little-endian):
//
//   Raw   0LLLLLLL                          L literal bytes follow;
//                                           L = 0 ends the stream
//   Rle   1CCCCCHH NNNNNNNN                 C = chunkLen-1 (5 bits),
//                                           HH:NNNNNNNN = 10-bit count,
//                                           chunk bytes follow
//   Lz    111111HH NNNNNNNN OOOOOOOO OOOOOOOO
//                                           chunk-size field pinned to
//                                           the 31 sentinel, 10-bit
//                                           length, 16-bit offset
//
// Every stream ends with a single 0x00 terminator byte.

use thiserror::Error;

use crate::command::{
    Command, LZ_SENTINEL, MAX_CHUNK_LEN, MAX_OFFSET, MAX_PLAIN_COUNT, MAX_RAW_LEN,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A command field exceeded its bit width. Indicates a bug in whatever
/// built the command list, not a recoverable runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} value {value} does not fit its bit field")]
pub struct FieldOverflow {
    pub field: &'static str,
    pub value: u64,
}

/// The compressed stream ended before a record was complete.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("compressed stream ended prematurely at offset {offset}, {needed} more bytes needed")]
pub struct StreamUnderrun {
    pub offset: usize,
    pub needed: usize,
}

// ---------------------------------------------------------------------------
// Serialize
// ---------------------------------------------------------------------------

/// Serialize a command list into compressed stream bytes, including the
/// trailing end-of-stream byte.
pub fn serialize(commands: &[Command]) -> Result<Vec<u8>, FieldOverflow> {
    let mut out = Vec::new();
    for command in commands {
        match command {
            Command::Raw { data } => {
                if data.is_empty() || data.len() > MAX_RAW_LEN {
                    return Err(FieldOverflow {
                        field: "raw length",
                        value: data.len() as u64,
                    });
                }
                out.push(data.len() as u8);
                out.extend_from_slice(data);
            }
            Command::Rle { chunk, count } => {
                if chunk.is_empty() || chunk.len() > MAX_CHUNK_LEN {
                    return Err(FieldOverflow {
                        field: "rle chunk length",
                        value: chunk.len() as u64,
                    });
                }
                if *count > MAX_PLAIN_COUNT {
                    return Err(FieldOverflow {
                        field: "rle count",
                        value: u64::from(*count),
                    });
                }
                out.push(0x80 | ((chunk.len() as u8 - 1) << 2) | (count >> 8) as u8);
                out.push((count & 0xFF) as u8);
                out.extend_from_slice(chunk);
            }
            Command::Lz { offset, length } => {
                if *length > MAX_PLAIN_COUNT {
                    return Err(FieldOverflow {
                        field: "lz length",
                        value: u64::from(*length),
                    });
                }
                if *offset > MAX_OFFSET {
                    return Err(FieldOverflow {
                        field: "lz offset",
                        value: u64::from(*offset),
                    });
                }
                out.push(0x80 | (LZ_SENTINEL << 2) | (length >> 8) as u8);
                out.push((length & 0xFF) as u8);
                out.extend_from_slice(&(*offset as u16).to_le_bytes());
            }
        }
    }
    out.push(0);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Deserialize
// ---------------------------------------------------------------------------

/// Deserialize compressed stream bytes into a command list.
///
/// Returns the commands and the number of bytes consumed, including the
/// end-of-stream byte. Trailing bytes past the terminator are ignored.
/// An explicit loop rather than recursion; record count is unbounded.
pub fn deserialize(stream: &[u8]) -> Result<(Vec<Command>, usize), StreamUnderrun> {
    let mut commands = Vec::new();
    let mut cursor = 0usize;
    loop {
        let flag = read(stream, &mut cursor, 1)?[0];
        if flag & 0x80 != 0 {
            let chunk_size = (flag & 0x7F) >> 2;
            let count = (u32::from(flag & 0x03) << 8) | u32::from(read(stream, &mut cursor, 1)?[0]);
            if chunk_size == LZ_SENTINEL {
                let offs = read(stream, &mut cursor, 2)?;
                commands.push(Command::Lz {
                    offset: u32::from(u16::from_le_bytes([offs[0], offs[1]])),
                    length: count,
                });
            } else {
                let chunk = read(stream, &mut cursor, chunk_size as usize + 1)?.to_vec();
                commands.push(Command::Rle { chunk, count });
            }
        } else {
            let len = (flag & 0x7F) as usize;
            if len == 0 {
                return Ok((commands, cursor));
            }
            let data = read(stream, &mut cursor, len)?.to_vec();
            commands.push(Command::Raw { data });
        }
    }
}

fn read<'a>(stream: &'a [u8], cursor: &mut usize, n: usize) -> Result<&'a [u8], StreamUnderrun> {
    let remaining = stream.len() - *cursor;
    if remaining < n {
        return Err(StreamUnderrun {
            offset: *cursor,
            needed: n - remaining,
        });
    }
    let bytes = &stream[*cursor..*cursor + n];
    *cursor += n;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
