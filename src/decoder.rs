// Command replay: expands a command list back into plain bytes.
//
// The LZ rule grows the buffer one byte at a time, so a copy that runs
// past the pre-copy end reads bytes it appended itself. Precomputing
// the copy region from a snapshot would break that.

use thiserror::Error;

use crate::command::Command;

/// Error type for command replay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// An LZ command referenced output that does not exist yet. The
    /// encoder never produces this; it signals a corrupted stream.
    #[error("lz offset {offset} out of range of {produced} produced bytes")]
    BadLzOffset { offset: u32, produced: usize },
}

/// Replay a command list into a plain byte buffer.
pub fn decode(commands: &[Command]) -> Result<Vec<u8>, DecodeError> {
    let mut out: Vec<u8> = Vec::new();
    for command in commands {
        match command {
            Command::Raw { data } => out.extend_from_slice(data),
            Command::Rle { chunk, count } => {
                out.reserve(chunk.len() * *count as usize);
                for _ in 0..*count {
                    out.extend_from_slice(chunk);
                }
            }
            Command::Lz { offset, length } => {
                let start = *offset as usize;
                if *length > 0 && start >= out.len() {
                    return Err(DecodeError::BadLzOffset {
                        offset: *offset,
                        produced: out.len(),
                    });
                }
                for i in 0..*length as usize {
                    let byte = out[start + i];
                    out.push(byte);
                }
            }
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
