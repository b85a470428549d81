//! Song buffer parsing for the Scarecrow's Song overlay.
//!
//! Reads the 128-byte note buffer from save data into records and decodes
//! them into ocarina buttons.

mod decoder;
mod record;

pub use decoder::{classify, decode_melody};
pub use record::{encode_records, read_records, NoteRecord};

/// Error type for song buffer parsing.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// More records than fit in a song buffer
    #[error("{count} note records do not fit in a song buffer of {max}")]
    TooManyRecords { count: usize, max: usize },
    /// Underlying read/write failure
    #[error("note record I/O: {0}")]
    Io(#[from] binrw::Error),
}
