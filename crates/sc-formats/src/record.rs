//! Note record layout of the song buffer.
//!
//! The buffer is 16 records of 8 bytes, stored in the console's native
//! big-endian byte order:
//!
//! | Offset | Width | Field    |
//! |--------|-------|----------|
//! | 0x0    | 1     | note     |
//! | 0x1    | 1     | unused   |
//! | 0x2    | 2     | duration |
//! | 0x4    | 1     | volume   |
//! | 0x5    | 1     | vibrato  |
//! | 0x6    | 1     | pitch    |
//! | 0x7    | 1     | special  |

use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use sc_ir::{NoteCode, NoteModifier, RECORD_COUNT, RECORD_SIZE, SONG_BUFFER_SIZE};

use crate::FormatError;

/// One 8-byte note record.
#[derive(BinRead, BinWrite, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[brw(big)]
pub struct NoteRecord {
    pub note: u8,
    pub unused: u8,
    pub duration: u16,
    pub volume: u8,
    pub vibrato: u8,
    pub pitch: u8,
    pub special: u8,
}

impl NoteRecord {
    /// A record with the given code and modifier, all other fields zero.
    pub const fn new(code: NoteCode, modifier: NoteModifier) -> Self {
        Self {
            note: code.0,
            unused: 0,
            duration: 0,
            volume: 0,
            vibrato: 0,
            pitch: 0,
            special: modifier.0,
        }
    }

    /// A rest.
    pub const fn silence() -> Self {
        Self::new(NoteCode::SILENCE, NoteModifier::NONE)
    }

    pub const fn code(&self) -> NoteCode {
        NoteCode(self.note)
    }

    pub const fn modifier(&self) -> NoteModifier {
        NoteModifier(self.special)
    }
}

/// Parse every whole record in `buffer`, in order.
///
/// Trailing bytes that do not fill a record are ignored.
pub fn read_records(buffer: &[u8]) -> Result<Vec<NoteRecord>, FormatError> {
    let count = buffer.len() / RECORD_SIZE;
    let mut reader = Cursor::new(&buffer[..count * RECORD_SIZE]);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(NoteRecord::read(&mut reader)?);
    }
    Ok(records)
}

/// Lay `records` out as a full song buffer, padding with rests.
pub fn encode_records(records: &[NoteRecord]) -> Result<[u8; SONG_BUFFER_SIZE], FormatError> {
    if records.len() > RECORD_COUNT {
        return Err(FormatError::TooManyRecords {
            count: records.len(),
            max: RECORD_COUNT,
        });
    }

    let mut buffer = [0u8; SONG_BUFFER_SIZE];
    let mut writer = Cursor::new(&mut buffer[..]);
    let padding = core::iter::repeat(NoteRecord::silence()).take(RECORD_COUNT - records.len());
    for record in records.iter().copied().chain(padding) {
        record.write(&mut writer)?;
    }
    Ok(buffer)
}
