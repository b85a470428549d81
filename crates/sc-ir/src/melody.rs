//! Decoded melody and the display state built from it.

use arrayvec::ArrayVec;
use core::fmt;

use crate::note::NoteButton;

/// Size of one note record in bytes.
pub const RECORD_SIZE: usize = 8;
/// Number of note records in the song buffer.
pub const RECORD_COUNT: usize = 16;
/// Size of the raw song buffer in bytes.
pub const SONG_BUFFER_SIZE: usize = RECORD_SIZE * RECORD_COUNT;
/// Number of notes shown in the overlay.
pub const MELODY_LEN: usize = 8;

/// Caption drawn to the left of the icon row.
pub const SONG_CAPTION: &str = "Your Scarecrow's Song: ";

/// Up to [`MELODY_LEN`] decoded slots in buffer order.
///
/// A slot holds `None` when the record that occupied it matched no button.
/// The length runs to the last matched slot, so trailing holes are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedMelody {
    slots: ArrayVec<Option<NoteButton>, MELODY_LEN>,
}

impl DecodedMelody {
    /// Build a melody from cursor-ordered slots.
    ///
    /// Anything past [`MELODY_LEN`] is ignored and trailing `None`s are trimmed.
    pub fn from_slots(slots: &[Option<NoteButton>]) -> Self {
        let slots = &slots[..slots.len().min(MELODY_LEN)];
        let len = slots.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        Self {
            slots: slots[..len].iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Button at `index`, or `None` for a hole or a slot past the end.
    pub fn get(&self, index: usize) -> Option<NoteButton> {
        self.slots.get(index).copied().flatten()
    }

    /// Raw slots including holes.
    pub fn slots(&self) -> &[Option<NoteButton>] {
        &self.slots
    }

    /// Number of slots that hold a button.
    pub fn matched(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl FromIterator<NoteButton> for DecodedMelody {
    fn from_iter<I: IntoIterator<Item = NoteButton>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().take(MELODY_LEN).map(Some).collect(),
        }
    }
}

impl fmt::Display for DecodedMelody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match slot {
                Some(button) => write!(f, "{}", button)?,
                None => f.write_str("_")?,
            }
        }
        Ok(())
    }
}

/// What the overlay draws: caption plus decoded notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongDisplay {
    pub caption: &'static str,
    pub notes: DecodedMelody,
}

impl SongDisplay {
    pub fn new(notes: DecodedMelody) -> Self {
        Self {
            caption: SONG_CAPTION,
            notes,
        }
    }
}
