//! Note codes, modifier flags and the playable buttons they map to.

use core::fmt;
use core::str::FromStr;

/// Pitch/rest code stored in the first byte of a note record.
///
/// A newtype rather than an enum because the game gives two names to the
/// same value: `C_RIGHT_SHARP` and `C_LEFT_FLAT` are both 10, and only the
/// record's modifier byte tells them apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoteCode(pub u8);

impl NoteCode {
    pub const NONE: Self = Self(0);
    pub const A_FLAT: Self = Self(1);
    pub const A: Self = Self(2);
    pub const A_SHARP: Self = Self(3);
    pub const C_DOWN_FLAT: Self = Self(4);
    pub const C_DOWN: Self = Self(5);
    pub const C_DOWN_SHARP: Self = Self(6);
    pub const C_RIGHT_FLAT: Self = Self(8);
    pub const C_RIGHT: Self = Self(9);
    pub const C_RIGHT_SHARP: Self = Self(10);
    pub const C_LEFT_FLAT: Self = Self(10);
    pub const C_LEFT: Self = Self(11);
    pub const C_LEFT_SHARP: Self = Self(12);
    pub const C_UP_FLAT: Self = Self(13);
    pub const C_UP: Self = Self(14);
    pub const C_UP_SHARP: Self = Self(15);
    pub const SILENCE: Self = Self(0xFF);

    /// Returns true for the rest code.
    pub const fn is_silence(self) -> bool {
        self.0 == Self::SILENCE.0
    }
}

impl From<u8> for NoteCode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Modifier byte (`special`) of a note record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoteModifier(pub u8);

impl NoteModifier {
    pub const NONE: Self = Self(0x00);
    pub const FLATTENED: Self = Self(0x40);
    pub const SHARPENED: Self = Self(0x80);
    pub const CONTINUE_SILENCE: Self = Self(0xC0);
}

impl From<u8> for NoteModifier {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// One of the five ocarina buttons a note is played with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoteButton {
    NoteA,
    NoteCDown,
    NoteCRight,
    NoteCLeft,
    NoteCUp,
}

impl NoteButton {
    /// All buttons, in the order the classifier tries them.
    pub const ALL: [NoteButton; 5] = [
        NoteButton::NoteA,
        NoteButton::NoteCDown,
        NoteButton::NoteCRight,
        NoteButton::NoteCLeft,
        NoteButton::NoteCUp,
    ];

    /// Symbolic id used by sprite maps and logs.
    pub const fn id(self) -> &'static str {
        match self {
            NoteButton::NoteA => "note_a",
            NoteButton::NoteCDown => "note_c_down",
            NoteButton::NoteCRight => "note_c_right",
            NoteButton::NoteCLeft => "note_c_left",
            NoteButton::NoteCUp => "note_c_up",
        }
    }
}

impl fmt::Display for NoteButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown button id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownButton;

impl fmt::Display for UnknownButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown note button id")
    }
}

impl FromStr for NoteButton {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteButton::ALL
            .into_iter()
            .find(|b| b.id() == s)
            .ok_or(UnknownButton)
    }
}
