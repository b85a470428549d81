//! Melody decoder: song buffer to ocarina buttons.

use sc_ir::{DecodedMelody, NoteButton, NoteCode, NoteModifier, MELODY_LEN};

use crate::record::read_records;
use crate::FormatError;

/// Map a note code and its modifier to the button it is played with.
///
/// Code 10 is both C-right-sharp and C-left-flat. It only reads as C-right
/// with a SHARPENED modifier and as C-left with a FLATTENED one; with any
/// other modifier it matches nothing.
pub fn classify(code: NoteCode, modifier: NoteModifier) -> Option<NoteButton> {
    match code {
        NoteCode::A_FLAT | NoteCode::A | NoteCode::A_SHARP => Some(NoteButton::NoteA),
        NoteCode::C_DOWN_FLAT | NoteCode::C_DOWN | NoteCode::C_DOWN_SHARP => {
            Some(NoteButton::NoteCDown)
        }
        NoteCode::C_RIGHT_FLAT | NoteCode::C_RIGHT => Some(NoteButton::NoteCRight),
        NoteCode::C_RIGHT_SHARP if modifier == NoteModifier::SHARPENED => {
            Some(NoteButton::NoteCRight)
        }
        NoteCode::C_LEFT_FLAT if modifier == NoteModifier::FLATTENED => {
            Some(NoteButton::NoteCLeft)
        }
        NoteCode::C_LEFT | NoteCode::C_LEFT_SHARP => Some(NoteButton::NoteCLeft),
        NoteCode::C_UP_FLAT | NoteCode::C_UP | NoteCode::C_UP_SHARP => Some(NoteButton::NoteCUp),
        _ => None,
    }
}

/// Decode the first [`MELODY_LEN`] non-silent notes of a song buffer.
///
/// Every non-silent record takes a slot, even when it matches no button;
/// such slots stay empty. Rests take no slot. The buffer is scanned once.
pub fn decode_melody(buffer: &[u8]) -> Result<DecodedMelody, FormatError> {
    let mut slots = [None; MELODY_LEN];
    let mut cursor = 0;

    for record in read_records(buffer)? {
        if cursor == MELODY_LEN {
            break;
        }
        if record.code().is_silence() {
            continue;
        }
        slots[cursor] = classify(record.code(), record.modifier());
        cursor += 1;
    }

    Ok(DecodedMelody::from_slots(&slots[..cursor]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use NoteButton::*;

    #[test]
    fn classify_plain_codes() {
        let none = NoteModifier::NONE;
        assert_eq!(classify(NoteCode::A_FLAT, none), Some(NoteA));
        assert_eq!(classify(NoteCode::A_SHARP, none), Some(NoteA));
        assert_eq!(classify(NoteCode::C_DOWN, none), Some(NoteCDown));
        assert_eq!(classify(NoteCode::C_RIGHT_FLAT, none), Some(NoteCRight));
        assert_eq!(classify(NoteCode::C_RIGHT, none), Some(NoteCRight));
        assert_eq!(classify(NoteCode::C_LEFT, none), Some(NoteCLeft));
        assert_eq!(classify(NoteCode::C_LEFT_SHARP, none), Some(NoteCLeft));
        assert_eq!(classify(NoteCode::C_UP_FLAT, none), Some(NoteCUp));
        assert_eq!(classify(NoteCode::C_UP_SHARP, none), Some(NoteCUp));
    }

    #[test]
    fn classify_code_ten_depends_on_modifier() {
        assert_eq!(classify(NoteCode(10), NoteModifier::SHARPENED), Some(NoteCRight));
        assert_eq!(classify(NoteCode(10), NoteModifier::FLATTENED), Some(NoteCLeft));
        assert_eq!(classify(NoteCode(10), NoteModifier::NONE), None);
        assert_eq!(classify(NoteCode(10), NoteModifier::CONTINUE_SILENCE), None);
    }

    #[test]
    fn modifier_is_ignored_outside_code_ten() {
        assert_eq!(classify(NoteCode::C_RIGHT, NoteModifier::FLATTENED), Some(NoteCRight));
        assert_eq!(classify(NoteCode::C_LEFT, NoteModifier::SHARPENED), Some(NoteCLeft));
    }

    #[test]
    fn classify_unassigned_codes() {
        assert_eq!(classify(NoteCode::NONE, NoteModifier::NONE), None);
        assert_eq!(classify(NoteCode(7), NoteModifier::NONE), None);
        assert_eq!(classify(NoteCode(16), NoteModifier::NONE), None);
        assert_eq!(classify(NoteCode::SILENCE, NoteModifier::NONE), None);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        assert!(decode_melody(&[]).unwrap().is_empty());
    }
}
