//! Core types for the Scarecrow's Song overlay.
//!
//! Note codes and modifier flags as the game stores them, the five ocarina
//! buttons they map to, and the decoded melody the overlay displays.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod melody;
mod note;

pub use melody::{
    DecodedMelody, SongDisplay, MELODY_LEN, RECORD_COUNT, RECORD_SIZE, SONG_BUFFER_SIZE,
    SONG_CAPTION,
};
pub use note::{NoteButton, NoteCode, NoteModifier, UnknownButton};
