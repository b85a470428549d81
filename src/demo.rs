//! Memory images for the viewer and the CLI.

use std::fs;
use std::io;
use std::path::Path;

use sc_engine::addresses::*;
use sc_engine::{RamSnapshot, SnapshotCore};
use sc_formats::{encode_records, FormatError, NoteRecord};
use sc_ir::{NoteCode, NoteModifier};

/// Song recorded in the demo scene: two rests and a sharpened C-right
/// between eight buttons.
pub fn demo_records() -> Vec<NoteRecord> {
    let plain = |code| NoteRecord::new(code, NoteModifier::NONE);
    vec![
        plain(NoteCode::C_UP),
        plain(NoteCode::C_LEFT),
        NoteRecord::silence(),
        plain(NoteCode::A),
        plain(NoteCode::C_DOWN),
        NoteRecord::new(NoteCode::C_RIGHT_SHARP, NoteModifier::SHARPENED),
        NoteRecord::silence(),
        plain(NoteCode::C_UP),
        plain(NoteCode::C_LEFT),
        plain(NoteCode::A),
    ]
}

/// Paused game on the Quest Status page with the demo song recorded as a
/// child.
pub fn demo_core(save_context: u32) -> Result<SnapshotCore, FormatError> {
    let buffer = encode_records(&demo_records())?;
    let mut core = SnapshotCore::new(RamSnapshot::new(), save_context);
    open_quest_status(&mut core);
    core.ram
        .write_u16(save_context.wrapping_add(SCARECROW_SONG_CHILD_FLAG), 1);
    core.ram
        .write_bytes(save_context.wrapping_add(SCARECROW_SONG), &buffer);
    Ok(core)
}

/// Load a raw big-endian RDRAM dump.
pub fn load_dump(path: &Path, save_context: u32) -> io::Result<SnapshotCore> {
    let data = fs::read(path)?;
    tracing::info!(path = %path.display(), bytes = data.len(), "loaded RDRAM dump");
    Ok(SnapshotCore::new(RamSnapshot::from_bytes(data), save_context))
}

/// Pause the game and put the pause menu on the Quest Status page.
pub fn open_quest_status(core: &mut SnapshotCore) {
    core.paused = true;
    core.ram.write_u8(PAUSE_STATE, PAUSE_STATE_OPEN);
    core.ram.write_u8(PAUSE_MAIN_STATE, 0);
    core.ram.write_u8(PAUSE_PAGE, PAUSE_PAGE_QUEST_STATUS);
}

/// Leave the pause menu.
pub fn close_pause_menu(core: &mut SnapshotCore) {
    core.paused = false;
    core.ram.write_u8(PAUSE_STATE, 0);
}
