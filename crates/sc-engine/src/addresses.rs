//! Fixed RDRAM addresses read by the tracker (NTSC 1.0).

/// Pause menu state byte; 0x06 once the menu has finished opening.
pub const PAUSE_STATE: u32 = 0x801D_8DD5;
pub const PAUSE_STATE_OPEN: u8 = 0x06;

/// Pause menu sub-state byte; 0x01 means the page is not settled.
pub const PAUSE_MAIN_STATE: u32 = 0x801D_8DE5;
pub const PAUSE_MAIN_STATE_BUSY: u8 = 0x01;

/// Selected pause page; 0x02 is Quest Status.
pub const PAUSE_PAGE: u32 = 0x801D_8DE9;
pub const PAUSE_PAGE_QUEST_STATUS: u8 = 0x02;

/// Offset in the save context of the u16 "song recorded as child" flag.
pub const SCARECROW_SONG_CHILD_FLAG: u32 = 0x12C4;

/// Offset in the save context of the 0x80-byte scarecrow song.
pub const SCARECROW_SONG: u32 = 0x12C6;

/// Save context base for the NTSC 1.0 release.
pub const DEFAULT_SAVE_CONTEXT: u32 = 0x8011_A5D0;
