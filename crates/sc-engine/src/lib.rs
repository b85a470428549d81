//! State tracking for the Scarecrow's Song overlay.
//!
//! Polls emulator memory once per logic tick to find out whether the
//! Quest Status page is open and keeps the decoded song for the renderer.

pub mod addresses;
mod memory;
mod screen;
mod tracker;

pub use memory::{GameCore, RamSnapshot, Rdram, SnapshotCore, RDRAM_SIZE};
pub use screen::{QuestStatusScreen, ScreenSample, ScreenTransition};
pub use tracker::{StateTracker, TickSummary};

/// Error raised by a logic tick.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("failed to decode scarecrow song: {0}")]
    Decode(#[from] sc_formats::FormatError),
}
