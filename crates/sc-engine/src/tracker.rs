//! Per-logic-tick tracker for the scarecrow song display.

use sc_formats::decode_melody;
use sc_ir::{SongDisplay, SONG_BUFFER_SIZE};

use crate::addresses::{SCARECROW_SONG, SCARECROW_SONG_CHILD_FLAG};
use crate::memory::GameCore;
use crate::screen::{QuestStatusScreen, ScreenSample, ScreenTransition};
use crate::TrackerError;

/// What changed on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub transition: Option<ScreenTransition>,
    pub display_updated: bool,
}

/// Reads screen and save state every logic tick and keeps the song display.
///
/// The display state is only replaced, never cleared: after the screen
/// closes the last decoded song stays around until the next refresh.
#[derive(Clone, Debug)]
pub struct StateTracker {
    screen: QuestStatusScreen,
    child_recorded: bool,
    raw_song: [u8; SONG_BUFFER_SIZE],
    display: Option<SongDisplay>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            screen: QuestStatusScreen::default(),
            child_recorded: false,
            raw_song: [0; SONG_BUFFER_SIZE],
            display: None,
        }
    }

    /// Run one logic tick against live memory.
    ///
    /// On a decode error the screen flag, child flag and raw buffer are
    /// already refreshed; only the display state keeps its old value.
    pub fn on_tick<C: GameCore + ?Sized>(&mut self, core: &C) -> Result<TickSummary, TrackerError> {
        let transition = self.screen.update(&ScreenSample::read(core));
        match transition {
            Some(ScreenTransition::Opened) => tracing::debug!("quest status screen opened"),
            Some(ScreenTransition::Closed) => tracing::debug!("quest status screen closed"),
            None => {}
        }

        let base = core.save_context();
        self.child_recorded = core.read_u16(base.wrapping_add(SCARECROW_SONG_CHILD_FLAG)) == 1;
        core.read_into(base.wrapping_add(SCARECROW_SONG), &mut self.raw_song);

        let mut summary = TickSummary {
            transition,
            display_updated: false,
        };

        if self.screen.is_shown() && self.child_recorded && self.has_song() {
            let notes = decode_melody(&self.raw_song)?;
            if self.display.as_ref().map(|d| &d.notes) != Some(&notes) {
                tracing::debug!(%notes, "scarecrow song decoded");
            }
            self.display = Some(SongDisplay::new(notes));
            summary.display_updated = true;
        }

        Ok(summary)
    }

    /// Quest Status page is on screen.
    pub fn is_shown(&self) -> bool {
        self.screen.is_shown()
    }

    /// The song was recorded while playing as the child.
    pub fn child_recorded(&self) -> bool {
        self.child_recorded
    }

    /// Raw song buffer as read on the last tick.
    pub fn raw_song(&self) -> &[u8; SONG_BUFFER_SIZE] {
        &self.raw_song
    }

    /// Any byte of the raw buffer is set.
    pub fn has_song(&self) -> bool {
        self.raw_song.iter().any(|&b| b != 0)
    }

    pub fn display(&self) -> Option<&SongDisplay> {
        self.display.as_ref()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}
