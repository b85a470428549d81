//! Quest Status screen detection.

use crate::addresses::{
    PAUSE_MAIN_STATE, PAUSE_MAIN_STATE_BUSY, PAUSE_PAGE, PAUSE_PAGE_QUEST_STATUS, PAUSE_STATE,
    PAUSE_STATE_OPEN,
};
use crate::memory::GameCore;

/// The four inputs that decide whether Quest Status is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenSample {
    pub paused: bool,
    pub pause_state: u8,
    pub main_state: u8,
    pub page: u8,
}

impl ScreenSample {
    /// Read the pause menu fields from live memory.
    pub fn read<C: GameCore + ?Sized>(core: &C) -> Self {
        Self {
            paused: core.is_paused(),
            pause_state: core.read_u8(PAUSE_STATE),
            main_state: core.read_u8(PAUSE_MAIN_STATE),
            page: core.read_u8(PAUSE_PAGE),
        }
    }

    /// All entry conditions hold.
    pub fn opens(&self) -> bool {
        self.paused
            && self.pause_state == PAUSE_STATE_OPEN
            && self.main_state != PAUSE_MAIN_STATE_BUSY
            && self.page == PAUSE_PAGE_QUEST_STATUS
    }

    /// At least one exit condition holds.
    pub fn closes(&self) -> bool {
        !self.paused
            || self.pause_state != PAUSE_STATE_OPEN
            || self.main_state == PAUSE_MAIN_STATE_BUSY
            || self.page != PAUSE_PAGE_QUEST_STATUS
    }
}

/// Edge of the shown flag seen on a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenTransition {
    Opened,
    Closed,
}

/// Shown flag for the Quest Status page.
///
/// Entry is checked only while hidden and exit only while shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuestStatusScreen {
    shown: bool,
}

impl QuestStatusScreen {
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Feed one tick's sample, returning the edge if the flag flipped.
    pub fn update(&mut self, sample: &ScreenSample) -> Option<ScreenTransition> {
        if !self.shown {
            if sample.opens() {
                self.shown = true;
                return Some(ScreenTransition::Opened);
            }
        } else if sample.closes() {
            self.shown = false;
            return Some(ScreenTransition::Closed);
        }
        None
    }
}
