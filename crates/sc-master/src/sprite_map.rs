//! Button id to icon asset name.

use std::collections::BTreeMap;

use sc_ir::NoteButton;
use serde::{Deserialize, Serialize};

/// Maps each button to the file stem of its icon in the sprites directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteMap(BTreeMap<NoteButton, String>);

impl SpriteMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, button: NoteButton, asset: impl Into<String>) {
        self.0.insert(button, asset.into());
    }

    /// Icon asset for `button`, if one is configured.
    pub fn asset(&self, button: NoteButton) -> Option<&str> {
        self.0.get(&button).map(String::as_str)
    }
}

impl Default for SpriteMap {
    fn default() -> Self {
        let mut map = Self::new();
        map.insert(NoteButton::NoteA, "a");
        map.insert(NoteButton::NoteCDown, "c_down");
        map.insert(NoteButton::NoteCRight, "c_right");
        map.insert(NoteButton::NoteCLeft, "c_left");
        map.insert(NoteButton::NoteCUp, "c_up");
        map
    }
}
