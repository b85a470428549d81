//! Viewer state and the debug panel drawn over the game viewport.

mod controls;
mod song;

use sc_engine::SnapshotCore;
use sc_master::Plugin;

/// Everything the viewer owns apart from GL/imgui objects.
pub struct GuiState {
    pub plugin: Plugin,
    pub core: SnapshotCore,
    /// Where `core` came from, shown in the panel.
    pub source: String,
    pub status: String,
    pub show_panel: bool,
}

impl GuiState {
    pub fn new(plugin: Plugin, core: SnapshotCore, source: impl Into<String>) -> Self {
        Self {
            plugin,
            core,
            source: source.into(),
            status: String::new(),
            show_panel: true,
        }
    }

    /// One game frame: the logic tick against the current memory image.
    pub fn logic_tick(&mut self) {
        match self.plugin.on_tick(&self.core) {
            Ok(summary) => {
                if let Some(transition) = summary.transition {
                    self.status = format!("{:?}", transition);
                }
            }
            Err(e) => self.status = format!("tick failed: {}", e),
        }
    }
}

pub fn build_ui(ui: &imgui::Ui, gui: &mut GuiState) {
    if !gui.show_panel {
        return;
    }

    let mut open = true;
    ui.window("Scarecrow's Song")
        .position([8.0, 8.0], imgui::Condition::FirstUseEver)
        .size([300.0, 260.0], imgui::Condition::FirstUseEver)
        .opened(&mut open)
        .build(|| {
            controls::controls_panel(ui, gui);
            ui.separator();
            song::song_panel(ui, gui);
        });
    gui.show_panel = open;
}
