//! Pause menu controls and tracker status.

use super::GuiState;
use crate::demo;

pub fn controls_panel(ui: &imgui::Ui, gui: &mut GuiState) {
    ui.text(format!("Memory: {}", gui.source));

    if ui.button("Open Quest Status") {
        demo::open_quest_status(&mut gui.core);
        gui.status = "Menu opened".to_string();
    }
    ui.same_line();
    if ui.button("Close menu") {
        demo::close_pause_menu(&mut gui.core);
        gui.status = "Menu closed".to_string();
    }
    ui.checkbox("Paused", &mut gui.core.paused);

    let tracker = gui.plugin.tracker();
    let shown = if tracker.is_shown() { "shown" } else { "hidden" };
    ui.text(format!("Quest Status: {}", shown));
    ui.text(format!("Recorded as child: {}", tracker.child_recorded()));
    ui.text(format!("Overlay assets: {:?}", gui.plugin.overlay().lifecycle()));

    if !gui.status.is_empty() {
        ui.text_disabled(&gui.status);
    }
}
