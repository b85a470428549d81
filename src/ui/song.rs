//! Raw song records and the decoded melody.

use sc_formats::read_records;

use super::GuiState;

pub fn song_panel(ui: &imgui::Ui, gui: &GuiState) {
    let tracker = gui.plugin.tracker();

    match tracker.display() {
        Some(display) => ui.text(format!("{}{}", display.caption, display.notes)),
        None => ui.text_disabled("No song decoded yet"),
    }

    if !ui.collapsing_header("Records", imgui::TreeNodeFlags::empty()) {
        return;
    }
    match read_records(tracker.raw_song()) {
        Ok(records) => {
            for (i, record) in records.iter().enumerate() {
                if record.code().is_silence() {
                    ui.text_disabled(format!("{:02}: rest", i));
                } else {
                    ui.text(format!(
                        "{:02}: note {:02X} special {:02X}",
                        i,
                        record.code().0,
                        record.modifier().0
                    ));
                }
            }
        }
        Err(e) => ui.text(format!("unreadable: {}", e)),
    }
}
