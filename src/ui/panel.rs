//! The debug panel.
//!
//! A collapsible window pinned to the top-right corner. It is drawn every
//! frame but exposes no controls yet.

pub const DEBUG_PANEL_TITLE: &str = "Debug";

const PANEL_WIDTH: f32 = 245.0;
const PANEL_MARGIN: f32 = 15.0;

pub fn debug_panel(ui: &imgui::Ui) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window(DEBUG_PANEL_TITLE)
        .position(
            [display_size[0] - PANEL_WIDTH - PANEL_MARGIN, PANEL_MARGIN],
            imgui::Condition::FirstUseEver,
        )
        .size([PANEL_WIDTH, 0.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .resizable(false)
        .build(|| {});
}
