//! User interface rendering.

mod chart;
mod formatters;
mod graph;
mod theme;

use crate::app::App;
use ratatui::Frame;

pub use formatters::{format_axis_label, format_value, truncate};
pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    graph::draw_graph_screen(f, app);
}
