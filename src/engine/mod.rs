//! Plotting engine boundary.
//!
//! The graph screen never draws anything itself. It tells a [`PlotEngine`] what
//! to plot and in which panel, addressing every figure by its panel title.
//! [`FigureEngine`] is the terminal implementation used by the binary.

pub mod figures;
pub mod frame;
pub mod loader;
pub mod standard;

pub use figures::{Figure, FigureEngine, Series};
pub use frame::{invalid_column, is_flag_column, CastFrame};
pub use loader::CastLoader;
pub use standard::{Instrument, StandardGraph};

use crate::error::Result;
use crate::graph::tools::{ToolMode, UpDownCast, ViewAction};

/// Axis ranges `([x_min, x_max], [y_min, y_max])`.
pub type Bounds = ([f64; 2], [f64; 2]);

/// Commands and queries the graph screen issues to a plotting engine.
///
/// All calls are synchronous and complete before the next user event is
/// handled.
pub trait PlotEngine {
    /// Load the data frame for `cast`, replacing any previous one.
    fn load_cast(&mut self, cast: &str) -> Result<()>;

    /// Whether a data frame is loaded.
    fn is_data_loaded(&self) -> bool;

    /// Plot `y` against `x` in the figure titled `panel_title`, creating the
    /// figure if needed.
    fn plot(&mut self, panel_title: &str, x: &str, y: &str) -> Result<()>;

    /// Re-populate every standard figure (`"Graph 1"` .. `"Graph N"`).
    fn plot_standard_set(&mut self) -> Result<()>;

    /// Delete the figure titled `panel_title`. Unknown titles are ignored.
    fn delete_plot(&mut self, panel_title: &str);

    /// Set the pointer tool mode.
    fn set_tool_mode(&mut self, mode: ToolMode);

    /// Show or hide the legend of one figure.
    fn set_legend_visible(&mut self, visible: bool, panel_title: &str);

    /// Show or hide invalid points on all figures.
    fn set_invalid_points_visible(&mut self, visible: bool);

    /// Show or hide data tooltips on all figures.
    fn set_tooltips_visible(&mut self, visible: bool);

    /// Switch which cast directions are drawn.
    fn toggle_up_down_cast(&mut self, state: UpDownCast);

    /// Pan, zoom or reset the view of one figure under the current tool mode.
    fn adjust_view(&mut self, panel_title: &str, action: ViewAction);

    /// Current view of one figure.
    fn view_bounds(&self, panel_title: &str) -> Option<Bounds>;

    /// In mark-invalid mode, flip the invalid flags of the figure's drawn
    /// points inside its view and save the cast. Returns the number flipped.
    fn mark_invalid(&mut self, panel_title: &str) -> Result<usize>;

    /// Re-scan the cast source.
    fn refresh_casts(&mut self) -> Result<()> {
        Ok(())
    }

    /// Casts available for loading.
    fn casts(&self) -> &[String];

    /// Variables offered for the current cast.
    fn variables(&self) -> &[String];

    /// Number of graphs in the standard graph definition.
    fn standard_graph_count(&self) -> usize;
}
