//! Tool-mode selector.
//!
//! One exclusive pointer mode plus independent display toggles. Every change is
//! forwarded to the plotting engine immediately.

use crate::engine::{Bounds, PlotEngine};

/// View span change per zoom step.
const ZOOM_SCALE: f64 = 1.4;

/// Fraction of the view span moved per pan step.
const PAN_FRACTION: f64 = 0.1;

/// Exclusive pointer tool mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Drag to pan.
    #[default]
    Pan,
    /// Zoom along the vertical axis.
    ZoomVertical,
    /// Zoom along the horizontal axis.
    ZoomHorizontal,
    /// Select points to flag as invalid.
    MarkInvalid,
}

impl ToolMode {
    /// All modes, in toolbar order.
    pub const ALL: [ToolMode; 4] = [
        ToolMode::Pan,
        ToolMode::ZoomVertical,
        ToolMode::ZoomHorizontal,
        ToolMode::MarkInvalid,
    ];

    /// Mode string understood by the plotting engine.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolMode::Pan => "pan",
            ToolMode::ZoomVertical => "zoomVertical",
            ToolMode::ZoomHorizontal => "zoomHorizontal",
            ToolMode::MarkInvalid => "invalidData",
        }
    }

    /// Toolbar label.
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Pan => "Pan",
            ToolMode::ZoomVertical => "Zoom V",
            ToolMode::ZoomHorizontal => "Zoom H",
            ToolMode::MarkInvalid => "Invalid",
        }
    }

    /// Whether view changes move the x axis in this mode.
    pub fn moves_x(self) -> bool {
        !matches!(self, ToolMode::ZoomVertical)
    }

    /// Whether view changes move the y axis in this mode.
    pub fn moves_y(self) -> bool {
        !matches!(self, ToolMode::ZoomHorizontal)
    }
}

/// Key-driven change to a figure's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Shrink the view around its center.
    ZoomIn,
    /// Grow the view around its center.
    ZoomOut,
    /// Move the view left.
    PanLeft,
    /// Move the view right.
    PanRight,
    /// Move the view toward the top of the screen.
    PanUp,
    /// Move the view toward the bottom of the screen.
    PanDown,
    /// Back to the data bounds.
    Reset,
}

impl ViewAction {
    /// Apply to `view` under `mode`. Axes the mode does not move are kept.
    ///
    /// With `y_inverted` the y axis grows downward on screen, so panning up
    /// moves toward smaller values.
    pub fn apply(self, view: Bounds, mode: ToolMode, y_inverted: bool) -> Bounds {
        let up = if y_inverted { -1.0 } else { 1.0 };
        let (dx, dy, scale) = match self {
            ViewAction::ZoomIn => (0.0, 0.0, 1.0 / ZOOM_SCALE),
            ViewAction::ZoomOut => (0.0, 0.0, ZOOM_SCALE),
            ViewAction::PanLeft => (-1.0, 0.0, 1.0),
            ViewAction::PanRight => (1.0, 0.0, 1.0),
            ViewAction::PanUp => (0.0, up, 1.0),
            ViewAction::PanDown => (0.0, -up, 1.0),
            ViewAction::Reset => return view,
        };

        let (x, y) = view;
        let x = if mode.moves_x() { step(x, dx, scale) } else { x };
        let y = if mode.moves_y() { step(y, dy, scale) } else { y };
        (x, y)
    }
}

/// Scale `[lo, hi]` around its center, then shift it by `steps` pan steps.
fn step([lo, hi]: [f64; 2], steps: f64, scale: f64) -> [f64; 2] {
    let center = (lo + hi) / 2.0;
    let half = (hi - lo) * scale / 2.0;
    let shift = 2.0 * half * PAN_FRACTION * steps;
    [center - half + shift, center + half + shift]
}

/// Which cast directions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpDownCast {
    /// Downcast only.
    #[default]
    Down,
    /// Both directions.
    UpDown,
    /// Upcast only.
    Up,
}

impl UpDownCast {
    /// Next state in the cycle down -> updown -> up -> down.
    pub fn next(self) -> Self {
        match self {
            UpDownCast::Down => UpDownCast::UpDown,
            UpDownCast::UpDown => UpDownCast::Up,
            UpDownCast::Up => UpDownCast::Down,
        }
    }

    /// Whether downcast samples are drawn.
    pub fn shows_down(self) -> bool {
        matches!(self, UpDownCast::Down | UpDownCast::UpDown)
    }

    /// Whether upcast samples are drawn.
    pub fn shows_up(self) -> bool {
        matches!(self, UpDownCast::Up | UpDownCast::UpDown)
    }

    /// Engine string.
    pub fn as_str(self) -> &'static str {
        match self {
            UpDownCast::Down => "down",
            UpDownCast::UpDown => "updown",
            UpDownCast::Up => "up",
        }
    }
}

/// Tool state shared by every panel on the graph screen.
#[derive(Debug, Clone, Default)]
pub struct ToolModeSelector {
    mode: ToolMode,
    legend_visible: bool,
    invalid_points_visible: bool,
    tooltips_visible: bool,
    up_down_cast: UpDownCast,
}

impl ToolModeSelector {
    /// Create a selector in pan mode with every toggle off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active exclusive mode.
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Whether `mode` is the checked member of the exclusive group.
    pub fn is_checked(&self, mode: ToolMode) -> bool {
        self.mode == mode
    }

    /// Last forwarded legend visibility.
    pub fn legend_visible(&self) -> bool {
        self.legend_visible
    }

    /// Invalid point visibility.
    pub fn invalid_points_visible(&self) -> bool {
        self.invalid_points_visible
    }

    /// Tooltip visibility.
    pub fn tooltips_visible(&self) -> bool {
        self.tooltips_visible
    }

    /// Cast direction state.
    pub fn up_down_cast(&self) -> UpDownCast {
        self.up_down_cast
    }

    /// Check `mode`, unchecking every other member, and forward it.
    pub fn select_mode<E: PlotEngine + ?Sized>(&mut self, mode: ToolMode, engine: &mut E) {
        self.mode = mode;
        engine.set_tool_mode(mode);
    }

    /// Set legend visibility for the panel titled `panel_title`.
    pub fn set_legend_visible<E: PlotEngine + ?Sized>(
        &mut self,
        visible: bool,
        panel_title: &str,
        engine: &mut E,
    ) {
        self.legend_visible = visible;
        engine.set_legend_visible(visible, panel_title);
    }

    /// Set invalid point visibility.
    pub fn set_invalid_points_visible<E: PlotEngine + ?Sized>(
        &mut self,
        visible: bool,
        engine: &mut E,
    ) {
        self.invalid_points_visible = visible;
        engine.set_invalid_points_visible(visible);
    }

    /// Set tooltip visibility.
    pub fn set_tooltips_visible<E: PlotEngine + ?Sized>(&mut self, visible: bool, engine: &mut E) {
        self.tooltips_visible = visible;
        engine.set_tooltips_visible(visible);
    }

    /// Advance the up/down cast cycle and forward the new state.
    pub fn toggle_up_down_cast<E: PlotEngine + ?Sized>(&mut self, engine: &mut E) -> UpDownCast {
        self.up_down_cast = self.up_down_cast.next();
        engine.toggle_up_down_cast(self.up_down_cast);
        self.up_down_cast
    }
}
