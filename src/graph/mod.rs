//! Graph screen - cast/variable selection and the dynamic graph panels.
//!
//! [`GraphScreen`] owns the selection cursor, the panel registry, the tool
//! selector and the plotting engine. Input events are translated into calls on
//! it one at a time, in arrival order. Failures reported by the engine end up in
//! [`GraphScreen::status`] and are never retried.

pub mod dispatch;
pub mod panels;
pub mod selection;
pub mod tools;

pub use dispatch::PlotDispatcher;
pub use panels::{make_panel, PanelId, PanelRegistry, PlotPanel, ReconcileReport};
pub use selection::{CursorMode, Field, SelectionCursor};
pub use tools::{ToolMode, ToolModeSelector, UpDownCast, ViewAction};

use crate::engine::PlotEngine;
use crate::error::CastplotError;

/// State of the graph screen.
#[derive(Debug)]
pub struct GraphScreen<E: PlotEngine> {
    engine: E,
    cursor: SelectionCursor,
    registry: PanelRegistry,
    tools: ToolModeSelector,
    active: Option<PanelId>,
    /// Status message.
    pub status: String,
}

impl<E: PlotEngine> GraphScreen<E> {
    /// Create a graph screen driving `engine`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cursor: SelectionCursor::new(),
            registry: PanelRegistry::new(),
            tools: ToolModeSelector::new(),
            active: None,
            status: "Select a cast".to_string(),
        }
    }

    /// The plotting engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Selection cursor.
    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    /// Open panels.
    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// Tool state.
    pub fn tools(&self) -> &ToolModeSelector {
        &self.tools
    }

    fn dispatcher(&mut self) -> PlotDispatcher<'_, E> {
        PlotDispatcher::new(&mut self.registry, &mut self.engine)
    }

    /// Cast list click. Loads the cast and points the cursor at X.
    pub fn click_cast(&mut self, row: usize) {
        let Some(cast) = self.engine.casts().get(row).cloned() else {
            return;
        };

        self.cursor.select_cast(cast.clone());
        match self.engine.load_cast(&cast) {
            Ok(()) => {
                self.status = format!("{} loaded", cast);
                tracing::info!("Cast {} loaded", cast);
            },
            Err(e) => {
                self.status = format!("Error loading {}: {}", cast, e);
                tracing::error!("Error loading cast {}: {}", cast, e);
            },
        }
    }

    /// Re-scan the cast list.
    pub fn refresh_casts(&mut self) {
        match self.engine.refresh_casts() {
            Ok(()) => self.status = format!("{} casts", self.engine.casts().len()),
            Err(e) => self.status = format!("Refresh failed: {}", e),
        }
    }

    /// Variable list click. Fills X or Y depending on the cursor.
    pub fn click_variable(&mut self, row: usize) {
        if self.cursor.select_variable_row(self.engine.variables(), row) {
            self.status = format!("Next: {}", self.cursor.focus().name());
        }
    }

    /// Whether the create-plot action is enabled.
    pub fn can_create_plot(&self) -> bool {
        dispatch::create_plot_blocker(&self.engine, &self.cursor).is_none()
    }

    /// Whether the standard plots action is enabled.
    pub fn can_request_standard_plots(&self) -> bool {
        dispatch::can_request_standard_plots(&self.engine)
    }

    /// Plot the selected Y against X in a new panel.
    pub fn create_plot(&mut self) {
        let cursor = self.cursor.clone();
        let result = {
            let mut dispatcher = self.dispatcher();
            match dispatcher.create_plot_blocker(&cursor) {
                Some(blocker) => Err(blocker),
                None => dispatcher.create_plot(&cursor),
            }
        };

        match result {
            Ok(Some(id)) => {
                self.active = Some(id);
                if let Some(panel) = self.registry.find(id) {
                    self.status = format!("Created {}", panel.title);
                }
            },
            Ok(None) => {},
            Err(e @ (CastplotError::NoActiveCast | CastplotError::MissingAxisSelection)) => {
                self.status = e.to_string();
            },
            Err(e) => self.status = format!("Plot failed: {}", e),
        }
    }

    /// Open or close panels to match the standard graph set and plot it.
    pub fn request_standard_plots(&mut self) {
        let result = self.dispatcher().request_standard_plots();
        match result {
            Ok(Some(report)) => {
                self.status = format!(
                    "Standard graphs: {} panels ({} added, {} removed)",
                    self.registry.len(),
                    report.created.len(),
                    report.removed.len()
                );
            },
            Ok(None) => self.status = CastplotError::NoActiveCast.to_string(),
            Err(e) => self.status = format!("Standard graphs failed: {}", e),
        }
        self.clamp_active();
    }

    /// Close every panel.
    pub fn delete_all_plots(&mut self) {
        let removed = self.dispatcher().delete_all_plots();
        self.active = None;
        self.status = format!("Deleted {} graphs", removed.len());
    }

    /// Close the active panel.
    pub fn close_active_panel(&mut self) {
        let Some(index) = self.active_index() else {
            self.status = "No graph open".to_string();
            return;
        };

        match self.registry.remove_panel(index, &mut self.engine) {
            Ok(panel) => self.status = format!("Closed {}", panel.title),
            Err(e) => self.status = e.to_string(),
        }
        self.active = None;
        let len = self.registry.len();
        if len > 0 {
            self.active = self.registry.get(index.min(len - 1)).map(|p| p.id);
        }
    }

    /// Index of the active panel.
    pub fn active_index(&self) -> Option<usize> {
        self.active.and_then(|id| self.registry.position(id))
    }

    /// The active panel.
    pub fn active_panel(&self) -> Option<&PlotPanel> {
        self.active.and_then(|id| self.registry.find(id))
    }

    /// Activate the next panel tab, wrapping around.
    pub fn next_panel(&mut self) {
        let len = self.registry.len();
        if len == 0 {
            return;
        }
        let index = self.active_index().map(|i| (i + 1) % len).unwrap_or(0);
        self.active = self.registry.get(index).map(|p| p.id);
    }

    /// Activate the previous panel tab, wrapping around.
    pub fn prev_panel(&mut self) {
        let len = self.registry.len();
        if len == 0 {
            return;
        }
        let index = match self.active_index() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.active = self.registry.get(index).map(|p| p.id);
    }

    /// Keep the active tab pointing at an open panel.
    fn clamp_active(&mut self) {
        if self.active_index().is_none() {
            self.active = self.registry.get(0).map(|p| p.id);
        }
    }

    /// Check a tool mode.
    pub fn select_tool(&mut self, mode: ToolMode) {
        self.tools.select_mode(mode, &mut self.engine);
        self.status = format!("Tool: {}", mode.name());
    }

    /// Toggle the legend of the active panel.
    pub fn toggle_legend(&mut self) {
        let Some(title) = self.active_panel().map(|p| p.title.clone()) else {
            self.status = "No graph open".to_string();
            return;
        };
        let visible = !self.tools.legend_visible();
        self.tools.set_legend_visible(visible, &title, &mut self.engine);
        self.status = format!("Legend: {}", on_off(visible));
    }

    /// Toggle invalid point visibility.
    pub fn toggle_invalid_points(&mut self) {
        let visible = !self.tools.invalid_points_visible();
        self.tools
            .set_invalid_points_visible(visible, &mut self.engine);
        self.status = format!("Invalid points: {}", on_off(visible));
    }

    /// Toggle tooltips.
    pub fn toggle_tooltips(&mut self) {
        let visible = !self.tools.tooltips_visible();
        self.tools.set_tooltips_visible(visible, &mut self.engine);
        self.status = format!("Tooltips: {}", on_off(visible));
    }

    /// Cycle the up/down cast state.
    pub fn toggle_up_down_cast(&mut self) {
        let state = self.tools.toggle_up_down_cast(&mut self.engine);
        self.status = format!("Casts: {}", state.as_str());
    }

    /// Pan or zoom the active panel, then show the view center.
    pub fn adjust_view(&mut self, action: ViewAction) {
        let Some(title) = self.active_panel().map(|p| p.title.clone()) else {
            self.status = "No graph open".to_string();
            return;
        };

        self.engine.adjust_view(&title, action);
        self.status = match self.engine.view_bounds(&title) {
            Some(([x0, x1], [y0, y1])) => format!(
                "x: {:.4},   y: {:.4}",
                (x0 + x1) / 2.0,
                (y0 + y1) / 2.0
            ),
            None => format!("{} is empty", title),
        };
    }

    /// Flip the invalid flags of the active panel's points inside its view.
    pub fn mark_invalid(&mut self) {
        if self.tools.mode() != ToolMode::MarkInvalid {
            self.status = format!("Select the {} tool first", ToolMode::MarkInvalid.name());
            return;
        }
        let Some(title) = self.active_panel().map(|p| p.title.clone()) else {
            self.status = "No graph open".to_string();
            return;
        };

        match self.engine.mark_invalid(&title) {
            Ok(flipped) => self.status = format!("{} points flipped", flipped),
            Err(e) => {
                self.status = format!("Marking invalid failed: {}", e);
                tracing::error!("Marking invalid in {} failed: {}", title, e);
            },
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}
