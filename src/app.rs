//! Application state and logic.

use crate::clipboard;
use crate::config::{LayoutConfig, Settings};
use crate::engine::{FigureEngine, PlotEngine};
use crate::graph::{GraphScreen, ToolMode};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// List that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Cast list.
    Casts,
    /// Variable list.
    Variables,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Graph screen.
    pub screen: GraphScreen<FigureEngine>,
    /// Settings the engine was opened with.
    pub settings: Settings,
    /// Layout constants.
    pub layout: LayoutConfig,
    /// Focused list.
    pub pane: Pane,
    /// Highlighted row in the cast list.
    pub cast_row: usize,
    /// Highlighted row in the variable list.
    pub variable_row: usize,
    /// Current theme.
    pub theme: Theme,
}

impl App {
    /// Create a new application instance.
    pub fn new(engine: FigureEngine, settings: Settings) -> Self {
        let mut screen = GraphScreen::new(engine);
        if screen.engine().casts().is_empty() {
            screen.status = format!("No casts in {}", screen.engine().cast_dir().display());
        }

        Self {
            screen,
            settings,
            layout: LayoutConfig::default(),
            pane: Pane::Casts,
            cast_row: 0,
            variable_row: 0,
            theme: Theme::GruvboxDark,
        }
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Casts => self.screen.engine().casts().len(),
            Pane::Variables => self.screen.engine().variables().len(),
        }
    }

    fn row_mut(&mut self) -> &mut usize {
        match self.pane {
            Pane::Casts => &mut self.cast_row,
            Pane::Variables => &mut self.variable_row,
        }
    }

    /// Move the highlight up in the focused list.
    pub fn cursor_up(&mut self) {
        let row = self.row_mut();
        *row = row.saturating_sub(1);
    }

    /// Move the highlight down in the focused list.
    pub fn cursor_down(&mut self) {
        let len = self.pane_len();
        let row = self.row_mut();
        if *row + 1 < len {
            *row += 1;
        }
    }

    /// Switch focus between the cast and variable lists.
    pub fn switch_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Casts => Pane::Variables,
            Pane::Variables => Pane::Casts,
        };
    }

    /// Click the highlighted row of the focused list.
    pub fn select(&mut self) {
        match self.pane {
            Pane::Casts => {
                self.screen.click_cast(self.cast_row);
                self.variable_row = 0;
                if self.screen.engine().is_data_loaded() {
                    self.pane = Pane::Variables;
                }
            },
            Pane::Variables => self.screen.click_variable(self.variable_row),
        }
    }

    /// Select a tool by its toolbar number (1-based).
    pub fn select_tool(&mut self, number: usize) {
        if let Some(mode) = number.checked_sub(1).and_then(|i| ToolMode::ALL.get(i)) {
            self.screen.select_tool(*mode);
        }
    }

    /// Re-scan the converted directory for casts.
    pub fn refresh_casts(&mut self) {
        self.screen.refresh_casts();
        let count = self.screen.engine().casts().len();
        self.cast_row = self.cast_row.min(count.saturating_sub(1));
    }

    /// Copy the active graph's drawn points to the clipboard.
    pub fn copy_active_graph(&mut self) {
        let engine = self.screen.engine();
        let Some(figure) = self
            .screen
            .active_panel()
            .and_then(|p| engine.figure(&p.title))
        else {
            self.screen.status = "No graph open".to_string();
            return;
        };

        let text = clipboard::figure_to_tsv(figure, engine.display());
        let name = figure.name.clone();
        match clipboard::copy_to_clipboard(&text) {
            Ok(()) => self.screen.status = format!("Copied {}!", name),
            Err(e) => self.screen.status = format!("Copy failed: {}", e),
        }
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.screen.status = format!("Theme: {}", self.theme.name());
    }
}
