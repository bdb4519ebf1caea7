//! Terminal plotting engine.
//!
//! Figures are keyed by panel title. Each plotted (x, y) pair becomes a
//! [`Series`] split into downcast/upcast and valid/invalid point sets; which of
//! those are drawn is decided at render time from the display state.

use super::{Bounds, CastFrame, CastLoader, Instrument, PlotEngine};
use crate::error::{CastplotError, Result};
use crate::graph::panels::positional_title;
use crate::graph::tools::{ToolMode, UpDownCast, ViewAction};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Engine-wide display state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayState {
    /// Active pointer tool.
    pub tool_mode: ToolMode,
    /// Draw invalid points.
    pub show_invalids: bool,
    /// Show data readouts.
    pub show_tooltips: bool,
    /// Cast directions drawn.
    pub up_down: UpDownCast,
}

/// Kind of point set inside a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Valid downcast samples.
    Downcast,
    /// Valid upcast samples.
    Upcast,
    /// Invalid samples, either direction.
    Invalid,
}

/// A drawable point set.
#[derive(Debug, Clone)]
pub struct Layer<'a> {
    /// Legend label.
    pub label: String,
    /// Layer kind.
    pub kind: LayerKind,
    /// Whether the series plots a secondary sensor.
    pub secondary: bool,
    /// Points as (x, y).
    pub points: &'a [(f64, f64)],
}

/// One variable pair plotted in a figure.
#[derive(Debug, Clone, Default)]
pub struct Series {
    /// X variable.
    pub x_var: String,
    /// Y variable.
    pub y_var: String,
    /// Valid downcast points.
    pub down: Vec<(f64, f64)>,
    /// Valid upcast points.
    pub up: Vec<(f64, f64)>,
    /// Invalid downcast points.
    pub invalid_down: Vec<(f64, f64)>,
    /// Invalid upcast points.
    pub invalid_up: Vec<(f64, f64)>,
}

impl Series {
    fn from_frame(frame: &CastFrame, x_var: &str, y_var: &str) -> Option<Self> {
        let xs = frame.column(x_var)?;
        let ys = frame.column(y_var)?;

        let mut series = Series {
            x_var: x_var.to_string(),
            y_var: y_var.to_string(),
            ..Default::default()
        };

        for (row, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let target = match (frame.is_invalid(x_var, row), frame.is_downcast(row)) {
                (false, true) => &mut series.down,
                (false, false) => &mut series.up,
                (true, true) => &mut series.invalid_down,
                (true, false) => &mut series.invalid_up,
            };
            target.push((x, y));
        }
        Some(series)
    }

    /// Whether the x variable is a secondary sensor.
    pub fn is_secondary(&self) -> bool {
        self.x_var.contains("Secondary")
    }
}

/// Strip the secondary-sensor suffix from an axis label.
fn axis_label(var: &str) -> String {
    var.replace("(Secondary)", "").trim().to_string()
}

/// A figure backing one panel.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Panel title this figure belongs to.
    pub name: String,
    /// Chart title, set by the first plot.
    pub title: Option<String>,
    /// X axis label.
    pub x_label: Option<String>,
    /// Y axis label.
    pub y_label: Option<String>,
    /// Plotted series.
    pub series: Vec<Series>,
    /// Legend visibility.
    pub legend_visible: bool,
    /// Zoomed or panned view; `None` shows the data bounds.
    pub view: Option<Bounds>,
}

impl Figure {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: None,
            x_label: None,
            y_label: None,
            series: Vec::new(),
            legend_visible: false,
            view: None,
        }
    }

    /// Drop every plotted line, keeping labels and legend state.
    fn clear_lines(&mut self) {
        self.series.clear();
    }

    /// Drop lines, title, labels and view so the next plot starts afresh.
    fn reset(&mut self) {
        self.series.clear();
        self.title = None;
        self.x_label = None;
        self.y_label = None;
        self.view = None;
    }

    /// Re-split every series after the frame's flags changed.
    fn rebuild(&mut self, frame: &CastFrame) {
        self.series = self
            .series
            .iter()
            .filter_map(|s| Series::from_frame(frame, &s.x_var, &s.y_var))
            .collect();
    }

    /// Plot `y_var` against `x_var`. Labels are set by the first plot only.
    fn plot(&mut self, frame: &CastFrame, x_var: &str, y_var: &str, title: Option<&str>) {
        if self.x_label.is_none() || self.y_label.is_none() {
            let x_label = axis_label(x_var);
            let y_label = axis_label(y_var);
            self.title = Some(
                title
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} v. {}", x_label, y_label)),
            );
            self.x_label = Some(x_label);
            self.y_label = Some(y_label);
        }

        match Series::from_frame(frame, x_var, y_var) {
            Some(series) => self.series.push(series),
            None => tracing::warn!(
                "Skipping plot in {}, variables not in {}: {}, {}",
                self.name,
                frame.cast,
                x_var,
                y_var
            ),
        }
    }

    /// Whether the y axis grows downward.
    pub fn y_inverted(&self) -> bool {
        self.y_label
            .as_deref()
            .is_some_and(|l| l.to_lowercase().contains("depth"))
    }

    /// Point sets to draw under `display`.
    pub fn layers(&self, display: &DisplayState) -> Vec<Layer<'_>> {
        let mut layers = Vec::new();
        for s in &self.series {
            let secondary = s.is_secondary();
            let down = display.up_down.shows_down();
            let up = display.up_down.shows_up();
            let candidates = [
                (down, "downcast", LayerKind::Downcast, &s.down),
                (up, "upcast", LayerKind::Upcast, &s.up),
                (
                    display.show_invalids && down,
                    "downcast invalid",
                    LayerKind::Invalid,
                    &s.invalid_down,
                ),
                (
                    display.show_invalids && up,
                    "upcast invalid",
                    LayerKind::Invalid,
                    &s.invalid_up,
                ),
            ];

            for (visible, suffix, kind, points) in candidates {
                if visible && !points.is_empty() {
                    layers.push(Layer {
                        label: format!("{} {}", s.x_var, suffix),
                        kind,
                        secondary,
                        points,
                    });
                }
            }
        }
        layers
    }

    /// Data bounds `([x_min, x_max], [y_min, y_max])` of the drawn layers.
    pub fn bounds(&self, display: &DisplayState) -> Option<Bounds> {
        let mut points = self
            .layers(display)
            .into_iter()
            .flat_map(|l| l.points.iter().copied())
            .peekable();
        points.peek()?;

        let init = ([f64::INFINITY, f64::NEG_INFINITY], [f64::INFINITY, f64::NEG_INFINITY]);
        Some(points.fold(init, |(xb, yb), (x, y)| {
            ([xb[0].min(x), xb[1].max(x)], [yb[0].min(y), yb[1].max(y)])
        }))
    }

    /// The zoomed view, or the data bounds when not zoomed.
    pub fn current_view(&self, display: &DisplayState) -> Option<Bounds> {
        self.view.or_else(|| self.bounds(display))
    }
}

/// Plotting engine that keeps figures in memory for the terminal renderer.
#[derive(Debug)]
pub struct FigureEngine {
    loader: CastLoader,
    instrument: Instrument,
    casts: Vec<String>,
    variables: Vec<String>,
    frame: Option<CastFrame>,
    figures: HashMap<String, Figure>,
    display: DisplayState,
}

impl FigureEngine {
    /// Create an engine reading casts through `loader`.
    pub fn open(loader: CastLoader, instrument: Instrument) -> Result<Self> {
        let casts = loader.list_casts()?;
        let mut engine = Self {
            loader,
            instrument,
            casts,
            variables: Vec::new(),
            frame: None,
            figures: HashMap::new(),
            display: DisplayState::default(),
        };
        engine.refresh_variables();
        Ok(engine)
    }

    /// Instrument variables first (those present in the frame, when loaded), then
    /// any other frame columns.
    fn refresh_variables(&mut self) {
        let listed = self.instrument.variables();
        self.variables = match &self.frame {
            None => listed.iter().map(|v| v.to_string()).collect(),
            Some(frame) => listed
                .iter()
                .filter(|v| frame.has_column(v))
                .map(|v| v.to_string())
                .chain(
                    frame
                        .variables()
                        .into_iter()
                        .filter(|c| !listed.contains(c))
                        .map(str::to_string),
                )
                .collect(),
        };
    }

    /// Loaded frame.
    pub fn frame(&self) -> Option<&CastFrame> {
        self.frame.as_ref()
    }

    /// Figure for a panel title.
    pub fn figure(&self, title: &str) -> Option<&Figure> {
        self.figures.get(title)
    }

    /// Titles of all figures, sorted.
    pub fn figure_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.figures.keys().cloned().collect();
        titles.sort();
        titles
    }

    /// Display state.
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Instrument the engine was configured for.
    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Directory casts are read from.
    pub fn cast_dir(&self) -> &Path {
        self.loader.dir()
    }
}

impl PlotEngine for FigureEngine {
    fn load_cast(&mut self, cast: &str) -> Result<()> {
        if self.frame.as_ref().map(|f| f.cast.as_str()) != Some(cast) {
            self.frame = None;
        }

        let loaded = self.loader.load(cast);
        let result = match loaded {
            Ok(frame) => {
                self.frame = Some(frame);
                Ok(())
            },
            Err(e) => {
                self.frame = None;
                Err(e)
            },
        };
        self.refresh_variables();
        result
    }

    fn is_data_loaded(&self) -> bool {
        self.frame.is_some()
    }

    fn plot(&mut self, panel_title: &str, x: &str, y: &str) -> Result<()> {
        let frame = self.frame.as_ref().ok_or(CastplotError::NoActiveCast)?;
        tracing::debug!("plot {}: {} v. {}", panel_title, x, y);
        self.figures
            .entry(panel_title.to_string())
            .or_insert_with(|| Figure::new(panel_title))
            .plot(frame, x, y, None);
        Ok(())
    }

    fn plot_standard_set(&mut self) -> Result<()> {
        let frame = self.frame.as_ref().ok_or(CastplotError::NoActiveCast)?;

        for figure in self.figures.values_mut() {
            figure.clear_lines();
        }

        for (index, graph) in self.instrument.standard_graphs().iter().enumerate() {
            let title = positional_title(index);
            let figure = self
                .figures
                .entry(title.clone())
                .or_insert_with(|| Figure::new(&title));
            figure.reset();
            for x in graph.x {
                figure.plot(frame, x, graph.y, graph.title);
            }
        }
        tracing::debug!(
            "plot_standard_set: {} graphs",
            self.instrument.standard_graphs().len()
        );
        Ok(())
    }

    fn delete_plot(&mut self, panel_title: &str) {
        if self.figures.remove(panel_title).is_some() {
            tracing::debug!("delete_plot {}", panel_title);
        }
    }

    fn set_tool_mode(&mut self, mode: ToolMode) {
        tracing::debug!("set_tool_mode {}", mode.as_str());
        self.display.tool_mode = mode;
    }

    fn set_legend_visible(&mut self, visible: bool, panel_title: &str) {
        if let Some(figure) = self.figures.get_mut(panel_title) {
            figure.legend_visible = visible;
        }
    }

    fn set_invalid_points_visible(&mut self, visible: bool) {
        self.display.show_invalids = visible;
    }

    fn set_tooltips_visible(&mut self, visible: bool) {
        self.display.show_tooltips = visible;
    }

    fn toggle_up_down_cast(&mut self, state: UpDownCast) {
        tracing::debug!("toggle_up_down_cast {}", state.as_str());
        self.display.up_down = state;
    }

    fn adjust_view(&mut self, panel_title: &str, action: ViewAction) {
        let display = self.display;
        let Some(figure) = self.figures.get_mut(panel_title) else {
            return;
        };

        figure.view = match action {
            ViewAction::Reset => None,
            _ => figure
                .current_view(&display)
                .map(|view| action.apply(view, display.tool_mode, figure.y_inverted())),
        };
        let tool_mode = display.tool_mode;
        tracing::debug!(
            "adjust_view {} {:?} ({}): {:?}",
            panel_title,
            action,
            tool_mode.as_str(),
            figure.view
        );
    }

    fn view_bounds(&self, panel_title: &str) -> Option<Bounds> {
        self.figures.get(panel_title)?.current_view(&self.display)
    }

    fn mark_invalid(&mut self, panel_title: &str) -> Result<usize> {
        let display = self.display;
        if display.tool_mode != ToolMode::MarkInvalid {
            return Ok(0);
        }
        let frame = self.frame.as_mut().ok_or(CastplotError::NoActiveCast)?;
        let Some(figure) = self.figures.get(panel_title) else {
            return Ok(0);
        };
        let Some(([x0, x1], [y0, y1])) = figure.current_view(&display) else {
            return Ok(0);
        };

        // (x variable, row) -> new flag. A row shared by two series flips once.
        let mut flips: BTreeMap<(String, usize), bool> = BTreeMap::new();
        for series in &figure.series {
            let (Some(xs), Some(ys)) = (frame.column(&series.x_var), frame.column(&series.y_var))
            else {
                continue;
            };
            for (row, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
                let drawn = if frame.is_downcast(row) {
                    display.up_down.shows_down()
                } else {
                    display.up_down.shows_up()
                };
                let inside = (x0..=x1).contains(&x) && (y0..=y1).contains(&y);
                let invalid = frame.is_invalid(&series.x_var, row);
                if !drawn || !inside || (invalid && !display.show_invalids) {
                    continue;
                }
                flips
                    .entry((series.x_var.clone(), row))
                    .or_insert(!invalid);
            }
        }

        if flips.is_empty() {
            return Ok(0);
        }
        for ((var, row), invalid) in &flips {
            frame.set_invalid(var, *row, *invalid)?;
        }
        for figure in self.figures.values_mut() {
            figure.rebuild(frame);
        }
        self.loader.save_flags(frame)?;

        tracing::info!("Flipped {} invalid flags in {}", flips.len(), panel_title);
        Ok(flips.len())
    }

    fn refresh_casts(&mut self) -> Result<()> {
        self.casts = self.loader.list_casts()?;
        Ok(())
    }

    fn casts(&self) -> &[String] {
        &self.casts
    }

    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn standard_graph_count(&self) -> usize {
        self.instrument.standard_graphs().len()
    }
}
