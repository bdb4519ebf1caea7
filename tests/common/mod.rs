//! Shared test helpers.

#![allow(dead_code)]

use castplot::engine::{Bounds, PlotEngine};
use castplot::graph::{ToolMode, UpDownCast, ViewAction};
use castplot::{CastplotError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A call the graph screen made on the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(String),
    Plot(String, String, String),
    PlotStandard,
    Delete(String),
    ToolMode(ToolMode),
    Legend(bool, String),
    Invalids(bool),
    Tooltips(bool),
    UpDown(UpDownCast),
    View(String, ViewAction),
    MarkInvalid(String),
}

/// Plotting engine that records every call and tracks figure titles.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub figures: BTreeSet<String>,
    pub casts: Vec<String>,
    pub variables: Vec<String>,
    pub standard_count: usize,
    pub loaded: Option<String>,
    pub fail_plot: bool,
    pub view: Option<Bounds>,
    pub flipped: usize,
}

impl RecordingEngine {
    pub fn new(standard_count: usize) -> Self {
        Self {
            casts: vec!["cast_001".to_string(), "cast_002".to_string()],
            variables: ["Temp", "Depth", "Salinity"]
                .iter()
                .map(|v| v.to_string())
                .collect(),
            standard_count,
            ..Default::default()
        }
    }

    /// Engine with a cast already loaded.
    pub fn loaded(standard_count: usize) -> Self {
        let mut engine = Self::new(standard_count);
        engine.loaded = Some("cast_001".to_string());
        engine
    }

    pub fn deletes(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Delete(title) => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn figure_titles(&self) -> Vec<String> {
        self.figures.iter().cloned().collect()
    }
}

impl PlotEngine for RecordingEngine {
    fn load_cast(&mut self, cast: &str) -> Result<()> {
        self.calls.push(Call::Load(cast.to_string()));
        if self.casts.iter().any(|c| c == cast) {
            self.loaded = Some(cast.to_string());
            Ok(())
        } else {
            self.loaded = None;
            Err(CastplotError::unknown_cast(cast))
        }
    }

    fn is_data_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn plot(&mut self, panel_title: &str, x: &str, y: &str) -> Result<()> {
        self.calls
            .push(Call::Plot(panel_title.to_string(), x.to_string(), y.to_string()));
        if self.fail_plot {
            return Err(CastplotError::NoActiveCast);
        }
        self.figures.insert(panel_title.to_string());
        Ok(())
    }

    fn plot_standard_set(&mut self) -> Result<()> {
        self.calls.push(Call::PlotStandard);
        for i in 1..=self.standard_count {
            self.figures.insert(format!("Graph {}", i));
        }
        Ok(())
    }

    fn delete_plot(&mut self, panel_title: &str) {
        self.calls.push(Call::Delete(panel_title.to_string()));
        self.figures.remove(panel_title);
    }

    fn set_tool_mode(&mut self, mode: ToolMode) {
        self.calls.push(Call::ToolMode(mode));
    }

    fn set_legend_visible(&mut self, visible: bool, panel_title: &str) {
        self.calls
            .push(Call::Legend(visible, panel_title.to_string()));
    }

    fn set_invalid_points_visible(&mut self, visible: bool) {
        self.calls.push(Call::Invalids(visible));
    }

    fn set_tooltips_visible(&mut self, visible: bool) {
        self.calls.push(Call::Tooltips(visible));
    }

    fn toggle_up_down_cast(&mut self, state: UpDownCast) {
        self.calls.push(Call::UpDown(state));
    }

    fn adjust_view(&mut self, panel_title: &str, action: ViewAction) {
        self.calls
            .push(Call::View(panel_title.to_string(), action));
    }

    fn view_bounds(&self, panel_title: &str) -> Option<Bounds> {
        self.view.filter(|_| self.figures.contains(panel_title))
    }

    fn mark_invalid(&mut self, panel_title: &str) -> Result<usize> {
        self.calls.push(Call::MarkInvalid(panel_title.to_string()));
        Ok(self.flipped)
    }

    fn casts(&self) -> &[String] {
        &self.casts
    }

    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn standard_graph_count(&self) -> usize {
        self.standard_count
    }
}

/// A small CTD cast: down to 20 m and back up.
pub const CTD_CAST: &str = "\
Pressure (decibar),Depth (m),Temperature (degC),Salinity (PSU),Oxygen (ml_per_l)
1.0,1.0,12.5,33.1,6.1
4.0,4.0,12.0,33.2,6.0
10.0,10.0,10.5,33.5,5.4
20.0,19.9,8.0,33.9,4.2
12.0,11.9,9.8,33.6,5.0
3.0,3.0,12.1,33.2,6.0
";

/// Write `casts` as `<name>.csv` files under `dir`.
pub fn write_casts(dir: &Path, casts: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for cast in casts {
        fs::write(dir.join(format!("{}.csv", cast)), CTD_CAST).unwrap();
    }
}
