//! Read-only settings store.
//!
//! Settings come from an optional TOML file, overridden by command-line values.
//! The graph screen only reads them.

use crate::engine::Instrument;
use crate::error::{CastplotError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Converted stage subdirectory under an instrument directory.
const CONVERTED_DIR: &str = "1_converted";

/// Survey, vessel and instrument selection plus the data location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root data directory.
    pub data_path: PathBuf,
    /// Instrument the casts were recorded with.
    pub instrument: Instrument,
    /// Survey directory name, e.g. "2018 West Coast Survey".
    pub survey: Option<String>,
    /// Vessel name.
    pub vessel: Option<String>,
    /// Deployed layout: `<data_path>/<instrument>` instead of the survey tree.
    pub deployed: bool,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| CastplotError::file_open(path.to_path_buf(), e))?;
        Self::parse(&text)
    }

    /// Parse settings from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Raw file type for the selected instrument.
    pub fn source_type(&self) -> &'static str {
        self.instrument.source_type()
    }

    /// Directory holding this instrument's processing stages.
    ///
    /// Without a survey and vessel the survey layout falls back to the deployed
    /// one.
    pub fn instrument_path(&self) -> PathBuf {
        let instrument = self.instrument.name();
        match (&self.survey, &self.vessel, self.deployed) {
            (Some(survey), Some(vessel), false) => self
                .data_path
                .join(survey)
                .join(format!("Data_{}", vessel))
                .join("Ocean & Env")
                .join(instrument),
            _ => self.data_path.join(instrument),
        }
    }

    /// Converted casts (one CSV per cast).
    pub fn converted_path(&self) -> PathBuf {
        self.instrument_path().join(CONVERTED_DIR)
    }
}

/// Layout constants for the graph screen.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Width of the cast/variable sidebar in columns.
    pub sidebar_width: u16,
    /// Percentage of the sidebar given to the cast list.
    pub cast_list_percent: u16,
    /// Margin added around plotted data (0.1 = 10%).
    pub axis_padding_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 36,
            cast_list_percent: 40,
            axis_padding_factor: 0.1,
        }
    }
}
