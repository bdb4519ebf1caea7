//! Instrument variable lists and standard graph definitions.

use serde::Deserialize;

/// Instrument type the casts were recorded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instrument {
    /// Conductivity-temperature-depth profiler.
    #[default]
    #[value(name = "CTD")]
    Ctd,
    /// Underway CTD.
    #[value(name = "UCTD")]
    Uctd,
    /// SBE 39 temperature/depth recorder.
    #[value(name = "SBE39")]
    Sbe39,
}

impl Instrument {
    /// Directory and display name.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::Ctd => "CTD",
            Instrument::Uctd => "UCTD",
            Instrument::Sbe39 => "SBE39",
        }
    }

    /// Raw file type fed to conversion.
    pub fn source_type(self) -> &'static str {
        match self {
            Instrument::Ctd => "hex",
            Instrument::Uctd | Instrument::Sbe39 => "asc",
        }
    }

    /// Variables offered for plotting.
    pub fn variables(self) -> &'static [&'static str] {
        match self {
            Instrument::Ctd => CTD_VARIABLES,
            Instrument::Uctd => UCTD_VARIABLES,
            Instrument::Sbe39 => SBE39_VARIABLES,
        }
    }

    /// Standard graphs, in panel order (`"Graph 1"` first).
    pub fn standard_graphs(self) -> &'static [StandardGraph] {
        match self {
            Instrument::Ctd => CTD_STANDARD_GRAPHS,
            Instrument::Uctd => UCTD_STANDARD_GRAPHS,
            Instrument::Sbe39 => &[],
        }
    }
}

/// One standard graph: every x variable is drawn against `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardGraph {
    /// X variables overlaid on the same axes.
    pub x: &'static [&'static str],
    /// Y variable.
    pub y: &'static str,
    /// Title override.
    pub title: Option<&'static str>,
}

const DEPTH: &str = "Depth (m)";

const fn graph(x: &'static [&'static str]) -> StandardGraph {
    StandardGraph {
        x,
        y: DEPTH,
        title: None,
    }
}

const fn titled(x: &'static [&'static str], title: &'static str) -> StandardGraph {
    StandardGraph {
        x,
        y: DEPTH,
        title: Some(title),
    }
}

const CTD_VARIABLES: &[&str] = &[
    "Depth (m)",
    "Temperature (degC)",
    "Temperature (degC) (Secondary)",
    "Conductivity (S_per_m)",
    "Conductivity (S_per_m) (Secondary)",
    "Salinity (psu)",
    "Salinity (psu) (Secondary)",
    "Density ()",
    "Oxygen (ml_per_l)",
    "Oxygen (ml_per_l) (Secondary)",
    "Sound Velocity (Chen Millero)",
];

const UCTD_VARIABLES: &[&str] = &[
    "Temperature (degC)",
    "Pressure (decibar)",
    "Depth (m)",
    "Conductivity (S_per_m)",
    "Salinity (psu)",
    "Sound Velocity (m_per_s) (cm)",
    "Sound Velocity (m_per_s) (d)",
    "Sound Velocity (m_per_s) (w)",
];

const SBE39_VARIABLES: &[&str] = &["Temperature_degC", "Depth_m"];

const CTD_STANDARD_GRAPHS: &[StandardGraph] = &[
    graph(&["Temperature (degC)", "Temperature (degC) (Secondary)"]),
    graph(&["Temperature (degC)"]),
    titled(
        &["Temperature (degC) (Secondary)"],
        "Temperature (degC) (Secondary) v. Depth (m)",
    ),
    graph(&["Conductivity (S_per_m)", "Conductivity (S_per_m) (Secondary)"]),
    graph(&["Conductivity (S_per_m)"]),
    titled(
        &["Conductivity (S_per_m) (Secondary)"],
        "Conductivity (S_per_m) (Secondary) v. Depth (m)",
    ),
    graph(&["Salinity (psu)", "Salinity (psu) (Secondary)"]),
    graph(&["Oxygen (ml_per_l)", "Oxygen (ml_per_l) (Secondary)"]),
    graph(&["Oxygen (ml_per_l)"]),
    titled(
        &["Oxygen (ml_per_l) (Secondary)"],
        "Oxygen (ml_per_l) (Secondary) v. Depth (m)",
    ),
    graph(&["Seawater Density (kg/m3)"]),
    graph(&["Sigma Theta", "Sigma Theta (Secondary)"]),
    graph(&["Sigma Theta"]),
    titled(&["Sigma Theta (Secondary)"], "Sigma Theta (Secondary) v. Depth (m)"),
];

const UCTD_STANDARD_GRAPHS: &[StandardGraph] = &[
    graph(&["Temperature (degC)"]),
    graph(&["Conductivity (S_per_m)"]),
    graph(&["Salinity (psu)"]),
    graph(&["Seawater Density (kg/m3)"]),
    graph(&["Sigma Theta"]),
    graph(&["dPdt"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_graph_counts() {
        assert_eq!(Instrument::Ctd.standard_graphs().len(), 14);
        assert_eq!(Instrument::Uctd.standard_graphs().len(), 6);
        assert!(Instrument::Sbe39.standard_graphs().is_empty());
    }

    #[test]
    fn source_type_follows_instrument() {
        assert_eq!(Instrument::Ctd.source_type(), "hex");
        assert_eq!(Instrument::Uctd.source_type(), "asc");
        assert_eq!(Instrument::Sbe39.source_type(), "asc");
    }
}
