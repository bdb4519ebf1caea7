//! Cast data frame.
//!
//! Besides the measured variables a converted cast may carry flag columns: an
//! `is_downcast` column (1 on the way down, 0 on the way up) and one
//! `"<variable> invalid"` column per variable. Where they are missing the
//! direction split falls back to the deepest sample and the invalid mask to
//! surface soak.

use crate::error::Result;
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Direction flag column.
pub const DOWNCAST_COLUMN: &str = "is_downcast";

/// Suffix of per-variable invalid flag columns.
const INVALID_SUFFIX: &str = " invalid";

/// Columns that give the vertical position of a sample, in preference order.
const VERTICAL_COLUMNS: [&str; 3] = ["Depth (m)", "Pressure (decibar)", "Depth_m"];

/// Samples at or shallower than this pressure (or depth) are surface soak.
const SURFACE_SOAK_LIMIT: f64 = 2.0;

/// Name of the invalid flag column for `var`.
pub fn invalid_column(var: &str) -> String {
    format!("{}{}", var, INVALID_SUFFIX)
}

/// Whether `name` is a flag column rather than a plottable variable.
pub fn is_flag_column(name: &str) -> bool {
    name == DOWNCAST_COLUMN || name.ends_with(INVALID_SUFFIX)
}

fn flag(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// One converted cast: named columns of samples.
#[derive(Debug, Clone)]
pub struct CastFrame {
    /// Cast label.
    pub cast: String,
    columns: Vec<String>,
    /// Samples, one row per scan, one column per variable or flag.
    data: Array2<f64>,
    /// True for rows recorded on the way down.
    downcast: Vec<bool>,
    /// Fallback invalid mask for variables without a flag column.
    soak: Vec<bool>,
}

impl CastFrame {
    /// Build a frame from column names and a row-major sample matrix.
    pub fn new(cast: impl Into<String>, columns: Vec<String>, data: Array2<f64>) -> Self {
        let downcast = Self::direction_flags(&columns, &data);
        let soak = Self::flag_surface_soak(&columns, &data);
        Self {
            cast: cast.into(),
            columns,
            data,
            downcast,
            soak,
        }
    }

    fn flag_surface_soak(columns: &[String], data: &Array2<f64>) -> Vec<bool> {
        let soak = ["Pressure (decibar)", "Depth (m)", "Depth_m"]
            .iter()
            .find_map(|name| columns.iter().position(|c| c == name));

        match soak {
            Some(col) => data
                .column(col)
                .iter()
                .map(|v| v.is_finite() && *v <= SURFACE_SOAK_LIMIT)
                .collect(),
            None => vec![false; data.nrows()],
        }
    }

    /// The `is_downcast` column where present and set, otherwise the deepest
    /// sample split.
    fn direction_flags(columns: &[String], data: &Array2<f64>) -> Vec<bool> {
        let split = Self::split_downcast(columns, data);
        match columns.iter().position(|c| c == DOWNCAST_COLUMN) {
            Some(col) => data
                .column(col)
                .iter()
                .zip(split)
                .map(|(v, fallback)| if v.is_finite() { *v != 0.0 } else { fallback })
                .collect(),
            None => split,
        }
    }

    /// Rows up to and including the deepest sample are downcast.
    fn split_downcast(columns: &[String], data: &Array2<f64>) -> Vec<bool> {
        let rows = data.nrows();
        let vertical = VERTICAL_COLUMNS
            .iter()
            .find_map(|name| columns.iter().position(|c| c == name));

        let Some(col) = vertical else {
            return vec![true; rows];
        };

        let deepest = data
            .column(col)
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, max)) if max >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i);

        match deepest {
            Some(turn) => (0..rows).map(|i| i <= turn).collect(),
            None => vec![true; rows],
        }
    }

    /// All column names, flags included.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Plottable variables, in column order.
    pub fn variables(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !is_flag_column(c))
            .collect()
    }

    /// Invalid flag columns, in column order.
    pub fn invalid_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| c.ends_with(INVALID_SUFFIX))
            .collect()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// True if the cast has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `name` is a plottable variable.
    pub fn has_column(&self, name: &str) -> bool {
        !is_flag_column(name) && self.columns.iter().any(|c| c == name)
    }

    /// Samples of one column.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.data.column(idx))
    }

    /// Whether row `row` was recorded on the way down.
    pub fn is_downcast(&self, row: usize) -> bool {
        self.downcast.get(row).copied().unwrap_or(true)
    }

    /// Whether the `var` sample at `row` is flagged invalid.
    pub fn is_invalid(&self, var: &str, row: usize) -> bool {
        match self.column(&invalid_column(var)) {
            Some(flags) => flags.get(row).copied().is_some_and(flag),
            None => self.soak.get(row).copied().unwrap_or(false),
        }
    }

    /// Set the invalid flag of the `var` sample at `row`.
    ///
    /// A missing flag column is added, seeded from the fallback mask.
    pub fn set_invalid(&mut self, var: &str, row: usize, invalid: bool) -> Result<()> {
        let name = invalid_column(var);
        let col = match self.columns.iter().position(|c| *c == name) {
            Some(col) => col,
            None => {
                let seed = Array1::from_iter(self.soak.iter().map(|&s| if s { 1.0 } else { 0.0 }));
                self.data.push_column(seed.view())?;
                self.columns.push(name);
                self.columns.len() - 1
            },
        };

        if row < self.len() {
            self.data[[row, col]] = if invalid { 1.0 } else { 0.0 };
        }
        Ok(())
    }

    /// Number of downcast rows.
    pub fn downcast_len(&self) -> usize {
        self.downcast.iter().filter(|d| **d).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn frame() -> CastFrame {
        CastFrame::new(
            "cast_001",
            vec!["Depth (m)".to_string(), "Temperature (degC)".to_string()],
            array![
                [1.0, 12.0],
                [5.0, 11.0],
                [9.0, 9.5],
                [6.0, 9.8],
                [2.0, 11.5]
            ],
        )
    }

    fn flagged() -> CastFrame {
        CastFrame::new(
            "cast_002",
            vec![
                "Depth (m)".to_string(),
                "Temperature (degC)".to_string(),
                "Temperature (degC) invalid".to_string(),
                "is_downcast".to_string(),
            ],
            array![
                [1.0, 12.0, 0.0, 1.0],
                [5.0, 11.0, 0.0, 1.0],
                [9.0, 9.5, 1.0, 1.0],
                [6.0, 9.8, 0.0, 0.0],
                [7.0, 11.5, 0.0, 0.0]
            ],
        )
    }

    #[test]
    fn downcast_ends_at_deepest_sample() {
        let f = frame();
        assert_eq!(f.len(), 5);
        assert!(f.is_downcast(0));
        assert!(f.is_downcast(2));
        assert!(!f.is_downcast(3));
        assert_eq!(f.downcast_len(), 3);
    }

    #[test]
    fn surface_soak_is_the_fallback_mask() {
        let f = frame();
        assert!(f.is_invalid("Temperature (degC)", 0));
        assert!(!f.is_invalid("Temperature (degC)", 1));
        assert!(f.is_invalid("Temperature (degC)", 4));
    }

    #[test]
    fn flag_columns_override_fallbacks() {
        let f = flagged();
        assert!(!f.is_invalid("Temperature (degC)", 0));
        assert!(f.is_invalid("Temperature (degC)", 2));
        // No flag column for depth, so surface soak applies.
        assert!(f.is_invalid("Depth (m)", 0));

        // Deepest sample is row 2, but the column says row 4 is upcast too.
        assert!(!f.is_downcast(4));
        assert_eq!(f.downcast_len(), 3);
        assert_eq!(f.variables(), ["Depth (m)", "Temperature (degC)"]);
        assert!(!f.has_column("is_downcast"));
        assert_eq!(f.invalid_columns(), ["Temperature (degC) invalid"]);
    }

    #[test]
    fn set_invalid_adds_missing_flag_column() {
        let mut f = frame();
        f.set_invalid("Temperature (degC)", 2, true).unwrap();
        f.set_invalid("Temperature (degC)", 0, false).unwrap();

        assert!(f.is_invalid("Temperature (degC)", 2));
        assert!(!f.is_invalid("Temperature (degC)", 0));
        // Seeded from surface soak.
        assert!(f.is_invalid("Temperature (degC)", 4));
        assert_eq!(f.columns().len(), 3);
        assert_eq!(f.variables().len(), 2);
    }

    #[test]
    fn column_lookup() {
        let f = frame();
        let temp = f.column("Temperature (degC)").unwrap();
        assert_eq!(temp[2], 9.5);
        assert!(f.column("Oxygen (ml_per_l)").is_none());
    }

    #[test]
    fn no_vertical_column_means_all_downcast() {
        let f = CastFrame::new("c", vec!["Temp".to_string()], array![[1.0], [2.0]]);
        assert_eq!(f.downcast_len(), 2);
    }
}
