//! Converted cast files.
//!
//! A cast is a `<cast>.csv` file in the converted directory: one header row of
//! variable names, then one row per scan.

use super::CastFrame;
use crate::error::{CastplotError, Result};
use csv::ReaderBuilder;
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads casts from a converted directory.
#[derive(Debug, Clone)]
pub struct CastLoader {
    dir: PathBuf,
}

impl CastLoader {
    /// Create a loader for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory casts are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cast names (file stems of `*.csv`), sorted.
    pub fn list_casts(&self) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| CastplotError::file_open(self.dir.clone(), e))?;

        let mut casts: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            })
            .filter_map(|path| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().to_string())
            })
            .collect();

        casts.sort();
        tracing::info!("Found {} casts in {}", casts.len(), self.dir.display());
        Ok(casts)
    }

    /// Path of the file holding `cast`.
    pub fn cast_path(&self, cast: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", cast))
    }

    /// Load `cast` into a frame.
    pub fn load(&self, cast: &str) -> Result<CastFrame> {
        let path = self.cast_path(cast);
        if !path.is_file() {
            return Err(CastplotError::unknown_cast(cast));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if headers.is_empty() {
            return Err(CastplotError::invalid_cast(path, "no header row"));
        }

        let mut values: Vec<f64> = Vec::new();
        let mut numeric = vec![false; headers.len()];
        let mut rows = 0;

        for record in reader.records() {
            let record = record?;
            for (col, flag) in numeric.iter_mut().enumerate() {
                let value = record.get(col).and_then(parse_cell);
                if value.is_some() {
                    *flag = true;
                }
                values.push(value.unwrap_or(f64::NAN));
            }
            rows += 1;
        }

        let all = Array2::from_shape_vec((rows, headers.len()), values)?;

        // Text columns (timestamps, flags) are not plottable.
        let keep: Vec<usize> = (0..headers.len())
            .filter(|&c| rows == 0 || numeric[c])
            .collect();
        if keep.is_empty() && rows > 0 {
            return Err(CastplotError::invalid_cast(path, "no numeric columns"));
        }

        let data = all.select(ndarray::Axis(1), &keep);
        let columns = keep.iter().map(|&c| headers[c].clone()).collect();

        tracing::debug!("Loaded {} ({} rows, {} columns)", cast, rows, keep.len());
        Ok(CastFrame::new(cast, columns, data))
    }

    /// Write the frame's invalid flag columns back into its cast file.
    ///
    /// Every other cell is rewritten as read. Flag columns the file does not
    /// have yet are appended.
    pub fn save_flags(&self, frame: &CastFrame) -> Result<()> {
        let path = self.cast_path(&frame.cast);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)?;

        let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?.iter().map(str::to_string).collect::<Vec<String>>());
        }

        for name in frame.invalid_columns() {
            let Some(flags) = frame.column(name) else {
                continue;
            };
            let col = match headers.iter().position(|h| h.trim() == name) {
                Some(col) => col,
                None => {
                    headers.push(name.to_string());
                    headers.len() - 1
                },
            };

            for (record, flag) in records.iter_mut().zip(flags.iter()) {
                if record.len() <= col {
                    record.resize(col + 1, String::new());
                }
                record[col] = if *flag != 0.0 { "1" } else { "0" }.to_string();
            }
        }

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&headers)?;
        for record in &records {
            writer.write_record(record)?;
        }
        writer.flush()?;

        tracing::info!("Saved invalid flags of {} to {}", frame.cast, path.display());
        Ok(())
    }
}

/// Numeric cell value. Boolean flags read as 1 and 0.
fn parse_cell(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().or_else(|| {
        if field.eq_ignore_ascii_case("true") {
            Some(1.0)
        } else if field.eq_ignore_ascii_case("false") {
            Some(0.0)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn lists_only_csv_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b_cast.csv", "Depth (m)\n1\n");
        write(dir.path(), "a_cast.csv", "Depth (m)\n1\n");
        write(dir.path(), "notes.txt", "hello");

        let loader = CastLoader::new(dir.path());
        assert_eq!(loader.list_casts().unwrap(), vec!["a_cast", "b_cast"]);
    }

    #[test]
    fn drops_text_columns_and_keeps_gaps_as_nan() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cast.csv",
            "time,Depth (m),Temperature (degC)\n\
             12:00:00,1.0,12.5\n\
             12:00:01,2.0,\n",
        );

        let frame = CastLoader::new(dir.path()).load("cast").unwrap();
        assert_eq!(frame.columns(), ["Depth (m)", "Temperature (degC)"]);
        assert_eq!(frame.len(), 2);
        assert!(frame.column("Temperature (degC)").unwrap()[1].is_nan());
    }

    #[test]
    fn reads_flag_columns() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cast.csv",
            "Depth (m),Temperature (degC),Temperature (degC) invalid,is_downcast\n\
             5.0,12.0,False,True\n\
             8.0,11.0,0,1\n\
             10.0,10.0,True,1\n\
             20.0,9.0,0,0\n\
             15.0,9.5,0,0\n",
        );

        let frame = CastLoader::new(dir.path()).load("cast").unwrap();
        assert_eq!(frame.variables(), ["Depth (m)", "Temperature (degC)"]);
        assert!(frame.is_invalid("Temperature (degC)", 2));
        assert!(!frame.is_invalid("Temperature (degC)", 0));
        assert!(frame.is_downcast(2));
        // Deepest sample, but flagged upcast.
        assert!(!frame.is_downcast(3));
        assert!(!frame.is_downcast(4));
    }

    #[test]
    fn save_flags_keeps_text_columns() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cast.csv",
            "time,Depth (m),Temperature (degC)\n\
             12:00:00,5.0,12.5\n\
             12:00:01,9.0,11.0\n",
        );

        let loader = CastLoader::new(dir.path());
        let mut frame = loader.load("cast").unwrap();
        frame.set_invalid("Temperature (degC)", 1, true).unwrap();
        loader.save_flags(&frame).unwrap();

        let text = fs::read_to_string(dir.path().join("cast.csv")).unwrap();
        assert_eq!(
            text,
            "time,Depth (m),Temperature (degC),Temperature (degC) invalid\n\
             12:00:00,5.0,12.5,0\n\
             12:00:01,9.0,11.0,1\n"
        );

        let reloaded = loader.load("cast").unwrap();
        assert!(reloaded.is_invalid("Temperature (degC)", 1));
        assert_eq!(reloaded.variables(), ["Depth (m)", "Temperature (degC)"]);
    }

    #[test]
    fn missing_cast_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let err = CastLoader::new(dir.path()).load("nope").unwrap_err();
        assert!(matches!(err, CastplotError::UnknownCast { .. }));
    }
}
