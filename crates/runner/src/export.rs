//! Offline feature export for model training
//!
//! Reads a JSON-lines sample file (the replay format), keeps exactly the
//! samples the live loop would have buffered, and writes one labelled
//! feature row per line. Rows are computed by the same indicator engine
//! over the same trailing window as the live buffer.

use sentinel_core::{DEFAULT_CAPACITY, Sample, Timestamp};
use sentinel_indicators::{
    DEFAULT_HORIZON, DEFAULT_THRESHOLD, FeatureTable, IndicatorConfig, IndicatorEngine,
};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Buffer capacity {capacity} is below the {required} samples the indicators need")]
    CapacityTooSmall { capacity: usize, required: usize },

    #[error("Failed to serialize feature row: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub capacity: usize,
    pub horizon: usize,
    pub threshold: f64,
    pub indicators: IndicatorConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            horizon: DEFAULT_HORIZON,
            threshold: DEFAULT_THRESHOLD,
            indicators: IndicatorConfig::default(),
        }
    }
}

impl ExportOptions {
    /// The window must hold enough samples for every indicator to resolve
    pub fn validate(&self) -> Result<(), ExportError> {
        let required = self.indicators.warmup_len();
        if self.capacity < required {
            return Err(ExportError::CapacityTooSmall {
                capacity: self.capacity,
                required,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub samples: usize,
    /// Lines that were blank-free but unusable (bad JSON, bad price, out of order)
    pub skipped: usize,
    pub rows_written: usize,
}

/// Load samples in file order, dropping what the live loop would never buffer
pub fn read_samples(path: &Path) -> Result<(Vec<Sample>, usize), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);

    let mut samples = Vec::new();
    let mut skipped = 0;
    let mut last: Option<Timestamp> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let sample = match serde_json::from_str::<Sample>(line) {
            Ok(sample) if sample.is_usable() => sample,
            Ok(_) => {
                warn!("{} line {}: unusable price", path.display(), idx + 1);
                skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("{} line {}: {}", path.display(), idx + 1, e);
                skipped += 1;
                continue;
            }
        };

        if let Some(prev) = last
            && sample.timestamp() <= prev
        {
            warn!(
                "{} line {}: timestamp {} not after {}",
                path.display(),
                idx + 1,
                sample.timestamp(),
                prev
            );
            skipped += 1;
            continue;
        }
        last = Some(sample.timestamp());
        samples.push(sample);
    }

    Ok((samples, skipped))
}

/// Write the trainable rows of `input` to `output` as JSON lines
pub fn export_features(
    input: &Path,
    output: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    options.validate()?;
    let (samples, skipped) = read_samples(input)?;

    let engine = IndicatorEngine::new(options.indicators.clone());
    let table = FeatureTable::build(&samples, options.capacity, &engine)
        .with_targets(options.horizon, options.threshold);

    let io_err = |source| ExportError::Io {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(output).map_err(io_err)?);

    let mut rows_written = 0;
    for row in table.trainable() {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n").map_err(io_err)?;
        rows_written += 1;
    }
    writer.flush().map_err(io_err)?;

    info!(
        "Exported {} trainable rows from {} samples ({} lines skipped) to {}",
        rows_written,
        samples.len(),
        skipped,
        output.display()
    );

    Ok(ExportSummary {
        samples: samples.len(),
        skipped,
        rows_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use sentinel_indicators::FeatureRow;

    fn write_series(path: &Path, prices: &[f64]) {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut file = File::create(path).unwrap();
        for (i, price) in prices.iter().enumerate() {
            let sample = Sample::new(start + Duration::minutes(i as i64), *price);
            writeln!(file, "{}", serde_json::to_string(&sample).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_export_writes_only_trainable_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prices.jsonl");
        let output = dir.path().join("features.jsonl");

        let prices: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 2.0 + i as f64 * 0.05)
            .collect();
        write_series(&input, &prices);

        let summary = export_features(&input, &output, &ExportOptions::default()).unwrap();

        // Rows 33..=84 have every feature and a sample 15 steps ahead
        assert_eq!(summary.samples, 100);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.rows_written, 100 - 33 - 15);

        let content = std::fs::read_to_string(&output).unwrap();
        let rows: Vec<FeatureRow> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), summary.rows_written);
        assert!(rows.iter().all(|r| r.target.is_some()));
        assert!(rows.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_read_samples_drops_what_the_loop_would_reject() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mixed.jsonl");
        std::fs::write(
            &input,
            concat!(
                r#"{"timestamp":"2024-02-01T00:00:00Z","price":100.0}"#,
                "\n",
                "garbage\n",
                "\n",
                r#"{"timestamp":"2024-02-01T00:01:00Z","price":-1.0}"#,
                "\n",
                r#"{"timestamp":"2024-02-01T00:00:00Z","price":100.5}"#,
                "\n",
                r#"{"timestamp":"2024-02-01T00:02:00Z","price":101.0}"#,
                "\n",
            ),
        )
        .unwrap();

        let (samples, skipped) = read_samples(&input).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(skipped, 3);
        assert_eq!(samples[1].price(), 101.0);
    }

    #[test]
    fn test_capacity_below_warmup_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prices.jsonl");
        let output = dir.path().join("features.jsonl");
        write_series(&input, &[100.0; 40]);

        let options = ExportOptions {
            capacity: 10,
            ..ExportOptions::default()
        };
        let err = export_features(&input, &output, &options).unwrap_err();

        assert!(matches!(
            err,
            ExportError::CapacityTooSmall {
                capacity: 10,
                required: 34
            }
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_features(
            &dir.path().join("absent.jsonl"),
            &dir.path().join("out.jsonl"),
            &ExportOptions::default(),
        );
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
