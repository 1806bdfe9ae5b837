//! CSV ingest.
//!
//! Turns a CSV with `x` and `y` columns into a point set.
//!
//! - **Strict schema** for the two required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip unparsable rows, but report what happened)
//! - extra columns are ignored
//! - point order follows file order, since selections refer to points by index

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::Point;
use crate::error::AppError;

/// Summary stats about a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    pub fn from_points(points: &[Point]) -> Self {
        let mut stats = Self {
            n_points: points.len(),
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for p in points {
            stats.x_min = stats.x_min.min(p.x);
            stats.x_max = stats.x_max.max(p.x);
            stats.y_min = stats.y_min.min(p.y);
            stats.y_max = stats.y_max.max(p.y);
        }
        stats
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: points in file order + row errors.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: Vec<Point>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load points from a CSV file.
pub fn load_points(path: &Path) -> Result<IngestedPoints, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = read_points(file)?;

    info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.points.len(),
        "loaded points"
    );
    Ok(ingested)
}

/// Read points from any CSV source.
pub fn read_points<R: Read>(source: R) -> Result<IngestedPoints, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let (Some(&x_col), Some(&y_col)) = (header_map.get("x"), header_map.get("y")) else {
        return Err(AppError::new(2, "CSV must have 'x' and 'y' columns."));
    };

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match (parse_number(&record, x_col, "x"), parse_number(&record, y_col, "y")) {
            (Ok(x), Ok(y)) => points.push(Point::new(x, y)),
            (Err(message), _) | (_, Err(message)) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        warn!(line = err.line, "skipped row: {}", err.message);
    }

    if points.is_empty() {
        return Err(AppError::new(2, "CSV contains no usable points."));
    }

    Ok(IngestedPoints {
        points,
        row_errors,
        rows_read,
    })
}

fn parse_number(record: &StringRecord, col: usize, name: &str) -> Result<f64, String> {
    let raw = record.get(col).unwrap_or("");
    if raw.is_empty() {
        return Err(format!("missing '{name}'"));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{name}' is not a number: '{raw}'"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{name}' is not finite: '{raw}'"))
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
