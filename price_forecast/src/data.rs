//! Price data handling for forecasting
//!
//! Input files are comma-separated with a header row, followed by rows of
//! `timestamp, open, high, low, close, volume`, all read as `f32`.
//! Timestamps are additionally kept as `f64` epoch seconds, since `f32`
//! cannot resolve whole minutes at current epoch values.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Column selector for the fixed price schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Timestamp,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Column {
    /// All columns in file order
    pub const ALL: [Column; 6] = [
        Column::Timestamp,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    /// Zero-based position of the column in a data row
    pub fn index(self) -> usize {
        match self {
            Column::Timestamp => 0,
            Column::Open => 1,
            Column::High => 2,
            Column::Low => 3,
            Column::Close => 4,
            Column::Volume => 5,
        }
    }

    /// Header name of the column
    pub fn name(self) -> &'static str {
        match self {
            Column::Timestamp => "Timestamp",
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::Volume => "Volume",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Column::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ForecastError::InvalidParameter(format!("Unknown column: {}", s)))
    }
}

/// One row of price data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Epoch seconds or an ordinal
    pub timestamp: f32,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub volume: f32,
}

impl PricePoint {
    /// Value of one column
    pub fn value(&self, column: Column) -> f32 {
        match column {
            Column::Timestamp => self.timestamp,
            Column::Open => self.open,
            Column::High => self.high,
            Column::Low => self.low,
            Column::Close => self.close,
            Column::Volume => self.volume,
        }
    }

    /// Parse the first six fields of a CSV record, plus the timestamp at full precision
    fn from_record(record: &StringRecord, line: u64) -> Result<(Self, f64)> {
        if record.len() < Column::ALL.len() {
            return Err(ForecastError::MissingFields {
                line,
                expected: Column::ALL.len(),
                found: record.len(),
            });
        }

        let raw = |column: Column| &record[column.index()];
        let parse_error = |column: Column| ForecastError::ParseError {
            line,
            column: column.name().to_string(),
            value: raw(column).to_string(),
        };
        let field = |column: Column| -> Result<f32> {
            raw(column).parse::<f32>().map_err(|_| parse_error(column))
        };

        let epoch = raw(Column::Timestamp)
            .parse::<f64>()
            .map_err(|_| parse_error(Column::Timestamp))?;
        let point = Self {
            timestamp: field(Column::Timestamp)?,
            open: field(Column::Open)?,
            high: field(Column::High)?,
            low: field(Column::Low)?,
            close: field(Column::Close)?,
            volume: field(Column::Volume)?,
        };
        Ok((point, epoch))
    }
}

/// Interpret `secs` as Unix epoch seconds
fn epoch_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Ordered price rows, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<PricePoint>,
    /// Row timestamps as `f64` epoch seconds
    epochs: Vec<f64>,
}

/// Data loader for price files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let path = path.as_ref();
        info!("Loading price data from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a dataset from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        let mut epochs = Vec::new();
        for (index, record) in rdr.records().enumerate() {
            let record = record?;
            // Header is line 1
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);
            let (point, epoch) = PricePoint::from_record(&record, line)?;
            points.push(point);
            epochs.push(epoch);
        }

        debug!(rows = points.len(), "Parsed price rows");
        Ok(Dataset { points, epochs })
    }
}

impl Dataset {
    /// Create a dataset from rows already in time order
    ///
    /// Row times come from the `f32` timestamps; loaded files keep the exact values.
    pub fn new(points: Vec<PricePoint>) -> Self {
        let epochs = points.iter().map(|p| f64::from(p.timestamp)).collect();
        Self { points, epochs }
    }

    /// Build a dataset whose only meaningful column is `close`, with ordinal timestamps
    pub fn from_closes(closes: &[f32]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: i as f32,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        let epochs = (0..closes.len()).map(|i| i as f64).collect();
        Self { points, epochs }
    }

    /// All rows
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent row
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Time of row `index`, reading its timestamp as Unix epoch seconds
    pub fn datetime(&self, index: usize) -> Option<DateTime<Utc>> {
        self.epochs.get(index).copied().and_then(epoch_to_datetime)
    }

    /// Time of the most recent row
    pub fn last_datetime(&self) -> Option<DateTime<Utc>> {
        self.datetime(self.epochs.len().checked_sub(1)?)
    }

    /// One column as a vector
    pub fn column(&self, column: Column) -> Vec<f32> {
        self.points.iter().map(|p| p.value(column)).collect()
    }

    /// The close prices as a vector
    pub fn close_prices(&self) -> Vec<f32> {
        self.column(Column::Close)
    }

    /// Rows `start..end` (end defaults to the length)
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let end = end.unwrap_or(self.points.len());
        if start > end || end > self.points.len() {
            return Err(ForecastError::DataError(format!(
                "Slice {}..{} out of range for {} rows",
                start,
                end,
                self.points.len()
            )));
        }
        Ok(Self {
            points: self.points[start..end].to_vec(),
            epochs: self.epochs[start..end].to_vec(),
        })
    }

    /// Spacing of the last two rows, when both are valid epoch times in increasing order
    pub fn sampling_interval(&self) -> Option<Duration> {
        let n = self.epochs.len();
        if n < 2 {
            return None;
        }
        let previous = self.datetime(n - 2)?;
        let last = self.datetime(n - 1)?;
        let step = last - previous;
        (step > Duration::zero()).then_some(step)
    }
}
