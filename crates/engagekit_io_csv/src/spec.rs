//! Typed input records and table errors.

use std::path::PathBuf;

use chrono::NaiveDate;
use polars::prelude::PolarsError;
use thiserror::Error;

/// One coded post from the qualitative content sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentCodingRecord {
    pub institution: String,
    pub content_category: String,
    pub tone: String,
    pub format: String,
    /// Engagement rate in percent.
    pub engagement_rate: f64,
    /// Coder score, 1-10.
    pub production_quality: f64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub platform: String,
}

/// One dated Instagram account snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct InstagramMetricRecord {
    pub institution: String,
    pub date: NaiveDate,
    pub followers: u64,
    /// Engagement rate in percent.
    pub engagement_rate: f64,
    /// Share of posts that are video, in percent.
    pub video_percentage: f64,
    pub posts_this_week: f64,
}

/// Table read/write failures.
#[derive(Debug, Error)]
pub enum TableError {
    /// File missing, unreadable or not parseable as CSV.
    #[error("Failed to read table {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    /// Required column absent from the header.
    #[error("Required column {column:?} missing from {path:?}")]
    MissingColumn { column: String, path: PathBuf },
    /// Null or unparseable cell; `row` is the zero-based data row.
    #[error("Invalid value in column {column:?} at row {row}")]
    InvalidCell { column: String, row: usize },
    /// Output file could not be created.
    #[error("Failed to write table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),
}
