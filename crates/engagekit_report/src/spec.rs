//! Report plans, options and errors.

use std::path::PathBuf;

use engagekit_io_csv::TableError;
use engagekit_io_xlsx::{SpecChartPlan, SpecSheetWriteOptions, XlsxReportError};
use engagekit_sim::SimulateError;
use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

use crate::conf::{
    C_FOCUS_INSTITUTION_DEFAULT, F_BENCHMARK_ENGAGEMENT_PCT, TUP_LEADER_INSTITUTIONS_DEFAULT,
    TUP_OPTIMAL_POSTS_PER_WEEK, TUP_OPTIMAL_VIDEO_PCT,
};

////////////////////////////////////////////////////////////////////////////////
// #region WorkbookPlan

/// One table destined for one sheet.
#[derive(Debug, Clone)]
pub struct SpecReportSheet {
    /// Requested sheet name.
    pub sheet_name: String,
    pub df: DataFrame,
    pub options: SpecSheetWriteOptions,
}

impl SpecReportSheet {
    /// Sheet with default write options.
    pub fn new(sheet_name: impl Into<String>, df: DataFrame) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            df,
            options: SpecSheetWriteOptions::default(),
        }
    }

    /// Replace the write options.
    pub fn with_options(mut self, options: SpecSheetWriteOptions) -> Self {
        self.options = options;
        self
    }
}

/// Sheet of charts over earlier data sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecChartSheet {
    pub sheet_name: String,
    pub charts: Vec<SpecChartPlan>,
}

/// Fully computed workbook, ready to be written.
///
/// Data sheets are written in order, chart sheets after them.
#[derive(Debug, Clone)]
pub struct SpecWorkbookPlan {
    /// Default file name within an output directory.
    pub file_name: String,
    pub sheets: Vec<SpecReportSheet>,
    pub chart_sheets: Vec<SpecChartSheet>,
}

impl SpecWorkbookPlan {
    /// Look up a planned sheet by name.
    pub fn sheet(&self, sheet_name: &str) -> Option<&SpecReportSheet> {
        self.sheets.iter().find(|sheet| sheet.sheet_name == sheet_name)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Comparison parameters for the Instagram metrics report.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecMetricsOptions {
    /// Institution compared against the leaders.
    pub focus_institution: String,
    /// Institutions averaged as the market-leader reference.
    pub leader_institutions: Vec<String>,
    /// Industry engagement benchmark, percent.
    pub benchmark_engagement_pct: f64,
    /// Recommended video share, percent, inclusive.
    pub range_video_pct: (f64, f64),
    /// Recommended posts per week, inclusive.
    pub range_posts_per_week: (f64, f64),
}

impl Default for SpecMetricsOptions {
    fn default() -> Self {
        Self {
            focus_institution: C_FOCUS_INSTITUTION_DEFAULT.to_string(),
            leader_institutions: TUP_LEADER_INSTITUTIONS_DEFAULT
                .iter()
                .map(ToString::to_string)
                .collect(),
            benchmark_engagement_pct: F_BENCHMARK_ENGAGEMENT_PCT,
            range_video_pct: TUP_OPTIMAL_VIDEO_PCT,
            range_posts_per_week: TUP_OPTIMAL_POSTS_PER_WEEK,
        }
    }
}

/// Computed qualitative outputs.
#[derive(Debug, Clone)]
pub struct SpecQualitativeReport {
    pub workbook: SpecWorkbookPlan,
    /// Per-institution summary statistics, also written as CSV.
    pub summary_statistics: DataFrame,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Report assembly and output failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Simulate(#[from] SimulateError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Xlsx(#[from] XlsxReportError),
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),
    /// Input table had no records.
    #[error("No records in {0}.")]
    EmptyInput(String),
    /// Focus institution absent from the latest snapshot.
    #[error("Institution {0:?} not present in the latest snapshot.")]
    MissingInstitution(String),
    /// No leader institution present in the latest snapshot.
    #[error("None of the leader institutions {0:?} present in the latest snapshot.")]
    NoLeaders(Vec<String>),
    /// Output directory or file could not be created or renamed.
    #[error("I/O failure on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
