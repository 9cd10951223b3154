//! `engagekit_report` v1:
//! Report assembly over simulated runs, reference figures and coded inputs.
//!
//! Every report is computed into a [`SpecWorkbookPlan`] in memory first and
//! only then written.
//!
//! - `conf`        : output names, benchmarks and reference tables
//! - `spec`        : sheet/workbook plans, options, errors
//! - `stats`       : descriptive statistics
//! - `util`        : pivots and small table helpers
//! - `workbook`    : plan-to-disk writer with staged outputs
//! - `simulated`   : simulated-run workbook
//! - `reference`   : published reference workbooks
//! - `metrics`     : Instagram metrics comparison
//! - `qualitative` : content-coding analysis
pub mod conf;
pub mod metrics;
pub mod qualitative;
pub mod reference;
pub mod simulated;
pub mod spec;
pub mod stats;
pub mod util;
pub mod workbook;

pub use conf::{
    C_FILE_METRICS, C_FILE_QUALITATIVE, C_FILE_REFERENCE_EXECUTIVE, C_FILE_REFERENCE_METRICS,
    C_FILE_SIMULATED, C_FILE_SUMMARY_STATISTICS, F_BENCHMARK_ENGAGEMENT_PCT,
};
pub use metrics::{build_metrics_report, write_metrics_report};
pub use qualitative::{build_qualitative_report, write_qualitative_report};
pub use reference::{build_reference_reports, write_reference_workbooks};
pub use simulated::{build_simulated_report, write_simulated_workbook};
pub use spec::{
    ReportError, SpecChartSheet, SpecMetricsOptions, SpecQualitativeReport, SpecReportSheet,
    SpecWorkbookPlan,
};
pub use workbook::{SpecStagedOutputs, stage_workbooks, write_workbook, write_workbooks};
