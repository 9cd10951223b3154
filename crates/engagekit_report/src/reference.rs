//! Workbooks of published reference figures.

use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame};

use crate::conf::{
    C_FILE_REFERENCE_EXECUTIVE, C_FILE_REFERENCE_METRICS, C_REFERENCE_FOCUS_INSTITUTION,
    N_DECIMALS_REPORT, TUP_CONTENT_FORMATS, TUP_EXECUTIVE_SUMMARY, TUP_INSTAGRAM_PERFORMANCE,
    TUP_PLATFORM_METRICS, TUP_STRATEGIC_INITIATIVES,
};
use crate::spec::{ReportError, SpecReportSheet, SpecWorkbookPlan};
use crate::stats::round_to;
use crate::util::derive_color_scale_options;
use crate::workbook::write_workbooks;

pub const C_SHEET_INSTAGRAM: &str = "Instagram Performance";
pub const C_SHEET_PLATFORMS: &str = "Platform Metrics";
pub const C_SHEET_FORMATS: &str = "Content Formats";
pub const C_SHEET_INITIATIVES: &str = "Strategic Initiatives";
pub const C_SHEET_EXECUTIVE: &str = "Executive Summary";

fn derive_instagram_df() -> Result<DataFrame, ReportError> {
    let rows = &TUP_INSTAGRAM_PERFORMANCE;
    Ok(DataFrame::new(vec![
        Column::new(
            "Institution".into(),
            rows.iter().map(|r| r.0).collect::<Vec<&str>>(),
        ),
        Column::new(
            "Followers".into(),
            rows.iter().map(|r| r.1).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Posts".into(),
            rows.iter().map(|r| r.2).collect::<Vec<Option<u64>>>(),
        ),
        Column::new(
            "Market_Position".into(),
            rows.iter().map(|r| r.3).collect::<Vec<&str>>(),
        ),
    ])?)
}

/// `Gap` is the current rate minus the benchmark.
fn derive_platform_df() -> Result<DataFrame, ReportError> {
    let rows = &TUP_PLATFORM_METRICS;
    Ok(DataFrame::new(vec![
        Column::new(
            "Platform".into(),
            rows.iter().map(|r| r.0).collect::<Vec<&str>>(),
        ),
        Column::new(
            "Current_Rate".into(),
            rows.iter().map(|r| r.1).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Benchmark".into(),
            rows.iter().map(|r| r.2).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Gap".into(),
            rows.iter()
                .map(|r| round_to(r.1 - r.2, N_DECIMALS_REPORT))
                .collect::<Vec<f64>>(),
        ),
        Column::new(
            "Impact".into(),
            rows.iter().map(|r| r.3).collect::<Vec<&str>>(),
        ),
    ])?)
}

fn derive_formats_df() -> Result<DataFrame, ReportError> {
    let rows = &TUP_CONTENT_FORMATS;
    Ok(DataFrame::new(vec![
        Column::new(
            "Format".into(),
            rows.iter().map(|r| r.0).collect::<Vec<&str>>(),
        ),
        Column::new(
            "Engagement_Rate".into(),
            rows.iter().map(|r| r.1).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Completion_Rate".into(),
            rows.iter().map(|r| r.2).collect::<Vec<Option<u64>>>(),
        ),
        Column::new(
            "Growth_Potential".into(),
            rows.iter().map(|r| r.3).collect::<Vec<&str>>(),
        ),
    ])?)
}

fn derive_initiatives_df() -> Result<DataFrame, ReportError> {
    let rows = &TUP_STRATEGIC_INITIATIVES;
    Ok(DataFrame::new(vec![
        Column::new(
            "Initiative".into(),
            rows.iter().map(|r| r.0).collect::<Vec<&str>>(),
        ),
        Column::new(
            "Required_Resources".into(),
            rows.iter().map(|r| r.1).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Timeline_Days".into(),
            rows.iter().map(|r| r.2).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Expected_ROI".into(),
            rows.iter().map(|r| r.3).collect::<Vec<u64>>(),
        ),
    ])?)
}

/// Executive summary; the two follower rows derive from the Instagram figures.
fn derive_executive_df() -> Result<DataFrame, ReportError> {
    let rows = &TUP_INSTAGRAM_PERFORMANCE;
    let n_focus = rows
        .iter()
        .find(|r| r.0 == C_REFERENCE_FOCUS_INSTITUTION)
        .map(|r| r.1)
        .ok_or_else(|| ReportError::MissingInstitution(C_REFERENCE_FOCUS_INSTITUTION.to_string()))?;
    let n_leader = rows.iter().map(|r| r.1).max().unwrap_or(n_focus);
    let n_gap = n_focus as i64 - n_leader as i64;

    let mut l_metric = vec!["Total Instagram Followers", "Follower Gap vs Leader"];
    let mut l_value = vec![n_focus.to_string(), n_gap.to_string()];
    let mut l_status = vec!["Critical", "Critical"];
    for (c_metric, c_value, c_status) in TUP_EXECUTIVE_SUMMARY {
        l_metric.push(c_metric);
        l_value.push(c_value.to_string());
        l_status.push(c_status);
    }

    Ok(DataFrame::new(vec![
        Column::new("Metric".into(), l_metric),
        Column::new("Value".into(), l_value),
        Column::new("Status".into(), l_status),
    ])?)
}

/// The metrics workbook and the executive workbook, in that order.
pub fn build_reference_reports() -> Result<Vec<SpecWorkbookPlan>, ReportError> {
    let plan_metrics = SpecWorkbookPlan {
        file_name: C_FILE_REFERENCE_METRICS.to_string(),
        sheets: vec![
            SpecReportSheet::new(C_SHEET_INSTAGRAM, derive_instagram_df()?),
            SpecReportSheet::new(C_SHEET_PLATFORMS, derive_platform_df()?)
                .with_options(derive_color_scale_options(&["Benchmark"])),
            SpecReportSheet::new(C_SHEET_FORMATS, derive_formats_df()?)
                .with_options(derive_color_scale_options(&["Engagement_Rate"])),
            SpecReportSheet::new(C_SHEET_INITIATIVES, derive_initiatives_df()?),
        ],
        chart_sheets: vec![],
    };
    let plan_executive = SpecWorkbookPlan {
        file_name: C_FILE_REFERENCE_EXECUTIVE.to_string(),
        sheets: vec![SpecReportSheet::new(C_SHEET_EXECUTIVE, derive_executive_df()?)],
        chart_sheets: vec![],
    };
    Ok(vec![plan_metrics, plan_executive])
}

/// Build both reference workbooks, then write them under `dir_out`.
pub fn write_reference_workbooks(dir_out: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let l_plans = build_reference_reports()?;
    write_workbooks(&l_plans, dir_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;

    #[test]
    fn platform_gap_matches_published_values() {
        let df = derive_platform_df().expect("df");
        let gap = df.column("Gap").expect("col");
        let l_expected = [-1.49, -4.80, -1.75, -2.07, -1.81];
        for (n_idx, f_expected) in l_expected.iter().enumerate() {
            assert_eq!(gap.get(n_idx).expect("cell"), AnyValue::Float64(*f_expected));
        }
    }

    #[test]
    fn executive_summary_derives_follower_rows() {
        let df = derive_executive_df().expect("df");
        assert_eq!(df.shape(), (8, 3));
        let value = df.column("Value").expect("col").as_materialized_series();
        let ca = value.str().expect("str");
        assert_eq!(ca.get(0), Some("15000"));
        assert_eq!(ca.get(1), Some("-578000"));
        assert_eq!(ca.get(7), Some("2.28% weekly"));
    }

    #[test]
    fn reference_reports_carry_color_scales() {
        let l_plans = build_reference_reports().expect("plans");
        assert_eq!(l_plans.len(), 2);
        let platforms = l_plans[0].sheet(C_SHEET_PLATFORMS).expect("sheet");
        assert_eq!(platforms.options.color_scales[0].column, "Benchmark");
        let instagram = l_plans[0].sheet(C_SHEET_INSTAGRAM).expect("sheet");
        assert_eq!(instagram.df.column("Posts").expect("col").null_count(), 2);
    }

    #[test]
    fn write_reference_workbooks_writes_both_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let l_paths = write_reference_workbooks(dir.path()).expect("write");
        assert_eq!(
            l_paths,
            vec![
                dir.path().join("social_media_metrics.xlsx"),
                dir.path().join("executive_metrics.xlsx")
            ]
        );
        assert!(l_paths.iter().all(|path| path.exists()));
    }
}
