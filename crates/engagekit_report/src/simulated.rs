//! Workbook for a simulated multi-platform run.

use std::path::Path;

use engagekit_io_xlsx::{EnumChartKind, SpecChartPlan, SpecXlsxReport};
use engagekit_sim::{EnumContentType, SpecPlatformSeries, SpecSimulationRun};
use polars::prelude::{Column, DataFrame};
use tracing::info;

use crate::conf::C_FILE_SIMULATED;
use crate::spec::{ReportError, SpecChartSheet, SpecReportSheet, SpecWorkbookPlan};
use crate::util::format_date;
use crate::workbook::{SpecStagedOutputs, prepare_out_dir, write_workbook};

pub const C_SHEET_CONTENT: &str = "Content_Metrics";
pub const C_SHEET_SUMMARY: &str = "Summary";
pub const C_SHEET_CHARTS: &str = "Charts";

fn derive_platform_df(series: &SpecPlatformSeries) -> Result<DataFrame, ReportError> {
    let l_points = &series.points;
    let df = DataFrame::new(vec![
        Column::new(
            "Followers".into(),
            l_points.iter().map(|p| p.followers).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Engagement_Rate".into(),
            l_points.iter().map(|p| p.engagement_rate).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Likes".into(),
            l_points.iter().map(|p| p.likes).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Comments".into(),
            l_points.iter().map(|p| p.comments).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Shares".into(),
            l_points.iter().map(|p| p.shares).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Date".into(),
            l_points.iter().map(|p| format_date(p.date)).collect::<Vec<String>>(),
        ),
    ])?;
    Ok(df)
}

fn derive_content_df(run: &SpecSimulationRun) -> Result<DataFrame, ReportError> {
    let mut l_columns = Vec::with_capacity(EnumContentType::ALL.len() * 2 + 1);
    for content_type in EnumContentType::ALL {
        let l_entries: Vec<_> = run
            .content
            .iter()
            .map(|day| {
                day.entries
                    .iter()
                    .find(|entry| entry.content_type == content_type)
            })
            .collect();
        l_columns.push(Column::new(
            format!("{content_type}_Posts").into(),
            l_entries
                .iter()
                .map(|entry| entry.map(|e| e.posts))
                .collect::<Vec<Option<u32>>>(),
        ));
        l_columns.push(Column::new(
            format!("{content_type}_Engagement").into(),
            l_entries
                .iter()
                .map(|entry| entry.map(|e| e.engagement_rate))
                .collect::<Vec<Option<f64>>>(),
        ));
    }
    l_columns.push(Column::new(
        "Date".into(),
        run.content
            .iter()
            .map(|day| format_date(day.date))
            .collect::<Vec<String>>(),
    ));
    Ok(DataFrame::new(l_columns)?)
}

fn derive_summary_df(run: &SpecSimulationRun) -> Result<DataFrame, ReportError> {
    let l_summaries = &run.summaries;
    let df = DataFrame::new(vec![
        Column::new(
            "Platform".into(),
            l_summaries
                .iter()
                .map(|s| s.platform.clone())
                .collect::<Vec<String>>(),
        ),
        Column::new(
            "Initial_Followers".into(),
            l_summaries
                .iter()
                .map(|s| s.initial_followers)
                .collect::<Vec<u64>>(),
        ),
        Column::new(
            "Final_Followers".into(),
            l_summaries
                .iter()
                .map(|s| s.final_followers)
                .collect::<Vec<u64>>(),
        ),
        Column::new(
            "Growth_Rate".into(),
            l_summaries
                .iter()
                .map(|s| s.growth_pct)
                .collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "Avg_Engagement".into(),
            l_summaries
                .iter()
                .map(|s| s.avg_engagement_pct)
                .collect::<Vec<f64>>(),
        ),
        Column::new(
            "Total_Interactions".into(),
            l_summaries
                .iter()
                .map(|s| s.total_interactions)
                .collect::<Vec<u64>>(),
        ),
    ])?;
    Ok(df)
}

/// Lay out a run as one sheet per platform, the content mix, a summary and charts.
///
/// A zero-start platform has no growth percentage; its `Growth_Rate` cell is
/// written as `N/A`.
pub fn build_simulated_report(run: &SpecSimulationRun) -> Result<SpecWorkbookPlan, ReportError> {
    let mut l_sheets = Vec::with_capacity(run.platforms.len() + 2);
    let mut l_charts = Vec::with_capacity(run.platforms.len() + 2);
    for series in &run.platforms {
        let c_platform = series.profile.platform.as_str();
        l_sheets.push(SpecReportSheet::new(c_platform, derive_platform_df(series)?));
        l_charts.push(
            SpecChartPlan::new(
                format!("{c_platform} Followers"),
                EnumChartKind::Line,
                c_platform,
                "Date",
                &["Followers"],
            )
            .with_axes("Date", "Followers"),
        );
    }
    l_sheets.push(SpecReportSheet::new(C_SHEET_CONTENT, derive_content_df(run)?));
    l_sheets.push(SpecReportSheet::new(C_SHEET_SUMMARY, derive_summary_df(run)?));

    l_charts.push(
        SpecChartPlan::new(
            "Average Engagement by Platform",
            EnumChartKind::Column,
            C_SHEET_SUMMARY,
            "Platform",
            &["Avg_Engagement"],
        )
        .with_axes("Platform", "Engagement Rate (%)"),
    );
    l_charts.push(
        SpecChartPlan::new(
            "Total Interactions by Platform",
            EnumChartKind::Column,
            C_SHEET_SUMMARY,
            "Platform",
            &["Total_Interactions"],
        )
        .with_axes("Platform", "Interactions"),
    );

    Ok(SpecWorkbookPlan {
        file_name: C_FILE_SIMULATED.to_string(),
        sheets: l_sheets,
        chart_sheets: vec![SpecChartSheet {
            sheet_name: C_SHEET_CHARTS.to_string(),
            charts: l_charts,
        }],
    })
}

/// Build the run's workbook in memory, then write it to `path`.
pub fn write_simulated_workbook(
    run: &SpecSimulationRun,
    path: &Path,
) -> Result<Vec<SpecXlsxReport>, ReportError> {
    let plan = build_simulated_report(run)?;
    if let Some(dir_parent) = path.parent()
        && !dir_parent.as_os_str().is_empty()
    {
        prepare_out_dir(dir_parent)?;
    }
    let mut staged = SpecStagedOutputs::default();
    let l_reports = write_workbook(&plan, &staged.stage(path.to_path_buf()))?;
    staged.commit()?;
    info!(
        n_platforms = run.platforms.len(),
        n_days = run.options.num_days,
        "simulated workbook complete"
    );
    Ok(l_reports)
}
