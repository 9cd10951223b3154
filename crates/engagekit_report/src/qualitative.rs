//! Qualitative content-coding report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use engagekit_io_csv::{ContentCodingRecord, load_content_coding, write_csv_table};
use engagekit_io_xlsx::{EnumChartKind, SpecChartPlan};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info};

use crate::conf::{
    C_FILE_QUALITATIVE, C_FILE_SUMMARY_STATISTICS, N_DECIMALS_REPORT, TUP_VOICE_CHARACTERISTICS,
    TUP_VOICE_SCORES,
};
use crate::spec::{
    ReportError, SpecChartSheet, SpecQualitativeReport, SpecReportSheet, SpecWorkbookPlan,
};
use crate::stats::{mean, median, round_to, sample_std};
use crate::util::{EnumPivotAgg, SpecPivotTable, derive_color_scale_options, plan_pivot};
use crate::workbook::{SpecStagedOutputs, stage_workbooks};

pub const C_SHEET_CATEGORIES: &str = "Content_Categories";
pub const C_SHEET_TONE: &str = "Tone_Distribution";
pub const C_SHEET_FORMAT_ENGAGEMENT: &str = "Format_Engagement";
pub const C_SHEET_PRODUCTION_QUALITY: &str = "Production_Quality";
pub const C_SHEET_PLATFORM_ENGAGEMENT: &str = "Platform_Engagement";
pub const C_SHEET_VOICE: &str = "Voice_Characteristics";
pub const C_SHEET_SUMMARY_STATISTICS: &str = "Summary_Statistics";
pub const C_SHEET_CHARTS: &str = "Charts";

const C_COL_INSTITUTION: &str = "Institution";
const C_COL_CHARACTERISTIC: &str = "Characteristic";

////////////////////////////////////////////////////////////////////////////////
// #region Tables

/// Pivot sheet plus the value column headers it produced.
struct SpecPivotSheet {
    sheet: SpecReportSheet,
    col_headers: Vec<String>,
}

fn derive_pivot_sheet(
    sheet_name: &str,
    pivot: SpecPivotTable,
    if_color_scale: bool,
) -> Result<SpecPivotSheet, ReportError> {
    let df = pivot.to_dataframe(C_COL_INSTITUTION, N_DECIMALS_REPORT)?;
    let col_headers = pivot.derive_col_headers(C_COL_INSTITUTION);
    let mut sheet = SpecReportSheet::new(sheet_name, df);
    if if_color_scale {
        let l_cols: Vec<&str> = col_headers.iter().map(String::as_str).collect();
        sheet = sheet.with_options(derive_color_scale_options(&l_cols));
    }
    Ok(SpecPivotSheet { sheet, col_headers })
}

/// Coded brand-voice scores, one column per institution.
pub fn derive_voice_df() -> Result<DataFrame, ReportError> {
    let mut l_columns = Vec::with_capacity(TUP_VOICE_SCORES.len() + 1);
    l_columns.push(Column::new(
        C_COL_CHARACTERISTIC.into(),
        TUP_VOICE_CHARACTERISTICS.to_vec(),
    ));
    for (c_institution, arr_scores) in TUP_VOICE_SCORES {
        l_columns.push(Column::new(c_institution.into(), arr_scores.to_vec()));
    }
    Ok(DataFrame::new(l_columns)?)
}

fn derive_rounded(values: &[f64], reduce: fn(&[f64]) -> Option<f64>) -> Option<f64> {
    reduce(values).map(|x| round_to(x, N_DECIMALS_REPORT))
}

/// Per-institution descriptive statistics, institutions sorted.
///
/// A standard deviation needs two posts; single-post institutions get a
/// missing value.
pub fn derive_summary_statistics_df(
    records: &[ContentCodingRecord],
) -> Result<DataFrame, ReportError> {
    let mut dict_groups: BTreeMap<&str, Vec<&ContentCodingRecord>> = BTreeMap::new();
    for record in records {
        dict_groups
            .entry(record.institution.as_str())
            .or_default()
            .push(record);
    }

    // (column, field, reduction)
    let l_stats: [(&str, fn(&ContentCodingRecord) -> f64, fn(&[f64]) -> Option<f64>); 8] = [
        ("Engagement_Rate_mean", |r| r.engagement_rate, mean),
        ("Engagement_Rate_median", |r| r.engagement_rate, median),
        ("Engagement_Rate_std", |r| r.engagement_rate, sample_std),
        ("Production_Quality_mean", |r| r.production_quality, mean),
        ("Production_Quality_median", |r| r.production_quality, median),
        ("Likes_mean", |r| r.likes as f64, mean),
        ("Comments_mean", |r| r.comments as f64, mean),
        ("Shares_mean", |r| r.shares as f64, mean),
    ];

    let mut l_columns = Vec::with_capacity(l_stats.len() + 1);
    l_columns.push(Column::new(
        C_COL_INSTITUTION.into(),
        dict_groups.keys().copied().collect::<Vec<&str>>(),
    ));
    for (c_col, field, reduce) in l_stats {
        let l_values: Vec<Option<f64>> = dict_groups
            .values()
            .map(|l_group| {
                let l_field: Vec<f64> = l_group.iter().map(|&r| field(r)).collect();
                derive_rounded(&l_field, reduce)
            })
            .collect();
        l_columns.push(Column::new(c_col.into(), l_values));
    }
    Ok(DataFrame::new(l_columns)?)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Report

fn plan_pivot_chart(title: &str, sheet: &SpecPivotSheet, y_axis_title: &str) -> SpecChartPlan {
    let l_cols: Vec<&str> = sheet.col_headers.iter().map(String::as_str).collect();
    SpecChartPlan::new(
        title,
        EnumChartKind::Column,
        sheet.sheet.sheet_name.as_str(),
        C_COL_INSTITUTION,
        &l_cols,
    )
    .with_axes(C_COL_INSTITUTION, y_axis_title)
}

/// Compute every qualitative table and chart plan from the coded posts.
pub fn build_qualitative_report(
    records: &[ContentCodingRecord],
) -> Result<SpecQualitativeReport, ReportError> {
    if records.is_empty() {
        return Err(ReportError::EmptyInput("content coding".to_string()));
    }

    let categories = derive_pivot_sheet(
        C_SHEET_CATEGORIES,
        plan_pivot(
            records,
            |r| r.institution.as_str(),
            |r| r.content_category.as_str(),
            |_| 1.0,
            EnumPivotAgg::SharePct,
        ),
        false,
    )?;
    let tone = derive_pivot_sheet(
        C_SHEET_TONE,
        plan_pivot(
            records,
            |r| r.institution.as_str(),
            |r| r.tone.as_str(),
            |_| 1.0,
            EnumPivotAgg::SharePct,
        ),
        false,
    )?;
    let format_engagement = derive_pivot_sheet(
        C_SHEET_FORMAT_ENGAGEMENT,
        plan_pivot(
            records,
            |r| r.institution.as_str(),
            |r| r.format.as_str(),
            |r| r.engagement_rate,
            EnumPivotAgg::Mean,
        ),
        false,
    )?;
    let production_quality = derive_pivot_sheet(
        C_SHEET_PRODUCTION_QUALITY,
        plan_pivot(
            records,
            |r| r.institution.as_str(),
            |r| r.format.as_str(),
            |r| r.production_quality,
            EnumPivotAgg::Mean,
        ),
        true,
    )?;
    let platform_engagement = derive_pivot_sheet(
        C_SHEET_PLATFORM_ENGAGEMENT,
        plan_pivot(
            records,
            |r| r.institution.as_str(),
            |r| r.platform.as_str(),
            |r| r.engagement_rate,
            EnumPivotAgg::Mean,
        ),
        false,
    )?;
    let df_summary = derive_summary_statistics_df(records)?;
    debug!(
        n_records = records.len(),
        n_institutions = df_summary.height(),
        "qualitative tables computed"
    );

    let l_charts = vec![
        plan_pivot_chart(
            "Content Category Distribution by Institution",
            &categories,
            "Percentage of Posts (%)",
        ),
        plan_pivot_chart("Tone Distribution by Institution", &tone, "Percentage of Posts (%)"),
        plan_pivot_chart(
            "Average Engagement Rate by Content Format",
            &format_engagement,
            "Engagement Rate (%)",
        ),
        plan_pivot_chart(
            "Production Quality Scores by Format",
            &production_quality,
            "Production Quality (1-10)",
        ),
        plan_pivot_chart(
            "Engagement Rate by Platform",
            &platform_engagement,
            "Engagement Rate (%)",
        ),
        SpecChartPlan::new(
            "Brand Voice Characteristics Comparison",
            EnumChartKind::Radar,
            C_SHEET_VOICE,
            C_COL_CHARACTERISTIC,
            &TUP_VOICE_SCORES.map(|(c_institution, _)| c_institution),
        ),
        SpecChartPlan::new(
            "Mean Engagement Rate by Institution",
            EnumChartKind::Column,
            C_SHEET_SUMMARY_STATISTICS,
            C_COL_INSTITUTION,
            &["Engagement_Rate_mean", "Engagement_Rate_median"],
        )
        .with_axes(C_COL_INSTITUTION, "Engagement Rate (%)"),
    ];

    let sheets = vec![
        categories.sheet,
        tone.sheet,
        format_engagement.sheet,
        production_quality.sheet,
        platform_engagement.sheet,
        SpecReportSheet::new(C_SHEET_VOICE, derive_voice_df()?),
        SpecReportSheet::new(C_SHEET_SUMMARY_STATISTICS, df_summary.clone()),
    ];

    Ok(SpecQualitativeReport {
        workbook: SpecWorkbookPlan {
            file_name: C_FILE_QUALITATIVE.to_string(),
            sheets,
            chart_sheets: vec![SpecChartSheet {
                sheet_name: C_SHEET_CHARTS.to_string(),
                charts: l_charts,
            }],
        },
        summary_statistics: df_summary,
    })
}

/// Load `path_input`, then write the workbook and summary CSV under `dir_out`.
pub fn write_qualitative_report(
    path_input: &Path,
    dir_out: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let records = load_content_coding(path_input)?;
    let report = build_qualitative_report(&records)?;

    let mut staged = SpecStagedOutputs::default();
    stage_workbooks(std::slice::from_ref(&report.workbook), dir_out, &mut staged)?;
    let path_csv = staged.stage(dir_out.join(C_FILE_SUMMARY_STATISTICS));
    write_csv_table(&report.summary_statistics, &path_csv)?;
    let l_paths = staged.commit()?;
    info!(n_records = records.len(), "qualitative report complete");
    Ok(l_paths)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
