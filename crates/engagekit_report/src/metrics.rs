//! Quantitative Instagram metrics report.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use engagekit_io_csv::{InstagramMetricRecord, load_instagram_metrics};
use engagekit_io_xlsx::{EnumChartKind, SpecChartPlan};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::{debug, info};

use crate::conf::{C_FILE_METRICS, N_DECIMALS_REPORT};
use crate::spec::{
    ReportError, SpecChartSheet, SpecMetricsOptions, SpecReportSheet, SpecWorkbookPlan,
};
use crate::stats::{derive_growth_pct, derive_share_pct, mean, round_to};
use crate::util::{
    derive_color_scale_options, derive_ordered_unique, derive_unique_headers, format_date,
};
use crate::workbook::write_workbooks;

pub const C_SHEET_LATEST: &str = "Latest_Snapshot";
pub const C_SHEET_FOLLOWER_TIMELINE: &str = "Follower_Timeline";
pub const C_SHEET_ENGAGEMENT_TIMELINE: &str = "Engagement_Timeline";
pub const C_SHEET_ENGAGEMENT_RANKING: &str = "Engagement_Ranking";
pub const C_SHEET_VIDEO_RANKING: &str = "Video_Ranking";
pub const C_SHEET_POSTING_RANKING: &str = "Posting_Frequency";
pub const C_SHEET_PERFORMANCE_MATRIX: &str = "Performance_Matrix";
pub const C_SHEET_GAP_ANALYSIS: &str = "Gap_Analysis";
pub const C_SHEET_CHARTS: &str = "Charts";

const C_COL_DATE: &str = "Date";
/// Column header for the leader average in the gap analysis.
pub const C_COL_LEADERS_AVG: &str = "Market Leaders Avg";
/// Fixed gap analysis headers next to the focus institution column.
const TUP_GAP_COLS: [&str; 4] = ["Metric", C_COL_LEADERS_AVG, "Gap", "Gap_Pct"];
/// (column, label, field) compared in the performance matrix and gap analysis.
const TUP_MATRIX_METRICS: [(&str, &str, fn(&InstagramMetricRecord) -> f64); 4] = [
    ("Followers", "Followers", |r| r.followers as f64),
    ("Engagement_Rate", "Engagement Rate", |r| r.engagement_rate),
    ("Posts_This_Week", "Posts/Week", |r| r.posts_this_week),
    ("Video_Percentage", "Video Content %", |r| r.video_percentage),
];

fn derive_flag(if_true: bool) -> &'static str {
    if if_true { "Yes" } else { "No" }
}

fn derive_in_range(x: f64, range: (f64, f64)) -> bool {
    x >= range.0 && x <= range.1
}

////////////////////////////////////////////////////////////////////////////////
// #region Snapshot

/// Records dated on the most recent date, input order.
pub fn select_latest_snapshot(
    records: &[InstagramMetricRecord],
) -> Option<(NaiveDate, Vec<&InstagramMetricRecord>)> {
    let date_latest = records.iter().map(|r| r.date).max()?;
    Some((
        date_latest,
        records.iter().filter(|r| r.date == date_latest).collect(),
    ))
}

fn derive_latest_df(
    latest: &[&InstagramMetricRecord],
    options: &SpecMetricsOptions,
) -> Result<DataFrame, ReportError> {
    Ok(DataFrame::new(vec![
        Column::new(
            "Institution".into(),
            latest.iter().map(|r| r.institution.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            C_COL_DATE.into(),
            latest.iter().map(|r| format_date(r.date)).collect::<Vec<_>>(),
        ),
        Column::new(
            "Followers".into(),
            latest.iter().map(|r| r.followers).collect::<Vec<u64>>(),
        ),
        Column::new(
            "Engagement_Rate".into(),
            latest.iter().map(|r| r.engagement_rate).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Video_Percentage".into(),
            latest.iter().map(|r| r.video_percentage).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Posts_This_Week".into(),
            latest.iter().map(|r| r.posts_this_week).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Benchmark_Gap".into(),
            latest
                .iter()
                .map(|r| {
                    round_to(
                        r.engagement_rate - options.benchmark_engagement_pct,
                        N_DECIMALS_REPORT,
                    )
                })
                .collect::<Vec<f64>>(),
        ),
    ])?)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Timelines

/// Timeline column headers; an institution named like the date column is renamed.
fn derive_timeline_headers(l_institutions: &[String]) -> Vec<String> {
    derive_unique_headers(&[C_COL_DATE], l_institutions)
}

/// Date rows by institution columns; absent observations are missing cells.
fn derive_timeline_df<T>(
    records: &[InstagramMetricRecord],
    l_institutions: &[String],
    value: impl Fn(&InstagramMetricRecord) -> T,
) -> Result<DataFrame, ReportError>
where
    T: Copy,
    Series: NamedFrom<Vec<Option<T>>, [Option<T>]>,
{
    let l_dates: Vec<NaiveDate> = records
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let dict_values: BTreeMap<(&str, NaiveDate), T> = records
        .iter()
        .map(|r| ((r.institution.as_str(), r.date), value(r)))
        .collect();

    let mut l_columns = Vec::with_capacity(l_institutions.len() + 1);
    l_columns.push(Column::new::<Vec<String>, [String]>(
        C_COL_DATE.into(),
        l_dates.iter().map(|date| format_date(*date)).collect::<Vec<_>>(),
    ));
    let l_headers = derive_timeline_headers(l_institutions);
    for (c_institution, c_header) in l_institutions.iter().zip(&l_headers) {
        let l_values: Vec<Option<T>> = l_dates
            .iter()
            .map(|date| dict_values.get(&(c_institution.as_str(), *date)).copied())
            .collect();
        l_columns.push(Column::from(Series::new(c_header.as_str().into(), l_values)));
    }
    Ok(DataFrame::new(l_columns)?)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Rankings

fn derive_engagement_ranking_df(
    latest: &[&InstagramMetricRecord],
    options: &SpecMetricsOptions,
) -> Result<DataFrame, ReportError> {
    let mut l_sorted = latest.to_vec();
    l_sorted.sort_by(|a, b| b.engagement_rate.total_cmp(&a.engagement_rate));
    Ok(DataFrame::new(vec![
        Column::new("Rank".into(), (1..=l_sorted.len() as u64).collect::<Vec<u64>>()),
        Column::new(
            "Institution".into(),
            l_sorted.iter().map(|r| r.institution.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Engagement_Rate".into(),
            l_sorted.iter().map(|r| r.engagement_rate).collect::<Vec<f64>>(),
        ),
        Column::new(
            "Benchmark".into(),
            vec![options.benchmark_engagement_pct; l_sorted.len()],
        ),
        Column::new(
            "Above_Benchmark".into(),
            l_sorted
                .iter()
                .map(|r| derive_flag(r.engagement_rate >= options.benchmark_engagement_pct))
                .collect::<Vec<_>>(),
        ),
    ])?)
}

/// Latest records ranked by one metric, with an optimal-range flag.
fn derive_range_ranking_df(
    latest: &[&InstagramMetricRecord],
    c_col_value: &str,
    value: impl Fn(&InstagramMetricRecord) -> f64,
    range: (f64, f64),
) -> Result<DataFrame, ReportError> {
    let mut l_sorted = latest.to_vec();
    l_sorted.sort_by(|a, b| value(*b).total_cmp(&value(*a)));
    Ok(DataFrame::new(vec![
        Column::new("Rank".into(), (1..=l_sorted.len() as u64).collect::<Vec<u64>>()),
        Column::new(
            "Institution".into(),
            l_sorted.iter().map(|r| r.institution.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            c_col_value.into(),
            l_sorted.iter().map(|r| value(*r)).collect::<Vec<f64>>(),
        ),
        Column::new(
            "In_Optimal_Range".into(),
            l_sorted
                .iter()
                .map(|r| derive_flag(derive_in_range(value(*r), range)))
                .collect::<Vec<_>>(),
        ),
    ])?)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Comparisons

/// Each metric as a percent of the best institution; a zero leader gives `None`.
pub fn derive_performance_matrix_df(
    latest: &[&InstagramMetricRecord],
) -> Result<DataFrame, ReportError> {
    let mut l_columns = Vec::with_capacity(TUP_MATRIX_METRICS.len() + 1);
    l_columns.push(Column::new(
        "Institution".into(),
        latest.iter().map(|r| r.institution.clone()).collect::<Vec<_>>(),
    ));
    for (c_col, _, field) in TUP_MATRIX_METRICS {
        let l_raw: Vec<f64> = latest.iter().map(|&r| field(r)).collect();
        let f_max = l_raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let l_pct: Vec<Option<f64>> = l_raw
            .iter()
            .map(|x| derive_share_pct(*x, f_max).map(|pct| round_to(pct, N_DECIMALS_REPORT)))
            .collect();
        l_columns.push(Column::new(c_col.into(), l_pct));
    }
    Ok(DataFrame::new(l_columns)?)
}

/// Gap analysis header for the focus institution, kept apart from the fixed columns.
fn derive_gap_focus_header(options: &SpecMetricsOptions) -> String {
    derive_unique_headers(&TUP_GAP_COLS, std::slice::from_ref(&options.focus_institution))
        .pop()
        .unwrap_or_else(|| options.focus_institution.clone())
}

/// Focus institution against the mean of the leaders present.
///
/// `Gap` is leaders minus focus; `Gap_Pct` is that gap relative to the focus
/// value and is missing when the focus value is zero.
pub fn derive_gap_analysis_df(
    latest: &[&InstagramMetricRecord],
    options: &SpecMetricsOptions,
) -> Result<DataFrame, ReportError> {
    let focus = latest
        .iter()
        .find(|r| r.institution == options.focus_institution)
        .ok_or_else(|| ReportError::MissingInstitution(options.focus_institution.clone()))?;
    let l_leaders: Vec<&InstagramMetricRecord> = latest
        .iter()
        .copied()
        .filter(|r| options.leader_institutions.contains(&r.institution))
        .collect();
    if l_leaders.is_empty() {
        return Err(ReportError::NoLeaders(options.leader_institutions.clone()));
    }
    debug!(
        focus = %options.focus_institution,
        n_leaders = l_leaders.len(),
        "gap analysis peers resolved"
    );

    let mut l_focus = Vec::with_capacity(TUP_MATRIX_METRICS.len());
    let mut l_leaders_avg = Vec::with_capacity(TUP_MATRIX_METRICS.len());
    let mut l_gap = Vec::with_capacity(TUP_MATRIX_METRICS.len());
    let mut l_gap_pct = Vec::with_capacity(TUP_MATRIX_METRICS.len());
    for (_, _, field) in TUP_MATRIX_METRICS {
        let f_focus = field(focus);
        let l_values: Vec<f64> = l_leaders.iter().map(|&r| field(r)).collect();
        let f_leaders = mean(&l_values).unwrap_or(0.0);
        l_focus.push(round_to(f_focus, N_DECIMALS_REPORT));
        l_leaders_avg.push(round_to(f_leaders, N_DECIMALS_REPORT));
        l_gap.push(round_to(f_leaders - f_focus, N_DECIMALS_REPORT));
        l_gap_pct.push(
            derive_growth_pct(f_focus, f_leaders).map(|pct| round_to(pct, N_DECIMALS_REPORT)),
        );
    }

    let [c_col_metric, c_col_leaders, c_col_gap, c_col_gap_pct] = TUP_GAP_COLS;
    Ok(DataFrame::new(vec![
        Column::new(
            c_col_metric.into(),
            TUP_MATRIX_METRICS.iter().map(|m| m.1).collect::<Vec<&str>>(),
        ),
        Column::new(derive_gap_focus_header(options).as_str().into(), l_focus),
        Column::new(c_col_leaders.into(), l_leaders_avg),
        Column::new(c_col_gap.into(), l_gap),
        Column::new(c_col_gap_pct.into(), l_gap_pct),
    ])?)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Report

fn plan_metric_charts(l_institutions: &[String], options: &SpecMetricsOptions) -> Vec<SpecChartPlan> {
    let l_headers = derive_timeline_headers(l_institutions);
    let l_inst: Vec<&str> = l_headers.iter().map(String::as_str).collect();
    let c_focus = derive_gap_focus_header(options);
    vec![
        SpecChartPlan::new(
            "Instagram Follower Growth",
            EnumChartKind::Line,
            C_SHEET_FOLLOWER_TIMELINE,
            C_COL_DATE,
            &l_inst,
        )
        .with_axes("Date", "Followers"),
        SpecChartPlan::new(
            "Instagram Followers - Current Comparison",
            EnumChartKind::Column,
            C_SHEET_LATEST,
            "Institution",
            &["Followers"],
        )
        .with_axes("Institution", "Followers"),
        SpecChartPlan::new(
            "Instagram Engagement Rates vs. Industry Benchmark",
            EnumChartKind::Bar,
            C_SHEET_ENGAGEMENT_RANKING,
            "Institution",
            &["Engagement_Rate", "Benchmark"],
        )
        .with_axes("Engagement Rate (%)", "Institution"),
        SpecChartPlan::new(
            "Instagram Engagement Rate Trends",
            EnumChartKind::Line,
            C_SHEET_ENGAGEMENT_TIMELINE,
            C_COL_DATE,
            &l_inst,
        )
        .with_axes("Date", "Engagement Rate (%)"),
        SpecChartPlan::new(
            "Video Content Percentage by Institution",
            EnumChartKind::Column,
            C_SHEET_VIDEO_RANKING,
            "Institution",
            &["Video_Percentage"],
        )
        .with_axes("Institution", "Video Content (%)"),
        SpecChartPlan::new(
            "Posting Frequency (Posts per Week)",
            EnumChartKind::Bar,
            C_SHEET_POSTING_RANKING,
            "Institution",
            &["Posts_This_Week"],
        )
        .with_axes("Posts per Week", "Institution"),
        SpecChartPlan::new(
            format!("{} vs. Market Leaders - Gap Analysis", options.focus_institution),
            EnumChartKind::Column,
            C_SHEET_GAP_ANALYSIS,
            TUP_GAP_COLS[0],
            &[c_focus.as_str(), C_COL_LEADERS_AVG],
        ),
    ]
}

/// Compute every metrics table and chart plan from the loaded records.
pub fn build_metrics_report(
    records: &[InstagramMetricRecord],
    options: &SpecMetricsOptions,
) -> Result<SpecWorkbookPlan, ReportError> {
    let (date_latest, latest) = select_latest_snapshot(records)
        .ok_or_else(|| ReportError::EmptyInput("instagram metrics".to_string()))?;
    let l_institutions = derive_ordered_unique(records.iter().map(|r| r.institution.as_str()));
    debug!(
        date_latest = %date_latest,
        n_institutions = l_institutions.len(),
        "latest snapshot selected"
    );

    let l_matrix_cols: Vec<&str> = TUP_MATRIX_METRICS.iter().map(|m| m.0).collect();
    let sheets = vec![
        SpecReportSheet::new(C_SHEET_LATEST, derive_latest_df(&latest, options)?),
        SpecReportSheet::new(
            C_SHEET_FOLLOWER_TIMELINE,
            derive_timeline_df(records, &l_institutions, |r| r.followers)?,
        ),
        SpecReportSheet::new(
            C_SHEET_ENGAGEMENT_TIMELINE,
            derive_timeline_df(records, &l_institutions, |r| r.engagement_rate)?,
        ),
        SpecReportSheet::new(
            C_SHEET_ENGAGEMENT_RANKING,
            derive_engagement_ranking_df(&latest, options)?,
        ),
        SpecReportSheet::new(
            C_SHEET_VIDEO_RANKING,
            derive_range_ranking_df(
                &latest,
                "Video_Percentage",
                |r| r.video_percentage,
                options.range_video_pct,
            )?,
        ),
        SpecReportSheet::new(
            C_SHEET_POSTING_RANKING,
            derive_range_ranking_df(
                &latest,
                "Posts_This_Week",
                |r| r.posts_this_week,
                options.range_posts_per_week,
            )?,
        ),
        SpecReportSheet::new(
            C_SHEET_PERFORMANCE_MATRIX,
            derive_performance_matrix_df(&latest)?,
        )
        .with_options(derive_color_scale_options(&l_matrix_cols)),
        SpecReportSheet::new(C_SHEET_GAP_ANALYSIS, derive_gap_analysis_df(&latest, options)?),
    ];

    Ok(SpecWorkbookPlan {
        file_name: C_FILE_METRICS.to_string(),
        sheets,
        chart_sheets: vec![SpecChartSheet {
            sheet_name: C_SHEET_CHARTS.to_string(),
            charts: plan_metric_charts(&l_institutions, options),
        }],
    })
}

/// Load `path_input`, build the metrics workbook, then write it under `dir_out`.
pub fn write_metrics_report(
    path_input: &Path,
    dir_out: &Path,
    options: &SpecMetricsOptions,
) -> Result<Vec<PathBuf>, ReportError> {
    let records = load_instagram_metrics(path_input)?;
    let plan = build_metrics_report(&records, options)?;
    let l_paths = write_workbooks(&[plan], dir_out)?;
    info!(n_records = records.len(), "metrics report complete");
    Ok(l_paths)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_record(
        institution: &str,
        month: u32,
        followers: u64,
        engagement_rate: f64,
        video_percentage: f64,
        posts_this_week: f64,
    ) -> InstagramMetricRecord {
        InstagramMetricRecord {
            institution: institution.to_string(),
            date: NaiveDate::from_ymd_opt(2025, month, 1).expect("date"),
            followers,
            engagement_rate,
            video_percentage,
            posts_this_week,
        }
    }

    fn derive_records() -> Vec<InstagramMetricRecord> {
        vec![
            derive_record("YU", 9, 14_800, 1.4, 30.0, 2.0),
            derive_record("NYU", 9, 590_000, 3.1, 62.0, 6.0),
            derive_record("YU", 10, 15_000, 1.5, 35.0, 2.5),
            derive_record("NYU", 10, 593_000, 3.2, 65.0, 6.0),
            derive_record("Columbia", 10, 457_000, 2.8, 55.0, 4.0),
        ]
    }

    #[test]
    fn select_latest_snapshot_keeps_latest_date_only() {
        let records = derive_records();
        let (date, latest) = select_latest_snapshot(&records).expect("latest");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 1).expect("date"));
        assert_eq!(latest.len(), 3);
        assert!(select_latest_snapshot(&[]).is_none());
    }

    #[test]
    fn timeline_marks_missing_observations() {
        let records = derive_records();
        let l_institutions = derive_ordered_unique(records.iter().map(|r| r.institution.as_str()));
        let df = derive_timeline_df(&records, &l_institutions, |r| r.followers).expect("df");
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(df.column("Columbia").expect("col").null_count(), 1);
    }

    #[test]
    fn institution_named_date_keeps_timeline_and_charts_apart() {
        let mut records = derive_records();
        for record in records.iter_mut().filter(|r| r.institution == "Columbia") {
            record.institution = "Date".to_string();
        }
        let plan = build_metrics_report(&records, &SpecMetricsOptions::default()).expect("plan");

        let timeline = plan.sheet(C_SHEET_FOLLOWER_TIMELINE).expect("sheet");
        assert_eq!(timeline.df.shape(), (2, 4));
        assert_eq!(timeline.df.column("Date_2").expect("col").null_count(), 1);

        let chart = &plan.chart_sheets[0].charts[0];
        assert_eq!(chart.col_categories, "Date");
        assert_eq!(chart.cols_values, vec!["YU", "NYU", "Date_2"]);
    }

    #[test]
    fn gap_analysis_focus_named_like_fixed_column_is_renamed() {
        let mut records = derive_records();
        for record in records.iter_mut().filter(|r| r.institution == "YU") {
            record.institution = "Gap".to_string();
        }
        let options = SpecMetricsOptions {
            focus_institution: "Gap".to_string(),
            ..SpecMetricsOptions::default()
        };
        let (_, latest) = select_latest_snapshot(&records).expect("latest");
        let df = derive_gap_analysis_df(&latest, &options).expect("df");
        let focus = df.column("Gap_2").expect("col").as_materialized_series();
        assert_eq!(focus.f64().expect("f64").get(0), Some(15_000.0));
        let gap = df.column("Gap").expect("col").as_materialized_series();
        assert_eq!(gap.f64().expect("f64").get(0), Some(510_000.0));

        let charts = plan_metric_charts(&[], &options);
        assert_eq!(charts[6].cols_values, vec!["Gap_2", C_COL_LEADERS_AVG]);
    }

    #[test]
    fn performance_matrix_is_percent_of_leader() {
        let records = derive_records();
        let (_, latest) = select_latest_snapshot(&records).expect("latest");
        let df = derive_performance_matrix_df(&latest).expect("df");
        let followers = df.column("Followers").expect("col").as_materialized_series();
        let ca = followers.f64().expect("f64");
        assert_eq!(ca.get(1), Some(100.0));
        assert_eq!(ca.get(0), Some(2.53));
    }

    #[test]
    fn performance_matrix_zero_leader_is_missing() {
        let records = vec![
            derive_record("YU", 10, 0, 1.5, 0.0, 2.5),
            derive_record("NYU", 10, 0, 3.2, 0.0, 6.0),
        ];
        let (_, latest) = select_latest_snapshot(&records).expect("latest");
        let df = derive_performance_matrix_df(&latest).expect("df");
        assert_eq!(df.column("Followers").expect("col").null_count(), 2);
        assert_eq!(df.column("Engagement_Rate").expect("col").null_count(), 0);
    }

    #[test]
    fn gap_analysis_averages_present_leaders() {
        let records = derive_records();
        let (_, latest) = select_latest_snapshot(&records).expect("latest");
        let df = derive_gap_analysis_df(&latest, &SpecMetricsOptions::default()).expect("df");
        let leaders = df.column(C_COL_LEADERS_AVG).expect("col").as_materialized_series();
        let ca = leaders.f64().expect("f64");
        assert_eq!(ca.get(0), Some(525_000.0));
        let gap = df.column("Gap").expect("col").as_materialized_series();
        assert_eq!(gap.f64().expect("f64").get(0), Some(510_000.0));
        let gap_pct = df.column("Gap_Pct").expect("col").as_materialized_series();
        assert_eq!(gap_pct.f64().expect("f64").get(0), Some(3400.0));
    }

    #[test]
    fn gap_analysis_guards_zero_focus_and_missing_peers() {
        let mut records = derive_records();
        records[2].video_percentage = 0.0;
        let (_, latest) = select_latest_snapshot(&records).expect("latest");
        let df = derive_gap_analysis_df(&latest, &SpecMetricsOptions::default()).expect("df");
        assert_eq!(df.column("Gap_Pct").expect("col").null_count(), 1);

        let options = SpecMetricsOptions {
            focus_institution: "Rutgers".to_string(),
            ..SpecMetricsOptions::default()
        };
        assert!(matches!(
            derive_gap_analysis_df(&latest, &options),
            Err(ReportError::MissingInstitution(_))
        ));

        let options = SpecMetricsOptions {
            leader_institutions: vec!["Maryland".to_string()],
            ..SpecMetricsOptions::default()
        };
        assert!(matches!(
            derive_gap_analysis_df(&latest, &options),
            Err(ReportError::NoLeaders(_))
        ));
    }

    #[test]
    fn range_ranking_sorts_descending_and_flags() {
        let records = derive_records();
        let (_, latest) = select_latest_snapshot(&records).expect("latest");
        let df = derive_range_ranking_df(&latest, "Video_Percentage", |r| r.video_percentage, (60.0, 70.0))
            .expect("df");
        let inst = df.column("Institution").expect("col").as_materialized_series();
        assert_eq!(inst.str().expect("str").get(0), Some("NYU"));
        let flag = df.column("In_Optimal_Range").expect("col").as_materialized_series();
        assert_eq!(flag.str().expect("str").get(0), Some("Yes"));
        assert_eq!(flag.str().expect("str").get(2), Some("No"));
    }

    #[test]
    fn build_metrics_report_rejects_empty_input() {
        assert!(matches!(
            build_metrics_report(&[], &SpecMetricsOptions::default()),
            Err(ReportError::EmptyInput(_))
        ));
    }

    #[test]
    fn write_metrics_report_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path_input = dir.path().join("instagram_metrics.csv");
        std::fs::write(
            &path_input,
            "Institution,Date,Followers,Engagement_Rate,Video_Percentage,Posts_This_Week\n\
             YU,2025-09-01,14800,1.4,30,2\n\
             NYU,2025-09-01,590000,3.1,62,6\n\
             YU,2025-10-01,15000,1.5,35,2.5\n\
             NYU,2025-10-01,593000,3.2,65,6\n",
        )
        .expect("write");

        let l_paths = write_metrics_report(
            &path_input,
            &dir.path().join("out"),
            &SpecMetricsOptions::default(),
        )
        .expect("report");
        assert_eq!(l_paths.len(), 1);
        assert!(l_paths[0].exists());
    }
}
