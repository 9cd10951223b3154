//! Grouping helpers and small table utilities shared by the reports.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use engagekit_io_xlsx::{
    C_COLOR_SCALE_MAX, C_COLOR_SCALE_MIN, SpecColorScaleRule, SpecSheetWriteOptions,
};
use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::conf::C_DATE_FORMAT;
use crate::stats::{derive_share_pct, mean, round_to};

/// Cell aggregation for [`plan_pivot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPivotAgg {
    /// Mean of the values; absent combinations are `None`.
    Mean,
    /// Item count as a percent of the row's items; absent combinations are 0.
    SharePct,
}

/// Row-key by column-key table with sorted keys.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPivotTable {
    pub row_keys: Vec<String>,
    pub col_keys: Vec<String>,
    /// `cells[row][col]`.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SpecPivotTable {
    /// Column headers for the column keys, kept apart from `row_header`.
    pub fn derive_col_headers(&self, row_header: &str) -> Vec<String> {
        derive_unique_headers(&[row_header], &self.col_keys)
    }

    /// One text column `row_header`, then one float column per column key.
    ///
    /// Column headers come from [`SpecPivotTable::derive_col_headers`].
    pub fn to_dataframe(&self, row_header: &str, n_decimals: u32) -> PolarsResult<DataFrame> {
        let mut l_columns = Vec::with_capacity(self.col_keys.len() + 1);
        l_columns.push(Column::new(row_header.into(), &self.row_keys));
        for (n_idx_col, c_header) in self.derive_col_headers(row_header).iter().enumerate() {
            let l_values: Vec<Option<f64>> = self
                .cells
                .iter()
                .map(|row| row[n_idx_col].map(|x| round_to(x, n_decimals)))
                .collect();
            l_columns.push(Column::new(c_header.as_str().into(), l_values));
        }
        DataFrame::new(l_columns)
    }
}

/// Group `items` by two text keys and aggregate each cell.
pub fn plan_pivot<T>(
    items: &[T],
    key_row: impl Fn(&T) -> &str,
    key_col: impl Fn(&T) -> &str,
    value: impl Fn(&T) -> f64,
    agg: EnumPivotAgg,
) -> SpecPivotTable {
    let mut dict_cells: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
    let mut dict_row_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut set_cols = BTreeSet::new();
    for item in items {
        let c_row = key_row(item).to_string();
        let c_col = key_col(item).to_string();
        *dict_row_counts.entry(c_row.clone()).or_default() += 1;
        set_cols.insert(c_col.clone());
        dict_cells.entry((c_row, c_col)).or_default().push(value(item));
    }

    let row_keys: Vec<String> = dict_row_counts.keys().cloned().collect();
    let col_keys: Vec<String> = set_cols.into_iter().collect();
    let cells = row_keys
        .iter()
        .map(|c_row| {
            col_keys
                .iter()
                .map(|c_col| {
                    let l_values = dict_cells.get(&(c_row.clone(), c_col.clone()));
                    match agg {
                        EnumPivotAgg::Mean => l_values.and_then(|vals| mean(vals)),
                        EnumPivotAgg::SharePct => derive_share_pct(
                            l_values.map_or(0, Vec::len) as f64,
                            dict_row_counts.get(c_row).copied().unwrap_or(0) as f64,
                        ),
                    }
                })
                .collect()
        })
        .collect();

    SpecPivotTable {
        row_keys,
        col_keys,
        cells,
    }
}

/// Headers for data-derived column `names`, kept apart from `reserved`.
///
/// A name equal to a reserved header, or repeating an earlier name, gets the
/// first free `_2`, `_3`, ... suffix. Other names pass through unchanged.
pub fn derive_unique_headers(reserved: &[&str], names: &[String]) -> Vec<String> {
    let mut set_taken: BTreeSet<String> = reserved.iter().map(|c| c.to_string()).collect();
    set_taken.extend(names.iter().cloned());
    let mut set_emitted: BTreeSet<&str> = BTreeSet::new();

    names
        .iter()
        .map(|c_name| {
            if !reserved.contains(&c_name.as_str()) && set_emitted.insert(c_name.as_str()) {
                return c_name.clone();
            }
            let mut n_idx = 2usize;
            loop {
                let candidate = format!("{c_name}_{n_idx}");
                if set_taken.insert(candidate.clone()) {
                    return candidate;
                }
                n_idx += 1;
            }
        })
        .collect()
}

/// Distinct values in first-seen order.
pub fn derive_ordered_unique<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut set_seen = BTreeSet::new();
    values
        .into_iter()
        .filter(|c_val| set_seen.insert(*c_val))
        .map(ToString::to_string)
        .collect()
}

/// Sheet options with the default two-color scale on each of `columns`.
pub fn derive_color_scale_options(columns: &[&str]) -> SpecSheetWriteOptions {
    SpecSheetWriteOptions {
        color_scales: columns
            .iter()
            .map(|c_col| SpecColorScaleRule {
                column: c_col.to_string(),
                color_min: C_COLOR_SCALE_MIN.to_string(),
                color_max: C_COLOR_SCALE_MAX.to_string(),
            })
            .collect(),
        ..Default::default()
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(C_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Post {
        institution: &'static str,
        tone: &'static str,
        rate: f64,
    }

    fn derive_posts() -> Vec<Post> {
        vec![
            Post { institution: "YU", tone: "Formal", rate: 1.0 },
            Post { institution: "YU", tone: "Formal", rate: 2.0 },
            Post { institution: "YU", tone: "Playful", rate: 4.0 },
            Post { institution: "NYU", tone: "Playful", rate: 6.0 },
        ]
    }

    #[test]
    fn plan_pivot_share_fills_zero() {
        let pivot = plan_pivot(
            &derive_posts(),
            |post| post.institution,
            |post| post.tone,
            |_| 1.0,
            EnumPivotAgg::SharePct,
        );
        assert_eq!(pivot.row_keys, vec!["NYU", "YU"]);
        assert_eq!(pivot.col_keys, vec!["Formal", "Playful"]);
        assert_eq!(pivot.cells[0], vec![Some(0.0), Some(100.0)]);
        let f_formal = pivot.cells[1][0].expect("share");
        assert!((f_formal - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn plan_pivot_mean_leaves_gaps() {
        let pivot = plan_pivot(
            &derive_posts(),
            |post| post.institution,
            |post| post.tone,
            |post| post.rate,
            EnumPivotAgg::Mean,
        );
        assert_eq!(pivot.cells[0], vec![None, Some(6.0)]);
        assert_eq!(pivot.cells[1], vec![Some(1.5), Some(4.0)]);

        let df = pivot.to_dataframe("Institution", 2).expect("df");
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("Formal").expect("col").null_count(), 1);
    }

    #[test]
    fn pivot_column_key_matching_row_header_is_renamed() {
        let posts = vec![
            Post { institution: "YU", tone: "Institution", rate: 1.0 },
            Post { institution: "NYU", tone: "Formal", rate: 2.0 },
        ];
        let pivot = plan_pivot(
            &posts,
            |post| post.institution,
            |post| post.tone,
            |_| 1.0,
            EnumPivotAgg::SharePct,
        );
        assert_eq!(pivot.col_keys, vec!["Formal", "Institution"]);
        assert_eq!(
            pivot.derive_col_headers("Institution"),
            vec!["Formal", "Institution_2"]
        );

        let df = pivot.to_dataframe("Institution", 2).expect("df");
        assert_eq!(df.shape(), (2, 3));
        let ca = df.column("Institution_2").expect("col").as_materialized_series().clone();
        assert_eq!(ca.f64().expect("f64").get(1), Some(100.0));
    }

    #[test]
    fn derive_unique_headers_skips_taken_suffixes() {
        let l_names = vec!["Date".to_string(), "Date_2".to_string(), "NYU".to_string()];
        assert_eq!(
            derive_unique_headers(&["Date"], &l_names),
            vec!["Date_3", "Date_2", "NYU"]
        );
        let l_repeated = vec!["YU".to_string(), "YU".to_string()];
        assert_eq!(derive_unique_headers(&[], &l_repeated), vec!["YU", "YU_2"]);
    }

    #[test]
    fn derive_ordered_unique_keeps_first_seen() {
        assert_eq!(
            derive_ordered_unique(["YU", "NYU", "YU", "Columbia"]),
            vec!["YU", "NYU", "Columbia"]
        );
    }
}
