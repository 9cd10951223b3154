//! Typed column extraction; every null or unparseable cell is an error.

use chrono::NaiveDate;
use polars::prelude::{DataFrame, DataType};

use crate::spec::TableError;

fn derive_invalid_cell(column: &str, row: usize) -> TableError {
    TableError::InvalidCell {
        column: column.to_string(),
        row,
    }
}

/// Non-empty trimmed text values of `column`.
pub fn extract_str_column(df: &DataFrame, column: &str) -> Result<Vec<String>, TableError> {
    let col = df.column(column)?.cast(&DataType::String)?;
    let ca = col.as_materialized_series().str()?;
    ca.into_iter()
        .enumerate()
        .map(|(n_row, val)| match val.map(str::trim) {
            Some(c_val) if !c_val.is_empty() => Ok(c_val.to_string()),
            _ => Err(derive_invalid_cell(column, n_row)),
        })
        .collect()
}

/// Finite float values of `column`; text cells that do not parse are rejected.
pub fn extract_f64_column(df: &DataFrame, column: &str) -> Result<Vec<f64>, TableError> {
    let col = df.column(column)?.cast(&DataType::Float64)?;
    let ca = col.as_materialized_series().f64()?;
    ca.into_iter()
        .enumerate()
        .map(|(n_row, val)| match val {
            Some(n_val) if n_val.is_finite() => Ok(n_val),
            _ => Err(derive_invalid_cell(column, n_row)),
        })
        .collect()
}

/// Non-negative whole counts of `column`; fractional parts are truncated.
pub fn extract_u64_column(df: &DataFrame, column: &str) -> Result<Vec<u64>, TableError> {
    extract_f64_column(df, column)?
        .into_iter()
        .enumerate()
        .map(|(n_row, n_val)| {
            if n_val >= 0.0 {
                Ok(n_val.trunc() as u64)
            } else {
                Err(derive_invalid_cell(column, n_row))
            }
        })
        .collect()
}

/// Calendar dates of `column` parsed with `format`.
pub fn extract_date_column(
    df: &DataFrame,
    column: &str,
    format: &str,
) -> Result<Vec<NaiveDate>, TableError> {
    extract_str_column(df, column)?
        .iter()
        .enumerate()
        .map(|(n_row, c_val)| {
            NaiveDate::parse_from_str(c_val, format)
                .map_err(|_| derive_invalid_cell(column, n_row))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn derive_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Institution".into(), &[Some("YU"), Some(" NYU "), None]),
            Column::new("Likes".into(), &[Some(12.0f64), Some(-1.0), Some(3.9)]),
            Column::new("Date".into(), &["2025-01-31", "2025-02-28", "2025/03/31"]),
        ])
        .expect("df")
    }

    #[test]
    fn extract_str_column_trims_and_rejects_null() {
        let err = extract_str_column(&derive_df(), "Institution").expect_err("null");
        assert!(matches!(err, TableError::InvalidCell { row: 2, .. }));

        let df = derive_df().head(Some(2));
        assert_eq!(
            extract_str_column(&df, "Institution").expect("ok"),
            vec!["YU".to_string(), "NYU".to_string()]
        );
    }

    #[test]
    fn extract_u64_column_rejects_negative() {
        let err = extract_u64_column(&derive_df(), "Likes").expect_err("negative");
        assert!(matches!(err, TableError::InvalidCell { row: 1, .. }));
        assert_eq!(
            extract_f64_column(&derive_df(), "Likes").expect("floats"),
            vec![12.0, -1.0, 3.9]
        );
    }

    #[test]
    fn extract_date_column_reports_bad_format_row() {
        let err = extract_date_column(&derive_df(), "Date", "%Y-%m-%d").expect_err("format");
        assert!(matches!(err, TableError::InvalidCell { row: 2, ref column } if column == "Date"));
    }

    #[test]
    fn extract_missing_column_is_polars_error() {
        assert!(matches!(
            extract_f64_column(&derive_df(), "Shares"),
            Err(TableError::Polars(_))
        ));
    }
}
