//! CSV input with required-column validation.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, PolarsError, SerReader};
use tracing::info;

use crate::conf::U8_SEPARATOR;
use crate::spec::TableError;

/// Read a headered CSV file and check that every `required_columns` name is present.
///
/// Column types are inferred from the whole file.
pub fn read_csv_table(path: &Path, required_columns: &[&str]) -> Result<DataFrame, TableError> {
    let err_read = |source: PolarsError| TableError::Read {
        path: path.to_path_buf(),
        source,
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_separator(U8_SEPARATOR))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(err_read)?
        .finish()
        .map_err(err_read)?;

    let l_colnames = df.get_column_names_str();
    if let Some(c_missing) = required_columns
        .iter()
        .find(|c_required| !l_colnames.contains(c_required))
    {
        return Err(TableError::MissingColumn {
            column: c_missing.to_string(),
            path: path.to_path_buf(),
        });
    }

    info!(
        path = %path.display(),
        n_rows = df.height(),
        n_cols = df.width(),
        "table loaded"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_csv_table_loads_required_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("metrics.csv");
        std::fs::write(&path, "Institution,Followers,Note\nYU,12000,a\nNYU,98000,b\n")
            .expect("write");

        let df = read_csv_table(&path, &["Institution", "Followers"]).expect("read");
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn read_csv_table_rejects_missing_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("metrics.csv");
        std::fs::write(&path, "Institution,Followers\nYU,12000\n").expect("write");

        assert!(matches!(
            read_csv_table(&path, &["Institution", "Date"]),
            Err(TableError::MissingColumn { column, .. }) if column == "Date"
        ));
    }

    #[test]
    fn read_csv_table_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            read_csv_table(&dir.path().join("absent.csv"), &[]),
            Err(TableError::Read { .. })
        ));
    }
}
