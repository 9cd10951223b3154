//! DataFrame to CSV output.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::conf::U8_SEPARATOR;
use crate::spec::TableError;

/// Write `df` to `path` as a headered CSV, replacing any existing file.
pub fn write_csv_table(df: &DataFrame, path: &Path) -> Result<(), TableError> {
    let mut file = File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut df_out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(U8_SEPARATOR)
        .finish(&mut df_out)?;

    info!(path = %path.display(), n_rows = df.height(), "table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_csv_table;
    use polars::prelude::Column;

    #[test]
    fn write_csv_table_writes_header_and_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary_statistics.csv");
        let df = DataFrame::new(vec![
            Column::new("Institution".into(), &["NYU", "YU"]),
            Column::new("Likes_mean".into(), &[410.5f64, 88.0]),
        ])
        .expect("df");

        write_csv_table(&df, &path).expect("write");
        let c_text = std::fs::read_to_string(&path).expect("read");
        assert!(c_text.starts_with("Institution,Likes_mean\n"));
        assert!(c_text.contains("NYU,410.5"));

        let df_back = read_csv_table(&path, &["Institution", "Likes_mean"]).expect("reread");
        assert_eq!(df_back.height(), 2);
    }

    #[test]
    fn write_csv_table_reports_bad_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.csv");
        let df = DataFrame::new(vec![Column::new("A".into(), &[1i64])]).expect("df");
        assert!(matches!(
            write_csv_table(&df, &path),
            Err(TableError::Io { .. })
        ));
    }
}
