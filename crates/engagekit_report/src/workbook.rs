//! Write computed workbook plans to disk.

use std::path::{Path, PathBuf};

use engagekit_io_xlsx::{
    SpecXlsxReport, SpecXlsxWriteOptions, XlsxWriter, derive_default_report_formats,
};
use tracing::{debug, info, warn};

use crate::spec::{ReportError, SpecWorkbookPlan};

/// Write every sheet of `plan`, then its chart sheets, and save to `path`.
pub fn write_workbook(
    plan: &SpecWorkbookPlan,
    path: &Path,
) -> Result<Vec<SpecXlsxReport>, ReportError> {
    let mut writer = XlsxWriter::new(
        path,
        derive_default_report_formats(),
        SpecXlsxWriteOptions::default(),
    );
    for sheet in &plan.sheets {
        writer.write_sheet(&sheet.df, &sheet.sheet_name, &sheet.options)?;
    }
    for chart_sheet in &plan.chart_sheets {
        writer.write_chart_sheet(&chart_sheet.sheet_name, &chart_sheet.charts)?;
    }
    writer.close()?;

    let l_reports = writer.report();
    for report in &l_reports {
        for c_warning in &report.warnings {
            warn!(sheet = %report.sheet_name, "{c_warning}");
        }
    }
    info!(path = %path.display(), n_sheets = l_reports.len(), "report workbook written");
    Ok(l_reports)
}

/// Create `dir_out` (and parents) if missing.
pub fn prepare_out_dir(dir_out: &Path) -> Result<(), ReportError> {
    std::fs::create_dir_all(dir_out).map_err(|source| ReportError::Io {
        path: dir_out.to_path_buf(),
        source,
    })
}

/// `<path>.tmp`.
fn derive_staging_path(path: &Path) -> PathBuf {
    let mut os_path = path.as_os_str().to_owned();
    os_path.push(".tmp");
    PathBuf::from(os_path)
}

/// Output files written under `.tmp` names, renamed into place on commit.
///
/// Dropping the set before [`SpecStagedOutputs::commit`] removes every staged
/// file, so a failed report leaves no partial outputs behind.
#[derive(Debug, Default)]
pub struct SpecStagedOutputs {
    /// `(staging path, final path)` in staging order.
    pending: Vec<(PathBuf, PathBuf)>,
}

impl SpecStagedOutputs {
    /// Register `path` and return the staging path to write instead.
    pub fn stage(&mut self, path: PathBuf) -> PathBuf {
        let path_staged = derive_staging_path(&path);
        self.pending.push((path_staged.clone(), path));
        path_staged
    }

    /// Rename every staged file onto its final path; returns the final paths.
    ///
    /// Each rename replaces its target atomically. If one fails, the files
    /// renamed before it stay in place and the rest are removed.
    pub fn commit(mut self) -> Result<Vec<PathBuf>, ReportError> {
        let mut iter_pending = std::mem::take(&mut self.pending).into_iter();
        let mut l_paths = Vec::new();
        while let Some((path_staged, path)) = iter_pending.next() {
            if let Err(source) = std::fs::rename(&path_staged, &path) {
                self.pending = std::iter::once((path_staged, path.clone()))
                    .chain(iter_pending)
                    .collect();
                return Err(ReportError::Io { path, source });
            }
            debug!(path = %path.display(), "output committed");
            l_paths.push(path);
        }
        Ok(l_paths)
    }
}

impl Drop for SpecStagedOutputs {
    fn drop(&mut self) {
        for (path_staged, _) in &self.pending {
            if path_staged.exists() && std::fs::remove_file(path_staged).is_err() {
                warn!(path = %path_staged.display(), "failed to remove staged output");
            }
        }
    }
}

/// Save each plan to a staging path for `dir_out/<file_name>`.
pub fn stage_workbooks(
    plans: &[SpecWorkbookPlan],
    dir_out: &Path,
    staged: &mut SpecStagedOutputs,
) -> Result<(), ReportError> {
    prepare_out_dir(dir_out)?;
    for plan in plans {
        let path_staged = staged.stage(dir_out.join(&plan.file_name));
        write_workbook(plan, &path_staged)?;
    }
    Ok(())
}

/// Write each plan as `dir_out/<file_name>`; returns the written paths.
///
/// No final file appears unless every plan saved.
pub fn write_workbooks(
    plans: &[SpecWorkbookPlan],
    dir_out: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let mut staged = SpecStagedOutputs::default();
    stage_workbooks(plans, dir_out, &mut staged)?;
    staged.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{SpecChartSheet, SpecReportSheet};
    use engagekit_io_xlsx::{EnumChartKind, SpecChartPlan, XlsxReportError};
    use polars::prelude::{Column, DataFrame};

    fn derive_plan(c_source: &str) -> SpecWorkbookPlan {
        let df = DataFrame::new(vec![
            Column::new("Platform".into(), &["Instagram", "Twitter"]),
            Column::new("Followers".into(), &[15_000u64, 5_000]),
        ])
        .expect("df");
        SpecWorkbookPlan {
            file_name: "plan.xlsx".to_string(),
            sheets: vec![SpecReportSheet::new("Summary", df)],
            chart_sheets: vec![SpecChartSheet {
                sheet_name: "Charts".to_string(),
                charts: vec![SpecChartPlan::new(
                    "Followers",
                    EnumChartKind::Column,
                    c_source,
                    "Platform",
                    &["Followers"],
                )],
            }],
        }
    }

    #[test]
    fn write_workbooks_creates_directory_and_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_out = dir.path().join("nested").join("out");
        let l_paths = write_workbooks(&[derive_plan("Summary")], &dir_out).expect("write");
        assert_eq!(l_paths, vec![dir_out.join("plan.xlsx")]);
        assert!(l_paths[0].exists());
    }

    #[test]
    fn write_workbooks_failure_leaves_no_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_out = dir.path().join("out");
        let mut plan_broken = derive_plan("Missing");
        plan_broken.file_name = "broken.xlsx".to_string();

        assert!(write_workbooks(&[derive_plan("Summary"), plan_broken], &dir_out).is_err());
        assert_eq!(std::fs::read_dir(&dir_out).expect("dir").count(), 0);
    }

    #[test]
    fn staged_outputs_replace_existing_files_on_commit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "old").expect("write");

        let mut staged = SpecStagedOutputs::default();
        let path_staged = staged.stage(path.clone());
        assert_eq!(path_staged, dir.path().join("table.csv.tmp"));
        std::fs::write(&path_staged, "new").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "old");

        assert_eq!(staged.commit().expect("commit"), vec![path.clone()]);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "new");
        assert!(!path_staged.exists());
    }

    #[test]
    fn write_workbook_surfaces_chart_errors_before_saving() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plan.xlsx");
        assert!(matches!(
            write_workbook(&derive_plan("Missing"), &path),
            Err(ReportError::Xlsx(XlsxReportError::UnknownSheet(_)))
        ));
        assert!(!path.exists());
    }
}
