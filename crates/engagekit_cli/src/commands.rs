//! Subcommand handlers.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use engagekit_report::{
    SpecMetricsOptions, write_metrics_report, write_qualitative_report, write_reference_workbooks,
    write_simulated_workbook,
};
use engagekit_sim::{SpecSimulationOptions, derive_default_platform_profiles, simulate_platforms};
use tracing::info;

pub const C_DIR_OUT_DEFAULT: &str = "reports";

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {value:?}: {e}"))
}

pub fn run_simulate(
    path_out: &Path,
    seed: Option<u64>,
    days: Option<usize>,
    growth_rate: Option<f64>,
    start_date: Option<NaiveDate>,
) -> Result<()> {
    let defaults = SpecSimulationOptions::default();
    let options = SpecSimulationOptions {
        date_start: start_date.unwrap_or(defaults.date_start),
        num_days: days.unwrap_or(defaults.num_days),
        growth_rate: growth_rate.unwrap_or(defaults.growth_rate),
        seed: seed.unwrap_or(defaults.seed),
    };
    let run = simulate_platforms(&options, &derive_default_platform_profiles())
        .context("simulation failed")?;
    write_simulated_workbook(&run, path_out)
        .with_context(|| format!("failed to write {}", path_out.display()))?;
    info!(path = %path_out.display(), "done");
    Ok(())
}

pub fn run_reference(dir_out: &Path) -> Result<()> {
    let l_paths = write_reference_workbooks(dir_out)
        .with_context(|| format!("failed to write reference workbooks to {}", dir_out.display()))?;
    info!(n_files = l_paths.len(), "done");
    Ok(())
}

pub fn run_metrics(path_input: &Path, dir_out: &Path, focus: Option<String>) -> Result<()> {
    let defaults = SpecMetricsOptions::default();
    let options = SpecMetricsOptions {
        focus_institution: focus.unwrap_or(defaults.focus_institution.clone()),
        ..defaults
    };
    let l_paths = write_metrics_report(path_input, dir_out, &options)
        .with_context(|| format!("metrics report from {} failed", path_input.display()))?;
    info!(n_files = l_paths.len(), "done");
    Ok(())
}

pub fn run_qualitative(path_input: &Path, dir_out: &Path) -> Result<()> {
    let l_paths = write_qualitative_report(path_input, dir_out)
        .with_context(|| format!("qualitative report from {} failed", path_input.display()))?;
    info!(n_files = l_paths.len(), "done");
    Ok(())
}
