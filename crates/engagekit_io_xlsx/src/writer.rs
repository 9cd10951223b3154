//! Workbook writer that lays DataFrames out as report sheets.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{
    ConditionalFormat2ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use tracing::{debug, info};

use crate::chart::build_chart;
use crate::conf::N_ROWS_PER_CHART;
use crate::spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecCellFormat, SpecChartPlan, SpecReportFormats,
    SpecSheetLayout, SpecSheetWriteOptions, SpecXlsxReport, SpecXlsxWriteOptions,
    XlsxReportError,
};
use crate::util::{
    convert_cell_value, derive_autofit_width, derive_unique_sheet_name, estimate_width_len,
    estimate_unicode_string_width, sanitize_sheet_name, select_column_indices,
    validate_policy_autofit, validate_sheet_bounds, validate_unique_columns,
};

/// Per-column inputs for [`plan_column_formats`].
pub struct SpecColumnFormatPlanOptions<'a> {
    /// Number of columns in the sheet.
    pub width_data: usize,
    /// Numeric column indices.
    pub cols_idx_numeric: &'a BTreeSet<usize>,
    /// Integer column indices.
    pub cols_idx_integer: &'a BTreeSet<usize>,
    /// Explicit decimal column indices; numeric columns when `None`.
    pub cols_idx_decimal: Option<&'a BTreeSet<usize>>,
    /// Per-column format patches.
    pub cols_fmt_overrides: &'a BTreeMap<usize, SpecCellFormat>,
    /// Preset formats.
    pub formats: &'a SpecReportFormats,
}

/// Resolved column plan for one sheet.
struct SpecSheetColumnPlan {
    set_cols_idx_numeric: BTreeSet<usize>,
    set_cols_idx_integer: BTreeSet<usize>,
    l_fmts_by_col: Vec<SpecCellFormat>,
    l_color_scales: Vec<(usize, String, String)>,
}

/// Stateful workbook writer.
///
/// Sheets are buffered in memory; nothing touches disk until [`Self::close`].
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    formats: SpecReportFormats,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    dict_sheets_written: BTreeMap<String, SpecSheetLayout>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and format/options presets.
    pub fn new(
        path_file_out: impl Into<PathBuf>,
        formats: SpecReportFormats,
        write_options: SpecXlsxWriteOptions,
    ) -> Self {
        Self {
            path_file_out: path_file_out.into(),
            workbook: Workbook::new(),
            formats,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            dict_sheets_written: BTreeMap::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Snapshot of per-sheet write reports, in write order.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Layout of a data sheet by the name it was written under.
    pub fn sheet_layout(&self, sheet_name: &str) -> Option<&SpecSheetLayout> {
        self.dict_sheets_written.get(sheet_name)
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxReportError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        info!(
            path = %self.path_file_out.display(),
            n_sheets = self.l_reports.len(),
            "workbook saved"
        );
        Ok(())
    }

    /// Write `df` as one sheet: header row, then one row per record.
    ///
    /// Every option is validated before the sheet is added, so a rejected
    /// table leaves the workbook unchanged.
    pub fn write_sheet(
        &mut self,
        df: &DataFrame,
        sheet_name: &str,
        options: &SpecSheetWriteOptions,
    ) -> Result<SpecXlsxReport, XlsxReportError> {
        if self.if_closed {
            return Err(XlsxReportError::Closed);
        }
        validate_policy_autofit(&options.policy_autofit).map_err(XlsxReportError::InvalidOption)?;

        let l_colnames: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_colnames).map_err(XlsxReportError::Plan)?;
        let n_width_df = l_colnames.len();
        let n_height_df = df.height();
        validate_sheet_bounds(n_height_df, n_width_df).map_err(XlsxReportError::Plan)?;

        let plan = self.plan_sheet_columns(df, &l_colnames, sheet_name, options)?;
        let if_keep_missing_values = options
            .if_keep_missing_values
            .unwrap_or(self.write_options.keep_missing_values);
        let value_policy = &self.write_options.value_policy;
        let if_autofit_columns = !matches!(
            options.policy_autofit.rule_columns,
            EnumAutofitColumnsRule::None
        );

        let mut report = SpecXlsxReport {
            sheet_name: derive_unique_sheet_name(
                &sanitize_sheet_name(sheet_name, "_"),
                &mut self.set_sheet_names_existing,
            ),
            n_rows: n_height_df,
            n_cols: n_width_df,
            ..Default::default()
        };
        if report.sheet_name != sheet_name {
            report.warn(format!(
                "sheet name {sheet_name:?} written as {:?}",
                report.sheet_name
            ));
        }

        let l_fmt_data_by_col: Vec<Format> = plan
            .l_fmts_by_col
            .iter()
            .map(derive_rust_xlsx_format)
            .collect();
        let fmt_header = derive_rust_xlsx_format(&self.formats.header);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&report.sheet_name)?;

        let mut l_width_by_col_header = vec![0usize; n_width_df];
        let mut l_width_by_col_body = vec![0usize; n_width_df];
        for (n_idx_col, c_name) in l_colnames.iter().enumerate() {
            l_width_by_col_header[n_idx_col] = estimate_unicode_string_width(c_name);
            write_cell_with_format(
                worksheet,
                0,
                n_idx_col,
                &EnumCellValue::String(c_name.clone()),
                &fmt_header,
            )?;
        }
        if options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0)?;
        }

        for (n_idx_col, col) in df.get_columns().iter().enumerate() {
            let if_is_numeric_col = plan.set_cols_idx_numeric.contains(&n_idx_col);
            let if_is_integer_col = plan.set_cols_idx_integer.contains(&n_idx_col);
            for n_idx_row in 0..n_height_df {
                let value = convert_cell_value(
                    &derive_cell_value_from_any_value(col.get(n_idx_row)?),
                    if_is_numeric_col,
                    if_keep_missing_values,
                    value_policy,
                );
                if if_autofit_columns {
                    l_width_by_col_body[n_idx_col] = usize::max(
                        l_width_by_col_body[n_idx_col],
                        estimate_width_len(&value, if_is_integer_col, if_is_numeric_col),
                    );
                }
                write_cell_with_format(
                    worksheet,
                    n_idx_row + 1,
                    n_idx_col,
                    &value,
                    &l_fmt_data_by_col[n_idx_col],
                )?;
            }
        }

        for (n_idx_col, c_color_min, c_color_max) in &plan.l_color_scales {
            if n_height_df == 0 {
                report.warn(format!(
                    "color scale on {:?} skipped: no body rows",
                    l_colnames[*n_idx_col]
                ));
                continue;
            }
            let cf = ConditionalFormat2ColorScale::new()
                .set_minimum_color(c_color_min.as_str())
                .set_maximum_color(c_color_max.as_str());
            worksheet.add_conditional_format(
                1,
                cast_col_num(*n_idx_col)?,
                cast_row_num(n_height_df)?,
                cast_col_num(*n_idx_col)?,
                &cf,
            )?;
        }

        if if_autofit_columns {
            for n_idx_col in 0..n_width_df {
                let n_width_final = derive_autofit_width(
                    l_width_by_col_header[n_idx_col],
                    l_width_by_col_body[n_idx_col],
                    &options.policy_autofit,
                );
                worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)?;
            }
        }

        debug!(
            sheet = %report.sheet_name,
            n_rows = report.n_rows,
            n_cols = report.n_cols,
            "sheet written"
        );
        self.dict_sheets_written.insert(
            sheet_name.to_string(),
            SpecSheetLayout {
                sheet_name: report.sheet_name.clone(),
                colnames: l_colnames,
                n_rows: n_height_df,
            },
        );
        self.l_reports.push(report.clone());
        Ok(report)
    }

    /// Add a sheet holding one chart per plan, stacked vertically.
    ///
    /// Each plan must reference a sheet already written by [`Self::write_sheet`].
    pub fn write_chart_sheet(
        &mut self,
        sheet_name: &str,
        charts: &[SpecChartPlan],
    ) -> Result<SpecXlsxReport, XlsxReportError> {
        if self.if_closed {
            return Err(XlsxReportError::Closed);
        }

        let mut l_charts = Vec::with_capacity(charts.len());
        for plan in charts {
            let layout = self
                .dict_sheets_written
                .get(&plan.source_sheet)
                .ok_or_else(|| XlsxReportError::UnknownSheet(plan.source_sheet.clone()))?;
            l_charts.push(build_chart(plan, layout)?);
        }

        let mut report = SpecXlsxReport {
            sheet_name: derive_unique_sheet_name(
                &sanitize_sheet_name(sheet_name, "_"),
                &mut self.set_sheet_names_existing,
            ),
            n_charts: l_charts.len(),
            ..Default::default()
        };
        if l_charts.is_empty() {
            report.warn("chart sheet has no charts");
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&report.sheet_name)?;
        for (n_idx, chart) in l_charts.iter().enumerate() {
            let n_row = cast_row_num(n_idx)?.saturating_mul(N_ROWS_PER_CHART);
            worksheet.insert_chart(n_row, 1, chart)?;
        }

        debug!(sheet = %report.sheet_name, n_charts = report.n_charts, "chart sheet written");
        self.l_reports.push(report.clone());
        Ok(report)
    }

    fn plan_sheet_columns(
        &self,
        df: &DataFrame,
        l_colnames: &[String],
        sheet_name: &str,
        options: &SpecSheetWriteOptions,
    ) -> Result<SpecSheetColumnPlan, XlsxReportError> {
        let err_unknown = |column: String| XlsxReportError::UnknownColumn {
            sheet: sheet_name.to_string(),
            column,
        };

        let l_cols_idx_integer_specified =
            select_column_indices(l_colnames, options.cols_integer.as_deref())
                .map_err(err_unknown)?;
        let l_cols_idx_decimal_specified =
            select_column_indices(l_colnames, options.cols_decimal.as_deref())
                .map_err(err_unknown)?;

        let mut set_cols_idx_numeric: BTreeSet<usize> = if self.write_options.infer_numeric_cols {
            derive_numeric_column_indices(df).into_iter().collect()
        } else {
            BTreeSet::new()
        };
        let set_cols_idx_decimal: BTreeSet<usize> =
            l_cols_idx_decimal_specified.iter().copied().collect();
        let set_cols_idx_integer: BTreeSet<usize> = if l_cols_idx_integer_specified.is_empty() {
            if self.write_options.infer_integer_cols {
                derive_integer_column_indices(df, &set_cols_idx_numeric)
                    .into_iter()
                    .filter(|n_idx| !set_cols_idx_decimal.contains(n_idx))
                    .collect()
            } else {
                BTreeSet::new()
            }
        } else {
            l_cols_idx_integer_specified.iter().copied().collect()
        };
        set_cols_idx_numeric.extend(set_cols_idx_integer.iter().copied());
        set_cols_idx_numeric.extend(set_cols_idx_decimal.iter().copied());

        let mut dict_fmt_overrides = BTreeMap::new();
        for (c_name, fmt_override) in &options.cols_fmt_overrides {
            let n_idx = l_colnames
                .iter()
                .position(|c_col| c_col == c_name)
                .ok_or_else(|| err_unknown(c_name.clone()))?;
            dict_fmt_overrides.insert(n_idx, fmt_override.clone());
        }

        let mut l_color_scales = Vec::with_capacity(options.color_scales.len());
        for rule in &options.color_scales {
            let n_idx = l_colnames
                .iter()
                .position(|c_col| c_col == &rule.column)
                .ok_or_else(|| err_unknown(rule.column.clone()))?;
            l_color_scales.push((n_idx, rule.color_min.clone(), rule.color_max.clone()));
        }

        let l_fmts_by_col = plan_column_formats(SpecColumnFormatPlanOptions {
            width_data: l_colnames.len(),
            cols_idx_numeric: &set_cols_idx_numeric,
            cols_idx_integer: &set_cols_idx_integer,
            cols_idx_decimal: if set_cols_idx_decimal.is_empty() {
                None
            } else {
                Some(&set_cols_idx_decimal)
            },
            cols_fmt_overrides: &dict_fmt_overrides,
            formats: &self.formats,
        });

        Ok(SpecSheetColumnPlan {
            set_cols_idx_numeric,
            set_cols_idx_integer,
            l_fmts_by_col,
            l_color_scales,
        })
    }
}

/// Build the final per-column body formats.
pub fn plan_column_formats(options: SpecColumnFormatPlanOptions<'_>) -> Vec<SpecCellFormat> {
    let SpecColumnFormatPlanOptions {
        width_data,
        cols_idx_numeric,
        cols_idx_integer,
        cols_idx_decimal,
        cols_fmt_overrides,
        formats,
    } = options;

    (0..width_data)
        .map(|col_idx| {
            let fmt_base = if cols_idx_integer.contains(&col_idx) {
                &formats.integer
            } else if cols_idx_decimal.map_or(cols_idx_numeric.contains(&col_idx), |set_idx| {
                set_idx.contains(&col_idx)
            }) {
                &formats.decimal
            } else {
                &formats.text
            };
            match cols_fmt_overrides.get(&col_idx) {
                Some(fmt_override) => fmt_base.merge(fmt_override),
                None => fmt_base.clone(),
            }
        })
        .collect()
}

fn derive_numeric_column_indices(df: &DataFrame) -> Vec<usize> {
    df.get_columns()
        .iter()
        .enumerate()
        .filter_map(|(n_idx, c_col)| c_col.dtype().is_numeric().then_some(n_idx))
        .collect()
}

fn derive_integer_column_indices(df: &DataFrame, cols_idx_numeric: &BTreeSet<usize>) -> Vec<usize> {
    cols_idx_numeric
        .iter()
        .copied()
        .filter(|n_idx| df.get_columns()[*n_idx].dtype().is_integer())
        .collect()
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxReportError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxReportError> {
    u32::try_from(value).map_err(|_| XlsxReportError::Plan(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxReportError> {
    u16::try_from(value)
        .map_err(|_| XlsxReportError::Plan(format!("column index overflow: {value}")))
}
