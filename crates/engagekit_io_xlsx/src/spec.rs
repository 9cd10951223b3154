//! Report workbook formats, options, chart plans and errors.

use std::collections::BTreeMap;

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification; `None` fields inherit when merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color (`#RRGGBB`).
    pub bg_color: Option<String>,
    /// Font color (`#RRGGBB`).
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Named presets applied by column kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportFormats {
    /// Text and fallback body cells.
    pub text: SpecCellFormat,
    /// Integer body cells.
    pub integer: SpecCellFormat,
    /// Non-integer numeric body cells.
    pub decimal: SpecCellFormat,
    /// Header row cells.
    pub header: SpecCellFormat,
}

/// Normalized cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Replacement text for missing and non-finite values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxValuePolicy {
    /// Replacement text for a missing value when keep-missing is enabled.
    pub missing_value_str: String,
    /// Replacement text for NaN.
    pub nan_str: String,
    /// Replacement text for positive infinity.
    pub posinf_str: String,
    /// Replacement text for negative infinity.
    pub neginf_str: String,
}

impl Default for SpecXlsxValuePolicy {
    fn default() -> Self {
        Self {
            missing_value_str: "N/A".to_string(),
            nan_str: "N/A".to_string(),
            posinf_str: "Inf".to_string(),
            neginf_str: "-Inf".to_string(),
        }
    }
}

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit.
    None,
    /// Infer width from header cells only.
    Header,
    /// Infer width from body cells only.
    Body,
    /// Infer width from both header and body cells (default).
    #[default]
    All,
}

/// Column width inference policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitPolicy {
    /// Width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::All,
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Missing/non-finite replacement text.
    pub value_policy: SpecXlsxValuePolicy,
    /// Write missing/NaN/Inf as policy text instead of blank.
    pub keep_missing_values: bool,
    /// Infer numeric columns from dtypes.
    pub infer_numeric_cols: bool,
    /// Infer integer subset from numeric columns.
    pub infer_integer_cols: bool,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            value_policy: SpecXlsxValuePolicy::default(),
            keep_missing_values: true,
            infer_numeric_cols: true,
            infer_integer_cols: true,
        }
    }
}

/// Two-color scale rule over one column's body cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColorScaleRule {
    /// Column name.
    pub column: String,
    /// Color at the column minimum.
    pub color_min: String,
    /// Color at the column maximum.
    pub color_max: String,
}

/// Per-sheet write options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetWriteOptions {
    /// Force these columns to integer format.
    pub cols_integer: Option<Vec<String>>,
    /// Force these columns to decimal format.
    pub cols_decimal: Option<Vec<String>>,
    /// Per-column format patches, merged over the planned preset.
    pub cols_fmt_overrides: BTreeMap<String, SpecCellFormat>,
    /// Override writer-level keep-missing behavior.
    pub if_keep_missing_values: Option<bool>,
    /// Freeze the header row.
    pub if_freeze_header: bool,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitPolicy,
    /// Conditional color scales.
    pub color_scales: Vec<SpecColorScaleRule>,
}

impl Default for SpecSheetWriteOptions {
    fn default() -> Self {
        Self {
            cols_integer: None,
            cols_decimal: None,
            cols_fmt_overrides: BTreeMap::new(),
            if_keep_missing_values: None,
            if_freeze_header: true,
            policy_autofit: SpecAutofitPolicy::default(),
            color_scales: Vec::new(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ChartSpecification

/// Native workbook chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumChartKind {
    /// Line over categories (time series).
    Line,
    /// Vertical bars.
    Column,
    /// Horizontal bars.
    Bar,
    /// Radar/spider chart.
    Radar,
}

/// Chart referencing columns of a previously written sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecChartPlan {
    /// Chart title.
    pub title: String,
    /// Chart type.
    pub kind: EnumChartKind,
    /// Sheet name as passed to `write_sheet` (before de-duplication).
    pub source_sheet: String,
    /// Column holding category labels.
    pub col_categories: String,
    /// One series per value column.
    pub cols_values: Vec<String>,
    /// X axis title.
    pub x_axis_title: Option<String>,
    /// Y axis title.
    pub y_axis_title: Option<String>,
}

impl SpecChartPlan {
    /// Chart with no axis titles.
    pub fn new(
        title: impl Into<String>,
        kind: EnumChartKind,
        source_sheet: impl Into<String>,
        col_categories: impl Into<String>,
        cols_values: &[&str],
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            source_sheet: source_sheet.into(),
            col_categories: col_categories.into(),
            cols_values: cols_values.iter().map(ToString::to_string).collect(),
            x_axis_title: None,
            y_axis_title: None,
        }
    }

    /// Set both axis titles.
    pub fn with_axes(mut self, x_axis_title: &str, y_axis_title: &str) -> Self {
        self.x_axis_title = Some(x_axis_title.to_string());
        self.y_axis_title = Some(y_axis_title.to_string());
        self
    }
}

/// Layout of a written data sheet, kept for chart references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetLayout {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Column names in written order (column 0 first).
    pub colnames: Vec<String>,
    /// Body rows below the header.
    pub n_rows: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Body rows written (header excluded).
    pub n_rows: usize,
    /// Columns written.
    pub n_cols: usize,
    /// Charts inserted (chart sheets only).
    pub n_charts: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Workbook write failures.
#[derive(Debug, Error)]
pub enum XlsxReportError {
    /// Write attempted after `close()`.
    #[error("Cannot write after close().")]
    Closed,
    /// Invalid option value.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    /// Table cannot be laid out as requested.
    #[error("Sheet plan failed: {0}")]
    Plan(String),
    /// Chart references a sheet that was not written.
    #[error("Chart source sheet not written: {0:?}")]
    UnknownSheet(String),
    /// Referenced column not present in the table.
    #[error("Column {column:?} not found in sheet {sheet:?}")]
    UnknownColumn {
        /// Sheet name.
        sheet: String,
        /// Column name.
        column: String,
    },
    /// DataFrame access failure.
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),
    /// Underlying workbook library failure.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
