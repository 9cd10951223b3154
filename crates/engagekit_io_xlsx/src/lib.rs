//! `engagekit_io_xlsx` v1:
//! Report workbook writer kernel.
//!
//! - `conf`   : Excel limits, colors and default presets
//! - `spec`   : formats/options/chart plans/errors
//! - `util`   : pure helper functions
//! - `chart`  : native workbook chart construction
//! - `writer` : DataFrame-to-sheet writer
pub mod chart;
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_COLOR_SCALE_MAX, C_COLOR_SCALE_MIN, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL, derive_default_report_formats,
};
pub use spec::{
    EnumAutofitColumnsRule, EnumCellValue, EnumChartKind, SpecAutofitPolicy, SpecCellFormat,
    SpecChartPlan, SpecColorScaleRule, SpecReportFormats, SpecSheetLayout, SpecSheetWriteOptions,
    SpecXlsxReport, SpecXlsxValuePolicy, SpecXlsxWriteOptions, XlsxReportError,
};
pub use util::{derive_unique_sheet_name, sanitize_sheet_name, validate_sheet_bounds};
pub use writer::XlsxWriter;
