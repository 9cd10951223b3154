//! Workbook constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecReportFormats};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Header row fill.
pub const C_COLOR_HEADER_FILL: &str = "#1F4E78";
/// Header row font.
pub const C_COLOR_HEADER_FONT: &str = "#FFFFFF";
/// Low end of the two-color scale.
pub const C_COLOR_SCALE_MIN: &str = "#FF9999";
/// High end of the two-color scale.
pub const C_COLOR_SCALE_MAX: &str = "#99FF99";

/// Integer body cells.
pub const C_NUM_FORMAT_INTEGER: &str = "0";
/// Decimal body cells: two fixed decimals.
pub const C_NUM_FORMAT_DECIMAL: &str = "0.00";

/// Chart insert size in pixels.
pub const TUP_CHART_SIZE_PX: (u32, u32) = (720, 400);
/// Rows between stacked charts on a chart sheet.
pub const N_ROWS_PER_CHART: u32 = 22;

/// Build the default report format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_report_formats() -> SpecReportFormats {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    SpecReportFormats {
        text: cfg_base_fmt_spec.clone(),
        integer: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_INTEGER.to_string()),
            ..Default::default()
        }),
        decimal: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_DECIMAL.to_string()),
            ..Default::default()
        }),
        header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(C_COLOR_HEADER_FILL.to_string()),
            font_color: Some(C_COLOR_HEADER_FONT.to_string()),
            border: Some(1),
            ..Default::default()
        }),
    }
}
