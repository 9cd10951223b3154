//! Native workbook charts built over previously written sheets.

use rust_xlsxwriter::{Chart, ChartType};

use crate::conf::TUP_CHART_SIZE_PX;
use crate::spec::{EnumChartKind, SpecChartPlan, SpecSheetLayout, XlsxReportError};

/// Map chart kind to the workbook chart type.
pub fn derive_chart_type(kind: EnumChartKind) -> ChartType {
    match kind {
        EnumChartKind::Line => ChartType::Line,
        EnumChartKind::Column => ChartType::Column,
        EnumChartKind::Bar => ChartType::Bar,
        EnumChartKind::Radar => ChartType::Radar,
    }
}

/// Resolve plan columns against `layout`: `(category col, value cols)`.
pub fn plan_chart_columns(
    plan: &SpecChartPlan,
    layout: &SpecSheetLayout,
) -> Result<(u16, Vec<(String, u16)>), XlsxReportError> {
    let find_col = |c_name: &str| -> Result<u16, XlsxReportError> {
        let n_idx = layout
            .colnames
            .iter()
            .position(|c_col| c_col == c_name)
            .ok_or_else(|| XlsxReportError::UnknownColumn {
                sheet: layout.sheet_name.clone(),
                column: c_name.to_string(),
            })?;
        u16::try_from(n_idx)
            .map_err(|_| XlsxReportError::Plan(format!("column index overflow: {n_idx}")))
    };

    if plan.cols_values.is_empty() {
        return Err(XlsxReportError::Plan(format!(
            "chart {:?} has no value columns",
            plan.title
        )));
    }

    let n_col_categories = find_col(&plan.col_categories)?;
    let l_cols_values = plan
        .cols_values
        .iter()
        .map(|c_name| Ok((c_name.clone(), find_col(c_name)?)))
        .collect::<Result<Vec<_>, XlsxReportError>>()?;
    Ok((n_col_categories, l_cols_values))
}

/// Build one chart: a series per value column over the body rows of `layout`.
pub fn build_chart(
    plan: &SpecChartPlan,
    layout: &SpecSheetLayout,
) -> Result<Chart, XlsxReportError> {
    if layout.n_rows == 0 {
        return Err(XlsxReportError::Plan(format!(
            "chart {:?} references empty sheet {:?}",
            plan.title, layout.sheet_name
        )));
    }
    let (n_col_categories, l_cols_values) = plan_chart_columns(plan, layout)?;
    let n_row_last = u32::try_from(layout.n_rows)
        .map_err(|_| XlsxReportError::Plan(format!("row index overflow: {}", layout.n_rows)))?;
    let c_sheet = layout.sheet_name.as_str();

    let mut chart = Chart::new(derive_chart_type(plan.kind));
    chart.title().set_name(plan.title.as_str());
    for (c_name, n_col) in &l_cols_values {
        chart
            .add_series()
            .set_name(c_name.as_str())
            .set_categories((c_sheet, 1, n_col_categories, n_row_last, n_col_categories))
            .set_values((c_sheet, 1, *n_col, n_row_last, *n_col));
    }
    if let Some(c_title) = &plan.x_axis_title {
        chart.x_axis().set_name(c_title.as_str());
    }
    if let Some(c_title) = &plan.y_axis_title {
        chart.y_axis().set_name(c_title.as_str());
    }
    chart.set_width(TUP_CHART_SIZE_PX.0);
    chart.set_height(TUP_CHART_SIZE_PX.1);

    Ok(chart)
}
