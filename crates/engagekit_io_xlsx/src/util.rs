//! Stateless helper utilities used by the workbook writer.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitPolicy, SpecXlsxValuePolicy,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Convert `NaN`/`Inf` to policy string; return error for finite values.
pub fn convert_nan_inf_to_str(
    x: f64,
    value_policy: &SpecXlsxValuePolicy,
) -> Result<String, String> {
    if x.is_nan() {
        return Ok(value_policy.nan_str.clone());
    }
    if x.is_infinite() {
        return Ok(if x.is_sign_positive() {
            value_policy.posinf_str.clone()
        } else {
            value_policy.neginf_str.clone()
        });
    }
    Err("Input is neither NaN nor Inf.".to_string())
}

/// Normalize one cell for writing.
///
/// Missing and non-finite values become blank, or policy text when
/// `if_keep_missing_values` is set. Non-numeric columns are always text.
pub fn convert_cell_value(
    value: &EnumCellValue,
    if_is_numeric_col: bool,
    if_keep_missing_values: bool,
    value_policy: &SpecXlsxValuePolicy,
) -> EnumCellValue {
    match value {
        EnumCellValue::None => {
            if if_keep_missing_values {
                EnumCellValue::String(value_policy.missing_value_str.clone())
            } else {
                EnumCellValue::None
            }
        }
        EnumCellValue::String(s) => EnumCellValue::String(s.clone()),
        EnumCellValue::Number(n) if !if_is_numeric_col => EnumCellValue::String(n.to_string()),
        EnumCellValue::Number(n) if n.is_finite() => EnumCellValue::Number(*n),
        EnumCellValue::Number(n) => {
            if if_keep_missing_values {
                EnumCellValue::String(
                    convert_nan_inf_to_str(*n, value_policy)
                        .unwrap_or_else(|_| value_policy.nan_str.clone()),
                )
            } else {
                EnumCellValue::None
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnSelection

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> Result<(), String> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} at indices {l_pos:?}"))
        .collect::<Vec<_>>()
        .join("; ");

    Err(format!("Duplicate column names detected: {c_msg}"))
}

/// Resolve column names to sorted unique indices.
pub fn select_column_indices(
    columns: &[String],
    names: Option<&[String]>,
) -> Result<Vec<usize>, String> {
    let Some(names) = names else {
        return Ok(vec![]);
    };

    let mut set_idx = BTreeSet::new();
    for c_name in names {
        let Some(n_idx) = columns.iter().position(|c_col| c_col == c_name) else {
            return Err(c_name.clone());
        };
        set_idx.insert(n_idx);
    }
    Ok(set_idx.into_iter().collect())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Return `name`, or `name__2`, `name__3`, ... if already taken.
///
/// Comparison is case-insensitive, matching Excel. The chosen name is
/// inserted into `existing`.
pub fn derive_unique_sheet_name(name: &str, existing: &mut BTreeSet<String>) -> String {
    if existing.insert(name.to_lowercase()) {
        return name.to_string();
    }

    let mut n_idx = 2usize;
    loop {
        // The base shrinks as the suffix grows so the result stays within 31 chars.
        let c_suffix = format!("__{n_idx}");
        let n_len_base = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_suffix.len()).max(1);
        let base_name: String = name.chars().take(n_len_base).collect();
        let candidate = format!("{base_name}{c_suffix}");
        if existing.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n_idx += 1;
    }
}

/// Reject tables that do not fit one worksheet below a one-row header.
pub fn validate_sheet_bounds(height_df: usize, width_df: usize) -> Result<(), String> {
    if width_df == 0 {
        return Err("table has no columns".to_string());
    }
    if width_df > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "table width {width_df} exceeds Excel column limit {N_NCOLS_EXCEL_MAX}"
        ));
    }
    if height_df + 1 > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "table height {height_df} + header exceeds Excel row limit {N_NROWS_EXCEL_MAX}"
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Estimate displayed width units for one normalized cell value.
pub fn estimate_width_len(
    value: &EnumCellValue,
    if_is_integer_col: bool,
    if_is_numeric_col: bool,
) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::String(s) => estimate_unicode_string_width(s),
        EnumCellValue::Number(n) if if_is_integer_col => format!("{:.0}", n.trunc()).len(),
        EnumCellValue::Number(n) if if_is_numeric_col => {
            let c_repr = n.to_string();
            match c_repr.split_once('.') {
                Some((c_int, c_frac)) => c_int.len() + 1 + c_frac.len().clamp(2, 4),
                None => c_repr.len() + 3,
            }
        }
        EnumCellValue::Number(n) => n.to_string().len(),
    }
}

/// Count non-ASCII characters as 1.6 units.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Final column width from recorded header/body widths.
pub fn derive_autofit_width(
    width_header: usize,
    width_body: usize,
    policy: &SpecAutofitPolicy,
) -> usize {
    let n_width_recorded = match policy.rule_columns {
        EnumAutofitColumnsRule::Header | EnumAutofitColumnsRule::None => width_header,
        EnumAutofitColumnsRule::Body => width_body,
        EnumAutofitColumnsRule::All => usize::max(width_header, width_body),
    };
    let n_min = usize::max(1, policy.width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, policy.width_cell_max));
    usize::min(
        n_max,
        usize::max(n_min, n_width_recorded + policy.width_cell_padding),
    )
}

/// Validate width bounds.
pub fn validate_policy_autofit(policy: &SpecAutofitPolicy) -> Result<(), String> {
    if policy.width_cell_min == 0 {
        return Err("policy_autofit.width_cell_min must be >= 1.".to_string());
    }
    if policy.width_cell_max < policy.width_cell_min {
        return Err(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        );
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_sheet_name_replaces_illegal_and_caps_length() {
        assert_eq!(sanitize_sheet_name("Posts/Week [avg]", "_"), "Posts_Week _avg_");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(
            sanitize_sheet_name("Instagram Performance And Much More Text", "_")
                .chars()
                .count(),
            31
        );
    }

    #[test]
    fn derive_unique_sheet_name_suffixes_case_insensitively() {
        let mut set_existing = BTreeSet::new();
        assert_eq!(derive_unique_sheet_name("Summary", &mut set_existing), "Summary");
        assert_eq!(derive_unique_sheet_name("summary", &mut set_existing), "summary__2");
        assert_eq!(derive_unique_sheet_name("Summary", &mut set_existing), "Summary__3");
    }

    #[test]
    fn derive_unique_sheet_name_stays_within_limit_past_99_duplicates() {
        let c_name = "Instagram Performance Matrix 25";
        assert_eq!(c_name.chars().count(), N_LEN_EXCEL_SHEET_NAME_MAX);

        let mut set_existing = BTreeSet::new();
        let l_names: Vec<String> = (0..150)
            .map(|_| derive_unique_sheet_name(c_name, &mut set_existing))
            .collect();

        assert!(
            l_names
                .iter()
                .all(|c| c.chars().count() <= N_LEN_EXCEL_SHEET_NAME_MAX)
        );
        assert_eq!(l_names.iter().collect::<BTreeSet<_>>().len(), 150);
        assert_eq!(l_names[1], "Instagram Performance Matrix__2");
        assert_eq!(l_names[99], "Instagram Performance Matr__100");
    }

    #[test]
    fn convert_cell_value_applies_missing_policy() {
        let policy = SpecXlsxValuePolicy::default();
        assert_eq!(
            convert_cell_value(&EnumCellValue::None, true, true, &policy),
            EnumCellValue::String("N/A".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::None, true, false, &policy),
            EnumCellValue::None
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(f64::INFINITY), true, true, &policy),
            EnumCellValue::String("Inf".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(1.5), false, true, &policy),
            EnumCellValue::String("1.5".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(1.5), true, true, &policy),
            EnumCellValue::Number(1.5)
        );
    }

    #[test]
    fn validate_unique_columns_names_duplicates() {
        let columns = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        let err = validate_unique_columns(&columns).expect_err("duplicate");
        assert!(err.contains("\"A\" at indices [0, 2]"));
        assert!(validate_unique_columns(&columns[..2]).is_ok());
    }

    #[test]
    fn select_column_indices_sorts_and_reports_missing() {
        let columns = vec!["Date".to_string(), "Likes".to_string(), "Shares".to_string()];
        assert_eq!(
            select_column_indices(
                &columns,
                Some(&["Shares".to_string(), "Date".to_string()])
            ),
            Ok(vec![0, 2])
        );
        assert_eq!(
            select_column_indices(&columns, Some(&["Views".to_string()])),
            Err("Views".to_string())
        );
        assert_eq!(select_column_indices(&columns, None), Ok(vec![]));
    }

    #[test]
    fn derive_autofit_width_pads_and_bounds() {
        let policy = SpecAutofitPolicy::default();
        assert_eq!(derive_autofit_width(9, 3, &policy), 11);
        assert_eq!(derive_autofit_width(1, 2, &policy), 8);
        assert_eq!(derive_autofit_width(200, 2, &policy), 60);
    }

    #[test]
    fn validate_sheet_bounds_rejects_oversized_tables() {
        assert!(validate_sheet_bounds(180, 6).is_ok());
        assert!(validate_sheet_bounds(10, 0).is_err());
        assert!(validate_sheet_bounds(N_NROWS_EXCEL_MAX, 1).is_err());
        assert!(validate_sheet_bounds(1, N_NCOLS_EXCEL_MAX + 1).is_err());
    }
}
