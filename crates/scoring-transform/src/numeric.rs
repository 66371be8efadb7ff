//! Numeric parsing for raw indicator cells.

use scoring_model::CellValue;

/// Parses a string as a finite `f64`.
///
/// Accepts plain and exponent notation as well as comma thousands
/// separators in groups of three (`1,234,567.89`). Returns `None` for
/// empty input, malformed grouping, `NaN` and infinities.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return parsed.is_finite().then_some(parsed);
    }
    if trimmed.contains(',') {
        return parse_grouped(trimmed);
    }
    None
}

fn parse_grouped(value: &str) -> Option<f64> {
    let unsigned = value
        .strip_prefix(['-', '+'])
        .unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut groups = integer.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    for group in groups {
        if group.len() != 3 || !group.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
    }
    if let Some(fraction) = fraction {
        if !fraction.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
    }

    let parsed = value.replace(',', "").parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Reads a cell as a number: numeric cells directly, text cells via [`parse_numeric`].
pub fn cell_to_f64(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(value) => value.is_finite().then_some(*value),
        CellValue::Text(text) => parse_numeric(text),
        CellValue::Missing => None,
    }
}
