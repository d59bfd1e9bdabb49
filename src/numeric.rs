//! Money-field normalization and display formatting.
//!
//! The only place raw text amounts are parsed. Everything downstream works
//! on `f64`.

use crate::models::RawAmount;

/// Parse a stored amount into a finite number.
///
/// Text has grouping separators (`,`, `_`, spaces) stripped before parsing a
/// signed decimal. Empty text yields `None`. Unparseable text is a data
/// quality defect upstream; it is logged and treated as missing.
pub fn normalize_amount(raw: &RawAmount) -> Option<f64> {
    match raw {
        RawAmount::Number(n) => n.is_finite().then_some(*n),
        RawAmount::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !matches!(*c, ',' | '_') && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            match cleaned.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => {
                    tracing::warn!(value = %text, "unparseable amount treated as missing");
                    None
                }
            }
        }
    }
}

/// [`normalize_amount`] with missing values substituted by zero.
pub fn amount_or_zero(raw: Option<&RawAmount>) -> f64 {
    raw.and_then(normalize_amount).unwrap_or(0.0)
}

/// Thousands-grouped with at most two decimals, trailing zeros trimmed.
///
/// `1234567.891` → `"1,234,567.89"`, `583.0` → `"583"`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// One decimal place with an explicit `+` for positive values.
///
/// The sign follows the unrounded value, so `0.04` prints as `+0.0`.
/// Negative values that round to zero print as `0.0`.
pub fn format_percentage(value: f64) -> String {
    let rounded = format!("{:.1}", value);
    if value > 0.0 {
        format!("+{}", rounded)
    } else if rounded.trim_start_matches('-') == "0.0" {
        "0.0".to_string()
    } else {
        rounded
    }
}
