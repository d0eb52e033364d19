//! Amount parsing, rounding and display helpers

/// Parse a loosely formatted amount cell.
///
/// Thousands separators are stripped and surrounding whitespace ignored.
/// Anything that is not a finite number afterwards (`"N/A"`, `"--"`, `""`,
/// `"NaN"`) yields `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Round to two decimal places. Apply once, at reporting time.
///
/// Rounds the exact stored value, so `2.675` (stored just below) gives
/// `2.67`, the same digits [`format_amount`] prints.
pub fn round_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Format with thousands separators and two decimals: `1234.5` -> `"1,234.50"`
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
