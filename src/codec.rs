//! Currency and duration text used at the edges of the calculators.
//!
//! Amounts are shown the way a vi-VN locale renders VND: no fraction digits,
//! `.` as the thousands separator and a trailing `₫` after a no-break space.

use serde::{Deserialize, Deserializer, de};

const NO_BREAK_SPACE: char = '\u{a0}';

/// Keeps only the digits of `raw` and reads them as an integer amount.
/// Empty or digit-free input reads as zero, as does anything too large for u64.
pub fn parse_currency(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn rounded_magnitude(amount: f64) -> (bool, u64) {
    let rounded = amount.round();
    (rounded < 0.0, rounded.abs() as u64)
}

/// `1234567.6` -> `"1.234.568 ₫"`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("NaN{NO_BREAK_SPACE}₫");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}∞{NO_BREAK_SPACE}₫");
    }
    let (negative, magnitude) = rounded_magnitude(amount);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}{NO_BREAK_SPACE}₫", group_digits(magnitude, '.'))
}

/// Comma-grouped echo for input boxes, `1000000` -> `"1,000,000"`.
pub fn format_grouped(amount: u64) -> String {
    group_digits(amount, ',')
}

/// Spells a day count as months and days once it spans a full month.
pub fn format_day_span(days: u32, days_per_month: u32) -> String {
    let months = days / days_per_month.max(1);
    let rest = days % days_per_month.max(1);
    match (months, rest) {
        (0, _) => format!("{days} ngày"),
        (m, 0) => format!("{m} tháng"),
        (m, d) => format!("{m} tháng {d} ngày"),
    }
}

/// Accepts either a JSON number or a locale-formatted string for an amount.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(v)) if v.is_finite() => Ok(Some(v)),
        Some(RawAmount::Number(v)) => Err(de::Error::custom(format!("amount is not finite: {v}"))),
        Some(RawAmount::Text(text)) => Ok(Some(parse_currency(&text) as f64)),
    }
}
