//! US-locale display strings for profitability figures.
//!
//! Both formatters round half away from zero (`$1,234.50` displays as
//! `$1,235`).

/// Formats a dollar amount with thousands separators and no cents.
///
/// Negative amounts render as `-$1,235`. Non-finite amounts render as
/// `$NaN` / `$∞` / `-$∞`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount.is_sign_negative() {
            "-$∞".to_string()
        } else {
            "$∞".to_string()
        };
    }

    let rounded = amount.round();
    let whole = rounded.abs() as u64;
    let sign = if rounded < 0.0 && whole > 0 { "-" } else { "" };

    format!("{sign}${}", group_thousands(whole))
}

/// Formats a decimal fraction as a percentage with one decimal place.
///
/// `0.1825` becomes `"18.3%"`.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    // Adding 0.0 folds -0.0 into 0.0.
    let tenths = (fraction * 100.0 * 10.0).round() / 10.0 + 0.0;
    format!("{tenths:.1}%")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
