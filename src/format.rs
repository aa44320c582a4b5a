//! Display helpers for amounts, form input and terms

/// Insert `sep` between every group of three digits, counting from the right
pub fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// Normalise a typed amount: drop everything but digits and regroup with commas.
/// "1000000" -> "1,000,000", "12a34" -> "1,234"
pub fn format_number_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    group_digits(&digits, ',')
}

/// Most decimal places `format_currency` renders; larger requests are clamped
pub const MAX_CURRENCY_DECIMALS: u32 = 8;

/// Shown in place of NaN or infinite amounts
pub const NON_FINITE_AMOUNT: &str = "n/a";

/// Digits of `|value| * 10^decimals`, rounded half away from zero.
/// `value` must be finite and `decimals` at most `MAX_CURRENCY_DECIMALS`.
fn scaled_digits(value: f64, decimals: u32) -> String {
    let scaled = value.abs() * 10f64.powi(decimals as i32);
    if scaled.is_finite() {
        format!("{:.0}", scaled.round())
    } else {
        // Only reachable near f64::MAX, where there is no fractional part
        format!("{:.0}{}", value.abs(), "0".repeat(decimals as usize))
    }
}

/// Whole-unit amount with comma grouping, as used in validation messages ("$10,000")
pub fn format_amount_label(amount: f64) -> String {
    if !amount.is_finite() {
        return NON_FINITE_AMOUNT.to_string();
    }
    let digits = scaled_digits(amount, 0);
    let sign = if amount < 0.0 && digits != "0" { "-" } else { "" };
    format!("{}${}", sign, group_digits(&digits, ','))
}

/// Colombian peso formatting: "$ 1.234.567,89"
///
/// `.` groups thousands, `,` separates decimals. Rounds half away from zero.
/// `decimals` is clamped to `MAX_CURRENCY_DECIMALS`; NaN and infinities
/// render as `NON_FINITE_AMOUNT`.
pub fn format_currency(amount: f64, decimals: u32) -> String {
    if !amount.is_finite() {
        return NON_FINITE_AMOUNT.to_string();
    }
    let decimals = decimals.min(MAX_CURRENCY_DECIMALS) as usize;

    let mut digits = scaled_digits(amount, decimals as u32);
    if digits.len() <= decimals {
        digits = format!("{:0>width$}", digits, width = decimals + 1);
    }
    let (whole, frac) = digits.split_at(digits.len() - decimals);

    let is_zero = digits.bytes().all(|b| b == b'0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    let mut out = format!("{}$ {}", sign, group_digits(whole, '.'));
    if decimals > 0 {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// "2 years and 3 months" style label for a term
pub fn describe_term(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    format!(
        "{} {} and {} {}",
        years,
        if years == 1 { "year" } else { "years" },
        rest,
        if rest == 1 { "month" } else { "months" }
    )
}
