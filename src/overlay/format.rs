/// Groups the integer digits of `digits` with `,` every three places.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push_str(sign);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Most fraction digits a callout amount keeps.
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats a yen amount the way the callouts display it: integer digits
/// grouped by thousands, then at most three fraction digits with trailing
/// zeros dropped.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_owned();
    }
    let fixed = format!("{amount:.precision$}", precision = MAX_FRACTION_DIGITS);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() && integer.trim_start_matches('-').bytes().all(|b| b == b'0') {
        return "0".to_owned();
    }

    let mut formatted = group_thousands(integer);
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}
