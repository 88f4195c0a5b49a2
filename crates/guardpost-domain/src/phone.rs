//! Phone-number normalization for the Nigerian numbering plan.

const COUNTRY_CODE: &str = "234";

/// Normalize a phone number to E.164 (`+234XXXXXXXXXX`).
///
/// Spaces, dashes, dots and parentheses are stripped first. Then:
/// - `+...` is kept as is
/// - `234` followed by 10 digits gets a leading `+`
/// - `0` followed by 10 digits becomes `+234` + the 10 digits
/// - a bare 10-digit number starting with 7, 8 or 9 becomes `+234` + number
///
/// Anything else is returned cleaned but otherwise unchanged; use
/// [`is_e164`] to decide whether the result is usable.
pub fn format_phone_number(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if cleaned.starts_with('+') {
        return cleaned;
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return cleaned;
    }
    match cleaned.len() {
        13 if cleaned.starts_with(COUNTRY_CODE) => format!("+{cleaned}"),
        11 if cleaned.starts_with('0') => format!("+{COUNTRY_CODE}{}", &cleaned[1..]),
        10 if cleaned.starts_with(['7', '8', '9']) => format!("+{COUNTRY_CODE}{cleaned}"),
        _ => cleaned,
    }
}

/// `+` followed by 8–15 digits.
pub fn is_e164(phone: &str) -> bool {
    phone
        .strip_prefix('+')
        .is_some_and(|digits| {
            (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
        })
}
