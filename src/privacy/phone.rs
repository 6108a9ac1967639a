//! Phone number normalization and display formatting.
//!
//! Numbers are stored stripped to bare digits and re-hyphenated for
//! display: 11 digits group as 3-4-4, 10 digits as 3-3-4 (2-4-4 for the
//! Seoul `02` prefix), 9 digits as 2-3-4.

/// Strip a phone number down to its digits.
pub fn strip_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number with hyphens for display.
///
/// Inputs that don't match a known digit count are returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let cleaned = strip_phone(phone);

    match cleaned.len() {
        11 => format!("{}-{}-{}", &cleaned[..3], &cleaned[3..7], &cleaned[7..]),
        10 if cleaned.starts_with("02") => {
            format!("{}-{}-{}", &cleaned[..2], &cleaned[2..6], &cleaned[6..])
        }
        10 => format!("{}-{}-{}", &cleaned[..3], &cleaned[3..6], &cleaned[6..]),
        9 => format!("{}-{}-{}", &cleaned[..2], &cleaned[2..5], &cleaned[5..]),
        _ => phone.to_string(),
    }
}
