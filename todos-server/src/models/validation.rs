//! Validation errors and input parsing

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Path id has no leading integer
    InvalidId,

    /// Create body is missing its `todo` text
    TodoRequired,

    /// Body is not valid JSON for the expected shape
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Invalid ID"),
            Self::TodoRequired => write!(f, "Todo is required"),
            Self::InvalidBody { .. } => write!(f, "Invalid request body"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse the leading integer of `input` the way clients of this API
/// expect from `parseInt`.
///
/// - Leading whitespace is skipped
/// - An optional `+`/`-` sign is accepted
/// - `0x`/`0X` switches to hexadecimal
/// - Parsing stops at the first non-digit; trailing text is ignored
/// - No digits at all yields `None`
/// - Values beyond `i64` saturate at `i64::MAX`/`i64::MIN + 1`
///
/// # Example
/// ```
/// use todos_server::models::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("42"), Some(42));
/// assert_eq!(parse_int_prefix("  7abc"), Some(7));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Only digits remain, so the sole failure is overflow
    let magnitude = i64::from_str_radix(&digits[..end], radix).unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
