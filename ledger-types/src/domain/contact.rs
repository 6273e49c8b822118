//! Contact channel format checks (mobile number, email).

use regex::Regex;
use std::sync::LazyLock;

/// Country code +91, then ten digits starting with 6-9.
static MOBILE_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+91[6-9][0-9]{9}$").expect("Invalid mobile number regex pattern")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern")
});

/// Returns true if `mobile` matches the national mobile number format.
pub fn is_valid_mobile_number(mobile: &str) -> bool {
    MOBILE_NUMBER_PATTERN.is_match(mobile)
}

/// Returns true if `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
