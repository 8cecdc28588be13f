//! Contact field validation
//!
//! Pure syntax checks for email addresses and phone numbers. The store never
//! calls these; callers decide when to apply them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RosterError, RosterResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("valid phone regex"));

/// Check an email address: local-part `@` domain `.` tld of two or more letters
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check a phone number: optional `+`, optional `1`, then 9 to 15 digits
pub fn validate_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Check both contact fields, naming the first one that fails
///
/// Empty values are accepted; contact details are optional on a record.
pub fn validate_contact(email: &str, phone: &str) -> RosterResult<()> {
    if !email.is_empty() && !validate_email(email) {
        return Err(RosterError::Validation(format!(
            "Invalid email address: '{}'",
            email
        )));
    }
    if !phone.is_empty() && !validate_phone(phone) {
        return Err(RosterError::Validation(format!(
            "Invalid phone number: '{}'",
            phone
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("ada.lovelace+maths@uni-london.ac.uk"));
        assert!(validate_email("first_last%tag@example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!validate_email(""));
        assert!(!validate_email("plainaddress"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a@b.c"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@b.c0m"));
    }

    #[test]
    fn test_valid_phones() {
        assert!(validate_phone("1234567890"));
        assert!(validate_phone("+11234567890"));
        assert!(validate_phone("123456789"));
        assert!(validate_phone("+123456789012345"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!validate_phone(""));
        assert!(!validate_phone("12345678"));
        assert!(!validate_phone("123-456-7890"));
        assert!(!validate_phone("++1234567890"));
        assert!(!validate_phone("12345678901234567"));
    }

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact("a@b.com", "1234567890").is_ok());
        assert!(validate_contact("", "").is_ok());

        let err = validate_contact("not-an-email", "1234567890").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("email"));

        let err = validate_contact("a@b.com", "12").unwrap_err();
        assert!(err.to_string().contains("phone"));
    }
}
