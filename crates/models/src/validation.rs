//! Field checks shared by staff and customer records.

use chrono::{Datelike, NaiveDate};

use crate::errors::ModelError;

pub const PHONE_PREFIX: &str = "+91";

/// Trimmed value of a required text field.
pub fn required(field: &str, value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::validation(format!("{field} is required")));
    }
    Ok(v.to_string())
}

/// `+91` followed by exactly ten digits.
pub fn validate_phone(field: &str, value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    let ok = v
        .strip_prefix(PHONE_PREFIX)
        .map(|rest| rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    if !ok {
        return Err(ModelError::validation(format!("{field} must start with +91 and be 10 digits")));
    }
    Ok(v.to_string())
}

/// Empty input and a bare `+91` both mean "no alternate number".
pub fn optional_phone(field: &str, value: Option<&str>) -> Result<Option<String>, ModelError> {
    match value.map(str::trim) {
        None | Some("") | Some(PHONE_PREFIX) => Ok(None),
        Some(v) => validate_phone(field, v).map(Some),
    }
}

pub fn validate_email(value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    match v.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(v.to_string()),
        _ => Err(ModelError::validation("email must contain '@'")),
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ModelError::validation(format!("invalid date format for {field}: {value}")))
}

/// Whole years between `dob` and `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_prefix_and_ten_digits() {
        assert!(validate_phone("phone", "+919876543210").is_ok());
        assert!(validate_phone("phone", "9876543210").is_err());
        assert!(validate_phone("phone", "+91987654321").is_err());
        assert!(validate_phone("phone", "+91987654321x").is_err());
    }

    #[test]
    fn bare_prefix_means_no_alternate_phone() {
        assert_eq!(optional_phone("alt", Some("+91")).unwrap(), None);
        assert_eq!(optional_phone("alt", Some("")).unwrap(), None);
        assert_eq!(optional_phone("alt", None).unwrap(), None);
        assert_eq!(optional_phone("alt", Some("+911234567890")).unwrap().as_deref(), Some("+911234567890"));
        assert!(optional_phone("alt", Some("+9112")).is_err());
    }

    #[test]
    fn age_counts_whole_years() {
        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2020, 6, 14).unwrap()), 29);
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()), 30);
    }

    #[test]
    fn parses_iso_dates_only() {
        assert!(parse_date("joineddate", "2024-02-29").is_ok());
        assert!(parse_date("joineddate", "29/02/2024").is_err());
    }

    #[test]
    fn email_needs_both_sides_of_at() {
        assert!(validate_email("a@b.in").is_ok());
        assert!(validate_email("@b.in").is_err());
        assert!(validate_email("plain").is_err());
    }
}
