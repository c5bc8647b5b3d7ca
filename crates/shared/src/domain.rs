use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned user identifier, passed back in request payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const ZIP_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Zip must be exactly 5 numbers")]
pub struct ZipCodeError;

/// Validated 5-digit US postal code, the location key for forecast lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Parses a user-entered zip. Surrounding whitespace is ignored;
    /// anything other than exactly five ASCII digits is rejected.
    pub fn parse(input: &str) -> Result<Self, ZipCodeError> {
        let value = input.trim();
        if value.len() == ZIP_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(ZipCodeError)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a zip field as the user types: drops non-digits and clamps
/// to five characters, the numeric input mask the form applies on edit.
pub fn sanitize_zip_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(ZIP_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_five_digits() {
        let zip = ZipCode::parse("90210").expect("valid zip");
        assert_eq!(zip.as_str(), "90210");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let zip = ZipCode::parse("  12345 ").expect("valid zip");
        assert_eq!(zip.as_str(), "12345");
    }

    #[test]
    fn rejects_short_long_and_non_numeric_input() {
        assert!(ZipCode::parse("1234").is_err());
        assert!(ZipCode::parse("123456").is_err());
        assert!(ZipCode::parse("12a45").is_err());
        assert!(ZipCode::parse("").is_err());
    }

    #[test]
    fn sanitize_strips_non_digits_and_clamps_length() {
        assert_eq!(sanitize_zip_input("1a2b3c4d5e6f"), "12345");
        assert_eq!(sanitize_zip_input("90-210"), "90210");
        assert_eq!(sanitize_zip_input("abc"), "");
        assert_eq!(sanitize_zip_input("1234567890"), "12345");
    }

    #[test]
    fn zip_serializes_as_plain_string() {
        let zip = ZipCode::parse("60601").expect("valid zip");
        assert_eq!(
            serde_json::to_string(&zip).expect("serialize"),
            "\"60601\""
        );
    }
}
