//! Structural, checksum and incremental validation of Romanian IBANs.
//!
//! Validation failures are values ([`IbanError`] inside a result struct), never `Err`
//! and never panics, whatever the input.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::banks::is_known_bank_code;
use crate::checksum::validate_checksum;
use crate::format::{clean_iban, format_iban};

pub const IBAN_LENGTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IbanError {
    #[error("IBAN must be exactly 24 characters long (got {0})")]
    InvalidLength(usize),
    #[error("IBAN is longer than 24 characters")]
    TooLong,
    #[error("IBAN must start with the country code RO")]
    InvalidCountryCode,
    #[error("check digits (positions 3-4) must be numeric")]
    InvalidCheckDigits,
    #[error("bank code (positions 5-8) must be 4 uppercase letters")]
    InvalidBankCode,
    #[error("account identifier (positions 9-24) must be alphanumeric")]
    InvalidAccountId,
    #[error("IBAN checksum is invalid")]
    InvalidChecksum,
}

impl Serialize for IbanError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<IbanError>,
}

impl StructureCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn fail(error: IbanError) -> Self {
        Self {
            valid: false,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IbanValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<IbanError>,
    /// Advisory only; never affects `valid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

impl IbanValidation {
    fn fail(error: IbanError) -> Self {
        Self {
            valid: false,
            error: Some(error),
            warning: None,
            bank_code: None,
            formatted: None,
        }
    }
}

/// Position rules for the characters present; `chars` may be a prefix.
fn check_positions(chars: &[char]) -> Option<IbanError> {
    if chars.len() >= 2 && chars[..2] != ['R', 'O'] {
        return Some(IbanError::InvalidCountryCode);
    }
    if chars.len() >= 4 && !chars[2..4].iter().all(char::is_ascii_digit) {
        return Some(IbanError::InvalidCheckDigits);
    }
    if chars.len() >= 8 && !chars[4..8].iter().all(char::is_ascii_uppercase) {
        return Some(IbanError::InvalidBankCode);
    }
    if chars.len() > 8 && !chars[8..].iter().all(char::is_ascii_alphanumeric) {
        return Some(IbanError::InvalidAccountId);
    }
    None
}

/// Length, country code, check digits, bank code, account id; first failure wins.
///
/// The input is checked as given; callers clean it first if they need to.
pub fn validate_structure(iban: &str) -> StructureCheck {
    let chars: Vec<char> = iban.chars().collect();
    if chars.len() != IBAN_LENGTH {
        return StructureCheck::fail(IbanError::InvalidLength(chars.len()));
    }
    match check_positions(&chars) {
        Some(e) => StructureCheck::fail(e),
        None => StructureCheck::ok(),
    }
}

/// Clean, check structure and checksum, annotate unknown bank codes.
pub fn validate_iban(iban: &str) -> IbanValidation {
    let cleaned = clean_iban(iban);

    if let Some(e) = validate_structure(&cleaned).error {
        return IbanValidation::fail(e);
    }
    if !validate_checksum(&cleaned) {
        return IbanValidation::fail(IbanError::InvalidChecksum);
    }

    // structure guarantees ASCII, so byte slicing is safe
    let bank_code = cleaned[4..8].to_string();
    let warning = (!is_known_bank_code(&bank_code))
        .then(|| format!("bank code {bank_code} is not in the list of known Romanian banks"));

    IbanValidation {
        valid: true,
        error: None,
        warning,
        bank_code: Some(bank_code),
        formatted: Some(format_iban(&cleaned)),
    }
}

/// Result of validating a partially typed IBAN.
///
/// `valid` is only true for a complete, correct IBAN. A prefix with no violation so far
/// has `valid == false` and no `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealTimeValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<IbanError>,
}

/// Incremental check for character-by-character input.
pub fn validate_iban_real_time(partial: &str) -> RealTimeValidation {
    let cleaned = clean_iban(partial);
    let chars: Vec<char> = cleaned.chars().collect();

    let error = if chars.len() > IBAN_LENGTH {
        Some(IbanError::TooLong)
    } else if let Some(e) = check_positions(&chars) {
        Some(e)
    } else if chars.len() == IBAN_LENGTH && !validate_checksum(&cleaned) {
        Some(IbanError::InvalidChecksum)
    } else {
        None
    };

    RealTimeValidation {
        valid: error.is_none() && chars.len() == IBAN_LENGTH,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", IbanError::InvalidLength(0))]
    #[case::short("RO49AAAA", IbanError::InvalidLength(8))]
    #[case::long("RO49AAAA1B310075938400001", IbanError::InvalidLength(25))]
    #[case::country("DE49AAAA1B31007593840000", IbanError::InvalidCountryCode)]
    #[case::lowercase_country("ro49AAAA1B31007593840000", IbanError::InvalidCountryCode)]
    #[case::check_digits("RO4XAAAA1B31007593840000", IbanError::InvalidCheckDigits)]
    #[case::bank_code("RO49AA1A1B31007593840000", IbanError::InvalidBankCode)]
    #[case::account("RO49AAAA1B31-07593840000", IbanError::InvalidAccountId)]
    // length is checked before the country code
    #[case::first_failure_wins("DE49AAAA", IbanError::InvalidLength(8))]
    fn test_structure_errors(#[case] input: &str, #[case] expected: IbanError) {
        let r = validate_structure(input);
        assert!(!r.valid);
        assert_eq!(r.error, Some(expected));
    }

    #[test]
    fn test_structure_ok_ignores_checksum() {
        assert!(validate_structure("RO00AAAA1B31007593840000").valid);
    }

    #[test]
    fn test_error_messages_are_specific() {
        assert_eq!(
            IbanError::InvalidLength(3).to_string(),
            "IBAN must be exactly 24 characters long (got 3)"
        );
        assert_eq!(
            IbanError::InvalidCountryCode.to_string(),
            "IBAN must start with the country code RO"
        );
    }

    #[test]
    fn test_validate_iban_valid_unknown_bank() {
        let r = validate_iban("RO49AAAA1B31007593840000");
        assert!(r.valid);
        assert_eq!(r.error, None);
        assert_eq!(r.bank_code.as_deref(), Some("AAAA"));
        assert_eq!(r.formatted.as_deref(), Some("RO49 AAAA 1B31 0075 9384 0000"));
        assert!(r.warning.unwrap().contains("AAAA"));
    }

    #[test]
    fn test_validate_iban_known_bank_has_no_warning() {
        let r = validate_iban("RO65 BTRL RONC RT01 2345 6789");
        assert!(r.valid);
        assert_eq!(r.warning, None);
        assert_eq!(r.bank_code.as_deref(), Some("BTRL"));
    }

    #[test]
    fn test_validate_iban_normalization_equivalence() {
        let a = validate_iban("RO49 AAAA 1B31 0075 9384 0000");
        let b = validate_iban("ro49aaaa1b3100759384 0000");
        assert_eq!(a.valid, b.valid);
        assert_eq!(a.formatted, b.formatted);
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_iban_checksum_failure() {
        let r = validate_iban("RO48AAAA1B31007593840000");
        assert!(!r.valid);
        assert_eq!(r.error, Some(IbanError::InvalidChecksum));
        assert_eq!(r.formatted, None);
    }

    #[test]
    fn test_validate_iban_never_panics_on_odd_input() {
        for input in ["", "R", "  ", "RO", "ĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂĂ", "RO49ȘȘȘȘ1B31007593840000"] {
            assert!(!validate_iban(input).valid, "{input:?}");
            assert!(!validate_iban_real_time(input).valid, "{input:?}");
        }
    }

    #[rstest]
    #[case::empty("", None)]
    #[case::single_letter_not_checked("X", None)]
    #[case::country_bad("XO", Some(IbanError::InvalidCountryCode))]
    #[case::country_ok("RO", None)]
    #[case::check_digits_partial("RO4", None)]
    #[case::check_digits_bad("RO4A", Some(IbanError::InvalidCheckDigits))]
    #[case::bank_partial_digits_not_checked("RO49AA1", None)]
    #[case::bank_bad("RO49AA1A", Some(IbanError::InvalidBankCode))]
    #[case::lowercase_is_cleaned("ro49aaaa", None)]
    #[case::account_bad("RO49AAAA1B3!", Some(IbanError::InvalidAccountId))]
    #[case::checksum_bad("RO48AAAA1B31007593840000", Some(IbanError::InvalidChecksum))]
    #[case::too_long("RO49AAAA1B310075938400000", Some(IbanError::TooLong))]
    fn test_real_time_errors(#[case] input: &str, #[case] expected: Option<IbanError>) {
        let r = validate_iban_real_time(input);
        assert_eq!(r.error, expected);
        assert!(!r.valid);
    }

    #[test]
    fn test_real_time_complete() {
        let r = validate_iban_real_time("RO49 AAAA 1B31 0075 9384 0000");
        assert!(r.valid);
        assert_eq!(r.error, None);
    }

    #[test]
    fn test_serialized_shape() {
        let v = serde_json::to_value(validate_iban("RO48AAAA1B31007593840000")).unwrap();
        assert_eq!(v["valid"], false);
        assert_eq!(v["error"], "IBAN checksum is invalid");
        assert!(v.get("formatted").is_none());

        let v = serde_json::to_value(validate_iban("RO65BTRLRONCRT0123456789")).unwrap();
        assert_eq!(v["bankCode"], "BTRL");
    }
}
