//! ISO 7064 MOD 97-10 arithmetic over IBAN strings.
//!
//! The rearranged numeric form of a Romanian IBAN has 30+ digits, so the remainder is
//! reduced one digit at a time instead of going through an integer type.

use crate::format::clean_iban;

/// A=10 ... Z=35 (ISO 13616). Digits and anything else pass through.
pub fn letters_to_digits(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push_str(&(u32::from(c) - u32::from('A') + 10).to_string());
        } else {
            out.push(c);
        }
    }
    out
}

/// Remainder of a decimal digit string modulo 97. Non-digits are skipped.
pub fn mod97_checksum(numeric: &str) -> u32 {
    numeric
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |rem, d| (rem * 10 + d) % 97)
}

/// Move the first four characters to the end, convert, reduce.
fn rearranged_remainder(iban: &str) -> Option<u32> {
    if iban.len() < 5 || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let (head, tail) = iban.split_at(4);
    Some(mod97_checksum(&letters_to_digits(&format!("{tail}{head}"))))
}

/// True iff the rearranged IBAN reduces to 1.
pub fn validate_checksum(iban: &str) -> bool {
    rearranged_remainder(&clean_iban(iban)) == Some(1)
}

/// Check digits for `country` + `bank_code` + `account_id`, always two digits.
pub fn calculate_check_digits(country: &str, bank_code: &str, account_id: &str) -> String {
    let candidate = clean_iban(&format!("{country}00{bank_code}{account_id}"));
    let rem = rearranged_remainder(&candidate).unwrap_or(0);
    format!("{:02}", 98 - rem)
}

/// Full IBAN with freshly computed check digits.
pub fn build_iban(country: &str, bank_code: &str, account_id: &str) -> String {
    let digits = calculate_check_digits(country, bank_code, account_id);
    clean_iban(&format!("{country}{digits}{bank_code}{account_id}"))
}
