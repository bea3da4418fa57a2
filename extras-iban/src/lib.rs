//! extras-iban: Romanian IBAN cleaning, formatting, ISO 7064 MOD 97-10 validation and
//! check-digit calculation.

pub mod banks;
pub mod checksum;
pub mod format;
pub mod validate;

pub use banks::{is_known_bank_code, known_bank_name, KNOWN_BANK_CODES};
pub use checksum::{
    build_iban, calculate_check_digits, letters_to_digits, mod97_checksum, validate_checksum,
};
pub use format::{clean_iban, format_iban};
pub use validate::{
    validate_iban, validate_iban_real_time, validate_structure, IbanError, IbanValidation,
    RealTimeValidation, StructureCheck, IBAN_LENGTH,
};
