//! Romanian bank codes (IBAN positions 5-8), used only for advisory warnings.

/// (code, institution)
pub const KNOWN_BANK_CODES: &[(&str, &str)] = &[
    ("BTRL", "Banca Transilvania"),
    ("BRDE", "BRD - Groupe Societe Generale"),
    ("RNCB", "Banca Comerciala Romana"),
    ("RZBR", "Raiffeisen Bank"),
    ("INGB", "ING Bank"),
    ("BACX", "UniCredit Bank"),
    ("CECE", "CEC Bank"),
    ("PIRB", "First Bank"),
    ("OTPV", "OTP Bank"),
    ("BUCU", "Alpha Bank"),
    ("UGBI", "Garanti BBVA"),
    ("BRMA", "Banca Romaneasca"),
    ("CARP", "Patria Bank"),
    ("BREL", "Libra Internet Bank"),
    ("MIRO", "ProCredit Bank"),
    ("EGNA", "Vista Bank"),
    ("FNNB", "Credit Europe Bank"),
    ("EXIM", "Exim Banca Romaneasca"),
    ("WBAN", "Intesa Sanpaolo Bank"),
    ("CITI", "Citibank Europe"),
    ("BPOS", "Bancpost"),
    ("NBOR", "Banca Nationala a Romaniei"),
    ("TREZ", "Trezoreria Statului"),
];

pub fn known_bank_name(code: &str) -> Option<&'static str> {
    KNOWN_BANK_CODES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

pub fn is_known_bank_code(code: &str) -> bool {
    known_bank_name(code).is_some()
}
