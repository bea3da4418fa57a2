//! Regex set for the Banca Transilvania statement layout.
//!
//! Compiled once per `StatementParser`; none of these carry state.

use anyhow::Result;
use regex::Regex;

/// Unsigned amount: "150.00", "1,234.56", "12345.67"
const AMOUNT: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}";

#[derive(Debug, Clone)]
pub struct Patterns {
    // header / footer
    pub page_number: Regex,
    pub boilerplate: Regex,

    // account metadata
    pub owner_client: Regex,
    pub iban: Regex,
    pub currency_label: Regex,
    pub currency_value: Regex,
    pub final_balance_label: Regex,
    pub total_turnover_label: Regex,
    pub daily_turnover: Regex,
    pub amount_any: Regex,

    // blocked amounts
    pub blocked_start: Regex,
    pub blocked_end: Regex,
    pub blocked_entry: Regex,

    // transactions
    pub section_start: Regex,
    pub date_line: Regex,
    pub description_start: Regex,
    pub amount_line: Regex,
    pub reference: Regex,
    pub owner_capture: Regex,
    pub end_of_day: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            page_number: Regex::new(r"^\d+\s*/\s*\d+$")?,
            boilerplate: Regex::new(concat!(
                r"(?i)BANCA TRANSILVANIA|bancatransilvania\.ro|",
                r"Capital social|C\.U\.I\.|R\.B\.\s*-\s*P\.J\.R|Registrul Comertului|",
                r"Nr\.\s*Ord\.\s*Reg\.\s*Com|Fondul de Garantare|",
                r"^Tel(?:efon)?\s*:|^Fax\s*:|^E-?mail\s*:|InfoClienti|",
                r"^Cod SWIFT|documentul este valabil fara semnatura|",
                r"^Extras de cont\s*$|^Pagina\s+\d+"
            ))?,

            owner_client: Regex::new(r"^(?P<name>.+?)\s+Client:\s*(?P<client>\d+)")?,
            iban: Regex::new(r"Cod IBAN:?\s*(?P<iban>[A-Z]{2}\d{2}[A-Z0-9]+)")?,
            currency_label: Regex::new(r"\bValuta\b")?,
            currency_value: Regex::new(r"^(?P<currency>[A-Z]{3})\b")?,
            final_balance_label: Regex::new(r"SOLD FINAL CONT")?,
            total_turnover_label: Regex::new(r"RULAJ TOTAL CONT")?,
            daily_turnover: Regex::new(r"^(?P<date>\d{2}/\d{2}/\d{4})\s*RULAJ ZI")?,
            amount_any: Regex::new(&format!(r"-?{AMOUNT}"))?,

            blocked_start: Regex::new(r"SUME BLOCATE")?,
            blocked_end: Regex::new(r"TOTAL DISPONIBIL")?,
            blocked_entry: Regex::new(&format!(
                r"^-\s*(?P<amount>{AMOUNT})\s*RON\s+aferenta tranzactiei\s*(?P<description>.*)$"
            ))?,

            section_start: Regex::new(r"^CONT\b|SOLD ANTERIOR")?,
            date_line: Regex::new(r"^\d{2}/\d{2}/\d{4}$")?,
            description_start: Regex::new(concat!(
                r"(?i)^(?:Plata|Incasare|Transfer|P2P|",
                r"Constituire depozit|Lichidare depozit|Maturitate depozit|",
                r"Taxa procesare|Comision)"
            ))?,
            amount_line: Regex::new(&format!(r"^(?P<amount>{AMOUNT})$"))?,
            reference: Regex::new(r"REF:\s*(?P<reference>.*)$")?,
            owner_capture: Regex::new(r";\s*(?P<name>[^;]+?)\s*;$")?,
            end_of_day: Regex::new(r"RULAJ ZI|SOLD FINAL ZI")?,
        })
    }

    /// Letterhead, disclaimers, contact lines and "N / M" page markers.
    pub fn is_header_or_footer(&self, trimmed: &str) -> bool {
        self.page_number.is_match(trimmed) || self.boilerplate.is_match(trimmed)
    }

    /// All amounts on a line, left to right.
    pub fn amounts<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.amount_any.find_iter(line).map(|m| m.as_str()).collect()
    }
}
