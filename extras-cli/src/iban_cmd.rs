use anyhow::Result;
use clap::{Parser, Subcommand};
use extras_iban::{
    build_iban, calculate_check_digits, clean_iban, format_iban, known_bank_name,
    validate_iban, validate_structure,
};
use std::io::Write;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "iban", version, about = "Validate, format and calculate Romanian IBANs")]
pub struct IbanCli {
    #[command(subcommand)]
    pub command: IbanCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum IbanCommand {
    /// Check structure, checksum and bank code
    Validate {
        /// IBAN; may be given in several space-separated groups
        #[arg(required = true, num_args = 1..)]
        iban: Vec<String>,
    },

    /// Print the IBAN in groups of four
    Format {
        #[arg(required = true, num_args = 1..)]
        iban: Vec<String>,
    },

    /// Compute check digits for a country, bank code and account identifier
    Calculate {
        /// Country code, e.g. RO
        country: String,
        /// 4-letter bank code, e.g. BTRL
        bank: String,
        /// 16-character account identifier
        account: String,
    },
}

/// Run one subcommand, writing status lines to `out`. Returns false when the input
/// was rejected (the process should exit non-zero).
pub fn run(cmd: &IbanCommand, out: &mut impl Write) -> Result<bool> {
    match cmd {
        IbanCommand::Validate { iban } => {
            let input = iban.join("");
            debug!(input = %input, "validating IBAN");
            let v = validate_iban(&input);

            if let Some(e) = &v.error {
                writeln!(out, "INVALID  {}", format_iban(&input))?;
                writeln!(out, "Error:   {e}")?;
                return Ok(false);
            }

            writeln!(out, "VALID    {}", v.formatted.as_deref().unwrap_or_default())?;
            if let Some(code) = &v.bank_code {
                match known_bank_name(code) {
                    Some(name) => writeln!(out, "Bank:    {code} ({name})")?,
                    None => writeln!(out, "Bank:    {code}")?,
                }
            }
            if let Some(w) = &v.warning {
                writeln!(out, "Warning: {w}")?;
            }
            Ok(true)
        }

        IbanCommand::Format { iban } => {
            let input = iban.join("");
            writeln!(out, "{}", format_iban(&input))?;
            if let Some(e) = validate_structure(&clean_iban(&input)).error {
                writeln!(out, "Note:    {e}")?;
            }
            Ok(true)
        }

        IbanCommand::Calculate {
            country,
            bank,
            account,
        } => {
            let digits = calculate_check_digits(country, bank, account);
            let iban = build_iban(country, bank, account);
            writeln!(out, "Check digits: {digits}")?;
            writeln!(out, "IBAN:         {}", format_iban(&iban))?;

            let v = validate_iban(&iban);
            if let Some(e) = &v.error {
                writeln!(out, "Note:         {e}")?;
            } else if let Some(w) = &v.warning {
                writeln!(out, "Warning:      {w}")?;
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(cmd: IbanCommand) -> (bool, String) {
        let mut buf = Vec::new();
        let ok = run(&cmd, &mut buf).unwrap();
        (ok, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_validate_known_bank() {
        let (ok, out) = run_to_string(IbanCommand::Validate {
            iban: vec!["RO65BTRLRONCRT0123456789".to_string()],
        });
        assert!(ok);
        assert!(out.contains("VALID    RO65 BTRL RONC RT01 2345 6789"));
        assert!(out.contains("Banca Transilvania"));
        assert!(!out.contains("Warning"));
    }

    #[test]
    fn test_validate_joins_groups() {
        let groups = ["RO49", "AAAA", "1B31", "0075", "9384", "0000"];
        let (ok, out) = run_to_string(IbanCommand::Validate {
            iban: groups.iter().map(|s| s.to_string()).collect(),
        });
        assert!(ok);
        assert!(out.contains("Warning: bank code AAAA"));
    }

    #[test]
    fn test_validate_invalid() {
        let (ok, out) = run_to_string(IbanCommand::Validate {
            iban: vec!["RO48AAAA1B31007593840000".to_string()],
        });
        assert!(!ok);
        assert!(out.contains("INVALID"));
        assert!(out.contains("checksum"));
    }

    #[test]
    fn test_format_notes_structure_problems() {
        let (ok, out) = run_to_string(IbanCommand::Format {
            iban: vec!["ro49aaaa1b31".to_string()],
        });
        assert!(ok);
        assert!(out.starts_with("RO49 AAAA 1B31\n"));
        assert!(out.contains("24 characters"));
    }

    #[test]
    fn test_calculate() {
        let (ok, out) = run_to_string(IbanCommand::Calculate {
            country: "RO".to_string(),
            bank: "BTRL".to_string(),
            account: "RONCRT0123456789".to_string(),
        });
        assert!(ok);
        assert!(out.contains("Check digits: 65"));
        assert!(out.contains("RO65 BTRL RONC RT01 2345 6789"));
    }
}
