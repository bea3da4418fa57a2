use anyhow::{bail, Context, Result};
use clap::Parser;
use extras_iban::validate_iban;
use extras_ingest::{ParsedStatement, StatementParser};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::extract::TextExtractor;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "extras",
    version,
    about = "Extract account info and transactions from a Banca Transilvania PDF statement"
)]
pub struct StatementArgs {
    /// Statement PDF
    #[arg(value_name = "input-file.pdf")]
    pub input: PathBuf,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long, value_name = "file")]
    pub output: Option<PathBuf>,

    /// Also save the extracted text as <input>.txt next to the PDF
    #[arg(short, long, default_value_t = false)]
    pub text: bool,
}

/// PDF -> text -> parsed statement -> pretty JSON.
pub async fn run(extractor: &impl TextExtractor, args: &StatementArgs) -> Result<()> {
    if !args.input.exists() {
        bail!("Input file not found: {}", args.input.display());
    }

    let extracted = extractor
        .extract(&args.input)
        .await
        .with_context(|| format!("extracting text from {}", args.input.display()))?;
    info!(
        input = %args.input.display(),
        pages = extracted.page_count,
        "extracted statement text"
    );
    for (k, v) in &extracted.metadata {
        debug!(key = %k, value = %v, "pdf metadata");
    }

    if args.text {
        let txt = args.input.with_extension("txt");
        fs::write(&txt, &extracted.text).with_context(|| format!("write {}", txt.display()))?;
        info!(path = %txt.display(), "wrote extracted text");
    }

    let statement = StatementParser::new()?.parse(&extracted.text);

    let summary = statement.summary();
    info!(
        transactions = summary.transaction_count,
        income = summary.income_count,
        expense = summary.expense_count,
        total_income = %summary.total_income,
        total_expense = %summary.total_expense,
        "parsed statement"
    );
    check_iban(&statement);

    let json = serde_json::to_string_pretty(&statement).context("serialize statement")?;
    match &args.output {
        Some(p) => {
            fs::write(p, format!("{json}\n")).with_context(|| format!("write {}", p.display()))?;
            info!(path = %p.display(), "wrote statement JSON");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Advisory only: a bad or missing IBAN never fails the run.
fn check_iban(statement: &ParsedStatement) {
    let Some(iban) = statement.account_info.iban.as_deref() else {
        warn!("no IBAN found in statement");
        return;
    };

    let v = validate_iban(iban);
    match (&v.error, &v.warning) {
        (Some(e), _) => warn!(iban, error = %e, "statement IBAN does not validate"),
        (None, Some(w)) => debug!(iban, warning = %w, "statement IBAN"),
        (None, None) => debug!(iban, "statement IBAN validates"),
    }
}
