//! Banca Transilvania account statement parser (text)
//!
//! Input is the `pdftotext -layout` rendering of the PDF statement. The layout has no
//! delimiters, so structure comes from line patterns, adjacency and indentation:
//!
//!   SOLD ANTERIOR                                        1,000.00
//!   12/05/2024
//!   Plata la POS MEGA IMAGE REF:AB12
//!   45.20                                <- debit column (expense)
//!   Incasare OP ACME SRL
//!         2,500.00                       <- credit column (income, indent >= 6)
//!   12/05/2024RULAJ ZI
//!   45.20 2,500.00
//!
//! Account metadata is read opportunistically on every line. Labels and values sit on
//! adjacent lines ("SOLD FINAL CONT" then the amount), so those extractors look exactly one
//! line ahead. Transactions go through a small state machine; see [`Phase`].

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::debug;

use crate::amounts::{
    collapse_whitespace, leading_whitespace, parse_amount, reorder_date, INCOME_INDENT,
};
use crate::patterns::Patterns;
use crate::types::{
    AccountInfo, BlockedAmount, DailyTurnover, ParsedStatement, Transaction, TransactionType,
};

/// A source line with its trimmed view. Indentation is only meaningful on `raw`.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    raw: &'a str,
    trimmed: &'a str,
}

impl<'a> Line<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            trimmed: raw.trim(),
        }
    }
}

/// A transaction whose lines are still being collected.
#[derive(Debug, Clone, Default, PartialEq)]
struct OpenTransaction {
    /// DD/MM/YYYY, the date line in effect when the description started
    date: String,
    description: String,
    amount: Option<Decimal>,
    kind: Option<TransactionType>,
    reference: Option<String>,
    account_owner: Option<String>,
}

impl OpenTransaction {
    /// Amount-less transactions are dropped here.
    fn commit(self) -> Option<Transaction> {
        let (Some(amount), Some(kind)) = (self.amount, self.kind) else {
            debug!(
                date = %self.date,
                description = %collapse_whitespace(&self.description),
                "dropping transaction without amount"
            );
            return None;
        };

        Some(Transaction {
            date: reorder_date(&self.date),
            description: collapse_whitespace(&self.description),
            amount,
            kind,
            reference: self.reference,
            account_owner: self.account_owner,
        })
    }
}

/// Where the scan is relative to the transaction table.
///
/// - `BeforeTransactions` until a `CONT` / `SOLD ANTERIOR` marker; dates and amounts seen
///   here belong to the statement header.
/// - `BetweenTransactions` after a transaction was finalized or before the first one.
/// - `Accumulating` while lines are appended to an open transaction.
#[derive(Debug, Clone, Default, PartialEq)]
enum Phase {
    #[default]
    BeforeTransactions,
    BetweenTransactions,
    Accumulating(OpenTransaction),
}

/// Everything the scan carries from one line to the next.
#[derive(Debug, Clone, Default, PartialEq)]
struct ParserState {
    phase: Phase,
    current_date: Option<String>,
    /// Between "SUME BLOCATE" and "TOTAL DISPONIBIL"; independent of `phase`.
    in_blocked_amounts: bool,
}

/// Close the open transaction, if any. The state moves to `BetweenTransactions`.
fn finalize(mut state: ParserState) -> (ParserState, Option<Transaction>) {
    match state.phase {
        Phase::Accumulating(open) => {
            state.phase = Phase::BetweenTransactions;
            (state, open.commit())
        }
        other => {
            state.phase = other;
            (state, None)
        }
    }
}

/// Parser for Banca Transilvania statements. Holds only compiled patterns, so one
/// instance can serve any number of (concurrent) parses.
#[derive(Debug, Clone)]
pub struct StatementParser {
    patterns: Patterns,
}

impl StatementParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: Patterns::new()?,
        })
    }

    /// Parse extracted statement text. Never fails: anything that does not match
    /// simply leaves the corresponding field empty.
    pub fn parse(&self, text: &str) -> ParsedStatement {
        let lines: Vec<Line<'_>> = text.lines().map(Line::new).collect();

        let mut info = AccountInfo::default();
        let mut transactions = Vec::new();
        let mut state = ParserState::default();

        for (i, line) in lines.iter().enumerate() {
            if self.is_skipped(line) {
                continue;
            }

            let next = lines
                .get(i + 1)
                .filter(|l| !self.is_skipped(l))
                .map(|l| l.trimmed);

            self.extract_metadata(&mut info, line.trimmed, next);
            state.in_blocked_amounts =
                self.track_blocked_amounts(&mut info, state.in_blocked_amounts, line.trimmed);

            let (s, done) = self.step(state, line);
            state = s;
            transactions.extend(done);
        }

        let (_, done) = finalize(state);
        transactions.extend(done);

        ParsedStatement {
            account_info: info,
            transactions,
        }
    }

    fn is_skipped(&self, line: &Line<'_>) -> bool {
        line.trimmed.is_empty() || self.patterns.is_header_or_footer(line.trimmed)
    }

    /// Label/value extractors. Scalars keep the first value found.
    fn extract_metadata(&self, info: &mut AccountInfo, line: &str, next: Option<&str>) {
        let p = &self.patterns;

        if info.account_owner.is_none() {
            if let Some(caps) = p.owner_client.captures(line) {
                info.account_owner = Some(caps["name"].trim().to_string());
                info.client_number = Some(caps["client"].to_string());
            }
        }

        if info.iban.is_none() {
            if let Some(caps) = p.iban.captures(line) {
                info.iban = Some(caps["iban"].to_string());
            }
        }

        if info.currency.is_none() && p.currency_label.is_match(line) {
            if let Some(caps) = next.and_then(|n| p.currency_value.captures(n)) {
                info.currency = Some(caps["currency"].to_string());
            }
        }

        if info.final_balance.is_none() && p.final_balance_label.is_match(line) {
            info.final_balance = next
                .and_then(|n| p.amounts(n).first().copied())
                .and_then(parse_amount);
        }

        if info.turnover.total.debit.is_none()
            && info.turnover.total.credit.is_none()
            && p.total_turnover_label.is_match(line)
        {
            if let Some((debit, credit)) = next.and_then(|n| self.debit_credit(n)) {
                info.turnover.total.debit = debit;
                info.turnover.total.credit = credit;
            }
        }

        if let Some(caps) = p.daily_turnover.captures(line) {
            let (debit, credit) = next
                .and_then(|n| self.debit_credit(n))
                .unwrap_or((None, None));
            info.turnover.daily.push(DailyTurnover {
                date: caps["date"].to_string(),
                debit,
                credit,
            });
        }
    }

    /// First two amounts on a line, read as (debit, credit).
    fn debit_credit(&self, line: &str) -> Option<(Option<Decimal>, Option<Decimal>)> {
        match self.patterns.amounts(line).as_slice() {
            [debit, credit, ..] => Some((parse_amount(debit), parse_amount(credit))),
            _ => None,
        }
    }

    /// Returns the new value of the blocked-amounts flag.
    fn track_blocked_amounts(&self, info: &mut AccountInfo, active: bool, line: &str) -> bool {
        let p = &self.patterns;

        if p.blocked_start.is_match(line) {
            debug!("entering blocked amounts section");
            return true;
        }
        if p.blocked_end.is_match(line) {
            if active {
                debug!("leaving blocked amounts section");
            }
            return false;
        }

        if active {
            if let Some(caps) = p.blocked_entry.captures(line) {
                if let Some(amount) = parse_amount(&caps["amount"]) {
                    info.blocked_amounts.push(BlockedAmount {
                        amount,
                        description: collapse_whitespace(&caps["description"]),
                    });
                }
            }
        }

        active
    }

    /// One transition of the transaction state machine.
    fn step(&self, mut state: ParserState, line: &Line<'_>) -> (ParserState, Option<Transaction>) {
        let p = &self.patterns;
        let t = line.trimmed;

        if matches!(state.phase, Phase::BeforeTransactions) {
            if !p.section_start.is_match(t) {
                return (state, None);
            }
            debug!(line = t, "transaction section starts");
            state.phase = Phase::BetweenTransactions;
        }

        if p.date_line.is_match(t) {
            state.current_date = Some(t.to_string());
            return (state, None);
        }

        if p.description_start.is_match(t) {
            if let Some(date) = state.current_date.clone() {
                let (mut state, done) = finalize(state);
                state.phase = Phase::Accumulating(self.open(date, t));
                return (state, done);
            }
        }

        if let Phase::Accumulating(ref mut open) = state.phase {
            if self.extend(open, line) {
                return finalize(state);
            }
        }
        (state, None)
    }

    fn open(&self, date: String, line: &str) -> OpenTransaction {
        let (description, reference) = match self.patterns.reference.captures(line) {
            Some(caps) => {
                let start = caps.get(0).map_or(line.len(), |m| m.start());
                (line[..start].to_string(), non_empty(&caps["reference"]))
            }
            None => (line.to_string(), None),
        };

        OpenTransaction {
            date,
            description,
            reference,
            ..OpenTransaction::default()
        }
    }

    /// Feed a non-start line to the open transaction. Returns true on an end-of-day
    /// marker, i.e. when the transaction must be finalized.
    fn extend(&self, open: &mut OpenTransaction, line: &Line<'_>) -> bool {
        let p = &self.patterns;
        let t = line.trimmed;

        if let Some(caps) = p.amount_line.captures(t) {
            if open.amount.is_none() {
                open.amount = parse_amount(&caps["amount"]);
                open.kind = Some(classify(line.raw));
            } else {
                debug!(line = t, "ignoring extra amount line");
            }
            return false;
        }

        if let Some(caps) = p.reference.captures(t) {
            open.reference = non_empty(&caps["reference"]);
            return false;
        }

        // the owner line still belongs to the description
        if let Some(caps) = p.owner_capture.captures(t) {
            open.account_owner = Some(caps["name"].to_string());
        }

        if p.end_of_day.is_match(t) {
            return true;
        }

        open.description.push(' ');
        open.description.push_str(t);
        false
    }
}

/// Credit amounts are printed further right than debit amounts.
fn classify(raw: &str) -> TransactionType {
    if leading_whitespace(raw) >= INCOME_INDENT {
        TransactionType::Income
    } else {
        TransactionType::Expense
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parse extracted statement text into account info and transactions.
pub fn parse_banca_transilvania_text(text: &str) -> Result<ParsedStatement> {
    Ok(StatementParser::new()?.parse(text))
}
