//! extras-ingest: Banca Transilvania statement text (PDF rendered to text) into
//! account metadata and transactions.

pub mod amounts;
pub mod patterns;
pub mod parsers;
pub mod types;

pub use parsers::{parse_banca_transilvania_text, StatementParser};
pub use types::{
    AccountInfo, BlockedAmount, DailyTurnover, ParsedStatement, StatementSummary,
    TotalTurnover, Transaction, TransactionType, Turnover,
};
