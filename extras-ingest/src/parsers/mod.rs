pub mod banca_transilvania;

pub use banca_transilvania::{parse_banca_transilvania_text, StatementParser};
