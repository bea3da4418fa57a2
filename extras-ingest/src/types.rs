use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow, decided by the column the amount was printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// One booked statement line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// YYYY-MM-DD, reordered from the statement's DD/MM/YYYY
    pub date: String,
    pub description: String,
    /// Always a magnitude; the sign lives in `kind`
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub reference: Option<String>,
    pub account_owner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalTurnover {
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTurnover {
    /// DD/MM/YYYY as printed next to the RULAJ ZI marker
    pub date: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turnover {
    pub total: TotalTurnover,
    pub daily: Vec<DailyTurnover>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedAmount {
    pub amount: Decimal,
    pub description: String,
}

/// Account-level metadata. Every field stays empty unless its pattern matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_owner: Option<String>,
    pub client_number: Option<String>,
    pub iban: Option<String>,
    pub currency: Option<String>,
    pub final_balance: Option<Decimal>,
    pub turnover: Turnover,
    pub blocked_amounts: Vec<BlockedAmount>,
}

/// Normalized output of the statement parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedStatement {
    pub account_info: AccountInfo,
    pub transactions: Vec<Transaction>,
}

/// Aggregate view over the parsed transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementSummary {
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl ParsedStatement {
    pub fn summary(&self) -> StatementSummary {
        self.transactions
            .iter()
            .fold(StatementSummary::default(), |mut acc, t| {
                acc.transaction_count += 1;
                match t.kind {
                    TransactionType::Income => {
                        acc.income_count += 1;
                        acc.total_income += t.amount;
                    }
                    TransactionType::Expense => {
                        acc.expense_count += 1;
                        acc.total_expense += t.amount;
                    }
                }
                acc
            })
    }
}
