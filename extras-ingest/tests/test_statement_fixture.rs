use extras_ingest::{parse_banca_transilvania_text, StatementParser, TransactionType};
use rust_decimal::Decimal;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let p = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&p).unwrap()
}

/// Full two-page statement: metadata, four booked transactions, one dropped deposit line.
#[test]
fn test_may_2024_statement() {
    let st = parse_banca_transilvania_text(&fixture("statement_may_2024.txt")).unwrap();

    let info = &st.account_info;
    assert_eq!(info.account_owner.as_deref(), Some("ION POPESCU"));
    assert_eq!(info.client_number.as_deref(), Some("998877"));
    assert_eq!(info.iban.as_deref(), Some("RO49AAAA1B31007593840000"));
    assert_eq!(info.currency.as_deref(), Some("RON"));
    assert_eq!(info.final_balance, Some(Decimal::new(333330, 2)));
    assert_eq!(info.turnover.total.debit, Some(Decimal::new(16670, 2)));
    assert_eq!(info.turnover.total.credit, Some(Decimal::new(250000, 2)));

    assert_eq!(info.turnover.daily.len(), 2);
    assert_eq!(info.turnover.daily[0].date, "02/05/2024");
    assert_eq!(info.turnover.daily[1].debit, Some(Decimal::new(12150, 2)));
    assert_eq!(info.turnover.daily[1].credit, Some(Decimal::ZERO));

    assert_eq!(info.blocked_amounts.len(), 2);
    assert_eq!(info.blocked_amounts[0].description, "POS LIDL CLUJ");
    assert_eq!(info.blocked_amounts[1].amount, Decimal::new(12, 0));

    let txns = &st.transactions;
    assert_eq!(txns.len(), 4, "got {txns:#?}");

    assert_eq!(txns[0].date, "2024-05-02");
    assert!(txns[0].description.starts_with("Plata la POS non-BT"));
    assert!(txns[0].description.contains("MEGA IMAGE"));
    assert_eq!(txns[0].amount, Decimal::new(4520, 2));
    assert_eq!(txns[0].kind, TransactionType::Expense);

    assert_eq!(txns[1].kind, TransactionType::Income);
    assert_eq!(txns[1].amount, Decimal::new(2500, 0));
    assert_eq!(txns[1].reference.as_deref(), Some("2405020001"));
    assert_eq!(txns[1].account_owner.as_deref(), Some("ACME SOFTWARE SRL"));

    assert_eq!(txns[2].date, "2024-05-03");
    assert_eq!(txns[2].description, "Transfer BT Pay catre MARIA IONESCU");
    assert_eq!(txns[2].reference.as_deref(), Some("BTPAY77"));

    assert_eq!(txns[3].description, "Comision plata OP");
    assert_eq!(txns[3].amount, Decimal::new(150, 2));

    // "Constituire depozit" never got an amount
    assert!(txns.iter().all(|t| !t.description.contains("depozit")));

    let summary = st.summary();
    assert_eq!(summary.income_count, 1);
    assert_eq!(summary.expense_count, 3);
    assert_eq!(summary.total_expense, Decimal::new(16670, 2));
}

/// Parser instances are reusable and independent across inputs.
#[test]
fn test_parser_reuse_across_threads() {
    let parser = StatementParser::new().unwrap();
    let text = fixture("statement_may_2024.txt");

    std::thread::scope(|s| {
        let a = s.spawn(|| parser.parse(&text));
        let b = s.spawn(|| parser.parse("SOLD ANTERIOR\n01/01/2024\nPlata\n1.00"));
        assert_eq!(a.join().unwrap().transactions.len(), 4);
        assert_eq!(b.join().unwrap().transactions.len(), 1);
    });
}

#[test]
fn test_json_shape() {
    let st = parse_banca_transilvania_text(&fixture("statement_may_2024.txt")).unwrap();
    let v = serde_json::to_value(&st).unwrap();

    assert_eq!(v["accountInfo"]["iban"], "RO49AAAA1B31007593840000");
    assert_eq!(v["accountInfo"]["turnover"]["daily"][0]["date"], "02/05/2024");
    assert_eq!(v["transactions"][1]["type"], "income");
    assert_eq!(v["transactions"][1]["accountOwner"], "ACME SOFTWARE SRL");
    assert!(v["transactions"][0]["reference"].is_null());
}
