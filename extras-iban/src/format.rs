//! Normalization and display grouping.

/// Uppercase, drop whitespace and hyphens.
pub fn clean_iban(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Clean, then group in blocks of four: "RO49 AAAA 1B31 ..."
pub fn format_iban(s: &str) -> String {
    let cleaned = clean_iban(s);
    let mut out = String::with_capacity(cleaned.len() + cleaned.len() / 4);
    for (i, c) in cleaned.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
