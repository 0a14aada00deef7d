/// Strip the `;` comment suffix, trim, uppercase, and collapse whitespace
/// runs to single spaces. Idempotent; both stages run it on every raw line.
pub fn normalize(raw: &str) -> String {
    let code = match raw.split_once(';') {
        Some((code, _comment)) => code,
        None => raw,
    };
    let upper = code.to_uppercase();
    upper.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a normalized line into raw lexical units. Comma and colon are pure
/// delimiters and are never retained.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split([' ', '\t', ',', ':'])
        .filter(|s| !s.is_empty())
        .collect()
}
