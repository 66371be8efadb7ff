//! Lookup-key normalization for country names.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalizes free text into an alias-table key.
///
/// - Decomposes accents and drops the combining marks ("Côte" -> "cote")
/// - Lowercases
/// - Removes apostrophes and reads `&` as "and"
/// - Replaces any other punctuation with a space
/// - Collapses and trims whitespace
pub fn normalize_key(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for ch in raw.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            '\'' | '\u{2018}' | '\u{2019}' | '`' => {}
            '&' => folded.push_str(" and "),
            c if c.is_alphanumeric() => folded.extend(c.to_lowercase()),
            _ => folded.push(' '),
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
