use std::sync::OnceLock;

use regex::Regex;

use crate::BillIdError;

/// Literal replacements for UTF-8 punctuation that was decoded as Latin-1/cp1252.
///
/// Applied in order. Every entry is longer than any replacement that could
/// match inside it, so a three-char sequence is consumed before a later
/// two-char sequence could split it.
const MOJIBAKE: &[(&str, &str)] = &[
    ("\u{e2}\u{20ac}\u{201c}", "-"),
    ("\u{e2}\u{20ac}\u{201d}", "-"),
    ("\u{e2}\u{20ac}\u{2122}", "'"),
    ("\u{e2}\u{20ac}\u{2dc}", "'"),
    ("\u{e2}\u{20ac}\u{153}", "\""),
    ("\u{e2}\u{20ac}\u{9d}", "\""),
    ("\u{c3}\u{a9}", "\u{e9}"),
    ("\u{c3}\u{a1}", "\u{e1}"),
    ("\u{c3}\u{b1}", "\u{f1}"),
    ("\u{c3}\u{b3}", "\u{f3}"),
    ("\u{c3}\u{ad}", "\u{ed}"),
];

/// Cleans scraped titles and descriptions into canonical text.
///
/// Built once and shared by reference; holds its compiled quote patterns.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    single_quotes: Regex,
    double_quotes: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            single_quotes: Regex::new("[\u{2018}\u{2019}]").expect("static single quote pattern"),
            double_quotes: Regex::new("[\u{201c}\u{201d}]").expect("static double quote pattern"),
        }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for (from, to) in MOJIBAKE {
            if text.contains(from) {
                text = text.replace(from, to);
            }
        }
        let text = self.single_quotes.replace_all(&text, "'");
        let text = self.double_quotes.replace_all(&text, "\"");
        collapse_whitespace(&text)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comma-separated names in source order, trimmed.
///
/// Empty tokens are dropped, as is a token made of a single
/// non-alphanumeric character (the `-` sites print for "nobody").
pub fn split_name_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && !is_placeholder(token))
        .collect()
}

pub(crate) fn is_placeholder(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphanumeric())
}

/// `"AB-1234"` -> `"AB 1234"`.
pub fn clean_id(raw: &str) -> String {
    collapse_whitespace(&raw.replace('-', " "))
}

/// Splits the alphabetic prefix from the number and drops leading zeros:
/// `"SB0012"` -> `"SB 12"`, `"HB1233"` -> `"HB 1233"`.
///
/// Anything after the number is ignored, so `"HB3653 House Amendment 1"`
/// gives `"HB 3653"`.
pub fn format_bill_id(raw: &str) -> Result<String, BillIdError> {
    static BILL_ID: OnceLock<Regex> = OnceLock::new();
    let pattern = BILL_ID.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+)[\s.]*0*(\d+)").expect("static bill id pattern")
    });
    let caps = pattern
        .captures(raw.trim())
        .ok_or_else(|| BillIdError(raw.to_string()))?;
    Ok(format!("{} {}", caps[1].to_ascii_uppercase(), &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::{is_placeholder, MOJIBAKE};

    #[test]
    fn placeholder_is_one_symbol() {
        assert!(is_placeholder("-"));
        assert!(is_placeholder("*"));
        assert!(!is_placeholder("X"));
        assert!(!is_placeholder("--"));
        assert!(!is_placeholder(""));
    }

    #[test]
    fn longer_sequences_precede_their_substrings() {
        for (i, (earlier, _)) in MOJIBAKE.iter().enumerate() {
            for (later, _) in &MOJIBAKE[i + 1..] {
                assert!(
                    !later.contains(earlier),
                    "{earlier:?} would shadow {later:?}"
                );
            }
        }
    }
}
