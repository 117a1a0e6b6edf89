use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Generic business words that never decide a vendor match on their own.
pub const STOPWORDS: &[&str] = &[
    "ltd", "limited", "enterprises", "enterprise", "company", "kenya", "plc", "group", "east",
    "africa", "and", "the", "store", "stores", "trading", "distributor", "distributors", "foods",
    "food", "products", "general", "suppliers", "supplier", "ventures", "agencies", "agency",
    "industries", "wholesale", "bakers", "services", "two", "thousand", "k", "co", "lilmited",
    "ltd.", "limited.", "ltds",
];

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static pattern"))
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lowercase, collapse every run of non-alphanumerics to one space, trim.
pub fn normalize(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    separator_re().replace_all(&lower, " ").trim().to_string()
}

/// Significant tokens of `text`, distinct, in order of first appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    normalize(text)
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

/// Normalized text with stopwords removed. Word order and repeats are kept.
pub fn strip_stopwords(text: &str) -> String {
    normalize(text)
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Make a raw cell safe for a tab-separated line: no quotes, no line breaks, no tabs.
pub fn clean_text(raw: &str) -> String {
    raw.replace('"', "")
        .replace(['\r', '\n', '\t'], " ")
        .trim()
        .to_string()
}

/// Upper-case a letter when the previous character is not a letter, lower-case it otherwise.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_punctuation() {
        assert_eq!(normalize("  Cash--Pickup!! "), "cash pickup");
        assert_eq!(normalize("A.S.W Enterprises"), "a s w enterprises");
        assert_eq!(normalize("Soko (Market)"), "soko market");
        assert_eq!(normalize("***"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Mini Bakeries (NRB) ltd");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_tokenize_drops_stopwords_and_duplicates() {
        assert_eq!(tokenize("Brookside Dairy Ltd"), vec!["brookside", "dairy"]);
        assert_eq!(tokenize("Kenya Nut Company"), vec!["nut"]);
        assert_eq!(tokenize("milk milk MILK"), vec!["milk"]);
        assert!(tokenize("Limited Ltd Company").is_empty());
    }

    #[test]
    fn test_strip_stopwords_keeps_order_and_repeats() {
        assert_eq!(strip_stopwords("The Happy Lamb Butchery"), "happy lamb butchery");
        assert_eq!(strip_stopwords("Zabach Zabach Ltd"), "zabach zabach");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  \"Brookside\"\nmilk\t2L "), "Brookside milk 2L");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("xyz unknown shop 123"), "Xyz Unknown Shop 123");
        assert_eq!(title_case("BROOKSIDE milk 2l"), "Brookside Milk 2L");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }
}
