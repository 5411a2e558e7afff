//! Header and value normalization.
//!
//! Header keys fold punctuation and spacing into underscores so supplier
//! header variants land on one key. Underscores already in a header are word
//! characters and are kept as written. Value keys are stricter: only case,
//! Unicode compatibility forms and surrounding whitespace are folded.

use std::sync::LazyLock;

use ivs_model::{RawValue, format_numeric};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("Invalid regex pattern"));

/// Upper bound on value folding passes.
const MAX_FOLD_PASSES: usize = 4;

/// Normalize a header into its lookup key.
///
/// NFKC, lowercase, each run of non-word characters becomes a single `_`,
/// leading and trailing `_` are trimmed. Returns `None` if nothing remains.
pub fn normalize_header(text: &str) -> Option<String> {
    let folded = text.nfkc().collect::<String>().to_lowercase();
    let replaced = SEPARATORS.replace_all(&folded, "_");
    let key = replaced.trim_matches('_');
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Normalize a text value into its comparison key.
///
/// Returns `None` for blank input and for the literal `nan` in any case.
/// Internal spacing and punctuation are kept.
pub fn normalize_value(text: &str) -> Option<String> {
    // Lowercasing can leave a string that NFKC changes again (and the reverse),
    // so fold until stable.
    let mut key = fold_value(text);
    for _ in 1..MAX_FOLD_PASSES {
        let next = fold_value(&key);
        if next == key {
            break;
        }
        key = next;
    }
    if key.is_empty() || key == "nan" {
        None
    } else {
        Some(key)
    }
}

fn fold_value(text: &str) -> String {
    text.trim()
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Normalize a raw cell.
///
/// Numbers are rendered without trailing zeros first; `NaN` is empty.
pub fn normalize_raw(raw: &RawValue) -> Option<String> {
    match raw {
        RawValue::Empty => None,
        RawValue::Text(text) => normalize_value(text),
        RawValue::Number(n) if n.is_nan() => None,
        RawValue::Number(n) => normalize_value(&format_numeric(*n)),
    }
}

/// The single empty/missing predicate for cells.
#[inline]
pub fn is_empty(raw: &RawValue) -> bool {
    normalize_raw(raw).is_none()
}

/// Parse a cell as a number.
///
/// Thousands separators and any character other than digits, a leading sign
/// and the decimal point are stripped before parsing. Anything that still
/// fails to parse yields `None`.
pub fn to_number(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Empty => None,
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Number(_) => None,
        RawValue::Text(text) => parse_number(text),
    }
}

/// Parse supplier number text such as `"$1,250.00"` or `"0.50 ct"`.
pub fn parse_number(text: &str) -> Option<f64> {
    if normalize_value(text).is_none() {
        return None;
    }
    let mut cleaned = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '0'..='9' | '.' => cleaned.push(ch),
            '-' | '+' if cleaned.is_empty() => cleaned.push(ch),
            _ => {}
        }
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Stock #"), Some("stock".to_string()));
        assert_eq!(normalize_header("Stock Num"), Some("stock_num".to_string()));
        assert_eq!(normalize_header("  Price / Carat "), Some("price_carat".to_string()));
        assert_eq!(normalize_header("Image-URL-1"), Some("image_url_1".to_string()));
        assert_eq!(normalize_header("__cut__grade__"), Some("cut__grade".to_string()));
        assert_eq!(normalize_header("cut__grade"), Some("cut__grade".to_string()));
        assert_eq!(normalize_header("Cut - Grade"), Some("cut_grade".to_string()));
        assert_eq!(normalize_header("cut_ grade"), Some("cut__grade".to_string()));
        assert_eq!(normalize_header("ＣＯＬＯＲ"), Some("color".to_string()));
        assert_eq!(normalize_header(" -- "), None);
        assert_eq!(normalize_header(""), None);
    }

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value("  Round "), Some("round".to_string()));
        assert_eq!(normalize_value("Very Good"), Some("very good".to_string()));
        assert_eq!(normalize_value("VS-1"), Some("vs-1".to_string()));
        assert_eq!(normalize_value("ＶＳ１"), Some("vs1".to_string()));
        assert_eq!(normalize_value("NaN"), None);
        assert_eq!(normalize_value("nan "), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(normalize_value(""), None);
    }

    #[test]
    fn test_normalize_value_compatibility_letters() {
        // Blackletter capital H has no lowercase mapping but NFKC turns it into "H"
        assert_eq!(normalize_value("ℌ"), Some("h".to_string()));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&RawValue::Empty));
        assert!(is_empty(&RawValue::from(" ")));
        assert!(is_empty(&RawValue::from("NAN")));
        assert!(is_empty(&RawValue::Number(f64::NAN)));
        assert!(!is_empty(&RawValue::Number(0.0)));
        assert!(!is_empty(&RawValue::from("-")));
    }

    #[test]
    fn test_normalize_raw_number() {
        assert_eq!(normalize_raw(&RawValue::Number(1.0)), Some("1".to_string()));
        assert_eq!(normalize_raw(&RawValue::Number(0.5)), Some("0.5".to_string()));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&RawValue::from("1,250.50")), Some(1250.5));
        assert_eq!(to_number(&RawValue::from("$3,000")), Some(3000.0));
        assert_eq!(to_number(&RawValue::from("0.50 ct")), Some(0.5));
        assert_eq!(to_number(&RawValue::from("-2")), Some(-2.0));
        assert_eq!(to_number(&RawValue::from("0")), Some(0.0));
        assert_eq!(to_number(&RawValue::Number(1.5)), Some(1.5));
    }

    #[test]
    fn test_to_number_unparsable() {
        assert_eq!(to_number(&RawValue::Empty), None);
        assert_eq!(to_number(&RawValue::from("N/A")), None);
        assert_eq!(to_number(&RawValue::from("nan")), None);
        assert_eq!(to_number(&RawValue::from("-")), None);
        assert_eq!(to_number(&RawValue::from("1.2.3")), None);
        assert_eq!(to_number(&RawValue::Number(f64::INFINITY)), None);
    }

    fn supplier_text() -> impl Strategy<Value = String> {
        // ASCII, Latin-1, Latin Extended-A and fullwidth forms
        proptest::collection::vec(
            prop_oneof![
                proptest::char::range(' ', '~'),
                proptest::char::range('\u{a0}', '\u{17f}'),
                proptest::char::range('\u{ff01}', '\u{ff5e}'),
            ],
            0..24,
        )
        .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_normalize_value_idempotent(text in supplier_text()) {
            let once = normalize_value(&text);
            let twice = once.as_deref().and_then(normalize_value);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalize_header_is_word_characters(text in supplier_text()) {
            if let Some(key) = normalize_header(&text) {
                prop_assert!(!key.starts_with('_'));
                prop_assert!(!key.ends_with('_'));
                prop_assert!(key.chars().all(|c| c.is_alphanumeric() || c == '_' || !c.is_ascii()));
            }
        }

        #[test]
        fn prop_empty_never_parses(text in supplier_text()) {
            let raw = RawValue::from(text.as_str());
            if is_empty(&raw) {
                prop_assert_eq!(to_number(&raw), None);
            }
        }
    }
}
