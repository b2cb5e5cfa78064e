use legis_core::{clean_id, collapse_whitespace, format_bill_id, BillIdError, TextNormalizer};
use pretty_assertions::assert_eq;

#[test]
fn mojibake_punctuation_is_repaired() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.normalize("Education \u{e2}\u{20ac}\u{201c} funding"),
        "Education - funding"
    );
    assert_eq!(
        normalizer.normalize("C\u{c3}\u{a9}sar Ch\u{c3}\u{a1}vez Day"),
        "C\u{e9}sar Ch\u{e1}vez Day"
    );
    assert_eq!(
        normalizer.normalize("Governor\u{e2}\u{20ac}\u{2122}s office"),
        "Governor's office"
    );
}

#[test]
fn curly_quotes_become_straight() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.normalize("\u{201c}Fair\u{201d} \u{2018}pay\u{2019}"),
        "\"Fair\" 'pay'"
    );
}

#[test]
fn whitespace_is_collapsed() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.normalize("  An act\n\tto amend  "), "An act to amend");
}

#[test]
fn clean_text_passes_through() {
    let normalizer = TextNormalizer::new();
    let text = "An act to add Section 1 to the Penal Code.";
    assert_eq!(normalizer.normalize(text), text);
}

#[test]
fn normalization_is_idempotent() {
    let normalizer = TextNormalizer::new();
    let inputs = [
        "C\u{c3}\u{a9}sar \u{e2}\u{20ac}\u{153}Ch\u{e1}vez\u{e2}\u{20ac}\u{9d}",
        "\u{2018}quoted\u{2019}  text \u{e2}\u{20ac}\u{201d} more",
        "plain",
        "",
    ];
    for input in inputs {
        let once = normalizer.normalize(input);
        assert_eq!(normalizer.normalize(&once), once, "input {input:?}");
    }
}

#[test]
fn ids_lose_hyphens() {
    assert_eq!(clean_id("AB-1234"), "AB 1234");
    assert_eq!(clean_id("SCA 1"), "SCA 1");
}

#[test]
fn bill_ids_are_spaced_and_unpadded() {
    assert_eq!(format_bill_id("SB0012").unwrap(), "SB 12");
    assert_eq!(format_bill_id("HB1233").unwrap(), "HB 1233");
    assert_eq!(format_bill_id(" hjr 0007 ").unwrap(), "HJR 7");
    assert_eq!(format_bill_id("SR0000").unwrap(), "SR 0");
}

#[test]
fn bill_id_ignores_trailing_text() {
    assert_eq!(format_bill_id("HB3653 House Amendment 1").unwrap(), "HB 3653");
    assert_eq!(format_bill_id("SB 0012 (Harmon)").unwrap(), "SB 12");
}

#[test]
fn bill_id_needs_prefix_and_number() {
    assert_eq!(
        format_bill_id("HB twelve").unwrap_err(),
        BillIdError("HB twelve".to_string())
    );
    assert!(format_bill_id("1234").is_err());
}

#[test]
fn collapse_handles_non_breaking_space() {
    assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a b");
}
