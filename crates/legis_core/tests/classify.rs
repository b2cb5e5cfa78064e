use std::collections::BTreeSet;

use legis_core::{ActionClassifier, ActionRule, Chamber, CommitteeTable, RuleSet};
use pretty_assertions::assert_eq;

fn tags(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|t| t.to_string()).collect()
}

#[test]
fn empty_text_has_no_classification() {
    let classifier = ActionClassifier::california();
    assert!(classifier.classify("").is_empty());
    assert!(classifier.classify("   ").is_empty());
}

#[test]
fn unmatched_text_has_no_classification() {
    let classifier = ActionClassifier::california();
    assert!(classifier.classify("Joint Rule 61(a)(10) suspended.").is_empty());
}

#[test]
fn classification_is_repeatable() {
    let classifier = ActionClassifier::california();
    let text = "Read third time. Passed. Ordered to the Assembly.";
    let first = classifier.classify(text);
    classifier.classify("Approved by the Governor.");
    let second = classifier.classify(text);
    assert_eq!(first, second);
    assert_eq!(first, tags(&["passage", "reading-3"]));
}

#[test]
fn specific_pattern_is_not_shadowed_by_shorter_one() {
    // Declared short-first on purpose: ordering comes from the rule set.
    let set = RuleSet::new(vec![
        ActionRule::substring("read third time", &["reading-3"]),
        ActionRule::substring("read third time. passed", &["reading-3", "passage"]),
    ]);
    let classifier = ActionClassifier::new(vec![set]);
    assert_eq!(
        classifier.classify("Read third time. Passed."),
        tags(&["passage", "reading-3"])
    );
    assert_eq!(classifier.classify("Read third time."), tags(&["reading-3"]));
}

#[test]
fn priority_beats_pattern_length() {
    let set = RuleSet::new(vec![
        ActionRule::substring("died at desk pursuant to rule", &["failure"]).with_priority(5),
        ActionRule::substring("died", &["withdrawal"]),
    ]);
    let classifier = ActionClassifier::new(vec![set]);
    assert_eq!(
        classifier.classify("Died at desk pursuant to rule 56."),
        tags(&["withdrawal"])
    );
}

#[test]
fn matches_from_several_sets_are_unioned() {
    let classifier = ActionClassifier::california();
    assert_eq!(
        classifier.classify("Introduced. Read first time. To Com. on RLS. for assignment."),
        tags(&["introduction", "reading-1"])
    );
    assert_eq!(
        classifier.classify("From committee: Do pass and re-refer to Com. on APPR. (Ayes 5. Noes 2.)"),
        tags(&["committee-passage", "committee-passage-favorable"])
    );
    assert_eq!(
        classifier.classify("Read second time and amended. Ordered to third reading."),
        tags(&["amendment-passage", "reading-2"])
    );
}

#[test]
fn regex_rules_ignore_case() {
    let classifier = ActionClassifier::california();
    assert_eq!(
        classifier.classify("VETOED BY GOVERNOR."),
        tags(&["executive-veto"])
    );
    assert_eq!(
        classifier.classify("Vetoed by the Governor."),
        tags(&["executive-veto"])
    );
}

#[test]
fn committee_failure_is_not_a_floor_failure() {
    let classifier = ActionClassifier::california();
    assert_eq!(
        classifier.classify("Failed passage in committee."),
        tags(&["committee-failure"])
    );
}

#[test]
fn analysis_reports_referenced_committees() {
    let classifier = ActionClassifier::california();
    let committees = CommitteeTable::california();
    let analysis = classifier.analyze(
        Chamber::Upper,
        "Referred to Coms. on JUD. and PUB. S.",
        &committees,
    );
    assert_eq!(analysis.classification, tags(&["referral-committee"]));
    assert_eq!(
        analysis.committees,
        vec![
            "Standing Committee on Judiciary".to_string(),
            "Standing Committee on Public Safety".to_string(),
        ]
    );
}

#[test]
fn invalid_regex_is_reported() {
    assert!(ActionRule::regex("(unclosed", &["x"]).is_err());
}
