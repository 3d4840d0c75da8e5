//! Tests for the redaction engine.

use super::*;
use crate::pii::pii_types::{MatchKind, PIIType, Region};

fn m(pii_type: PIIType, text: &str, needle: &str) -> PIIMatch {
    let start = text.find(needle).expect("needle present");
    PIIMatch {
        kind: MatchKind::Builtin(pii_type),
        text: needle.to_string(),
        start,
        end: start + needle.len(),
        confidence: 0.9,
        region: Some(pii_type.region()),
    }
}

#[test]
fn test_redacts_each_span_with_type_token() {
    let text = "SSN 123-45-6789 mail a@b.com end";
    let matches = vec![m(PIIType::SSN, text, "123-45-6789"), m(PIIType::Email, text, "a@b.com")];
    let (out, applied) = redact(text, &matches);
    assert_eq!(out, "SSN [SSN_REDACTED] mail [EMAIL_REDACTED] end");
    assert_eq!(applied.len(), 2);
}

#[test]
fn test_unsorted_input_is_applied_in_position_order() {
    let text = "a@b.com then 123-45-6789";
    let matches = vec![m(PIIType::SSN, text, "123-45-6789"), m(PIIType::Email, text, "a@b.com")];
    let (out, applied) = redact(text, &matches);
    assert_eq!(out, "[EMAIL_REDACTED] then [SSN_REDACTED]");
    assert_eq!(applied[0].kind, PIIType::Email);
}

#[test]
fn test_overlap_keeps_longest_at_same_start() {
    let text = "call 555-123-4567 now";
    let short = m(PIIType::SortCodeUK, text, "555-12");
    let long = m(PIIType::PhoneUS, text, "555-123-4567");
    let (out, applied) = redact(text, &[short, long]);
    assert_eq!(out, "call [PHONE_US_REDACTED] now");
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].kind, PIIType::PhoneUS);
}

#[test]
fn test_overlap_keeps_earliest_start() {
    let text = "x 0412 345 678 y";
    let first = m(PIIType::PhoneAU, text, "0412 345 678");
    let later = m(PIIType::TFN, text, "412 345 678");
    let (out, applied) = redact(text, &[later, first]);
    assert_eq!(out, "x [PHONE_AU_REDACTED] y");
    assert_eq!(applied.len(), 1);
}

#[test]
fn test_identical_spans_keep_input_order() {
    let text = "555-123-4567";
    let us = m(PIIType::PhoneUS, text, text);
    let generic = m(PIIType::Phone, text, text);
    let (out, applied) = redact(text, &[us, generic]);
    assert_eq!(out, "[PHONE_US_REDACTED]");
    assert_eq!(applied.len(), 1);
}

#[test]
fn test_no_matches_is_identity() {
    let text = "nothing here";
    let (out, applied) = redact(text, &[]);
    assert_eq!(out, text);
    assert!(applied.is_empty());
}

#[test]
fn test_preserves_multibyte_context() {
    let text = "Émail → a@b.com ✓";
    let (out, _) = redact(text, &[m(PIIType::Email, text, "a@b.com")]);
    assert_eq!(out, "Émail → [EMAIL_REDACTED] ✓");
}

#[test]
fn test_out_of_range_match_is_ignored() {
    let text = "short";
    let stale = PIIMatch {
        kind: MatchKind::Builtin(PIIType::Email),
        text: "x".into(),
        start: 3,
        end: 40,
        confidence: 0.9,
        region: Some(Region::Universal),
    };
    let (out, applied) = redact(text, &[stale]);
    assert_eq!(out, "short");
    assert!(applied.is_empty());
}

#[test]
fn test_custom_kind_token() {
    let text = "id EMP-0042";
    let start = text.find("EMP").unwrap();
    let custom = PIIMatch {
        kind: MatchKind::Custom("EMPLOYEE_ID".into()),
        text: "EMP-0042".into(),
        start,
        end: text.len(),
        confidence: 0.8,
        region: None,
    };
    let (out, _) = redact(text, &[custom]);
    assert_eq!(out, "id [EMPLOYEE_ID_REDACTED]");
}

#[test]
fn test_redact_with_custom_replacement() {
    let text = "a@b.com";
    let (out, _) = redact_with(text, &[m(PIIType::Email, text, text)], |_| Cow::Borrowed("***"));
    assert_eq!(out, "***");
}

#[test]
fn test_inverted_span_sharing_start_is_ignored() {
    let text = "hello world";
    let span = |start: usize, end: usize| PIIMatch {
        kind: MatchKind::Builtin(PIIType::Email),
        text: String::new(),
        start,
        end,
        confidence: 0.9,
        region: Some(Region::Universal),
    };
    let (out, applied) = redact(text, &[span(5, 2), span(5, 8)]);
    assert_eq!(out, "hello[EMAIL_REDACTED]rld");
    assert_eq!(applied.len(), 1);
    assert_eq!((applied[0].start, applied[0].end), (5, 8));
}
