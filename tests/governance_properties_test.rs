//! Governance Property Tests
//!
//! End-to-end checks of the public surface: redaction idempotence, content
//! preservation, hash commitment, type aggregation, validator rejection and
//! statistics accounting.
//!
//! Run with logs: `RUST_LOG=tork_governance=debug cargo test -- --nocapture`

use std::collections::BTreeSet;

use sha2::{Digest, Sha256};
use tork_governance::{
    detect_pii, GovernanceAction, GovernanceConfig, MatchKind, PIIType, Region, Tork,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const SAMPLES: &[&str] = &[
    "SSN: 123-45-6789, Email: a@b.com",
    "Card: 4111-1111-1111-1111 exp soon",
    "Call 555-123-4567 or (212) 555-0199 from 10.0.0.1",
    "Ship to 1600 Pennsylvania Avenue, contact ops@example.org",
    "Nothing sensitive in this sentence at all.",
    "Unicode café ☕ with a@b.com inside",
];

#[test]
fn test_redaction_is_idempotent() {
    init_tracing();
    let tork = Tork::new();
    for text in SAMPLES {
        let first = tork.redact(text, &tork.detect(text).matches);
        let second = tork.redact(&first, &tork.detect(&first).matches);
        assert_eq!(second, first, "second pass changed {:?}", text);
    }
}

#[test]
fn test_content_preservation_without_pii() {
    let tork = Tork::new();
    for text in ["", "Hello, world!", "The meeting is at noon on Tuesday.", "naïve résumé"] {
        let result = tork.govern(text);
        assert_eq!(result.action, GovernanceAction::Allow);
        assert_eq!(result.output, text);
    }
}

#[test]
fn test_hash_commitment() {
    let tork = Tork::new();
    for text in SAMPLES {
        let result = tork.govern(text);
        assert!(result.receipt.verify(text, &result.output));

        let expected_in = format!("sha256:{}", hex::encode(Sha256::digest(text.as_bytes())));
        let expected_out = format!("sha256:{}", hex::encode(Sha256::digest(result.output.as_bytes())));
        assert_eq!(result.receipt.input_hash(), expected_in);
        assert_eq!(result.receipt.output_hash(), expected_out);
    }
}

#[test]
fn test_type_aggregation() {
    let tork = Tork::new();
    let result = tork.detect("SSN: 123-45-6789, Email: a@b.com");
    let types: BTreeSet<String> = result.types.iter().map(|k| k.name().to_string()).collect();
    assert_eq!(types, BTreeSet::from(["SSN".to_string(), "EMAIL".to_string()]));
    assert_eq!(result.count, 2);
}

#[test]
fn test_validator_rejection() {
    let tork = Tork::new();
    assert_eq!(tork.detect("SSN: 000-00-0000").count_of(PIIType::SSN), 0);
    assert_eq!(tork.detect("SSN: 123-45-6789").count_of(PIIType::SSN), 1);
}

#[test]
fn test_statistics_accounting() {
    let tork = Tork::new();
    tork.govern("first clean message");
    tork.govern("SSN: 123-45-6789");
    tork.govern("second clean message");

    let stats = tork.get_stats();
    assert_eq!(stats.total_calls, 3);
    assert_eq!(stats.total_pii_detected, 1);

    tork.reset_stats();
    let stats = tork.get_stats();
    assert_eq!(stats.total_calls, 0);
    assert_eq!(stats.total_pii_detected, 0);
}

#[test]
fn test_card_end_to_end() {
    let tork = Tork::new();
    let result = tork.govern("Card: 4111-1111-1111-1111");
    assert_eq!(result.action, GovernanceAction::Redact);
    assert_eq!(result.output, "Card: [CARD_REDACTED]");
    assert_eq!(result.receipt.pii_types(), &[MatchKind::Builtin(PIIType::CreditCard)]);

    let json: serde_json::Value = serde_json::from_str(&result.receipt.to_json().unwrap()).unwrap();
    assert_eq!(json["pii_types"], serde_json::json!(["CREDIT_CARD"]));
    assert_eq!(json["action"], "REDACT");
}

#[test]
fn test_every_region_from_toml() {
    init_tracing();
    let config = GovernanceConfig::from_toml_str(
        r#"
        policy_version = "3.0.0"
        default_action = "ESCALATE"
        regions = ["all"]
        "#,
    )
    .unwrap();
    let tork = Tork::with_config(config).unwrap();
    let input = "NHS Number: 943 476 5919";
    let result = tork.govern(input);

    assert_eq!(result.action, GovernanceAction::Escalate);
    assert_eq!(result.output, input);
    assert!(result.pii.contains_type(PIIType::NhsUK));
    assert_eq!(result.receipt.policy_version(), "3.0.0");
}

#[test]
fn test_free_function_detection() {
    let regions = BTreeSet::from([Region::Au]);
    let result = detect_pii("TFN 123 456 782", &regions, None).unwrap();
    assert_eq!(result.redacted_text, "TFN [TFN_REDACTED]");
}
