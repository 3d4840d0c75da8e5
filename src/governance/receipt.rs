// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hash-committed audit receipts.
//!
//! A receipt commits to the exact input and output of one governance call.
//! Fields are private and there are no setters, so a receipt cannot change
//! after it is built.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::governance_types::{GovernanceAction, DEFAULT_POLICY_VERSION};
use crate::pii::MatchKind;

pub const HASH_PREFIX: &str = "sha256:";
pub const RECEIPT_ID_PREFIX: &str = "rcpt_";

/// Immutable record of one governance decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    receipt_id: String,
    timestamp: DateTime<Utc>,
    input_hash: String,
    output_hash: String,
    action: GovernanceAction,
    policy_version: String,
    processing_time_ns: u64,
    pii_types: Vec<MatchKind>,
    pii_count: usize,
}

impl Receipt {
    /// Start a receipt committing to `input` and `output`.
    pub fn builder(input: &str, output: &str, action: GovernanceAction) -> ReceiptBuilder {
        ReceiptBuilder {
            input_hash: hash_text(input),
            output_hash: hash_text(output),
            action,
            policy_version: DEFAULT_POLICY_VERSION.to_string(),
            processing_time_ns: 0,
            pii_types: Vec::new(),
            pii_count: 0,
        }
    }

    pub fn receipt_id(&self) -> &str {
        &self.receipt_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// ISO-8601 UTC with a `Z` suffix.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn input_hash(&self) -> &str {
        &self.input_hash
    }

    pub fn output_hash(&self) -> &str {
        &self.output_hash
    }

    pub fn action(&self) -> GovernanceAction {
        self.action
    }

    pub fn policy_version(&self) -> &str {
        &self.policy_version
    }

    pub fn processing_time_ns(&self) -> u64 {
        self.processing_time_ns
    }

    pub fn pii_types(&self) -> &[MatchKind] {
        &self.pii_types
    }

    pub fn pii_count(&self) -> usize {
        self.pii_count
    }

    /// True iff `input` and `output` hash to the committed digests.
    pub fn verify(&self, input: &str, output: &str) -> bool {
        hash_text(input) == self.input_hash && hash_text(output) == self.output_hash
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_log_string(&self) -> String {
        let types: Vec<&str> = self.pii_types.iter().map(MatchKind::name).collect();
        format!(
            "[{}] {} {} policy={} pii_count={} pii_types=[{}] input={} output={} ({} ns)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.receipt_id,
            self.action,
            self.policy_version,
            self.pii_count,
            types.join(","),
            self.input_hash,
            self.output_hash,
            self.processing_time_ns
        )
    }
}

/// Builder for receipts. Id and timestamp are assigned by `build`.
#[derive(Debug)]
pub struct ReceiptBuilder {
    input_hash: String,
    output_hash: String,
    action: GovernanceAction,
    policy_version: String,
    processing_time_ns: u64,
    pii_types: Vec<MatchKind>,
    pii_count: usize,
}

impl ReceiptBuilder {
    pub fn policy_version(mut self, version: impl Into<String>) -> Self {
        self.policy_version = version.into();
        self
    }

    pub fn processing_time_ns(mut self, ns: u64) -> Self {
        self.processing_time_ns = ns;
        self
    }

    pub fn pii(mut self, types: Vec<MatchKind>, count: usize) -> Self {
        self.pii_types = types;
        self.pii_count = count;
        self
    }

    pub fn build(self) -> Receipt {
        Receipt {
            receipt_id: generate_receipt_id(),
            timestamp: Utc::now(),
            input_hash: self.input_hash,
            output_hash: self.output_hash,
            action: self.action,
            policy_version: self.policy_version,
            processing_time_ns: self.processing_time_ns,
            pii_types: self.pii_types,
            pii_count: self.pii_count,
        }
    }
}

/// `sha256:` followed by the lowercase hex SHA-256 of the UTF-8 bytes.
pub fn hash_text(text: &str) -> String {
    format!("{}{}", HASH_PREFIX, hex::encode(Sha256::digest(text.as_bytes())))
}

/// `rcpt_` followed by 32 hex chars from the OS RNG.
pub fn generate_receipt_id() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes[..]);
    format!("{}{}", RECEIPT_ID_PREFIX, hex::encode(bytes))
}

#[cfg(test)]
#[path = "receipt_tests.rs"]
mod tests;
