// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Governance engine.
//!
//! Each call runs SCANNING (detect) -> DECIDING (action and output) ->
//! EMITTING (receipt, stats, metrics). Nothing but the stats block is shared
//! between calls.

use std::sync::Arc;
use std::time::Instant;

use super::governance_types::{GovernanceAction, GovernanceConfig, GovernanceResult};
use super::receipt::Receipt;
use super::stats::{GovernanceStats, StatsSnapshot};
use crate::error::ConfigError;
use crate::pii::{redactor, PIIDetector, PIIMatch, PIIResult};

pub const METRIC_CALLS: &str = "tork_governance_calls_total";
pub const METRIC_PII_DETECTED: &str = "tork_pii_detected_total";
pub const METRIC_PROCESSING_NS: &str = "tork_governance_processing_ns";

/// Governance engine. Clones share one stats block.
#[derive(Debug, Clone)]
pub struct Tork {
    config: GovernanceConfig,
    detector: PIIDetector,
    stats: Arc<GovernanceStats>,
}

impl Tork {
    /// Engine with the default policy: version `1.0.0`, action `REDACT`,
    /// regions `us` and `universal`.
    pub fn new() -> Self {
        let config = GovernanceConfig::default();
        let detector = PIIDetector::from_regions(config.regions.clone());
        tracing::info!(
            policy_version = %config.policy_version,
            patterns = detector.pattern_count(),
            "Governance engine ready"
        );
        Self { config, detector, stats: Arc::new(GovernanceStats::new()) }
    }

    pub fn with_config(config: GovernanceConfig) -> Result<Self, ConfigError> {
        let detector = build_detector(&config)?;
        tracing::info!(
            policy_version = %config.policy_version,
            action = %config.default_action,
            regions = ?config.regions,
            patterns = detector.pattern_count(),
            "Governance engine ready"
        );
        Ok(Self { config, detector, stats: Arc::new(GovernanceStats::new()) })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn detector(&self) -> &PIIDetector {
        &self.detector
    }

    /// Govern `input` under this engine's policy.
    pub fn govern(&self, input: &str) -> GovernanceResult {
        self.run(input, &self.detector, &self.config)
    }

    /// Govern `input` under a one-off policy. Stats are recorded on this
    /// engine.
    pub fn govern_with(
        &self,
        input: &str,
        config: &GovernanceConfig,
    ) -> Result<GovernanceResult, ConfigError> {
        let detector = build_detector(config)?;
        Ok(self.run(input, &detector, config))
    }

    /// Detection without a receipt or stats update.
    pub fn detect(&self, text: &str) -> PIIResult {
        self.detector.detect(text)
    }

    /// Apply matches from an earlier [`detect`](Self::detect).
    pub fn redact(&self, text: &str, matches: &[PIIMatch]) -> String {
        redactor::redact(text, matches).0
    }

    pub fn get_stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
        tracing::debug!("Governance stats reset");
    }

    /// Shared handle to the stats block.
    pub fn stats(&self) -> Arc<GovernanceStats> {
        Arc::clone(&self.stats)
    }

    fn run(&self, input: &str, detector: &PIIDetector, config: &GovernanceConfig) -> GovernanceResult {
        let start = Instant::now();

        let pii = detector.detect(input);

        let action = if pii.has_pii { config.default_action } else { GovernanceAction::Allow };
        let output = match action {
            GovernanceAction::Redact => pii.redacted_text.clone(),
            _ => input.to_string(),
        };

        let processing_time_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let receipt = Receipt::builder(input, &output, action)
            .policy_version(config.policy_version.as_str())
            .processing_time_ns(processing_time_ns)
            .pii(pii.applied_types(), pii.applied.len())
            .build();

        self.stats.record(action, pii.has_pii, processing_time_ns);
        metrics::counter!(METRIC_CALLS, "action" => action.as_str()).increment(1);
        if pii.has_pii {
            metrics::counter!(METRIC_PII_DETECTED).increment(1);
        }
        metrics::histogram!(METRIC_PROCESSING_NS).record(processing_time_ns as f64);

        tracing::debug!(
            receipt_id = receipt.receipt_id(),
            action = %action,
            pii_count = receipt.pii_count(),
            processing_time_ns,
            "Governance decision"
        );

        GovernanceResult { action, output, pii, receipt }
    }
}

impl Default for Tork {
    fn default() -> Self {
        Self::new()
    }
}

fn build_detector(config: &GovernanceConfig) -> Result<PIIDetector, ConfigError> {
    let built = config.validate().and_then(|()| {
        PIIDetector::with_regions(&config.regions)?.with_custom_patterns(&config.custom_patterns)
    });
    if let Err(e) = &built {
        tracing::warn!(error = %e, "Rejected governance configuration");
    }
    built
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
