// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tork governance core.
//!
//! Pattern- and rule-based PII detection across regional registries,
//! checksum validation, typed-token redaction, and a hash-committed
//! receipt for every governance decision.
//!
//! Adapters call one narrow surface: [`Tork::govern`], or
//! [`Tork::detect`] / [`Tork::redact`] when they do not need a receipt.
//!
//! ```no_run
//! use tork_governance::{GovernanceAction, Tork};
//!
//! let tork = Tork::new();
//! let result = tork.govern("Card: 4111-1111-1111-1111");
//! assert_eq!(result.action, GovernanceAction::Redact);
//! assert_eq!(result.output, "Card: [CARD_REDACTED]");
//! assert!(result.receipt.verify("Card: 4111-1111-1111-1111", &result.output));
//! ```

pub mod error;
pub mod governance;
pub mod pii;

pub use error::ConfigError;
pub use governance::{
    GovernanceAction, GovernanceConfig, GovernanceResult, GovernanceStats, Receipt,
    StatsSnapshot, Tork,
};
pub use pii::{
    detect_pii, redact, redact_pii, MatchKind, PIIDetector, PIIMatch, PIIResult, PIIType,
    Region,
};
