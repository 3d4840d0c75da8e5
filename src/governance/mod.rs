// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Governance: policy decision, receipt and statistics around one scan.

pub mod engine;
pub mod governance_types;
pub mod receipt;
pub mod stats;

pub use engine::Tork;
pub use governance_types::{GovernanceAction, GovernanceConfig, GovernanceResult};
pub use receipt::{generate_receipt_id, hash_text, Receipt, ReceiptBuilder};
pub use stats::{GovernanceStats, StatsSnapshot};
