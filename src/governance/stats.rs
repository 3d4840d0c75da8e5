// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Running counters for a governance instance.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::governance_types::GovernanceAction;

#[derive(Debug, Default)]
struct Counters {
    total_calls: u64,
    total_pii_detected: u64,
    total_processing_ns: u128,
    action_counts: [u64; 4],
}

/// Per-instance statistics. Each call is recorded under one lock, so
/// concurrent updates are never lost.
#[derive(Debug, Default)]
pub struct GovernanceStats {
    counters: Mutex<Counters>,
}

/// Point-in-time copy of [`GovernanceStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_calls: u64,
    /// Calls in which at least one PII match was found.
    pub total_pii_detected: u64,
    pub avg_processing_time_ns: u64,
    /// Always carries all four actions.
    pub action_counts: BTreeMap<GovernanceAction, u64>,
}

impl GovernanceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, action: GovernanceAction, pii_detected: bool, processing_ns: u64) {
        let mut c = self.counters.lock();
        c.total_calls += 1;
        if pii_detected {
            c.total_pii_detected += 1;
        }
        c.total_processing_ns += u128::from(processing_ns);
        c.action_counts[action.index()] += 1;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let c = self.counters.lock();
        let avg = if c.total_calls > 0 {
            u64::try_from(c.total_processing_ns / u128::from(c.total_calls)).unwrap_or(u64::MAX)
        } else {
            0
        };
        StatsSnapshot {
            total_calls: c.total_calls,
            total_pii_detected: c.total_pii_detected,
            avg_processing_time_ns: avg,
            action_counts: GovernanceAction::ALL
                .iter()
                .map(|a| (*a, c.action_counts[a.index()]))
                .collect(),
        }
    }

    pub fn reset(&self) {
        *self.counters.lock() = Counters::default();
    }
}
