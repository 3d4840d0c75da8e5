// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Detection, validation and redaction.
//!
//! Data flows one way: registry and validators feed the detector, the
//! detector feeds the redactor.

pub mod pii_detector;
pub mod pii_patterns;
pub mod pii_types;
pub mod redactor;
pub mod validators;

pub use pii_detector::{detect_pii, redact_pii, CustomPattern, PIIDetector};
pub use pii_patterns::{parse_regions, patterns_for, PatternEntry};
pub use pii_types::{MatchKind, PIIMatch, PIIResult, PIIType, Region};
pub use redactor::redact;
