// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! PII (Personally Identifiable Information) Detector
//!
//! Scans text against the region-scoped pattern registry plus any custom
//! patterns, filters candidates through their validators, and hands the
//! survivors to the redactor.
//!
//! Offsets always refer to the caller's text. Nothing is rewritten before
//! matching, so every character outside a redacted span is preserved.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use super::pii_patterns::{self, BoundaryGuard, PatternEntry};
use super::pii_types::{distinct_kinds, MatchKind, PIIMatch, PIIResult, Region};
use super::redactor;
use super::validators::Validator;
use crate::error::ConfigError;

const CUSTOM_CONFIDENCE: f32 = 0.8;

/// A caller-supplied pattern, reported as its upper-cased name.
#[derive(Debug, Clone)]
pub struct CustomPattern {
    pub name: String,
    pub regex: Regex,
}

impl CustomPattern {
    pub fn new(name: &str, pattern: &str) -> Result<Self, ConfigError> {
        let name_ok = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !name_ok {
            return Err(ConfigError::InvalidCustomPatternName(name.to_string()));
        }
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidCustomPattern {
            name: name.to_string(),
            source,
        })?;
        Ok(Self { name: name.to_ascii_uppercase(), regex })
    }

    /// Compile a name -> pattern map in key order.
    pub fn compile_all(patterns: &BTreeMap<String, String>) -> Result<Vec<Self>, ConfigError> {
        patterns.iter().map(|(name, pattern)| Self::new(name, pattern)).collect()
    }
}

/// PII detector bound to a fixed region set.
///
/// Cheap to clone; the compiled registry is shared process-wide.
#[derive(Debug, Clone)]
pub struct PIIDetector {
    regions: BTreeSet<Region>,
    patterns: Arc<Vec<&'static PatternEntry>>,
    custom: Arc<Vec<CustomPattern>>,
}

impl PIIDetector {
    /// Detector over every region.
    pub fn new() -> Self {
        Self::from_regions(Region::ALL.into_iter().collect())
    }

    pub fn with_regions(regions: &BTreeSet<Region>) -> Result<Self, ConfigError> {
        let patterns = pii_patterns::patterns_for(regions)?;
        Ok(Self {
            regions: regions.clone(),
            patterns: Arc::new(patterns),
            custom: Arc::new(Vec::new()),
        })
    }

    /// Detector over named regions (`"us"`, `"eu"`, `"all"`, ...).
    pub fn from_region_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        Self::with_regions(&pii_patterns::parse_regions(names)?)
    }

    /// Infallible constructor for a region set known to be non-empty.
    pub(crate) fn from_regions(regions: BTreeSet<Region>) -> Self {
        let patterns = pii_patterns::registry()
            .iter()
            .filter(|e| regions.contains(&e.region()))
            .collect();
        Self { regions, patterns: Arc::new(patterns), custom: Arc::new(Vec::new()) }
    }

    pub fn with_custom_patterns(
        mut self,
        patterns: &BTreeMap<String, String>,
    ) -> Result<Self, ConfigError> {
        self.custom = Arc::new(CustomPattern::compile_all(patterns)?);
        Ok(self)
    }

    pub fn regions(&self) -> &BTreeSet<Region> {
        &self.regions
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len() + self.custom.len()
    }

    /// Every validated match, ordered by start offset. Matches of different
    /// types may overlap; ties keep registry order.
    pub fn find_matches(&self, text: &str) -> Vec<PIIMatch> {
        let mut matches = Vec::new();

        for entry in self.patterns.iter() {
            scan(text, &entry.regex, entry.validator, entry.guard, |m| {
                matches.push(PIIMatch {
                    kind: MatchKind::Builtin(entry.pii_type),
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    confidence: pii_patterns::calculate_confidence(entry.pii_type, m.as_str()),
                    region: Some(entry.region()),
                });
            });
        }

        for custom in self.custom.iter() {
            scan(text, &custom.regex, None, None, |m| {
                matches.push(PIIMatch {
                    kind: MatchKind::Custom(custom.name.clone()),
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    confidence: CUSTOM_CONFIDENCE,
                    region: None,
                });
            });
        }

        matches.sort_by_key(|m| m.start);
        matches
    }

    /// Detect PII and build the full scan result, including redacted text.
    pub fn detect(&self, text: &str) -> PIIResult {
        let matches = self.find_matches(text);
        if matches.is_empty() {
            tracing::debug!(bytes = text.len(), "PII scan found nothing");
            return PIIResult::empty(text);
        }

        let (redacted_text, applied) = redactor::redact(text, &matches);
        let types = distinct_kinds(&matches);
        tracing::debug!(
            bytes = text.len(),
            matches = matches.len(),
            applied = applied.len(),
            types = ?types.iter().map(MatchKind::name).collect::<Vec<_>>(),
            "PII scan complete"
        );

        PIIResult {
            has_pii: true,
            types,
            count: matches.len(),
            matches,
            redacted_text,
            applied,
        }
    }

    /// Check if text contains any validated PII.
    pub fn contains_pii(&self, text: &str) -> bool {
        let mut found = false;
        for entry in self.patterns.iter() {
            scan(text, &entry.regex, entry.validator, entry.guard, |_| found = true);
            if found {
                return true;
            }
        }
        self.custom.iter().any(|c| c.regex.find_iter(text).any(|m| !m.is_empty()))
    }

    /// Redact PII in text.
    pub fn redact(&self, text: &str) -> String {
        self.detect(text).redacted_text
    }

    /// Kinds this detector can report, in scan order.
    pub fn supported_types(&self) -> Vec<MatchKind> {
        self.patterns
            .iter()
            .map(|e| MatchKind::Builtin(e.pii_type))
            .chain(self.custom.iter().map(|c| MatchKind::Custom(c.name.clone())))
            .collect()
    }
}

impl Default for PIIDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Leftmost-first, non-overlapping scan of one pattern.
///
/// Validators see the `value` group when the pattern has one.
fn scan<'t, F>(
    text: &'t str,
    regex: &Regex,
    validator: Option<Validator>,
    guard: Option<BoundaryGuard>,
    mut emit: F,
) where
    F: FnMut(regex::Match<'t>),
{
    let mut at = 0;
    while at <= text.len() {
        let Some(caps) = regex.captures_at(text, at) else { break };
        let Some(whole) = caps.get(0) else { break };

        if whole.is_empty() {
            at = next_char_boundary(text, whole.end());
            continue;
        }
        if guard.is_some_and(|g| !g(text, whole.start(), whole.end())) {
            at = next_char_boundary(text, whole.start());
            continue;
        }

        let value = caps.name("value").unwrap_or(whole).as_str();
        if validator.map_or(true, |v| v(value)) {
            emit(whole);
        }
        at = whole.end();
    }
}

fn next_char_boundary(text: &str, i: usize) -> usize {
    text[i..].chars().next().map_or(text.len() + 1, |c| i + c.len_utf8())
}

fn default_detector() -> &'static PIIDetector {
    static ALL: OnceLock<PIIDetector> = OnceLock::new();
    ALL.get_or_init(PIIDetector::new)
}

/// Detect PII over a region set with optional custom patterns.
pub fn detect_pii(
    text: &str,
    regions: &BTreeSet<Region>,
    custom_patterns: Option<&BTreeMap<String, String>>,
) -> Result<PIIResult, ConfigError> {
    let detector = match custom_patterns {
        Some(custom) if !custom.is_empty() => {
            PIIDetector::with_regions(regions)?.with_custom_patterns(custom)?
        }
        _ if regions.len() == Region::ALL.len() => default_detector().clone(),
        _ => PIIDetector::with_regions(regions)?,
    };
    Ok(detector.detect(text))
}

/// Redact PII from text using every region.
pub fn redact_pii(text: &str) -> String {
    default_detector().redact(text)
}

#[cfg(test)]
#[path = "pii_tests.rs"]
mod tests;
