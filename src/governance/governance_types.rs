// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Types for the governance engine: actions, policy configuration and the
//! per-call result.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::receipt::Receipt;
use crate::error::ConfigError;
use crate::pii::{parse_regions, PIIResult, Region};

pub const DEFAULT_POLICY_VERSION: &str = "1.0.0";

/// Decision taken for one governed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernanceAction {
    #[serde(alias = "allow")]
    Allow,
    #[serde(alias = "redact")]
    Redact,
    #[serde(alias = "deny")]
    Deny,
    #[serde(alias = "escalate")]
    Escalate,
}

impl GovernanceAction {
    pub const ALL: [GovernanceAction; 4] = [
        GovernanceAction::Allow,
        GovernanceAction::Redact,
        GovernanceAction::Deny,
        GovernanceAction::Escalate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GovernanceAction::Allow => "ALLOW",
            GovernanceAction::Redact => "REDACT",
            GovernanceAction::Deny => "DENY",
            GovernanceAction::Escalate => "ESCALATE",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            GovernanceAction::Allow => 0,
            GovernanceAction::Redact => 1,
            GovernanceAction::Deny => 2,
            GovernanceAction::Escalate => 3,
        }
    }
}

impl std::fmt::Display for GovernanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy applied by a [`Tork`](super::Tork) instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GovernanceConfig {
    pub policy_version: String,
    /// Action taken whenever PII is found.
    pub default_action: GovernanceAction,
    pub regions: BTreeSet<Region>,
    /// Name -> regex. Names are reported upper-cased.
    pub custom_patterns: BTreeMap<String, String>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            policy_version: DEFAULT_POLICY_VERSION.to_string(),
            default_action: GovernanceAction::Redact,
            regions: BTreeSet::from([Region::Us, Region::Universal]),
            custom_patterns: BTreeMap::new(),
        }
    }
}

impl GovernanceConfig {
    pub fn with_policy_version(mut self, version: impl Into<String>) -> Self {
        self.policy_version = version.into();
        self
    }

    pub fn with_action(mut self, action: GovernanceAction) -> Self {
        self.default_action = action;
        self
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.regions = regions.into_iter().collect();
        self
    }

    pub fn with_custom_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.custom_patterns.insert(name.into(), pattern.into());
        self
    }

    /// Check the policy version and region set. Custom patterns are checked
    /// when they are compiled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_policy_version(&self.policy_version) {
            return Err(ConfigError::InvalidPolicyVersion(self.policy_version.clone()));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::EmptyRegions);
        }
        Ok(())
    }

    /// Load from TOML. Missing keys take their defaults.
    ///
    /// ```toml
    /// policy_version = "2.1.0"
    /// default_action = "REDACT"
    /// regions = ["us", "eu"]
    ///
    /// [custom_patterns]
    /// employee_id = 'EMP-\d{6}'
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: GovernanceConfigFile = toml::from_str(s)?;
        let config = Self {
            policy_version: file.policy_version,
            default_action: file.default_action,
            regions: parse_regions(&file.regions)?,
            custom_patterns: file.custom_patterns,
        };
        config.validate()?;
        Ok(config)
    }
}

/// On-disk shape; regions stay as names until parsed.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GovernanceConfigFile {
    policy_version: String,
    default_action: GovernanceAction,
    regions: Vec<String>,
    custom_patterns: BTreeMap<String, String>,
}

impl Default for GovernanceConfigFile {
    fn default() -> Self {
        let defaults = GovernanceConfig::default();
        Self {
            policy_version: defaults.policy_version,
            default_action: defaults.default_action,
            regions: defaults.regions.iter().map(|r| r.as_str().to_string()).collect(),
            custom_patterns: defaults.custom_patterns,
        }
    }
}

/// `MAJOR.MINOR[.PATCH][-PRERELEASE]`
fn is_valid_policy_version(version: &str) -> bool {
    let (core, prerelease) = match version.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (version, None),
    };
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let parts: Vec<&str> = core.split('.').collect();

    (2..=3).contains(&parts.len())
        && parts.iter().all(|p| numeric(p))
        && prerelease.map_or(true, |p| {
            !p.is_empty() && p.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
        })
}

/// Outcome of one governance call. Callers must not use `output` when the
/// action is `Deny` or `Escalate`.
#[derive(Debug, Clone, Serialize)]
pub struct GovernanceResult {
    pub action: GovernanceAction,
    pub output: String,
    pub pii: PIIResult,
    pub receipt: Receipt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(serde_json::to_string(&GovernanceAction::Escalate).unwrap(), "\"ESCALATE\"");
        let parsed: GovernanceAction = serde_json::from_str("\"deny\"").unwrap();
        assert_eq!(parsed, GovernanceAction::Deny);
        assert_eq!(GovernanceAction::Redact.to_string(), "REDACT");
    }

    #[test]
    fn test_default_config() {
        let config = GovernanceConfig::default();
        assert_eq!(config.policy_version, "1.0.0");
        assert_eq!(config.default_action, GovernanceAction::Redact);
        assert_eq!(config.regions, BTreeSet::from([Region::Us, Region::Universal]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_version_format() {
        for ok in ["1.0", "1.0.0", "12.3.45", "2.0.0-rc.1", "1.2-beta"] {
            assert!(is_valid_policy_version(ok), "{}", ok);
        }
        for bad in ["", "1", "v1.0.0", "1.0.0.0", "1..0", "1.0.0-", "1.a.0", "1.0 .0"] {
            assert!(!is_valid_policy_version(bad), "{}", bad);
        }
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let bad_version = GovernanceConfig::default().with_policy_version("latest");
        assert!(matches!(bad_version.validate(), Err(ConfigError::InvalidPolicyVersion(_))));

        let no_regions = GovernanceConfig::default().with_regions([]);
        assert!(matches!(no_regions.validate(), Err(ConfigError::EmptyRegions)));
    }

    #[test]
    fn test_from_toml_str() {
        let config = GovernanceConfig::from_toml_str(
            r#"
            policy_version = "2.1.0"
            default_action = "DENY"
            regions = ["US", "eu"]

            [custom_patterns]
            employee_id = 'EMP-\d{6}'
            "#,
        )
        .unwrap();
        assert_eq!(config.policy_version, "2.1.0");
        assert_eq!(config.default_action, GovernanceAction::Deny);
        assert_eq!(config.regions, BTreeSet::from([Region::Us, Region::Eu]));
        assert_eq!(config.custom_patterns["employee_id"], r"EMP-\d{6}");
    }

    #[test]
    fn test_from_toml_str_defaults_and_errors() {
        assert_eq!(GovernanceConfig::from_toml_str("").unwrap(), GovernanceConfig::default());

        let all = GovernanceConfig::from_toml_str(r#"regions = ["all"]"#).unwrap();
        assert_eq!(all.regions.len(), Region::ALL.len());

        assert!(matches!(
            GovernanceConfig::from_toml_str(r#"regions = ["narnia"]"#),
            Err(ConfigError::UnknownRegion(_))
        ));
        assert!(matches!(
            GovernanceConfig::from_toml_str(r#"policy_version = "one""#),
            Err(ConfigError::InvalidPolicyVersion(_))
        ));
        assert!(matches!(
            GovernanceConfig::from_toml_str(r#"default_action = "IGNORE""#),
            Err(ConfigError::Parse(_))
        ));
    }
}
