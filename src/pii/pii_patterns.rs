// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pattern registry: compiled patterns per (region, type), the validator
//! and boundary guard bound to each type, and match confidence.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::pii_types::{PIIType, Region};
use super::validators::{self, Validator};
use crate::error::ConfigError;

/// Context check replacing lookaround: `(text, start, end) -> accept`.
///
/// A candidate rejected by its guard is retried one character later; a
/// candidate rejected by its validator is skipped entirely.
pub type BoundaryGuard = fn(&str, usize, usize) -> bool;

/// One compiled registry row.
#[derive(Debug)]
pub struct PatternEntry {
    pub pii_type: PIIType,
    pub regex: Regex,
    pub validator: Option<Validator>,
    pub guard: Option<BoundaryGuard>,
}

impl PatternEntry {
    pub fn region(&self) -> Region {
        self.pii_type.region()
    }

    pub fn redaction_token(&self) -> &'static str {
        self.pii_type.redaction_token()
    }

    pub fn description(&self) -> &'static str {
        self.pii_type.description()
    }
}

/// Pattern sources in registry order (grouped by region, regions in
/// `Region::ALL` order). Patterns that need a validator expose the checked
/// part as the `value` group; otherwise the whole match is validated.
const PATTERN_SOURCES: &[(PIIType, &str)] = &[
    // us
    (PIIType::SSN, r"\b(?P<value>\d{3}[-\s]?\d{2}[-\s]?\d{4})\b"),
    (PIIType::PhoneUS, r"\b(?:\+?1[-.\s]?)?\(?[2-9]\d{2}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b"),
    (
        PIIType::DriverLicenseUS,
        r"(?i)\b(?:DL|D\.L\.|Driver'?s?\s*License)[:\s#]*[A-Z]?\d{6,9}\b",
    ),
    (PIIType::PassportUS, r"(?i)\bPassport[:\s#]*[A-Z]?\d{8,9}\b"),
    (PIIType::EIN, r"(?i)\bEIN[:\s#]*\d{2}[-\s]?\d{7}\b"),
    (PIIType::ITIN, r"\b(?P<value>9\d{2}[-\s]?\d{2}[-\s]?\d{4})\b"),
    // au
    (
        PIIType::PhoneAU,
        r"\b(?:\+?61[-.\s]?)?0?4\d{2}[-.\s]?\d{3}[-.\s]?\d{3}\b|\b(?:\+?61[-.\s]?)?0?[2378][-.\s]?\d{4}[-.\s]?\d{4}\b",
    ),
    (PIIType::MedicareAU, r"\b(?P<value>\d{4} \d{5} \d|\d{4}-\d{5}-\d|\d{10})\b"),
    (PIIType::TFN, r"\b(?P<value>\d{3}[-\s]?\d{3}[-\s]?\d{3})\b"),
    (
        PIIType::ABN,
        r"(?i)\bABN[:\s#]*(?P<value>\d{2}[-\s]?\d{3}[-\s]?\d{3}[-\s]?\d{3})\b",
    ),
    (PIIType::ACN, r"(?i)\bACN[:\s#]*\d{3}[-\s]?\d{3}[-\s]?\d{3}\b"),
    // eu
    (
        PIIType::IBAN,
        r"\b(?P<value>[A-Z]{2}\d{2}[-\s]?(?:[A-Z0-9]{4}[-\s]?){2,7}[A-Z0-9]{1,4})\b",
    ),
    (
        PIIType::VatEU,
        r"\b(?:AT|BE|BG|CY|CZ|DE|DK|EE|EL|ES|FI|FR|HR|HU|IE|IT|LT|LU|LV|MT|NL|PL|PT|RO|SE|SI|SK)[A-Z0-9]{8,12}\b",
    ),
    (
        PIIType::PhoneEU,
        r"\b\+?(?:3[0-9]|4[0-9]|5[0-9])[-.\s]?\d{1,3}[-.\s]?\d{2,4}[-.\s]?\d{2,4}[-.\s]?\d{2,4}\b",
    ),
    (PIIType::GermanID, r"\b[CFGHJKLMNPRTVWXYZ][0-9CFGHJKLMNPRTVWXYZ]{9}\b"),
    (
        PIIType::FrenchSSN,
        r"\b[12]\s?\d{2}\s?\d{2}\s?\d{2}\s?\d{3}\s?\d{3}\s?\d{2}\b",
    ),
    // uk
    (
        PIIType::NinoUK,
        r"(?i)\b(?P<value>[A-CEGHJ-PR-TW-Z]{2}[-\s]?\d{2}[-\s]?\d{2}[-\s]?\d{2}[-\s]?[A-D])\b",
    ),
    (PIIType::NhsUK, r"\b(?P<value>\d{3}[-\s]?\d{3}[-\s]?\d{4})\b"),
    (
        PIIType::PostcodeUK,
        r"(?i)\b(?:GIR\s*0AA|[A-Z]{1,2}\d[A-Z\d]?\s*\d[A-Z]{2})\b",
    ),
    (PIIType::SortCodeUK, r"\b\d{2}[-\s]?\d{2}[-\s]?\d{2}\b"),
    // universal
    (PIIType::Email, r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b"),
    (
        PIIType::CreditCard,
        r"\b(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13}|6(?:011|5[0-9]{2})[0-9]{12}|(?:2131|1800|35\d{3})\d{11})\b|\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b|\b\d{4}[-\s]?\d{6}[-\s]?\d{5}\b",
    ),
    (
        PIIType::IPAddress,
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
    ),
    (PIIType::IPv6Address, r"\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b"),
    (PIIType::MACAddress, r"\b(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}\b"),
    (
        PIIType::DateOfBirth,
        r"(?i)\b(?:DOB|Date\s*of\s*Birth|Born|Birthday)[:\s]*\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b",
    ),
    (
        PIIType::Phone,
        r"\b(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
    ),
    (
        PIIType::Address,
        r"(?i)\b\d{1,5}(?:[ \t]+\w+){1,4}[ \t]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Court|Ct|Way|Place|Pl)\b",
    ),
    // financial
    (
        PIIType::BankAccount,
        r"(?i)\b(?:Account(?:\s+Number)?|Acct|A/C)[:\s#]*\d{8,17}\b",
    ),
    (
        PIIType::RoutingNumber,
        r"(?i)\b(?:Routing(?:\s+Number)?|ABA|RTN)[:\s#]*(?P<value>\d{9})\b",
    ),
    (PIIType::SwiftBIC, r"\b[A-Z]{6}[A-Z0-9]{2}(?:[A-Z0-9]{3})?\b"),
    (PIIType::CVV, r"(?i)\b(?:CVV2?|CVC2?|CSC)[:\s]*\d{3,4}\b"),
    (
        PIIType::CardExpiry,
        r"(?i)\b(?:Exp(?:iry|iration)?|Valid\s*(?:Thru|Through))[:\s]*\d{2}[/\-]\d{2,4}\b",
    ),
    (
        PIIType::CryptoAddress,
        r"\b(?:bc1|[13])[a-zA-HJ-NP-Z0-9]{25,39}\b|\b0x[a-fA-F0-9]{40}\b",
    ),
    // healthcare
    (
        PIIType::PatientID,
        r"(?i)\b(?:Patient(?:\s*(?:ID|#|No\.?))?|PID)[:\s#]*[A-Z0-9\-]{5,15}\b",
    ),
    (
        PIIType::MRN,
        r"(?i)\b(?:MRN|Medical\s*Record(?:\s*Number)?)[:\s#]*\d{6,10}\b",
    ),
    (
        PIIType::HealthPlanID,
        r"(?i)\b(?:Member\s*ID|Subscriber\s*ID|Policy|Insurance\s*ID|Group|Health\s*Plan|BCBS|Aetna|Cigna|UHC|United)[:\s#]*[A-Z0-9]{6,15}\b",
    ),
    (
        PIIType::NPI,
        r"(?i)\b(?:Provider\s+)?NPI(?:\s*(?:Number|#))?[:\s#]*(?P<value>\d{10})\b",
    ),
    (
        PIIType::DEANumber,
        r"(?i)\bDEA(?:\s*Number)?[:\s#]*(?P<value>[A-Z][A-Z0-9]\d{7})\b",
    ),
    (
        PIIType::ICDCode,
        r"(?i)\b(?:ICD(?:[-\s]?10)?|Diagnosis|Dx)[:\s]*[A-Z]\d{2}(?:\.\d{1,4})?[A-Z]?\b",
    ),
    (
        PIIType::CPTCode,
        r"(?i)\b(?:CPT(?:\s*(?:Code|#))?|Procedure)[:\s#]*\d{5}\b",
    ),
    // biometric
    (
        PIIType::BiometricID,
        r"(?i)\b(?:Biometric(?:\s*(?:ID|Identifier|Data\s*ID))?|Bio[-\s]?ID)[:\s#]*[A-Z0-9][A-Z0-9\-]{4,19}\b",
    ),
    (
        PIIType::FaceID,
        r"(?i)\b(?:Face[-\s]?ID|FaceID|Facial[-\s]?(?:ID|Recognition(?:\s*(?:Data\s*)?ID)?)|Face[-\s]?(?:Recognition|Template)[-\s]?ID?)[:\s#]*[A-Z0-9][A-Z0-9\-]{4,19}\b",
    ),
    (
        PIIType::FingerprintID,
        r"(?i)\b(?:Fingerprint(?:\s*(?:ID|Record|Template|Data[-\s]*ID))?|FP[-\s]?ID|Print[-\s]?ID)[:\s#]*[A-Z0-9][A-Z0-9\-]{4,19}\b",
    ),
];

/// Validator bound to each type, if any.
pub fn validator_for(pii_type: PIIType) -> Option<Validator> {
    match pii_type {
        PIIType::SSN => Some(validators::validate_ssn),
        PIIType::ITIN => Some(validators::validate_itin),
        PIIType::MedicareAU => Some(validators::validate_medicare),
        PIIType::TFN => Some(validators::validate_tfn),
        PIIType::ABN => Some(validators::validate_abn),
        PIIType::IBAN => Some(validators::validate_iban),
        PIIType::NinoUK => Some(validators::validate_nino),
        PIIType::NhsUK => Some(validators::validate_nhs),
        PIIType::CreditCard => Some(validators::validate_credit_card),
        PIIType::RoutingNumber => Some(validators::validate_routing),
        PIIType::NPI => Some(validators::validate_npi),
        PIIType::DEANumber => Some(validators::validate_dea),
        _ => None,
    }
}

/// Boundary guard bound to each type, if any.
pub fn guard_for(pii_type: PIIType) -> Option<BoundaryGuard> {
    match pii_type {
        PIIType::IPAddress => Some(ipv4_boundary),
        PIIType::MACAddress => Some(mac_boundary),
        _ => None,
    }
}

/// Types whose pattern requires a context label such as `MRN:` or `ABN`.
pub fn is_labelled(pii_type: PIIType) -> bool {
    matches!(
        pii_type,
        PIIType::DriverLicenseUS
            | PIIType::PassportUS
            | PIIType::EIN
            | PIIType::ABN
            | PIIType::ACN
            | PIIType::DateOfBirth
            | PIIType::BankAccount
            | PIIType::RoutingNumber
            | PIIType::CVV
            | PIIType::CardExpiry
            | PIIType::PatientID
            | PIIType::MRN
            | PIIType::HealthPlanID
            | PIIType::NPI
            | PIIType::DEANumber
            | PIIType::ICDCode
            | PIIType::CPTCode
            | PIIType::BiometricID
            | PIIType::FaceID
            | PIIType::FingerprintID
    )
}

/// Reject a dotted quad that is part of a longer dotted digit run.
fn ipv4_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = &text.as_bytes()[..start];
    let after = &text.as_bytes()[end..];
    let preceded = matches!(before, [.., d, b'.'] if d.is_ascii_digit());
    let followed = matches!(after, [b'.', d, ..] if d.is_ascii_digit());
    !preceded && !followed
}

/// Reject a MAC address embedded in a longer separated hex run.
fn mac_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = &text.as_bytes()[..start];
    let after = &text.as_bytes()[end..];
    let preceded = matches!(before, [.., h, b':' | b'-'] if h.is_ascii_hexdigit());
    let followed = matches!(after, [b':' | b'-', h, ..] if h.is_ascii_hexdigit());
    !preceded && !followed
}

/// Confidence score for a surviving match.
pub fn calculate_confidence(pii_type: PIIType, text: &str) -> f32 {
    if validator_for(pii_type).is_some() {
        return 0.99;
    }
    if is_labelled(pii_type) {
        return 0.9;
    }
    match pii_type {
        PIIType::Email => 0.95,
        PIIType::CryptoAddress => 0.9,
        PIIType::IPAddress | PIIType::IPv6Address | PIIType::MACAddress => 0.85,
        PIIType::PhoneUS | PIIType::PhoneAU | PIIType::PhoneEU => {
            if text.starts_with('+') || text.starts_with('(') {
                0.85
            } else {
                0.75
            }
        }
        PIIType::VatEU | PIIType::FrenchSSN => 0.75,
        PIIType::Address | PIIType::PostcodeUK => 0.7,
        PIIType::Phone => 0.6,
        PIIType::GermanID | PIIType::SwiftBIC => 0.6,
        PIIType::SortCodeUK => 0.5,
        _ => 0.75,
    }
}

static REGISTRY: OnceLock<Vec<PatternEntry>> = OnceLock::new();

/// Every built-in pattern, compiled once per process.
///
/// # Panics
/// If a built-in pattern fails to compile. That is a build defect and is
/// caught by the registry tests.
pub fn registry() -> &'static [PatternEntry] {
    REGISTRY.get_or_init(|| {
        let entries: Vec<PatternEntry> = PATTERN_SOURCES
            .iter()
            .map(|(pii_type, source)| PatternEntry {
                pii_type: *pii_type,
                regex: Regex::new(source)
                    .unwrap_or_else(|e| panic!("built-in {} pattern: {}", pii_type, e)),
                validator: validator_for(*pii_type),
                guard: guard_for(*pii_type),
            })
            .collect();
        tracing::debug!(patterns = entries.len(), "PII pattern registry compiled");
        entries
    })
}

/// Active patterns for a region set, in registry order.
pub fn patterns_for(regions: &BTreeSet<Region>) -> Result<Vec<&'static PatternEntry>, ConfigError> {
    if regions.is_empty() {
        return Err(ConfigError::EmptyRegions);
    }
    Ok(registry().iter().filter(|e| regions.contains(&e.region())).collect())
}

/// Parse region names (case-insensitive). `all` selects every region.
pub fn parse_regions<S: AsRef<str>>(names: &[S]) -> Result<BTreeSet<Region>, ConfigError> {
    let mut regions = BTreeSet::new();
    for name in names {
        let name = name.as_ref();
        if name.trim().eq_ignore_ascii_case("all") {
            regions.extend(Region::ALL);
        } else {
            regions.insert(name.parse::<Region>()?);
        }
    }
    if regions.is_empty() {
        return Err(ConfigError::EmptyRegions);
    }
    Ok(regions)
}
