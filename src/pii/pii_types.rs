// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Types shared by the detection and redaction engines.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Jurisdiction-scoped grouping of pattern definitions.
///
/// Declaration order is registry order: patterns are scanned region by
/// region in this order, which also breaks ties between overlapping matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Us,
    Au,
    Eu,
    Uk,
    Universal,
    Financial,
    Healthcare,
    Biometric,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Us,
        Region::Au,
        Region::Eu,
        Region::Uk,
        Region::Universal,
        Region::Financial,
        Region::Healthcare,
        Region::Biometric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Au => "au",
            Region::Eu => "eu",
            Region::Uk => "uk",
            Region::Universal => "universal",
            Region::Financial => "financial",
            Region::Healthcare => "healthcare",
            Region::Biometric => "biometric",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == lowered)
            .ok_or_else(|| ConfigError::UnknownRegion(s.to_string()))
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Closed set of PII categories known at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PIIType {
    // us
    SSN,
    PhoneUS,
    DriverLicenseUS,
    PassportUS,
    EIN,
    ITIN,
    // au
    PhoneAU,
    MedicareAU,
    TFN,
    ABN,
    ACN,
    // eu
    IBAN,
    VatEU,
    PhoneEU,
    GermanID,
    FrenchSSN,
    // uk
    NinoUK,
    NhsUK,
    PostcodeUK,
    SortCodeUK,
    // universal
    Email,
    CreditCard,
    IPAddress,
    IPv6Address,
    MACAddress,
    DateOfBirth,
    Phone,
    Address,
    // financial
    BankAccount,
    RoutingNumber,
    SwiftBIC,
    CVV,
    CardExpiry,
    CryptoAddress,
    // healthcare
    PatientID,
    MRN,
    HealthPlanID,
    NPI,
    DEANumber,
    ICDCode,
    CPTCode,
    // biometric
    BiometricID,
    FaceID,
    FingerprintID,
}

impl PIIType {
    pub const ALL: [PIIType; 44] = [
        PIIType::SSN,
        PIIType::PhoneUS,
        PIIType::DriverLicenseUS,
        PIIType::PassportUS,
        PIIType::EIN,
        PIIType::ITIN,
        PIIType::PhoneAU,
        PIIType::MedicareAU,
        PIIType::TFN,
        PIIType::ABN,
        PIIType::ACN,
        PIIType::IBAN,
        PIIType::VatEU,
        PIIType::PhoneEU,
        PIIType::GermanID,
        PIIType::FrenchSSN,
        PIIType::NinoUK,
        PIIType::NhsUK,
        PIIType::PostcodeUK,
        PIIType::SortCodeUK,
        PIIType::Email,
        PIIType::CreditCard,
        PIIType::IPAddress,
        PIIType::IPv6Address,
        PIIType::MACAddress,
        PIIType::DateOfBirth,
        PIIType::Phone,
        PIIType::Address,
        PIIType::BankAccount,
        PIIType::RoutingNumber,
        PIIType::SwiftBIC,
        PIIType::CVV,
        PIIType::CardExpiry,
        PIIType::CryptoAddress,
        PIIType::PatientID,
        PIIType::MRN,
        PIIType::HealthPlanID,
        PIIType::NPI,
        PIIType::DEANumber,
        PIIType::ICDCode,
        PIIType::CPTCode,
        PIIType::BiometricID,
        PIIType::FaceID,
        PIIType::FingerprintID,
    ];

    /// Stable wire name used in receipts and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PIIType::SSN => "SSN",
            PIIType::PhoneUS => "PHONE_US",
            PIIType::DriverLicenseUS => "DRIVER_LICENSE_US",
            PIIType::PassportUS => "PASSPORT_US",
            PIIType::EIN => "EIN",
            PIIType::ITIN => "ITIN",
            PIIType::PhoneAU => "PHONE_AU",
            PIIType::MedicareAU => "MEDICARE_AU",
            PIIType::TFN => "TFN",
            PIIType::ABN => "ABN",
            PIIType::ACN => "ACN",
            PIIType::IBAN => "IBAN",
            PIIType::VatEU => "VAT_EU",
            PIIType::PhoneEU => "PHONE_EU",
            PIIType::GermanID => "GERMAN_ID",
            PIIType::FrenchSSN => "FRENCH_SSN",
            PIIType::NinoUK => "NINO_UK",
            PIIType::NhsUK => "NHS_UK",
            PIIType::PostcodeUK => "POSTCODE_UK",
            PIIType::SortCodeUK => "SORT_CODE_UK",
            PIIType::Email => "EMAIL",
            PIIType::CreditCard => "CREDIT_CARD",
            PIIType::IPAddress => "IP_ADDRESS",
            PIIType::IPv6Address => "IPV6_ADDRESS",
            PIIType::MACAddress => "MAC_ADDRESS",
            PIIType::DateOfBirth => "DATE_OF_BIRTH",
            PIIType::Phone => "PHONE",
            PIIType::Address => "ADDRESS",
            PIIType::BankAccount => "BANK_ACCOUNT",
            PIIType::RoutingNumber => "ROUTING_NUMBER",
            PIIType::SwiftBIC => "SWIFT_BIC",
            PIIType::CVV => "CVV",
            PIIType::CardExpiry => "CARD_EXPIRY",
            PIIType::CryptoAddress => "CRYPTO_ADDRESS",
            PIIType::PatientID => "PATIENT_ID",
            PIIType::MRN => "MRN",
            PIIType::HealthPlanID => "HEALTH_PLAN_ID",
            PIIType::NPI => "NPI",
            PIIType::DEANumber => "DEA_NUMBER",
            PIIType::ICDCode => "ICD_CODE",
            PIIType::CPTCode => "CPT_CODE",
            PIIType::BiometricID => "BIOMETRIC_ID",
            PIIType::FaceID => "FACE_ID",
            PIIType::FingerprintID => "FINGERPRINT_ID",
        }
    }

    /// Placeholder substituted for a validated match of this type.
    pub fn redaction_token(&self) -> &'static str {
        match self {
            PIIType::SSN => "[SSN_REDACTED]",
            PIIType::PhoneUS => "[PHONE_US_REDACTED]",
            PIIType::DriverLicenseUS => "[DL_REDACTED]",
            PIIType::PassportUS => "[PASSPORT_REDACTED]",
            PIIType::EIN => "[EIN_REDACTED]",
            PIIType::ITIN => "[ITIN_REDACTED]",
            PIIType::PhoneAU => "[PHONE_AU_REDACTED]",
            PIIType::MedicareAU => "[MEDICARE_REDACTED]",
            PIIType::TFN => "[TFN_REDACTED]",
            PIIType::ABN => "[ABN_REDACTED]",
            PIIType::ACN => "[ACN_REDACTED]",
            PIIType::IBAN => "[IBAN_REDACTED]",
            PIIType::VatEU => "[VAT_REDACTED]",
            PIIType::PhoneEU => "[PHONE_EU_REDACTED]",
            PIIType::GermanID => "[DE_ID_REDACTED]",
            PIIType::FrenchSSN => "[FR_SSN_REDACTED]",
            PIIType::NinoUK => "[NINO_REDACTED]",
            PIIType::NhsUK => "[NHS_REDACTED]",
            PIIType::PostcodeUK => "[POSTCODE_UK_REDACTED]",
            PIIType::SortCodeUK => "[SORT_CODE_REDACTED]",
            PIIType::Email => "[EMAIL_REDACTED]",
            PIIType::CreditCard => "[CARD_REDACTED]",
            PIIType::IPAddress => "[IP_REDACTED]",
            PIIType::IPv6Address => "[IPV6_REDACTED]",
            PIIType::MACAddress => "[MAC_REDACTED]",
            PIIType::DateOfBirth => "[DOB_REDACTED]",
            PIIType::Phone => "[PHONE_REDACTED]",
            PIIType::Address => "[ADDRESS_REDACTED]",
            PIIType::BankAccount => "[BANK_ACCOUNT_REDACTED]",
            PIIType::RoutingNumber => "[ROUTING_REDACTED]",
            PIIType::SwiftBIC => "[SWIFT_REDACTED]",
            PIIType::CVV => "[CVV_NEVER_STORE]",
            PIIType::CardExpiry => "[EXPIRY_REDACTED]",
            PIIType::CryptoAddress => "[CRYPTO_REDACTED]",
            PIIType::PatientID => "[PATIENT_ID_REDACTED]",
            PIIType::MRN => "[MRN_REDACTED]",
            PIIType::HealthPlanID => "[HEALTH_PLAN_REDACTED]",
            PIIType::NPI => "[NPI_REDACTED]",
            PIIType::DEANumber => "[DEA_REDACTED]",
            PIIType::ICDCode => "[DIAGNOSIS_REDACTED]",
            PIIType::CPTCode => "[PROCEDURE_REDACTED]",
            PIIType::BiometricID => "[BIOMETRIC_REDACTED]",
            PIIType::FaceID => "[FACE_ID_REDACTED]",
            PIIType::FingerprintID => "[FINGERPRINT_REDACTED]",
        }
    }

    /// Human-readable label for listings and reports.
    pub fn description(&self) -> &'static str {
        match self {
            PIIType::SSN => "US Social Security Number",
            PIIType::PhoneUS => "US phone number",
            PIIType::DriverLicenseUS => "US driver license number",
            PIIType::PassportUS => "US passport number",
            PIIType::EIN => "Employer Identification Number",
            PIIType::ITIN => "Individual Taxpayer Identification Number",
            PIIType::PhoneAU => "Australian phone number",
            PIIType::MedicareAU => "Australian Medicare number",
            PIIType::TFN => "Australian Tax File Number",
            PIIType::ABN => "Australian Business Number",
            PIIType::ACN => "Australian Company Number",
            PIIType::IBAN => "International Bank Account Number",
            PIIType::VatEU => "EU VAT number",
            PIIType::PhoneEU => "European phone number",
            PIIType::GermanID => "German ID number (Personalausweis)",
            PIIType::FrenchSSN => "French social security number (NIR)",
            PIIType::NinoUK => "UK National Insurance number",
            PIIType::NhsUK => "UK NHS number",
            PIIType::PostcodeUK => "UK postcode",
            PIIType::SortCodeUK => "UK bank sort code",
            PIIType::Email => "Email address",
            PIIType::CreditCard => "Payment card number (Visa, Mastercard, Amex, Discover)",
            PIIType::IPAddress => "IPv4 address",
            PIIType::IPv6Address => "IPv6 address",
            PIIType::MACAddress => "MAC address",
            PIIType::DateOfBirth => "Labelled date of birth",
            PIIType::Phone => "International phone number",
            PIIType::Address => "Street address",
            PIIType::BankAccount => "Bank account number",
            PIIType::RoutingNumber => "US bank routing number",
            PIIType::SwiftBIC => "SWIFT/BIC code",
            PIIType::CVV => "Card verification value, never stored",
            PIIType::CardExpiry => "Card expiration date",
            PIIType::CryptoAddress => "Cryptocurrency address (BTC, ETH)",
            PIIType::PatientID => "Patient identifier",
            PIIType::MRN => "Medical record number",
            PIIType::HealthPlanID => "Health plan beneficiary ID",
            PIIType::NPI => "National Provider Identifier",
            PIIType::DEANumber => "DEA registration number",
            PIIType::ICDCode => "ICD-10 diagnosis code",
            PIIType::CPTCode => "CPT procedure code",
            PIIType::BiometricID => "Biometric identifier",
            PIIType::FaceID => "Facial recognition identifier",
            PIIType::FingerprintID => "Fingerprint identifier",
        }
    }

    /// Sensitive authentication data that PCI DSS forbids retaining after
    /// authorization.
    pub fn pci_dss_critical(&self) -> bool {
        matches!(self, PIIType::CVV)
    }

    /// Region whose table defines this type.
    pub fn region(&self) -> Region {
        match self {
            PIIType::SSN
            | PIIType::PhoneUS
            | PIIType::DriverLicenseUS
            | PIIType::PassportUS
            | PIIType::EIN
            | PIIType::ITIN => Region::Us,
            PIIType::PhoneAU
            | PIIType::MedicareAU
            | PIIType::TFN
            | PIIType::ABN
            | PIIType::ACN => Region::Au,
            PIIType::IBAN
            | PIIType::VatEU
            | PIIType::PhoneEU
            | PIIType::GermanID
            | PIIType::FrenchSSN => Region::Eu,
            PIIType::NinoUK | PIIType::NhsUK | PIIType::PostcodeUK | PIIType::SortCodeUK => {
                Region::Uk
            }
            PIIType::Email
            | PIIType::CreditCard
            | PIIType::IPAddress
            | PIIType::IPv6Address
            | PIIType::MACAddress
            | PIIType::DateOfBirth
            | PIIType::Phone
            | PIIType::Address => Region::Universal,
            PIIType::BankAccount
            | PIIType::RoutingNumber
            | PIIType::SwiftBIC
            | PIIType::CVV
            | PIIType::CardExpiry
            | PIIType::CryptoAddress => Region::Financial,
            PIIType::PatientID
            | PIIType::MRN
            | PIIType::HealthPlanID
            | PIIType::NPI
            | PIIType::DEANumber
            | PIIType::ICDCode
            | PIIType::CPTCode => Region::Healthcare,
            PIIType::BiometricID | PIIType::FaceID | PIIType::FingerprintID => Region::Biometric,
        }
    }

    pub fn from_name(name: &str) -> Option<PIIType> {
        PIIType::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for PIIType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a match was classified as: a built-in type or a caller-supplied
/// custom pattern (stored by its upper-cased name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Builtin(PIIType),
    Custom(String),
}

impl MatchKind {
    pub fn name(&self) -> &str {
        match self {
            MatchKind::Builtin(t) => t.name(),
            MatchKind::Custom(name) => name,
        }
    }

    pub fn redaction_token(&self) -> Cow<'static, str> {
        match self {
            MatchKind::Builtin(t) => Cow::Borrowed(t.redaction_token()),
            MatchKind::Custom(name) => Cow::Owned(format!("[{}_REDACTED]", name)),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MatchKind::Builtin(t) => t.description(),
            MatchKind::Custom(_) => "Custom pattern",
        }
    }
}

impl From<PIIType> for MatchKind {
    fn from(t: PIIType) -> Self {
        MatchKind::Builtin(t)
    }
}

impl PartialEq<PIIType> for MatchKind {
    fn eq(&self, other: &PIIType) -> bool {
        matches!(self, MatchKind::Builtin(t) if t == other)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MatchKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for MatchKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match PIIType::from_name(&s) {
            Some(t) => MatchKind::Builtin(t),
            None => MatchKind::Custom(s),
        })
    }
}

/// One validated candidate found by a scan.
///
/// Offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PIIMatch {
    pub kind: MatchKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
    /// `None` for custom patterns.
    pub region: Option<Region>,
}

impl PIIMatch {
    /// Span length in bytes; zero for an inverted span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &PIIMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Aggregate of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct PIIResult {
    pub has_pii: bool,
    /// Distinct kinds among all validated matches, in first-seen order.
    pub types: Vec<MatchKind>,
    pub count: usize,
    /// Every validated match, ordered by start offset.
    pub matches: Vec<PIIMatch>,
    pub redacted_text: String,
    /// Matches actually substituted after overlap resolution.
    pub applied: Vec<PIIMatch>,
}

impl PIIResult {
    pub fn empty(text: &str) -> Self {
        Self {
            has_pii: false,
            types: Vec::new(),
            count: 0,
            matches: Vec::new(),
            redacted_text: text.to_string(),
            applied: Vec::new(),
        }
    }

    /// Distinct kinds among the applied matches.
    pub fn applied_types(&self) -> Vec<MatchKind> {
        distinct_kinds(&self.applied)
    }

    pub fn contains_type(&self, pii_type: PIIType) -> bool {
        self.types.iter().any(|k| *k == pii_type)
    }

    pub fn count_of(&self, pii_type: PIIType) -> usize {
        self.matches.iter().filter(|m| m.kind == pii_type).count()
    }
}

pub(crate) fn distinct_kinds(matches: &[PIIMatch]) -> Vec<MatchKind> {
    let mut kinds: Vec<MatchKind> = Vec::new();
    for m in matches {
        if !kinds.contains(&m.kind) {
            kinds.push(m.kind.clone());
        }
    }
    kinds
}
