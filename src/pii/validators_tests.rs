//! Tests for checksum and structural validators.

use super::*;

#[test]
fn test_normalize_strips_separators() {
    assert_eq!(normalize("123-45 6789"), "123456789");
    // full-width digits fold to ASCII
    assert_eq!(normalize("\u{FF11}\u{FF12}\u{FF13}"), "123");
}

#[test]
fn test_ssn_reserved_ranges() {
    assert!(validate_ssn("123-45-6789"));
    assert!(validate_ssn("123 45 6789"));
    assert!(!validate_ssn("000-00-0000"));
    assert!(!validate_ssn("000-12-3456"));
    assert!(!validate_ssn("666-12-3456"));
    assert!(!validate_ssn("900-12-3456"));
    assert!(!validate_ssn("123-00-4567"));
    assert!(!validate_ssn("123-45-0000"));
    assert!(!validate_ssn("555-55-5555"));
    assert!(!validate_ssn("12-345-678"));
}

#[test]
fn test_itin_range() {
    assert!(validate_itin("912-34-5678"));
    assert!(validate_itin("988-12-3456"));
    assert!(!validate_itin("909-12-3456"));
    assert!(!validate_itin("989-12-3456"));
    assert!(!validate_itin("812-34-5678"));
}

#[test]
fn test_medicare_leading_digit() {
    assert!(validate_medicare("2123 45678 1"));
    assert!(validate_medicare("6123456781"));
    assert!(!validate_medicare("1123456781"));
    assert!(!validate_medicare("7123456781"));
    assert!(!validate_medicare("212345678"));
}

#[test]
fn test_tfn_checksum() {
    assert!(validate_tfn("123 456 782"));
    assert!(validate_tfn("123-456-782"));
    assert!(validate_tfn("876543210"));
    assert!(!validate_tfn("123 456 789"));
    assert!(!validate_tfn("000 000 000"));
    assert!(!validate_tfn("111 111 111"));
}

#[test]
fn test_abn_checksum() {
    assert!(validate_abn("51 824 753 556"));
    assert!(validate_abn("53004085616"));
    assert!(!validate_abn("12 345 678 901"));
    assert!(!validate_abn("00 000 000 000"));
}

#[test]
fn test_iban_mod97() {
    assert!(validate_iban("DE89370400440532013000"));
    assert!(validate_iban("GB29 NWBK 6016 1331 9268 19"));
    assert!(validate_iban("NL91ABNA0417164300"));
    assert!(validate_iban("BE68539007547034"));
    assert!(!validate_iban("DE00000000000000000000"));
    assert!(!validate_iban("DE8"));
    assert!(!validate_iban("DE89 3704 0044 0532 0130 0!"));
}

#[test]
fn test_nhs_checksum() {
    assert!(validate_nhs("943 476 5919"));
    assert!(validate_nhs("943-476-5919"));
    assert!(!validate_nhs("123 456 7890"));
    assert!(!validate_nhs("000 000 0000"));
    assert!(!validate_nhs("111 111 1111"));
    assert!(!validate_nhs("943 476 591"));
}

#[test]
fn test_nino_prefixes() {
    assert!(validate_nino("AB 12 34 56 C"));
    assert!(validate_nino("ab123456c"));
    assert!(validate_nino("JG-10-20-30-A"));
    assert!(!validate_nino("BG 12 34 56 A"));
    assert!(!validate_nino("GB 12 34 56 A"));
    assert!(!validate_nino("DA 12 34 56 A"));
    assert!(!validate_nino("AO 12 34 56 A"));
    assert!(!validate_nino("AB 12 34 56 E"));
}

#[test]
fn test_credit_card_luhn() {
    assert!(validate_credit_card("4111-1111-1111-1111"));
    assert!(validate_credit_card("4532 0151 1283 0366"));
    assert!(validate_credit_card("378282246310005"));
    assert!(!validate_credit_card("1234-5678-9012-3456"));
    assert!(!validate_credit_card("0000 0000 0000 0000"));
    assert!(!validate_credit_card("4111"));
}

#[test]
fn test_luhn_check_digits() {
    assert!(luhn_check(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 3]));
    assert!(!luhn_check(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 4]));
}

#[test]
fn test_routing_checksum() {
    assert!(validate_routing("021000021"));
    assert!(validate_routing("121000358"));
    assert!(validate_routing("091000019"));
    assert!(!validate_routing("123456789"));
    assert!(!validate_routing("000000000"));
}

#[test]
fn test_npi_prefix_luhn() {
    assert!(validate_npi("1234567893"));
    assert!(!validate_npi("1234567890"));
    assert!(!validate_npi("123456789"));
}

#[test]
fn test_dea_checksum() {
    assert!(validate_dea("AB1234563"));
    assert!(validate_dea("ab1234563"));
    assert!(!validate_dea("AB1234567"));
    assert!(!validate_dea("AB0000000"));
    assert!(!validate_dea("1B1234563"));
}

#[test]
fn test_validators_never_panic_on_garbage() {
    let inputs = ["", "-", "   ", "ÄÖÜ", "\u{0000}", "12\u{00e9}34", "🦀🦀🦀🦀🦀🦀🦀🦀🦀"];
    let validators: [Validator; 12] = [
        validate_ssn,
        validate_itin,
        validate_medicare,
        validate_tfn,
        validate_abn,
        validate_iban,
        validate_nhs,
        validate_nino,
        validate_credit_card,
        validate_routing,
        validate_npi,
        validate_dea,
    ];
    for v in validators {
        for input in inputs {
            assert!(!v(input), "garbage {:?} should be rejected", input);
        }
    }
}
