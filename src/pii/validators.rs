// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Checksum and structural validators.
//!
//! Each validator sees only the raw matched characters. Input is NFKC
//! normalized and stripped of space/dash separators first, so full-width
//! digits validate exactly like ASCII digits. Malformed input is a
//! rejection, never an error.

use unicode_normalization::UnicodeNormalization;

/// Validator signature stored in the pattern registry.
pub type Validator = fn(&str) -> bool;

/// NFKC-normalize and remove whitespace and dash separators.
pub fn normalize(raw: &str) -> String {
    raw.nfkc().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

fn ascii_digits(s: &str) -> Option<Vec<u32>> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.bytes().map(|b| (b - b'0') as u32).collect())
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Luhn algorithm over a digit slice.
pub fn luhn_check(digits: &[u32]) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for &digit in digits.iter().rev() {
        let mut d = digit;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// US SSN: 9 digits, no 000/666/9xx area, no 00 group, no 0000 serial,
/// not a single repeated digit.
pub fn validate_ssn(raw: &str) -> bool {
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 9 || all_same(&d) {
        return false;
    }
    let area = d[0] * 100 + d[1] * 10 + d[2];
    let group = d[3] * 10 + d[4];
    let serial = d[5] * 1000 + d[6] * 100 + d[7] * 10 + d[8];
    area != 0 && area != 666 && area < 900 && group != 0 && serial != 0
}

/// US ITIN: area in the 900-988 range, 909 excluded.
pub fn validate_itin(raw: &str) -> bool {
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 9 {
        return false;
    }
    let area = d[0] * 100 + d[1] * 10 + d[2];
    (900..=988).contains(&area) && area != 909
}

/// Australian Medicare: 10 digits, card issue ranges start with 2-6.
pub fn validate_medicare(raw: &str) -> bool {
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    d.len() == 10 && (2..=6).contains(&d[0])
}

/// Australian Tax File Number, weighted modulus 11.
pub fn validate_tfn(raw: &str) -> bool {
    const WEIGHTS: [u32; 9] = [1, 4, 3, 7, 5, 8, 6, 9, 10];
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 9 || all_same(&d) {
        return false;
    }
    let total: u32 = d.iter().zip(WEIGHTS).map(|(d, w)| d * w).sum();
    total % 11 == 0
}

/// Australian Business Number, weighted modulus 89 after subtracting one
/// from the leading digit.
pub fn validate_abn(raw: &str) -> bool {
    const WEIGHTS: [i64; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 11 || all_same(&d) {
        return false;
    }
    let total: i64 = d
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let v = if i == 0 { v as i64 - 1 } else { v as i64 };
            v * WEIGHTS[i]
        })
        .sum();
    total % 89 == 0
}

/// IBAN, ISO 13616 MOD 97-10.
pub fn validate_iban(raw: &str) -> bool {
    let iban = normalize(raw).to_ascii_uppercase();
    if !(15..=34).contains(&iban.len()) || !iban.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    let (head, tail) = iban.split_at(4);
    let mut remainder = 0u32;
    for b in tail.bytes().chain(head.bytes()) {
        let value = if b.is_ascii_digit() {
            (b - b'0') as u32
        } else {
            (b - b'A') as u32 + 10
        };
        // letters expand to two digits
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder == 1
}

/// UK NHS number, modulus 11 check digit. A computed check of 10 is never
/// issued.
pub fn validate_nhs(raw: &str) -> bool {
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 10 || all_same(&d) {
        return false;
    }
    let total: u32 = d[..9].iter().enumerate().map(|(i, v)| v * (10 - i as u32)).sum();
    let check = match 11 - (total % 11) {
        11 => 0,
        10 => return false,
        c => c,
    };
    d[9] == check
}

/// UK National Insurance number prefix rules.
pub fn validate_nino(raw: &str) -> bool {
    const INVALID_PREFIXES: [&str; 7] = ["BG", "GB", "KN", "NK", "NT", "TN", "ZZ"];
    let clean = normalize(raw).to_ascii_uppercase();
    if clean.len() != 9 || !clean.is_ascii() {
        return false;
    }
    let bytes = clean.as_bytes();
    if INVALID_PREFIXES.contains(&&clean[..2]) {
        return false;
    }
    if b"DFIQUV".contains(&bytes[0]) || b"DFIOQUV".contains(&bytes[1]) {
        return false;
    }
    bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[2..8].iter().all(u8::is_ascii_digit)
        && (b'A'..=b'D').contains(&bytes[8])
}

/// Payment card: 13-19 digits, not one repeated digit, Luhn valid.
pub fn validate_credit_card(raw: &str) -> bool {
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    (13..=19).contains(&d.len()) && !all_same(&d) && luhn_check(&d)
}

/// ABA routing number, 3-7-1 weighted modulus 10.
pub fn validate_routing(raw: &str) -> bool {
    const WEIGHTS: [u32; 9] = [3, 7, 1, 3, 7, 1, 3, 7, 1];
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 9 || d.iter().all(|&v| v == 0) {
        return false;
    }
    let total: u32 = d.iter().zip(WEIGHTS).map(|(d, w)| d * w).sum();
    total % 10 == 0
}

/// National Provider Identifier: Luhn over the number prefixed with 80840.
pub fn validate_npi(raw: &str) -> bool {
    let Some(d) = ascii_digits(&normalize(raw)) else { return false };
    if d.len() != 10 || all_same(&d) {
        return false;
    }
    let mut full = vec![8, 0, 8, 4, 0];
    full.extend_from_slice(&d);
    luhn_check(&full)
}

/// DEA registration: two letters-or-letter-digit, seven digits, last one a
/// check digit over the first six.
pub fn validate_dea(raw: &str) -> bool {
    let clean = normalize(raw).to_ascii_uppercase();
    if clean.len() != 9 || !clean.is_ascii() {
        return false;
    }
    let bytes = clean.as_bytes();
    if !bytes[0].is_ascii_alphabetic() || !bytes[1].is_ascii_alphanumeric() {
        return false;
    }
    let Some(d) = ascii_digits(&clean[2..]) else { return false };
    if d.iter().all(|&v| v == 0) {
        return false;
    }
    let odd = d[0] + d[2] + d[4];
    let even = d[1] + d[3] + d[5];
    (odd + even * 2) % 10 == d[6]
}

#[cfg(test)]
#[path = "validators_tests.rs"]
mod tests;
