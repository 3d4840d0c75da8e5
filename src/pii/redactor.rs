// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Single-pass redaction with overlap resolution.

use std::borrow::Cow;

use super::pii_types::PIIMatch;

/// Replace every match span with its type token.
///
/// Matches are applied earliest start first, longest first on equal starts,
/// input order on full ties. A match overlapping one already applied is
/// dropped and left out of the returned applied list. Matches whose offsets
/// do not fit `text` are ignored.
pub fn redact(text: &str, matches: &[PIIMatch]) -> (String, Vec<PIIMatch>) {
    redact_with(text, matches, |m| m.kind.redaction_token())
}

/// Like [`redact`], with a caller-chosen replacement per match.
pub fn redact_with<'a, F>(text: &str, matches: &[PIIMatch], mut token: F) -> (String, Vec<PIIMatch>)
where
    F: FnMut(&PIIMatch) -> Cow<'a, str>,
{
    if matches.is_empty() {
        return (text.to_string(), Vec::new());
    }

    let mut ordered: Vec<&PIIMatch> = matches.iter().filter(|m| fits(text, m)).collect();
    ordered.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.len().cmp(&a.len())));

    let mut result = String::with_capacity(text.len());
    let mut applied = Vec::new();
    let mut cursor = 0;

    for m in ordered {
        if m.start < cursor {
            continue;
        }
        result.push_str(&text[cursor..m.start]);
        result.push_str(&token(m));
        cursor = m.end;
        applied.push(m.clone());
    }

    result.push_str(&text[cursor..]);
    (result, applied)
}

fn fits(text: &str, m: &PIIMatch) -> bool {
    m.start < m.end
        && m.end <= text.len()
        && text.is_char_boundary(m.start)
        && text.is_char_boundary(m.end)
}

#[cfg(test)]
#[path = "redactor_tests.rs"]
mod tests;
