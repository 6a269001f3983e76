//! Prefixed sequence identifiers (`<PREFIX>-<number>`, e.g. `AST-1001`).
//!
//! Records in the ledger are keyed by human-readable identifiers rather than
//! UUIDs. New identifiers are derived from the highest numeric suffix already
//! in use for a prefix.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// First number handed out for a prefix with no parseable identifiers.
pub const DEFAULT_SEQUENCE_START: u64 = 1001;

/// A parsed `<PREFIX>-<number>` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SequenceId {
    prefix: String,
    number: u64,
}

impl SequenceId {
    pub fn new(prefix: impl Into<String>, number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            number,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// The identifier following this one in the same sequence.
    pub fn successor(&self) -> Self {
        Self::new(self.prefix.clone(), self.number.saturating_add(1))
    }

    /// Numeric suffix of `id` when it belongs to `prefix`.
    ///
    /// Returns `None` for other prefixes and for malformed suffixes
    /// (empty, non-digit, overflowing).
    pub fn suffix_for(prefix: &str, id: &str) -> Option<u64> {
        let rest = id.strip_prefix(prefix)?.strip_prefix('-')?;
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest.parse().ok()
    }
}

impl core::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.prefix, self.number)
    }
}

impl FromStr for SequenceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, _) = s
            .rsplit_once('-')
            .ok_or_else(|| DomainError::invalid_id(format!("SequenceId: missing '-' in {s:?}")))?;
        if prefix.is_empty() {
            return Err(DomainError::invalid_id(format!("SequenceId: empty prefix in {s:?}")));
        }
        let number = Self::suffix_for(prefix, s)
            .ok_or_else(|| DomainError::invalid_id(format!("SequenceId: bad number in {s:?}")))?;
        Ok(Self::new(prefix, number))
    }
}

impl TryFrom<String> for SequenceId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SequenceId> for String {
    fn from(value: SequenceId) -> Self {
        value.to_string()
    }
}

/// Next identifier for `prefix` given the identifiers already in use.
///
/// Scans `existing` for ids of the form `<prefix>-<digits>` and returns
/// `<prefix>-(max + 1)`, or `<prefix>-1001` when nothing matches. Ids with
/// other prefixes or malformed suffixes are ignored.
pub fn next_sequence_id<'a, I>(prefix: &str, existing: I) -> SequenceId
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .filter_map(|id| SequenceId::suffix_for(prefix, id))
        .max()
        .map(|max| SequenceId::new(prefix, max).successor())
        .unwrap_or_else(|| SequenceId::new(prefix, DEFAULT_SEQUENCE_START))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_id_follows_highest_suffix_for_prefix() {
        let existing = ["AST-1001", "AST-1005", "LIA-2001"];
        assert_eq!(next_sequence_id("AST", existing).to_string(), "AST-1006");
        assert_eq!(next_sequence_id("LIA", existing).to_string(), "LIA-2002");
    }

    #[test]
    fn next_id_defaults_when_prefix_unused() {
        let existing = ["AST-1001", "AST-1005", "LIA-2001"];
        assert_eq!(next_sequence_id("EQT", existing).to_string(), "EQT-1001");
        assert_eq!(next_sequence_id("JRN", []).to_string(), "JRN-1001");
    }

    #[test]
    fn malformed_suffixes_are_ignored() {
        let existing = ["JRN-abc", "JRN-", "JRN-12x", "JRN1007", "JRN-1003", "XJRN-9999"];
        assert_eq!(next_sequence_id("JRN", existing).to_string(), "JRN-1004");

        let only_bad = ["JRN-abc", "JRN--5"];
        assert_eq!(next_sequence_id("JRN", only_bad).to_string(), "JRN-1001");
    }

    #[test]
    fn prefix_match_is_exact() {
        // "AS-..." must not count towards "AST".
        let existing = ["AS-5000", "ASTX-7000"];
        assert_eq!(next_sequence_id("AST", existing).to_string(), "AST-1001");
    }

    #[test]
    fn parse_and_display() {
        let id: SequenceId = "EXP-1042".parse().unwrap();
        assert_eq!(id.prefix(), "EXP");
        assert_eq!(id.number(), 1042);
        assert_eq!(id.to_string(), "EXP-1042");

        assert!("EXP".parse::<SequenceId>().is_err());
        assert!("-1042".parse::<SequenceId>().is_err());
        assert!("EXP-10a".parse::<SequenceId>().is_err());
    }

    proptest! {
        /// Property: the derived id is strictly greater than every parseable id
        /// already in use for the same prefix.
        #[test]
        fn next_id_exceeds_all_existing(numbers in prop::collection::vec(0u64..1_000_000u64, 0..20)) {
            let ids: Vec<String> = numbers.iter().map(|n| format!("AST-{n}")).collect();
            let next = next_sequence_id("AST", ids.iter().map(String::as_str));

            prop_assert_eq!(next.prefix(), "AST");
            for n in &numbers {
                prop_assert!(next.number() > *n);
            }
            if numbers.is_empty() {
                prop_assert_eq!(next.number(), DEFAULT_SEQUENCE_START);
            }
        }
    }
}
