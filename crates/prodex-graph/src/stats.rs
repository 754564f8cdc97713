//! Expected vs resolved specifier bookkeeping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Specifiers seen vs specifiers mapped to an existing file.
///
/// `resolved` is always a subset of `expected`: a specifier is only added to
/// `resolved` after it was added to `expected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveStats {
    pub expected: BTreeSet<String>,
    pub resolved: BTreeSet<String>,
}

impl ResolveStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-excluded specifier.
    pub fn expect(&mut self, specifier: impl Into<String>) {
        self.expected.insert(specifier.into());
    }

    /// Record a specifier that resolved. Also records it as expected.
    pub fn resolve(&mut self, specifier: impl Into<String>) {
        let specifier = specifier.into();
        self.expected.insert(specifier.clone());
        self.resolved.insert(specifier);
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: &ResolveStats) {
        self.expected.extend(other.expected.iter().cloned());
        self.resolved.extend(other.resolved.iter().cloned());
    }

    /// Specifiers seen but never resolved.
    pub fn missing(&self) -> BTreeSet<&str> {
        self.expected
            .difference(&self.resolved)
            .map(String::as_str)
            .collect()
    }

    pub fn expected_count(&self) -> usize {
        self.expected.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn missing_count(&self) -> usize {
        self.expected_count() - self.resolved_count()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_implies_expect() {
        let mut stats = ResolveStats::new();
        stats.resolve("./a");
        stats.expect("./b");

        assert!(stats.resolved.is_subset(&stats.expected));
        assert_eq!(stats.expected_count(), 2);
        assert_eq!(stats.resolved_count(), 1);
        assert_eq!(stats.missing().into_iter().collect::<Vec<_>>(), vec!["./b"]);
        assert_eq!(stats.missing_count(), 1);
    }

    #[test]
    fn merge_is_set_union() {
        let mut left = ResolveStats::new();
        left.resolve("./a");
        left.expect("./b");

        let mut right = ResolveStats::new();
        right.resolve("./b");
        right.expect("./c");

        left.merge(&right);
        assert_eq!(left.expected_count(), 3);
        assert_eq!(left.resolved_count(), 2);
        assert_eq!(left.missing().into_iter().collect::<Vec<_>>(), vec!["./c"]);
    }
}
