//! Tag set comparison.
//!
//! Splits two tag sets into the pairs they share and the pairs each holds
//! alone. A key present on both sides with different values counts as
//! missing from both: the observed pair lands in `only_observed` and the
//! expected pair in `only_expected`.

use crate::tag_set::TagSet;

/// Result of comparing an observed tag set against an expected one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Pairs present, with identical values, on both sides
    pub matches: TagSet,
    /// Observed pairs with no identical expected pair
    pub only_observed: TagSet,
    /// Expected pairs with no identical observed pair
    pub only_expected: TagSet,
}

impl TagDiff {
    /// Whether both sides hold exactly the same pairs.
    pub fn is_identical(&self) -> bool {
        self.only_observed.is_empty() && self.only_expected.is_empty()
    }
}

/// Compare `observed` tags against `expected` tags.
///
/// Runs in a single pass over each side with keyed lookups into the other.
///
/// # Examples
///
/// ```
/// use waymark_core::{compare, TagSet};
///
/// let observed = TagSet::from([("crossing", "traffic_signals"), ("highway", "traffic_signals")]);
/// let expected = TagSet::from([("crossing", "traffic_signals"), ("traffic_signals:sound", "walk;yes")]);
///
/// let diff = compare(&observed, &expected);
/// assert_eq!(diff.matches, TagSet::from([("crossing", "traffic_signals")]));
/// assert_eq!(diff.only_observed, TagSet::from([("highway", "traffic_signals")]));
/// assert_eq!(diff.only_expected, TagSet::from([("traffic_signals:sound", "walk;yes")]));
/// ```
pub fn compare(observed: &TagSet, expected: &TagSet) -> TagDiff {
    let mut diff = TagDiff::default();

    for (key, value) in observed {
        if expected.contains(key, value) {
            diff.matches.insert(key, value);
        } else {
            diff.only_observed.insert(key, value);
        }
    }

    diff.only_expected = expected
        .iter()
        .filter(|(key, value)| !observed.contains(key, value))
        .collect();

    diff
}
