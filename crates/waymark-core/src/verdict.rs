//! Reconciliation verdicts.
//!
//! A verdict is the recommended next editing action for one waypoint/node
//! pair. The classifier applies a fixed rule order; the categories overlap,
//! so the order itself decides the outcome:
//!
//! ```text
//! 1. Info    e == o  and |matches| == o
//! 2. Edit    |matches| >= 1 and |only_expected| >= 1   -> only_expected
//! 3. Review  |matches| == e and |only_observed| > 0    -> only_observed
//! 4. NoAction
//! ```
//!
//! `o` and `e` are the sizes of the observed and expected sets. A node that
//! shares nothing with a non-empty schema always lands on `NoAction`.

use std::fmt;

use crate::diff::compare;
use crate::tag_set::TagSet;

/// Recommended action for a waypoint/node pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "verdict", rename_all = "snake_case"))]
pub enum Verdict {
    /// The node already carries exactly the expected tags
    Info,
    /// The node should gain these tags
    Edit { missing: TagSet },
    /// The node carries these tags beyond the schema and should be reviewed
    Review { extra: TagSet },
    /// No node corresponds; one should be created with these tags
    Create { tags: TagSet },
    /// Nothing conclusive for this node
    NoAction,
}

/// Discriminant of a [`Verdict`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerdictKind {
    Info,
    Edit,
    Review,
    Create,
    NoAction,
}

impl VerdictKind {
    /// Confidence that the map already encodes the feature, used to pick
    /// between candidate nodes. Lower is more confident; `None` means the
    /// kind never wins a candidate selection.
    pub const fn selection_rank(self) -> Option<u8> {
        match self {
            VerdictKind::Info => Some(0),
            VerdictKind::Review => Some(1),
            VerdictKind::Edit => Some(2),
            VerdictKind::Create | VerdictKind::NoAction => None,
        }
    }

    /// Short lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            VerdictKind::Info => "info",
            VerdictKind::Edit => "edit",
            VerdictKind::Review => "review",
            VerdictKind::Create => "create",
            VerdictKind::NoAction => "no_action",
        }
    }
}

impl fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Verdict {
    /// The verdict's kind.
    pub fn kind(&self) -> VerdictKind {
        match self {
            Verdict::Info => VerdictKind::Info,
            Verdict::Edit { .. } => VerdictKind::Edit,
            Verdict::Review { .. } => VerdictKind::Review,
            Verdict::Create { .. } => VerdictKind::Create,
            Verdict::NoAction => VerdictKind::NoAction,
        }
    }

    /// Whether the verdict recommends something other than `NoAction`.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Verdict::NoAction)
    }

    /// The tags carried by the verdict, if its kind has any.
    pub fn tags(&self) -> Option<&TagSet> {
        match self {
            Verdict::Edit { missing } => Some(missing),
            Verdict::Review { extra } => Some(extra),
            Verdict::Create { tags } => Some(tags),
            Verdict::Info | Verdict::NoAction => None,
        }
    }
}

/// Classify an observed node's tags against the expected schema tags.
///
/// Never fails: any pair of tag sets maps to exactly one verdict.
///
/// # Examples
///
/// ```
/// use waymark_core::{classify, TagSet, Verdict};
///
/// let taxi = TagSet::from([("amenity", "taxi")]);
/// assert_eq!(classify(&taxi, &taxi), Verdict::Info);
///
/// let extra = TagSet::from([("a", "1")]);
/// assert_eq!(classify(&extra, &TagSet::new()), Verdict::Review { extra: extra.clone() });
/// ```
pub fn classify(observed: &TagSet, expected: &TagSet) -> Verdict {
    let o = observed.len();
    let e = expected.len();
    let diff = compare(observed, expected);
    let matched = diff.matches.len();

    if e == o && matched == o {
        return Verdict::Info;
    }

    if matched >= 1 && !diff.only_expected.is_empty() {
        return Verdict::Edit {
            missing: diff.only_expected,
        };
    }

    if matched == e && !diff.only_observed.is_empty() {
        return Verdict::Review {
            extra: diff.only_observed,
        };
    }

    Verdict::NoAction
}
