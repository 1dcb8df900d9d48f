//! Candidate selection: one verdict per waypoint.
//!
//! Every node near a waypoint is classified against the waypoint's schema
//! tags. `NoAction` verdicts are dropped; of the rest, the first `Info` in
//! candidate order wins, else the first `Review`, else the first `Edit`.
//! When nothing is actionable the waypoint is presumed unmapped and gets a
//! `Create` carrying the schema tags.

use tracing::trace;

use crate::candidate::CandidateNode;
use crate::schema::Schema;
use crate::verdict::{classify, Verdict};

/// The single action chosen for a waypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// The matched node, `None` for `Create`
    pub node: Option<CandidateNode>,
    /// The recommended action
    pub verdict: Verdict,
}

impl Selection {
    fn create(verdict: Verdict) -> Self {
        Self {
            node: None,
            verdict,
        }
    }
}

/// Pick the action for `name` among `candidates`.
///
/// Returns `None` when the schema has no entry for `name`: the waypoint is
/// out of scope and produces no verdict at all.
///
/// # Examples
///
/// ```
/// use waymark_core::{select_for_waypoint, CandidateNode, NodeId, Schema, TagSet, Verdict};
///
/// let schema = Schema::new(None, [("taxi", TagSet::from([("amenity", "taxi")]))]);
/// let nodes = vec![
///     CandidateNode::new(1, TagSet::from([("amenity", "bank")])),
///     CandidateNode::new(2, TagSet::from([("amenity", "taxi")])),
/// ];
///
/// let selection = select_for_waypoint("taxi", &schema, &nodes).unwrap();
/// assert_eq!(selection.verdict, Verdict::Info);
/// assert_eq!(selection.node.unwrap().id, NodeId(2));
///
/// assert!(select_for_waypoint("unknown", &schema, &nodes).is_none());
/// ```
pub fn select_for_waypoint(
    name: &str,
    schema: &Schema,
    candidates: &[CandidateNode],
) -> Option<Selection> {
    let expected = schema.get(name)?;

    // (rank, candidate index, verdict)
    let mut best: Option<(u8, usize, Verdict)> = None;

    for (index, node) in candidates.iter().enumerate() {
        let verdict = classify(&node.tags, expected);
        trace!(waypoint = name, node = %node.id, kind = %verdict.kind(), "classified candidate");

        let Some(rank) = verdict.kind().selection_rank() else {
            continue;
        };

        if best.as_ref().map_or(true, |(best_rank, _, _)| rank < *best_rank) {
            best = Some((rank, index, verdict));
            if rank == 0 {
                break;
            }
        }
    }

    Some(match best {
        Some((_, index, verdict)) => Selection {
            node: Some(candidates[index].clone()),
            verdict,
        },
        None => Selection::create(Verdict::Create {
            tags: expected.clone(),
        }),
    })
}
