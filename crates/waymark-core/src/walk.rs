//! Trace walking: one reconciliation outcome per waypoint.
//!
//! [`TraceWalker`] is a lazy iterator. Each call to `next` looks up the
//! nodes around one waypoint and runs candidate selection; nothing is
//! fetched ahead of the consumer. Waypoints without a schema entry are
//! reported as [`Outcome::Skipped`] and never reach the lookup.

use tracing::{debug, warn};

use crate::candidate::CandidateNode;
use crate::error::LookupError;
use crate::geo::Coordinate;
use crate::schema::Schema;
use crate::select::{select_for_waypoint, Selection};
use crate::verdict::VerdictKind;
use crate::waypoint::Waypoint;

/// Source of map nodes around a position.
///
/// Implementations own their timeouts and retries; whatever they return is
/// treated as the complete candidate set.
pub trait NodeLookup {
    /// Nodes within `radius_m` meters of `at`, in the order candidates
    /// should be considered.
    fn nearby(&self, at: Coordinate, radius_m: f64) -> Result<Vec<CandidateNode>, LookupError>;
}

impl<F> NodeLookup for F
where
    F: Fn(Coordinate, f64) -> Result<Vec<CandidateNode>, LookupError>,
{
    fn nearby(&self, at: Coordinate, radius_m: f64) -> Result<Vec<CandidateNode>, LookupError> {
        self(at, radius_m)
    }
}

/// What happened to one waypoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No schema entry for the waypoint's name
    Skipped,
    /// The action chosen for the waypoint
    Resolved(Selection),
    /// The node lookup failed for this waypoint
    Failed(LookupError),
}

impl Outcome {
    /// Verdict kind for resolved waypoints.
    pub fn verdict_kind(&self) -> Option<VerdictKind> {
        match self {
            Outcome::Resolved(selection) => Some(selection.verdict.kind()),
            Outcome::Skipped | Outcome::Failed(_) => None,
        }
    }
}

/// A waypoint paired with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkEntry {
    pub waypoint: Waypoint,
    pub outcome: Outcome,
}

/// Resolve a single waypoint: skip, look up and select.
///
/// The lookup runs only when the schema covers the waypoint.
pub fn resolve_waypoint<L>(
    waypoint: &Waypoint,
    schema: &Schema,
    lookup: &L,
    radius_m: f64,
) -> Outcome
where
    L: NodeLookup + ?Sized,
{
    if !schema.contains(&waypoint.name) {
        debug!(waypoint = %waypoint.name, "no schema entry, skipping");
        return Outcome::Skipped;
    }

    let candidates = match lookup.nearby(waypoint.position, radius_m) {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(waypoint = %waypoint.name, error = %e, "node lookup failed");
            return Outcome::Failed(e);
        }
    };

    match select_for_waypoint(&waypoint.name, schema, &candidates) {
        Some(selection) => {
            debug!(
                waypoint = %waypoint.name,
                candidates = candidates.len(),
                verdict = %selection.verdict.kind(),
                "waypoint resolved"
            );
            Outcome::Resolved(selection)
        }
        None => Outcome::Skipped,
    }
}

/// Lazy iterator of [`WalkEntry`] over a trace's waypoints, in trace order.
pub struct TraceWalker<'a, L: ?Sized> {
    waypoints: &'a [Waypoint],
    schema: &'a Schema,
    lookup: &'a L,
    radius_m: f64,
    cursor: usize,
}

/// Walk `waypoints`, resolving each against `schema` with nodes from
/// `lookup` within `radius_m` meters.
pub fn walk<'a, L>(
    waypoints: &'a [Waypoint],
    schema: &'a Schema,
    lookup: &'a L,
    radius_m: f64,
) -> TraceWalker<'a, L>
where
    L: NodeLookup + ?Sized,
{
    TraceWalker {
        waypoints,
        schema,
        lookup,
        radius_m,
        cursor: 0,
    }
}

impl<'a, L: NodeLookup + ?Sized> TraceWalker<'a, L> {
    /// A fresh walker over the same inputs, starting from the first waypoint.
    pub fn restart(&self) -> Self {
        walk(self.waypoints, self.schema, self.lookup, self.radius_m)
    }

    /// Number of waypoints already walked.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<L: NodeLookup + ?Sized> Iterator for TraceWalker<'_, L> {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let waypoint = self.waypoints.get(self.cursor)?;
        self.cursor += 1;

        let outcome = resolve_waypoint(waypoint, self.schema, self.lookup, self.radius_m);
        Some(WalkEntry {
            waypoint: waypoint.clone(),
            outcome,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.waypoints.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl<L: NodeLookup + ?Sized> ExactSizeIterator for TraceWalker<'_, L> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag_set::TagSet;
    use crate::verdict::Verdict;
    use std::cell::RefCell;

    fn schema() -> Schema {
        Schema::new(
            None,
            [
                ("taxi", TagSet::from([("amenity", "taxi")])),
                (
                    "semaforo",
                    TagSet::from([
                        ("crossing", "traffic_signals"),
                        ("traffic_signals:sound", "walk;yes"),
                    ]),
                ),
            ],
        )
    }

    fn trace() -> Vec<Waypoint> {
        vec![
            Waypoint::new("taxi", 10.0118, -84.2364),
            Waypoint::new("arbol", 10.0120, -84.2366),
            Waypoint::new("semaforo", 10.0125, -84.2370),
        ]
    }

    /// Lookup that answers by latitude and records every query.
    struct Recorder {
        calls: RefCell<Vec<Coordinate>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl NodeLookup for Recorder {
        fn nearby(&self, at: Coordinate, _radius_m: f64) -> Result<Vec<CandidateNode>, LookupError> {
            self.calls.borrow_mut().push(at);
            if at.lat == 10.0118 {
                Ok(vec![CandidateNode::new(
                    1,
                    TagSet::from([("amenity", "taxi")]),
                )])
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[test]
    fn one_entry_per_waypoint_in_trace_order() {
        let waypoints = trace();
        let schema = schema();
        let lookup = Recorder::new();

        let entries: Vec<_> = walk(&waypoints, &schema, &lookup, 20.0).collect();
        let names: Vec<_> = entries.iter().map(|e| e.waypoint.name.as_str()).collect();
        assert_eq!(names, ["taxi", "arbol", "semaforo"]);

        assert!(matches!(
            &entries[0].outcome,
            Outcome::Resolved(Selection { verdict: Verdict::Info, .. })
        ));
        assert_eq!(entries[1].outcome, Outcome::Skipped);
        assert_eq!(
            entries[2].outcome.verdict_kind(),
            Some(VerdictKind::Create)
        );
    }

    #[test]
    fn skipped_waypoints_never_reach_lookup() {
        let waypoints = trace();
        let schema = schema();
        let lookup = Recorder::new();

        let _: Vec<_> = walk(&waypoints, &schema, &lookup, 20.0).collect();
        let calls = lookup.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], waypoints[0].position);
        assert_eq!(calls[1], waypoints[2].position);
    }

    #[test]
    fn walking_is_lazy() {
        let waypoints = trace();
        let schema = schema();
        let lookup = Recorder::new();

        let mut walker = walk(&waypoints, &schema, &lookup, 20.0);
        assert!(lookup.calls.borrow().is_empty());

        walker.next();
        assert_eq!(lookup.calls.borrow().len(), 1);
        assert_eq!(walker.position(), 1);
        assert_eq!(walker.len(), 2);
    }

    #[test]
    fn restart_replays_the_same_outcomes() {
        let waypoints = trace();
        let schema = schema();
        let lookup = Recorder::new();

        let mut walker = walk(&waypoints, &schema, &lookup, 20.0);
        let first: Vec<_> = walker.by_ref().collect();
        let second: Vec<_> = walker.restart().collect();
        assert_eq!(first, second);
        assert_eq!(walker.next(), None);
    }

    #[test]
    fn lookup_failure_is_scoped_to_its_waypoint() {
        let waypoints = trace();
        let schema = schema();
        let lookup = |at: Coordinate, _radius: f64| -> Result<Vec<CandidateNode>, LookupError> {
            if at.lat == 10.0118 {
                Err(LookupError::Unavailable("connection reset".into()))
            } else {
                Ok(Vec::new())
            }
        };

        let entries: Vec<_> = walk(&waypoints, &schema, &lookup, 20.0).collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].outcome,
            Outcome::Failed(LookupError::Unavailable("connection reset".into()))
        );
        assert_eq!(entries[2].outcome.verdict_kind(), Some(VerdictKind::Create));
    }

    #[test]
    fn empty_trace_yields_nothing() {
        let schema = schema();
        let lookup = Recorder::new();
        assert_eq!(walk(&[], &schema, &lookup, 20.0).count(), 0);
    }
}
