//! Concurrent survey pipeline.
//!
//! Lookups are blocking calls, so each in-scope waypoint is resolved on
//! tokio's blocking pool. Up to `workers` waypoints are in flight at once
//! and results come out in trace order.

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, error};
use waymark_core::{resolve_waypoint, LookupError, NodeLookup, Outcome, Schema, WalkEntry, Waypoint};

/// Resolve `waypoints` concurrently, yielding one entry per waypoint in
/// trace order.
///
/// Waypoints without a schema entry are skipped without using a worker. A
/// resolution task that panics becomes a failed outcome for its waypoint.
pub fn survey_stream<L>(
    waypoints: Vec<Waypoint>,
    schema: Arc<Schema>,
    lookup: Arc<L>,
    radius_m: f64,
    workers: usize,
) -> impl Stream<Item = WalkEntry>
where
    L: NodeLookup + Send + Sync + 'static,
{
    let workers = workers.max(1);
    debug!(waypoints = waypoints.len(), workers, "starting survey stream");

    stream::iter(waypoints)
        .map(move |waypoint| {
            let schema = Arc::clone(&schema);
            let lookup = Arc::clone(&lookup);
            async move {
                if !schema.contains(&waypoint.name) {
                    return WalkEntry {
                        waypoint,
                        outcome: Outcome::Skipped,
                    };
                }

                let task_waypoint = waypoint.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    resolve_waypoint(&task_waypoint, &schema, lookup.as_ref(), radius_m)
                })
                .await
                .unwrap_or_else(|e| {
                    error!(waypoint = %waypoint.name, error = %e, "resolution task failed");
                    Outcome::Failed(LookupError::Unavailable(format!("resolution task failed: {}", e)))
                });

                WalkEntry { waypoint, outcome }
            }
        })
        .buffered(workers)
}
