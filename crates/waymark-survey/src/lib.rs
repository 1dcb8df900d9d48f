//! Waymark Survey
//!
//! Runs a reconciliation survey: loads a schema document and a node
//! snapshot, walks the waypoints of a GPX trace and reports the action each
//! waypoint needs.
//!
//! ```text
//! trace.gpx ─▶ waypoints ─┐
//! schema.json ─▶ Schema ──┼─▶ survey_stream ─▶ ReportSink ─▶ Summary
//! nodes.json ─▶ snapshot ─┘
//! ```
//!
//! Lookups always run on tokio's blocking pool, never on the async worker
//! driving the report. With one worker the next waypoint is resolved only
//! once the previous entry has been recorded; with more, up to `workers`
//! lookups run ahead. Entries are reported in trace order either way.

pub mod config;
pub mod error;
pub mod heat;
pub mod pipeline;
pub mod report;
pub mod schema_file;
pub mod snapshot;

use std::sync::Arc;

use futures::StreamExt;
use tracing::info;
use waymark_core::{NodeLookup, Schema, Waypoint};

pub use config::{log_filter, ReportFormat, SurveyConfig};
pub use error::{Error, Result};
pub use heat::{heat_points, write_heat};
pub use pipeline::survey_stream;
pub use report::{write_waypoints, JsonLinesReport, ReportSink, Summary, TextReport};
pub use schema_file::{load_schema, parse_schema, SCHEMA_META_KEY};
pub use snapshot::{NodeSnapshot, SnapshotNode};

/// A prepared survey: schema, node source and run parameters.
pub struct Survey<L = NodeSnapshot> {
    schema: Arc<Schema>,
    lookup: Arc<L>,
    radius_m: f64,
    workers: usize,
}

impl Survey<NodeSnapshot> {
    /// Load the schema and node snapshot named by `config`.
    pub fn from_config(config: &SurveyConfig) -> Result<Self> {
        config.validate()?;
        let schema = load_schema(&config.schema)?;
        let snapshot = NodeSnapshot::load(&config.nodes)?;
        Ok(Self::new(schema, snapshot, config.radius_m, config.workers))
    }
}

impl<L> Survey<L>
where
    L: NodeLookup + Send + Sync + 'static,
{
    pub fn new(schema: Schema, lookup: L, radius_m: f64, workers: usize) -> Self {
        Self {
            schema: Arc::new(schema),
            lookup: Arc::new(lookup),
            radius_m,
            workers: workers.max(1),
        }
    }

    /// Resolve every waypoint, feeding `sink` in trace order.
    pub async fn run<S: ReportSink>(&self, waypoints: Vec<Waypoint>, sink: &mut S) -> Result<Summary> {
        info!(
            waypoints = waypoints.len(),
            schema = self.schema.id().unwrap_or("-"),
            radius_m = self.radius_m,
            workers = self.workers,
            "survey started"
        );

        let entries = survey_stream(
            waypoints,
            Arc::clone(&self.schema),
            Arc::clone(&self.lookup),
            self.radius_m,
            self.workers,
        );
        let mut entries = std::pin::pin!(entries);

        let mut summary = Summary::default();
        while let Some(entry) = entries.next().await {
            summary.record(&entry.outcome);
            sink.record(&entry)?;
        }

        sink.finish(&summary)?;
        info!(
            actionable = summary.actionable(),
            failed = summary.failed,
            "survey finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};
    use waymark_core::{CandidateNode, Coordinate, LookupError, TagSet};

    fn survey(workers: usize) -> Survey<NodeSnapshot> {
        let schema = parse_schema(
            r#"{"schema": "t", "taxi": {"amenity": "taxi"}, "rampa": {"kerb": "lowered"}}"#,
        )
        .unwrap();
        let snapshot = NodeSnapshot::new(vec![SnapshotNode {
            id: 1,
            position: Coordinate::new(10.0, -84.0),
            tags: TagSet::from([("amenity", "taxi")]),
        }])
        .unwrap();
        Survey::new(schema, snapshot, 20.0, workers)
    }

    fn trace() -> Vec<Waypoint> {
        vec![
            Waypoint::new("taxi", 10.0, -84.0),
            Waypoint::new("rampa", 10.5, -84.5),
            Waypoint::new("arbol", 10.0, -84.0),
        ]
    }

    #[tokio::test]
    async fn sequential_and_concurrent_runs_agree() {
        let mut sequential = JsonLinesReport::new(Vec::new());
        let first = survey(1).run(trace(), &mut sequential).await.unwrap();

        let mut concurrent = JsonLinesReport::new(Vec::new());
        let second = survey(3).run(trace(), &mut concurrent).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(sequential.into_inner(), concurrent.into_inner());
        assert_eq!(first.info, 1);
        assert_eq!(first.create, 1);
        assert_eq!(first.skipped, 1);
    }

    #[tokio::test]
    async fn failures_are_counted_not_fatal() {
        let schema = parse_schema(r#"{"taxi": {"amenity": "taxi"}}"#).unwrap();
        let lookup = |_: Coordinate, _: f64| -> std::result::Result<Vec<CandidateNode>, LookupError> {
            Err(LookupError::Unavailable("offline".into()))
        };
        let survey = Survey::new(schema, lookup, 20.0, 1);

        let mut report = TextReport::new(Vec::new());
        let summary = survey.run(trace(), &mut report).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 2);
    }

    /// Records the thread each lookup runs on.
    struct ThreadRecorder {
        threads: Mutex<Vec<ThreadId>>,
    }

    impl NodeLookup for ThreadRecorder {
        fn nearby(&self, _at: Coordinate, _radius_m: f64) -> std::result::Result<Vec<CandidateNode>, LookupError> {
            if let Ok(mut threads) = self.threads.lock() {
                threads.push(thread::current().id());
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn single_worker_lookups_leave_the_async_thread() {
        let schema = parse_schema(r#"{"taxi": {"amenity": "taxi"}, "rampa": {"kerb": "lowered"}}"#).unwrap();
        let lookup = ThreadRecorder {
            threads: Mutex::new(Vec::new()),
        };
        let survey = Survey::new(schema, lookup, 20.0, 1);

        let mut report = TextReport::new(Vec::new());
        let summary = survey.run(trace(), &mut report).await.unwrap();
        assert_eq!(summary.create, 2);

        let runtime_thread = thread::current().id();
        let threads = survey.lookup.threads.lock().unwrap();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != runtime_thread));
    }
}
