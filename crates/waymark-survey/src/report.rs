//! Report sinks.
//!
//! A run feeds every [`WalkEntry`] to a [`ReportSink`] in trace order and
//! closes it with the run's [`Summary`].

use std::fmt;
use std::io::Write;

use serde::Serialize;
use waymark_core::{Outcome, TagSet, Verdict, VerdictKind, WalkEntry, Waypoint};

use crate::error::Result;

/// Destination for survey results.
pub trait ReportSink {
    /// Record one waypoint's outcome.
    fn record(&mut self, entry: &WalkEntry) -> Result<()>;

    /// Close the report.
    fn finish(&mut self, summary: &Summary) -> Result<()>;
}

/// Outcome counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub info: usize,
    pub edit: usize,
    pub review: usize,
    pub create: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
            Outcome::Resolved(selection) => match selection.verdict.kind() {
                VerdictKind::Info => self.info += 1,
                VerdictKind::Edit => self.edit += 1,
                VerdictKind::Review => self.review += 1,
                VerdictKind::Create => self.create += 1,
                VerdictKind::NoAction => unreachable!("selection never settles on NoAction"),
            },
        }
    }

    /// Waypoints seen.
    pub fn total(&self) -> usize {
        self.info + self.edit + self.review + self.create + self.skipped + self.failed
    }

    /// Waypoints that need a map edit or a review.
    pub fn actionable(&self) -> usize {
        self.edit + self.review + self.create
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} waypoints: {} info, {} edit, {} review, {} create, {} skipped, {} failed",
            self.total(),
            self.info,
            self.edit,
            self.review,
            self.create,
            self.skipped,
            self.failed
        )
    }
}

/// Human-readable report, one line per waypoint.
pub struct TextReport<W> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn record(&mut self, entry: &WalkEntry) -> Result<()> {
        let WalkEntry { waypoint, outcome } = entry;
        let name = &waypoint.name;
        let at = waypoint.position;

        match outcome {
            Outcome::Skipped => writeln!(self.out, "[skip]   {} {}: not in schema", name, at)?,
            Outcome::Failed(e) => writeln!(self.out, "[error]  {} {}: lookup failed: {}", name, at, e)?,
            Outcome::Resolved(selection) => {
                let node = selection
                    .node
                    .as_ref()
                    .map(|n| n.id.to_string())
                    .unwrap_or_default();
                match &selection.verdict {
                    Verdict::Info => {
                        writeln!(self.out, "[info]   {} {}: node {} already mapped", name, at, node)?
                    }
                    Verdict::Edit { missing } => writeln!(
                        self.out,
                        "[edit]   {} {}: node {} needs additional tags: {}",
                        name, at, node, missing
                    )?,
                    Verdict::Review { extra } => writeln!(
                        self.out,
                        "[review] {} {}: node {} has extra tags, review: {}",
                        name, at, node, extra
                    )?,
                    Verdict::Create { tags } => writeln!(
                        self.out,
                        "[create] {}: create new node at {} with: {}",
                        name, at, tags
                    )?,
                    Verdict::NoAction => unreachable!("selection never settles on NoAction"),
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        writeln!(self.out, "{}", summary)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonOutcome<'a> {
    Skipped,
    Failed {
        error: String,
    },
    Resolved {
        #[serde(skip_serializing_if = "Option::is_none")]
        node: Option<String>,
        verdict: VerdictKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        tags: Option<&'a TagSet>,
    },
}

#[derive(Serialize)]
struct JsonLine<'a> {
    name: &'a str,
    lat: f64,
    lon: f64,
    #[serde(flatten)]
    outcome: JsonOutcome<'a>,
}

impl<'a> From<&'a WalkEntry> for JsonLine<'a> {
    fn from(entry: &'a WalkEntry) -> Self {
        let outcome = match &entry.outcome {
            Outcome::Skipped => JsonOutcome::Skipped,
            Outcome::Failed(e) => JsonOutcome::Failed { error: e.to_string() },
            Outcome::Resolved(selection) => JsonOutcome::Resolved {
                node: selection.node.as_ref().map(|n| n.id.to_string()),
                verdict: selection.verdict.kind(),
                tags: selection.verdict.tags(),
            },
        };
        JsonLine {
            name: &entry.waypoint.name,
            lat: entry.waypoint.lat(),
            lon: entry.waypoint.lon(),
            outcome,
        }
    }
}

/// Machine-readable report: one JSON object per line, then the summary.
pub struct JsonLinesReport<W> {
    out: W,
}

impl<W: Write> JsonLinesReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonLinesReport<W> {
    fn record(&mut self, entry: &WalkEntry) -> Result<()> {
        serde_json::to_writer(&mut self.out, &JsonLine::from(entry))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        #[derive(Serialize)]
        struct Line<'a> {
            summary: &'a Summary,
        }

        serde_json::to_writer(&mut self.out, &Line { summary })?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Write one `name<TAB>lat<TAB>lon` line per waypoint.
pub fn write_waypoints<W: Write>(mut out: W, waypoints: &[Waypoint]) -> Result<()> {
    for waypoint in waypoints {
        writeln!(out, "{}\t{:.6}\t{:.6}", waypoint.name, waypoint.lat(), waypoint.lon())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_core::{CandidateNode, LookupError, Selection};

    fn entries() -> Vec<WalkEntry> {
        let resolved = |node: Option<CandidateNode>, verdict: Verdict| {
            Outcome::Resolved(Selection { node, verdict })
        };
        let taxi = TagSet::from([("amenity", "taxi")]);
        vec![
            WalkEntry {
                waypoint: Waypoint::new("taxi", 10.0, -84.0),
                outcome: resolved(Some(CandidateNode::new(1, taxi)), Verdict::Info),
            },
            WalkEntry {
                waypoint: Waypoint::new("semaforo", 10.1, -84.1),
                outcome: resolved(
                    Some(CandidateNode::new(2, TagSet::new())),
                    Verdict::Edit {
                        missing: TagSet::from([("traffic_signals:sound", "walk;yes")]),
                    },
                ),
            },
            WalkEntry {
                waypoint: Waypoint::new("rampa", 10.2, -84.2),
                outcome: resolved(
                    None,
                    Verdict::Create {
                        tags: TagSet::from([("kerb", "lowered")]),
                    },
                ),
            },
            WalkEntry {
                waypoint: Waypoint::new("arbol", 10.3, -84.3),
                outcome: Outcome::Skipped,
            },
            WalkEntry {
                waypoint: Waypoint::new("parada", 10.4, -84.4),
                outcome: Outcome::Failed(LookupError::Unavailable("down".into())),
            },
        ]
    }

    fn summary_of(entries: &[WalkEntry]) -> Summary {
        let mut summary = Summary::default();
        for entry in entries {
            summary.record(&entry.outcome);
        }
        summary
    }

    #[test]
    fn summary_counts() {
        let summary = summary_of(&entries());
        assert_eq!(
            summary,
            Summary {
                info: 1,
                edit: 1,
                review: 0,
                create: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.actionable(), 2);
    }

    #[test]
    fn text_report_lines() {
        let entries = entries();
        let mut report = TextReport::new(Vec::new());
        for entry in &entries {
            report.record(entry).unwrap();
        }
        report.finish(&summary_of(&entries)).unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "[info]   taxi (10.000000, -84.000000): node 1 already mapped");
        assert_eq!(
            lines[1],
            "[edit]   semaforo (10.100000, -84.100000): node 2 needs additional tags: traffic_signals:sound=walk;yes"
        );
        assert_eq!(
            lines[2],
            "[create] rampa: create new node at (10.200000, -84.200000) with: kerb=lowered"
        );
        assert!(lines[3].starts_with("[skip]   arbol"));
        assert!(lines[4].starts_with("[error]  parada"));
        assert!(lines[4].contains("down"));
        assert_eq!(
            lines[5],
            "5 waypoints: 1 info, 1 edit, 0 review, 1 create, 1 skipped, 1 failed"
        );
    }

    #[test]
    fn json_lines_report() {
        let entries = entries();
        let mut report = JsonLinesReport::new(Vec::new());
        for entry in &entries {
            report.record(entry).unwrap();
        }
        report.finish(&summary_of(&entries)).unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 6);

        assert_eq!(lines[0]["name"], "taxi");
        assert_eq!(lines[0]["status"], "resolved");
        assert_eq!(lines[0]["verdict"], "info");
        assert_eq!(lines[0]["node"], "1");
        assert!(lines[0].get("tags").is_none());

        assert_eq!(lines[1]["verdict"], "edit");
        assert_eq!(lines[1]["tags"]["traffic_signals:sound"], "walk;yes");

        assert_eq!(lines[2]["verdict"], "create");
        assert!(lines[2].get("node").is_none());
        assert_eq!(lines[2]["lat"], 10.2);

        assert_eq!(lines[3]["status"], "skipped");
        assert_eq!(lines[4]["status"], "failed");
        assert!(lines[4]["error"].as_str().unwrap().contains("down"));

        assert_eq!(lines[5]["summary"]["create"], 1);
    }

    #[test]
    #[should_panic(expected = "never settles on NoAction")]
    fn no_action_selection_is_not_counted_as_skipped() {
        let mut summary = Summary::default();
        summary.record(&Outcome::Resolved(Selection {
            node: None,
            verdict: Verdict::NoAction,
        }));
    }

    #[test]
    fn waypoint_listing() {
        let mut out = Vec::new();
        write_waypoints(&mut out, &[Waypoint::new("taxi", 10.0118, -84.2364)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "taxi\t10.011800\t-84.236400\n");
    }
}
