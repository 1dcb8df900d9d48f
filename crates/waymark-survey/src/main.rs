//! Waymark binary
//!
//! Reconciles surveyed GPX waypoints against a map node snapshot.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waymark_core::DEFAULT_RADIUS_M;
use waymark_survey::{
    heat_points, log_filter, write_heat, write_waypoints, JsonLinesReport, ReportFormat, Survey,
    SurveyConfig, TextReport,
};

#[derive(Parser)]
#[command(name = "waymark", version, about = "Reconcile surveyed waypoints with map nodes")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report the editing action each waypoint of a trace needs
    Check(CheckArgs),
    /// List the waypoints of a trace
    Waypoints {
        /// GPX trace
        trace: PathBuf,
    },
    /// Print every track point in a directory of traces as JSON
    Heat {
        /// Directory holding .gpx files
        dir: PathBuf,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// GPX trace holding the surveyed waypoints
    trace: PathBuf,

    /// Schema document mapping waypoint names to expected tags
    #[arg(long, env = "WAYMARK_SCHEMA", value_name = "PATH")]
    schema: PathBuf,

    /// Overpass JSON export of the surveyed area
    #[arg(long, env = "WAYMARK_NODES", value_name = "PATH")]
    nodes: PathBuf,

    /// Search radius around each waypoint, in meters
    #[arg(long = "radius", env = "WAYMARK_RADIUS", default_value_t = DEFAULT_RADIUS_M)]
    radius_m: f64,

    /// Concurrent lookups
    #[arg(long, env = "WAYMARK_WORKERS", default_value_t = 1)]
    workers: usize,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

impl CheckArgs {
    fn into_config(self, debug: bool) -> SurveyConfig {
        SurveyConfig {
            trace: self.trace,
            schema: self.schema,
            nodes: self.nodes,
            radius_m: self.radius_m,
            workers: self.workers,
            format: self.format,
            debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(cli.debug).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdout = BufWriter::new(io::stdout().lock());

    match cli.command {
        Command::Check(args) => {
            let config = args.into_config(cli.debug);
            let survey = Survey::from_config(&config)?;
            let trace = waymark_gpx::read(&config.trace)?;

            let summary = match config.format {
                ReportFormat::Text => survey.run(trace.waypoints, &mut TextReport::new(stdout)).await?,
                ReportFormat::Json => {
                    survey
                        .run(trace.waypoints, &mut JsonLinesReport::new(stdout))
                        .await?
                }
            };
            tracing::debug!(?summary, "done");
        }
        Command::Waypoints { trace } => {
            let trace = waymark_gpx::read(&trace)?;
            write_waypoints(stdout, &trace.waypoints)?;
        }
        Command::Heat { dir } => {
            let points = heat_points(&dir)?;
            tracing::info!(points = points.len(), "collected track points");
            write_heat(stdout, &points)?;
        }
    }

    Ok(())
}
