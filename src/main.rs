use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;

use u_fixture::api::{self, ScheduleResponse, TournamentInput};
use u_fixture::error::SchedulerError;
use u_fixture::logging;
use u_fixture::scheduler::ScheduleKpi;
use u_fixture::validation::audit_schedule;

#[derive(Parser)]
#[command(
    name = "u-fixture",
    version,
    about = "Tournament fixture scheduler",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print the response JSON
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and schedule a tournament
    Schedule {
        /// Request JSON file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Log KPIs and audit findings for the produced schedule
        #[arg(long)]
        report: bool,
    },

    /// Project an empty knockout bracket
    Bracket {
        /// Request JSON file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Pair winners into the next knockout round
    NextRound {
        /// Request JSON file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the liveness message
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { logging::DEFAULT_FILTER });

    match cli.command {
        Commands::Schedule { input, report } => {
            let request: TournamentInput = read_request(input.as_deref())?;
            let response = api::schedule_tournament(&request);
            if report {
                log_report(&request, &response);
            }
            emit(&response, cli.pretty)
        }
        Commands::Bracket { input } => {
            let request = read_request(input.as_deref())?;
            emit(&api::knockout_bracket(&request), cli.pretty)
        }
        Commands::NextRound { input } => {
            let request = read_request(input.as_deref())?;
            emit(&api::knockout_next_round(&request), cli.pretty)
        }
        Commands::Status => emit(&api::status(), cli.pretty),
    }
}

fn read_request<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| SchedulerError::InvalidRequest(e.to_string()))
        .context("request JSON does not match the expected shape")
}

fn emit<T: Serialize>(response: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    println!("{out}");
    Ok(())
}

fn log_report(request: &TournamentInput, response: &ScheduleResponse) {
    let schedule = match response {
        ScheduleResponse::Fixtures { schedule } => schedule,
        ScheduleResponse::Knockout {
            current_round_schedule,
            ..
        } => current_round_schedule,
        ScheduleResponse::Error(_) => return,
    };

    let kpi = ScheduleKpi::calculate(schedule, &request.venues);
    tracing::info!(
        total = kpi.total_matches,
        fallback = kpi.fallback_matches,
        days = kpi.days_spanned,
        venue_spread = kpi.venue_spread,
        "schedule KPIs"
    );

    let constraints = request.constraints.clone().unwrap_or_default();
    for v in audit_schedule(schedule, &constraints) {
        tracing::warn!(kind = ?v.violation_type, entity = %v.entity_id, "{}", v.message);
    }
}
