// Round scoring entry point.
//
// Run sequence:
// 1. Initialize tracing (log to stderr, stdout carries the report)
// 2. Parse command line arguments
// 3. Load the round file (lineups, bonuses, round flags)
// 4. Load the stats CSV
// 5. Resolve substitutions and score every team
// 6. Print the report (text or JSON), teams ordered by final score

use fantasy_footy::config;
use fantasy_footy::scoring::team::{self, ReplacementRole, TeamScore};
use fantasy_footy::statfile;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "footyscore",
    about = "Score a fantasy footy round: resolve substitutions and rank teams",
    version
)]
struct Cli {
    /// Round file (round.toml) with lineups, bonuses and round flags
    round_file: PathBuf,
    /// Stats CSV with one row of raw match counters per player
    stats_file: PathBuf,
    /// Emit the full report as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// One team's scored entry in the printed report.
#[derive(Debug, Serialize)]
struct TeamReport {
    team: String,
    #[serde(flatten)]
    score: TeamScore,
}

#[derive(Debug, Serialize)]
struct RoundReport {
    round: u32,
    ended: bool,
    teams: Vec<TeamReport>,
}

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Parse command line arguments
    let cli = Cli::parse();

    // 3. Load the round file
    let round = config::load_round_file(&cli.round_file).context("failed to load round file")?;
    info!(
        "Round {} loaded: {} teams ({})",
        round.number,
        round.teams.len(),
        if round.ended { "ended" } else { "in progress" }
    );

    // 4. Load the stats CSV
    let stats = statfile::load_stats(&cli.stats_file).context("failed to load stats file")?;
    info!("Loaded stat lines for {} players", stats.len());

    // 5. Resolve substitutions and score every team
    let mut reports: Vec<TeamReport> = round
        .teams
        .iter()
        .map(|entry| TeamReport {
            team: entry.name.clone(),
            score: team::compute_team_score(
                &entry.lineup,
                &stats,
                round.ended,
                entry.dead_cert_bonus,
            ),
        })
        .collect();
    reports.sort_by_key(|report| std::cmp::Reverse(report.score.final_score));

    // 6. Print the report
    if cli.json {
        let report = RoundReport {
            round: round.number,
            ended: round.ended,
            teams: reports,
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{rendered}");
    } else {
        print_text_report(round.number, round.ended, &reports);
    }

    Ok(())
}

fn print_text_report(number: u32, ended: bool, reports: &[TeamReport]) {
    let status = if ended { "ended" } else { "in progress" };
    println!("Round {number} ({status})");

    for report in reports {
        println!();
        println!("{}", report.team);
        for slot in &report.score.slots {
            let player = slot.final_player.as_deref().unwrap_or("-");
            let mut line = format!(
                "  {:<13} {:<24} {:>4}",
                slot.position.display_str(),
                player,
                slot.final_score
            );
            if let Some(kind) = slot.substitution {
                let starter = slot.starting_player.as_deref().unwrap_or("-");
                line.push_str(&format!(
                    "   in for {} ({}) [{}]",
                    starter, slot.original_score, kind
                ));
            }
            println!("{line}");
        }
        for unused in &report.score.unused {
            println!(
                "  {:<13} {:<24} {:>4}   unused",
                role_label(&unused.role),
                unused.player,
                unused.score
            );
        }
        println!(
            "  score {}   dead certs {:+}   final {}",
            report.score.total_score, report.score.dead_cert_bonus, report.score.final_score
        );
    }
}

fn role_label(role: &ReplacementRole) -> String {
    match role {
        ReplacementRole::Bench { covers } => format!("Bench: {covers}"),
        ReplacementRole::Reserve {
            group,
            covers: Some(position),
        } => format!("{group}: {position}"),
        ReplacementRole::Reserve {
            group,
            covers: None,
        } => group.to_string(),
    }
}

/// Initialize tracing to stderr so piped stdout stays clean for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fantasy_footy=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
