// Round file loading and parsing (round.toml: round flags, lineups, bonuses).

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::roster::lineup::{Lineup, Selection};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RoundFileError {
    #[error("round file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse round file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled round
// ---------------------------------------------------------------------------

/// A fully parsed round: flags plus every team's lineup and tipping bonus.
#[derive(Debug, Clone)]
pub struct Round {
    pub number: u32,
    /// Whether the fixture window has closed. Gates reserve substitutions.
    pub ended: bool,
    pub teams: Vec<TeamEntry>,
}

/// One team's entry for the round.
#[derive(Debug, Clone)]
pub struct TeamEntry {
    pub name: String,
    /// Dead-cert tipping bonus computed upstream; negative for busted certs.
    pub dead_cert_bonus: i32,
    pub lineup: Lineup,
}

// ---------------------------------------------------------------------------
// round.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire round.toml file.
#[derive(Debug, Clone, Deserialize)]
struct RoundFile {
    round: RoundSection,
    #[serde(default)]
    teams: Vec<TeamSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct RoundSection {
    number: u32,
    #[serde(default)]
    ended: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamSection {
    name: String,
    #[serde(default)]
    dead_cert_bonus: i32,
    /// Position label -> starting player name.
    #[serde(default)]
    starters: HashMap<String, String>,
    /// Bench entries in declaration order; each needs `player` and `covers`.
    #[serde(default)]
    bench: Vec<Selection>,
    #[serde(default)]
    reserve_a: Option<Selection>,
    #[serde(default)]
    reserve_b: Option<Selection>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate a round file.
///
/// Structural problems (bad TOML, missing/duplicate team names, round number
/// 0) are errors; lineup-level oddities (unknown position labels, bench
/// entries without a usable `covers`) degrade with a warn, matching the
/// lineup builder.
pub fn load_round_file(path: &Path) -> Result<Round, RoundFileError> {
    let text = read_file(path)?;
    let file: RoundFile = toml::from_str(&text).map_err(|e| RoundFileError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let round = Round {
        number: file.round.number,
        ended: file.round.ended,
        teams: file.teams.into_iter().map(team_entry).collect(),
    };

    validate(&round)?;

    Ok(round)
}

/// Flatten one raw team section into selection entries and build its lineup.
fn team_entry(section: TeamSection) -> TeamEntry {
    let mut entries: Vec<(String, Selection)> = Vec::new();
    for (label, player) in &section.starters {
        entries.push((
            label.clone(),
            Selection { player: Some(player.clone()), covers: None },
        ));
    }
    for selection in &section.bench {
        entries.push(("BENCH".to_string(), selection.clone()));
    }
    if let Some(selection) = &section.reserve_a {
        entries.push(("RESERVE_A".to_string(), selection.clone()));
    }
    if let Some(selection) = &section.reserve_b {
        entries.push(("RESERVE_B".to_string(), selection.clone()));
    }

    TeamEntry {
        name: section.name,
        dead_cert_bonus: section.dead_cert_bonus,
        lineup: Lineup::from_selections(&entries),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, RoundFileError> {
    std::fs::read_to_string(path).map_err(|_| RoundFileError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(round: &Round) -> Result<(), RoundFileError> {
    if round.number == 0 {
        return Err(RoundFileError::ValidationError {
            field: "round.number".into(),
            message: "must be greater than 0".into(),
        });
    }

    if round.teams.is_empty() {
        return Err(RoundFileError::ValidationError {
            field: "teams".into(),
            message: "at least one team is required".into(),
        });
    }

    let mut seen = HashSet::new();
    for team in &round.teams {
        if team.name.trim().is_empty() {
            return Err(RoundFileError::ValidationError {
                field: "teams.name".into(),
                message: "must not be empty".into(),
            });
        }
        if !seen.insert(team.name.as_str()) {
            return Err(RoundFileError::ValidationError {
                field: "teams.name".into(),
                message: format!("duplicate team name `{}`", team.name),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
