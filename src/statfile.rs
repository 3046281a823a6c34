// Stat file loading (stats.csv: one row of raw match counters per player).

use crate::scoring::stats::StatLine;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StatFileError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One stats.csv row. Counter cells may be empty and whole counter columns
/// may be missing; both read as zero.
#[derive(Debug, Deserialize)]
struct RawStatRow {
    player: String,
    #[serde(default)]
    kicks: Option<u32>,
    #[serde(default)]
    handballs: Option<u32>,
    #[serde(default)]
    marks: Option<u32>,
    #[serde(default)]
    tackles: Option<u32>,
    #[serde(default)]
    hitouts: Option<u32>,
    #[serde(default)]
    goals: Option<u32>,
    #[serde(default)]
    behinds: Option<u32>,
}

impl RawStatRow {
    fn stat_line(&self) -> StatLine {
        StatLine {
            kicks: self.kicks.unwrap_or(0),
            handballs: self.handballs.unwrap_or(0),
            marks: self.marks.unwrap_or(0),
            tackles: self.tackles.unwrap_or(0),
            hitouts: self.hitouts.unwrap_or(0),
            goals: self.goals.unwrap_or(0),
            behinds: self.behinds.unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_stats_from_reader<R: Read>(rdr: R) -> Result<HashMap<String, StatLine>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut map = HashMap::new();
    for result in reader.deserialize::<RawStatRow>() {
        match result {
            Ok(raw) => {
                let name = raw.player.trim().to_string();
                if name.is_empty() {
                    warn!("skipping stat row with empty player name");
                    continue;
                }
                if map.contains_key(&name) {
                    warn!("duplicate stat row for '{}', using latest values", name);
                }
                map.insert(name, raw.stat_line());
            }
            Err(e) => {
                warn!("skipping malformed stat row: {}", e);
            }
        }
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load per-player stat lines from a CSV file.
///
/// Returns a map of player name → stat line. Players with no row in the file
/// simply have no entry, which downstream scoring treats as did-not-play.
pub fn load_stats(path: &Path) -> Result<HashMap<String, StatLine>, StatFileError> {
    let file = std::fs::File::open(path).map_err(|e| StatFileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_stats_from_reader(file).map_err(|e| StatFileError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
