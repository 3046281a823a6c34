// Lineup slots and construction from upstream selection data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::position::{normalize_label, Position, ReserveGroup};

/// One of the six starting assignments. The position always exists; the
/// player may be missing (an empty slot scores 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainSlot {
    pub position: Position,
    pub player: Option<String>,
}

/// A bench assignment, eligible to cover exactly one main position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchSlot {
    pub player: String,
    /// The single position this bench player is nominated for.
    pub covers: Position,
}

/// A reserve assignment: stands in for its group's three positions once the
/// round has ended. A declared `covers` position is matched ahead of plain
/// group coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSlot {
    pub player: String,
    pub group: ReserveGroup,
    #[serde(default)]
    pub covers: Option<Position>,
}

/// One raw slot assignment as it arrives from upstream selection data:
/// label strings, not yet parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub covers: Option<String>,
}

/// A team's lineup for one round: exactly six main slots (one per position,
/// in [`Position::ALL`] order), bench slots in selection order, and at most
/// one reserve per group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub main: [MainSlot; 6],
    pub bench: Vec<BenchSlot>,
    pub reserves: Vec<ReserveSlot>,
}

/// Strict lineup problems, reported by [`Lineup::validate`] for callers that
/// want a complete lineup before scoring. Scoring itself never requires one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineupError {
    #[error("no player assigned to {0}")]
    MissingStarter(Position),
    #[error("{0} holds more than one slot")]
    DuplicatePlayer(String),
}

impl Lineup {
    /// An empty lineup: six unassigned main slots, no bench, no reserves.
    pub fn new() -> Self {
        Lineup {
            main: Position::ALL.map(|position| MainSlot { position, player: None }),
            bench: Vec::new(),
            reserves: Vec::new(),
        }
    }

    /// Build a lineup from ordered (slot label, selection) pairs.
    ///
    /// Labels are normalized and classified: the six position labels assign
    /// main slots, `BENCH`-prefixed labels append bench slots in list order,
    /// and `RESERVE_A`/`RESERVE_B` assign the reserve groups. Anything
    /// malformed (unknown label, missing player, bench without a parseable
    /// `covers`, duplicate main/reserve assignment) is skipped with a warn;
    /// this never fails.
    pub fn from_selections(entries: &[(String, Selection)]) -> Self {
        let mut lineup = Lineup::new();
        for (label, selection) in entries {
            lineup.apply(label, selection);
        }
        lineup
    }

    fn apply(&mut self, label: &str, selection: &Selection) {
        let player = trimmed(&selection.player);

        if let Some(position) = Position::from_label(label) {
            let slot = &mut self.main[position.slot_index()];
            if slot.player.is_some() {
                if player.is_some() {
                    warn!("duplicate {} selection, keeping the first", position);
                }
            } else {
                slot.player = player;
            }
            return;
        }

        let norm = normalize_label(label);
        if norm.starts_with("BENCH") {
            let player = match player {
                Some(p) => p,
                None => {
                    warn!("bench slot {:?} has no player, skipping", label);
                    return;
                }
            };
            match selection.covers.as_deref().and_then(Position::from_label) {
                Some(covers) => self.bench.push(BenchSlot { player, covers }),
                None => warn!(
                    "bench slot {:?} ({}) has no usable covers position, skipping",
                    label, player
                ),
            }
            return;
        }

        if let Some(group) = ReserveGroup::from_label(label) {
            let player = match player {
                Some(p) => p,
                None => {
                    warn!("{} has no player, skipping", group);
                    return;
                }
            };
            if self.reserve(group).is_some() {
                warn!("duplicate {} selection, keeping the first", group);
                return;
            }
            let covers = match selection.covers.as_deref() {
                Some(raw) => {
                    let parsed = Position::from_label(raw);
                    if parsed.is_none() {
                        warn!("{} covers unknown position {:?}, treating as undeclared", group, raw);
                    }
                    parsed
                }
                None => None,
            };
            self.reserves.push(ReserveSlot { player, group, covers });
            return;
        }

        warn!("unrecognized slot label {:?}, skipping", label);
    }

    /// The starting player assigned to a position, if any.
    pub fn starter(&self, position: Position) -> Option<&str> {
        self.main
            .iter()
            .find(|slot| slot.position == position)
            .and_then(|slot| slot.player.as_deref())
    }

    /// Assign a starting player.
    pub fn set_starter(&mut self, position: Position, player: impl Into<String>) {
        if let Some(slot) = self.main.iter_mut().find(|slot| slot.position == position) {
            slot.player = Some(player.into());
        }
    }

    /// Append a bench slot. Bench order is significant: earlier slots win
    /// contested substitutions.
    pub fn add_bench(&mut self, player: impl Into<String>, covers: Position) {
        self.bench.push(BenchSlot { player: player.into(), covers });
    }

    /// Assign a reserve group, replacing any previous assignment for it.
    pub fn set_reserve(
        &mut self,
        group: ReserveGroup,
        player: impl Into<String>,
        covers: Option<Position>,
    ) {
        self.reserves.retain(|r| r.group != group);
        self.reserves.push(ReserveSlot { player: player.into(), group, covers });
    }

    /// The reserve slot for a group, if assigned.
    pub fn reserve(&self, group: ReserveGroup) -> Option<&ReserveSlot> {
        self.reserves.iter().find(|r| r.group == group)
    }

    /// Check that every main slot has a starter and no player holds more
    /// than one slot. Returns the first problem found.
    pub fn validate(&self) -> Result<(), LineupError> {
        for slot in &self.main {
            if slot.player.is_none() {
                return Err(LineupError::MissingStarter(slot.position));
            }
        }
        let mut seen = HashSet::new();
        for name in self.player_names() {
            if !seen.insert(name) {
                return Err(LineupError::DuplicatePlayer(name.to_string()));
            }
        }
        Ok(())
    }

    fn player_names(&self) -> impl Iterator<Item = &str> {
        self.main
            .iter()
            .filter_map(|slot| slot.player.as_deref())
            .chain(self.bench.iter().map(|slot| slot.player.as_str()))
            .chain(self.reserves.iter().map(|slot| slot.player.as_str()))
    }
}

impl Default for Lineup {
    fn default() -> Self {
        Lineup::new()
    }
}

fn trimmed(name: &Option<String>) -> Option<String> {
    name.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(player: &str, covers: Option<&str>) -> Selection {
        Selection {
            player: Some(player.to_string()),
            covers: covers.map(str::to_string),
        }
    }

    fn entry(label: &str, selection: Selection) -> (String, Selection) {
        (label.to_string(), selection)
    }

    #[test]
    fn new_lineup_has_six_empty_slots_in_order() {
        let lineup = Lineup::new();
        assert_eq!(lineup.main.len(), 6);
        for (i, slot) in lineup.main.iter().enumerate() {
            assert_eq!(slot.position, Position::ALL[i]);
            assert!(slot.player.is_none());
        }
        assert!(lineup.bench.is_empty());
        assert!(lineup.reserves.is_empty());
    }

    #[test]
    fn set_starter_fills_the_right_slot() {
        let mut lineup = Lineup::new();
        lineup.set_starter(Position::Ruck, "Angus Crane");
        assert_eq!(lineup.starter(Position::Ruck), Some("Angus Crane"));
        assert_eq!(lineup.starter(Position::FullForward), None);
    }

    #[test]
    fn set_reserve_replaces_same_group() {
        let mut lineup = Lineup::new();
        lineup.set_reserve(ReserveGroup::A, "Darcy Mott", None);
        lineup.set_reserve(ReserveGroup::A, "Jack Rennie", Some(Position::Ruck));
        assert_eq!(lineup.reserves.len(), 1);
        let reserve = lineup.reserve(ReserveGroup::A).unwrap();
        assert_eq!(reserve.player, "Jack Rennie");
        assert_eq!(reserve.covers, Some(Position::Ruck));
    }

    #[test]
    fn from_selections_full_lineup() {
        let entries = vec![
            entry("Full Forward", sel("Lachie Naughton", None)),
            entry("TALL_FORWARD", sel("Mick Dunbar", None)),
            entry("offensive", sel("Theo Rossi", None)),
            entry("Midfielder", sel("Clancy Begg", None)),
            entry("Tackler", sel("Sam Whitfield", None)),
            entry("Ruck", sel("Angus Crane", None)),
            entry("Bench", sel("Joel Sheedy", Some("Tackler"))),
            entry("BENCH_2", sel("Harry Voss", Some("full forward"))),
            entry("Reserve A", sel("Darcy Mott", Some("Full Forward"))),
            entry("RESERVE_B", sel("Ollie Trengove", None)),
        ];
        let lineup = Lineup::from_selections(&entries);

        assert_eq!(lineup.starter(Position::FullForward), Some("Lachie Naughton"));
        assert_eq!(lineup.starter(Position::Ruck), Some("Angus Crane"));
        assert_eq!(lineup.bench.len(), 2);
        assert_eq!(lineup.bench[0].player, "Joel Sheedy");
        assert_eq!(lineup.bench[0].covers, Position::Tackler);
        assert_eq!(lineup.bench[1].player, "Harry Voss");
        assert_eq!(lineup.bench[1].covers, Position::FullForward);
        let reserve_a = lineup.reserve(ReserveGroup::A).unwrap();
        assert_eq!(reserve_a.player, "Darcy Mott");
        assert_eq!(reserve_a.covers, Some(Position::FullForward));
        let reserve_b = lineup.reserve(ReserveGroup::B).unwrap();
        assert_eq!(reserve_b.covers, None);
        assert!(lineup.validate().is_ok());
    }

    #[test]
    fn from_selections_unknown_label_is_skipped() {
        let entries = vec![
            entry("Full Forward", sel("Lachie Naughton", None)),
            entry("Half Back Flank", sel("Nobody Escher", None)),
        ];
        let lineup = Lineup::from_selections(&entries);
        assert_eq!(lineup.starter(Position::FullForward), Some("Lachie Naughton"));
        assert!(lineup.bench.is_empty());
        assert!(lineup.reserves.is_empty());
    }

    #[test]
    fn from_selections_duplicate_main_keeps_first() {
        let entries = vec![
            entry("Ruck", sel("Angus Crane", None)),
            entry("RUCK", sel("Jack Rennie", None)),
        ];
        let lineup = Lineup::from_selections(&entries);
        assert_eq!(lineup.starter(Position::Ruck), Some("Angus Crane"));
    }

    #[test]
    fn from_selections_empty_main_slot_can_be_filled_later() {
        let entries = vec![
            entry("Ruck", Selection::default()),
            entry("Ruck", sel("Angus Crane", None)),
        ];
        let lineup = Lineup::from_selections(&entries);
        assert_eq!(lineup.starter(Position::Ruck), Some("Angus Crane"));
    }

    #[test]
    fn from_selections_blank_player_name_leaves_slot_empty() {
        let entries = vec![entry("Ruck", sel("   ", None))];
        let lineup = Lineup::from_selections(&entries);
        assert_eq!(lineup.starter(Position::Ruck), None);
    }

    #[test]
    fn from_selections_bench_without_covers_is_skipped() {
        let entries = vec![
            entry("Bench", sel("Joel Sheedy", None)),
            entry("Bench", sel("Harry Voss", Some("Centre Half Nowhere"))),
        ];
        let lineup = Lineup::from_selections(&entries);
        assert!(lineup.bench.is_empty());
    }

    #[test]
    fn from_selections_duplicate_reserve_keeps_first() {
        let entries = vec![
            entry("Reserve A", sel("Darcy Mott", None)),
            entry("RESERVE_A", sel("Jack Rennie", None)),
        ];
        let lineup = Lineup::from_selections(&entries);
        assert_eq!(lineup.reserves.len(), 1);
        assert_eq!(lineup.reserve(ReserveGroup::A).unwrap().player, "Darcy Mott");
    }

    #[test]
    fn from_selections_reserve_with_unknown_covers_keeps_group_matching() {
        let entries = vec![entry("Reserve B", sel("Ollie Trengove", Some("Goal Sneak")))];
        let lineup = Lineup::from_selections(&entries);
        let reserve = lineup.reserve(ReserveGroup::B).unwrap();
        assert_eq!(reserve.player, "Ollie Trengove");
        assert_eq!(reserve.covers, None);
    }

    #[test]
    fn from_selections_empty_input_gives_empty_lineup() {
        let lineup = Lineup::from_selections(&[]);
        assert!(lineup.main.iter().all(|slot| slot.player.is_none()));
        assert!(lineup.bench.is_empty());
        assert!(lineup.reserves.is_empty());
    }

    #[test]
    fn validate_reports_missing_starter() {
        let mut lineup = Lineup::new();
        for pos in Position::ALL {
            lineup.set_starter(pos, format!("Player {}", pos));
        }
        assert!(lineup.validate().is_ok());

        lineup.main[Position::Tackler.slot_index()].player = None;
        assert_eq!(
            lineup.validate(),
            Err(LineupError::MissingStarter(Position::Tackler))
        );
    }

    #[test]
    fn validate_reports_duplicate_player() {
        let mut lineup = Lineup::new();
        for pos in Position::ALL {
            lineup.set_starter(pos, format!("Player {}", pos));
        }
        lineup.add_bench("Player Ruck", Position::Ruck);
        assert_eq!(
            lineup.validate(),
            Err(LineupError::DuplicatePlayer("Player Ruck".to_string()))
        );
    }

    #[test]
    fn trimmed_player_names_are_stored_clean() {
        let entries = vec![entry("Ruck", sel("  Angus Crane  ", None))];
        let lineup = Lineup::from_selections(&entries);
        assert_eq!(lineup.starter(Position::Ruck), Some("Angus Crane"));
    }
}
