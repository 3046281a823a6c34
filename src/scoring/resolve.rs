// Substitution resolution for the six main slots.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::roster::lineup::{BenchSlot, Lineup, ReserveSlot};
use crate::roster::position::{Position, ReserveGroup};
use crate::scoring::rules::{position_score, score_or_zero};
use crate::scoring::stats::{played, StatLine};

/// How a replacement entered a main slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubstitutionKind {
    /// A bench player nominated for exactly this position.
    Bench,
    /// A reserve matched through its declared covers position.
    ReservePosition(Position),
    /// A reserve matched through plain group coverage.
    ReserveGroup(ReserveGroup),
}

impl fmt::Display for SubstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionKind::Bench => write!(f, "Bench"),
            SubstitutionKind::ReservePosition(position) => write!(f, "{}", position),
            SubstitutionKind::ReserveGroup(group) => write!(f, "{}", group),
        }
    }
}

/// Final outcome for one main slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    pub position: Position,
    pub starting_player: Option<String>,
    pub final_player: Option<String>,
    pub original_score: u32,
    pub final_score: u32,
    /// How the final player got here; `None` means the starter stood.
    pub substitution: Option<SubstitutionKind>,
}

impl SlotResult {
    pub fn was_substituted(&self) -> bool {
        self.substitution.is_some()
    }
}

/// Record of one replacement decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionEvent {
    pub position: Position,
    pub starter: Option<String>,
    pub starter_score: u32,
    pub replacement: String,
    pub replacement_score: u32,
    pub kind: SubstitutionKind,
}

struct BenchCandidate<'a> {
    slot: &'a BenchSlot,
    /// Precomputed under the slot's own covers position.
    score: u32,
    used: bool,
}

struct ReserveCandidate<'a> {
    slot: &'a ReserveSlot,
    stats: &'a StatLine,
    used: bool,
}

/// Resolve every main slot against the bench and reserves.
///
/// Slots resolve in [`Position::ALL`] order, so earlier slots claim a
/// contested replacement first, and each replacement comes in at most once.
/// Per slot:
///
/// 1. The starter's score is computed (0 for an empty slot or a starter
///    absent from the stats map).
/// 2. Bench pass, in any round state: the first not-yet-used bench slot in
///    list order nominated for this position whose precomputed score
///    strictly beats the starter's comes in.
/// 3. Reserve pass, only when the starter did not play, no bench player came
///    in, and the round has ended: the best not-yet-used, played reserve
///    takes the slot: declared covers beats group coverage, then higher
///    score under this position's rule, then earliest in list order.
/// 4. Otherwise the starter stands, scoring 0 if they did not play.
///
/// Missing data never fails resolution; it only produces zero scores.
pub fn resolve_lineup(
    lineup: &Lineup,
    stats: &HashMap<String, StatLine>,
    round_end_passed: bool,
) -> Vec<SlotResult> {
    // Replacements that did not play can never come in. Bench scores are
    // fixed up front: a bench player is always valued in the position it is
    // nominated for.
    let mut bench: Vec<BenchCandidate> = lineup
        .bench
        .iter()
        .filter_map(|slot| {
            let line = stats.get(&slot.player)?;
            if !line.played() {
                return None;
            }
            Some(BenchCandidate {
                slot,
                score: position_score(slot.covers, line),
                used: false,
            })
        })
        .collect();

    let mut reserves: Vec<ReserveCandidate> = lineup
        .reserves
        .iter()
        .filter_map(|slot| {
            let line = stats.get(&slot.player)?;
            if !line.played() {
                return None;
            }
            Some(ReserveCandidate { slot, stats: line, used: false })
        })
        .collect();

    let mut results = Vec::with_capacity(Position::ALL.len());
    for position in Position::ALL {
        let starting_player = lineup.starter(position).map(str::to_string);
        let starter_stats = starting_player.as_deref().and_then(|name| stats.get(name));
        let original_score = score_or_zero(position, starter_stats);

        if let Some(candidate) = bench
            .iter_mut()
            .find(|c| !c.used && c.slot.covers == position && c.score > original_score)
        {
            candidate.used = true;
            debug!(
                "{}: bench {} ({}) replaces {} ({})",
                position,
                candidate.slot.player,
                candidate.score,
                starting_player.as_deref().unwrap_or("(empty)"),
                original_score
            );
            results.push(SlotResult {
                position,
                starting_player,
                final_player: Some(candidate.slot.player.clone()),
                original_score,
                final_score: candidate.score,
                substitution: Some(SubstitutionKind::Bench),
            });
            continue;
        }

        if round_end_passed && !played(starter_stats) {
            if let Some((index, kind, score)) = best_reserve(&reserves, position) {
                reserves[index].used = true;
                debug!(
                    "{}: reserve {} ({}) fills in for {} ({})",
                    position,
                    reserves[index].slot.player,
                    score,
                    starting_player.as_deref().unwrap_or("(empty)"),
                    original_score
                );
                results.push(SlotResult {
                    position,
                    starting_player,
                    final_player: Some(reserves[index].slot.player.clone()),
                    original_score,
                    final_score: score,
                    substitution: Some(kind),
                });
                continue;
            }
        }

        let final_player = starting_player.clone();
        results.push(SlotResult {
            position,
            starting_player,
            final_player,
            original_score,
            final_score: original_score,
            substitution: None,
        });
    }
    results
}

/// Pick the best eligible reserve for a position: declared covers (priority
/// 2) beats group coverage (priority 1), then higher score under the
/// position's rule, then the earliest in list order. Scores are computed for
/// the position being filled, not for the reserve's own nomination.
fn best_reserve(
    reserves: &[ReserveCandidate<'_>],
    position: Position,
) -> Option<(usize, SubstitutionKind, u32)> {
    let mut best: Option<(usize, u8, u32)> = None;
    for (index, candidate) in reserves.iter().enumerate() {
        if candidate.used {
            continue;
        }
        let priority = if candidate.slot.covers == Some(position) {
            2
        } else if candidate.slot.group.covers(position) {
            1
        } else {
            continue;
        };
        let score = position_score(position, candidate.stats);
        let better = match best {
            Some((_, best_priority, best_score)) => {
                priority > best_priority || (priority == best_priority && score > best_score)
            }
            None => true,
        };
        if better {
            best = Some((index, priority, score));
        }
    }
    best.map(|(index, priority, score)| {
        let kind = if priority == 2 {
            SubstitutionKind::ReservePosition(position)
        } else {
            SubstitutionKind::ReserveGroup(reserves[index].slot.group)
        };
        (index, kind, score)
    })
}

/// The substitution events implied by resolved slots, in resolution order.
pub fn substitution_events(slots: &[SlotResult]) -> Vec<SubstitutionEvent> {
    slots
        .iter()
        .filter_map(|slot| {
            let kind = slot.substitution?;
            let replacement = slot.final_player.clone()?;
            Some(SubstitutionEvent {
                position: slot.position,
                starter: slot.starting_player.clone(),
                starter_score: slot.original_score,
                replacement,
                replacement_score: slot.final_score,
                kind,
            })
        })
        .collect()
}
