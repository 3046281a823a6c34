// Team score aggregation over resolved slots.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::roster::lineup::Lineup;
use crate::roster::position::{Position, ReserveGroup};
use crate::scoring::resolve::{
    resolve_lineup, substitution_events, SlotResult, SubstitutionEvent,
};
use crate::scoring::rules::score_or_zero;
use crate::scoring::stats::StatLine;

/// Where an unused replacement was nominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementRole {
    Bench { covers: Position },
    Reserve { group: ReserveGroup, covers: Option<Position> },
}

/// A bench or reserve slot that was not needed, with the score it would have
/// posted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedReplacement {
    pub player: String,
    pub role: ReplacementRole,
    pub score: u32,
}

/// The engine's full output for one team and one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    /// Per-position outcomes, in [`Position::ALL`] order.
    pub slots: Vec<SlotResult>,
    /// Every replacement decision, in resolution order.
    pub substitutions: Vec<SubstitutionEvent>,
    /// Replacements that stayed out, with their standalone scores.
    pub unused: Vec<UnusedReplacement>,
    /// Sum of the six final slot scores.
    pub total_score: u32,
    /// Caller-supplied tipping bonus, possibly negative.
    pub dead_cert_bonus: i32,
    /// `total_score` plus the dead-cert bonus.
    pub final_score: i32,
}

/// Score a team's round: resolve substitutions, sum the six final slot
/// scores, and apply the externally computed dead-cert bonus.
///
/// Pure over its inputs and never fails: missing players, empty slots and
/// absent stat lines all degrade to zero scores.
pub fn compute_team_score(
    lineup: &Lineup,
    stats: &HashMap<String, StatLine>,
    round_end_passed: bool,
    dead_cert_bonus: i32,
) -> TeamScore {
    let slots = resolve_lineup(lineup, stats, round_end_passed);
    let substitutions = substitution_events(&slots);
    let unused = unused_replacements(lineup, stats, &substitutions);
    let total_score: u32 = slots.iter().map(|slot| slot.final_score).sum();
    let final_score = total_score as i32 + dead_cert_bonus;
    TeamScore {
        slots,
        substitutions,
        unused,
        total_score,
        dead_cert_bonus,
        final_score,
    }
}

/// The bench and reserve slots that were not needed, each with the score it
/// would have posted on its own: a bench slot or declared reserve under its
/// nominated position, an undeclared reserve under its best-scoring group
/// position. Players who did not play appear with a score of 0.
fn unused_replacements(
    lineup: &Lineup,
    stats: &HashMap<String, StatLine>,
    substitutions: &[SubstitutionEvent],
) -> Vec<UnusedReplacement> {
    let used: HashSet<&str> = substitutions
        .iter()
        .map(|event| event.replacement.as_str())
        .collect();

    let mut unused = Vec::new();
    for slot in &lineup.bench {
        if used.contains(slot.player.as_str()) {
            continue;
        }
        unused.push(UnusedReplacement {
            player: slot.player.clone(),
            role: ReplacementRole::Bench { covers: slot.covers },
            score: score_or_zero(slot.covers, stats.get(&slot.player)),
        });
    }
    for slot in &lineup.reserves {
        if used.contains(slot.player.as_str()) {
            continue;
        }
        let line = stats.get(&slot.player);
        let score = match slot.covers {
            Some(covers) => score_or_zero(covers, line),
            None => slot
                .group
                .positions()
                .iter()
                .map(|&position| score_or_zero(position, line))
                .max()
                .unwrap_or(0),
        };
        unused.push(UnusedReplacement {
            player: slot.player.clone(),
            role: ReplacementRole::Reserve { group: slot.group, covers: slot.covers },
            score,
        });
    }
    unused
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_map(entries: &[(&str, StatLine)]) -> HashMap<String, StatLine> {
        entries
            .iter()
            .map(|(name, line)| (name.to_string(), *line))
            .collect()
    }

    fn full_lineup() -> Lineup {
        let mut lineup = Lineup::new();
        lineup.set_starter(Position::FullForward, "Lachie Naughton");
        lineup.set_starter(Position::TallForward, "Mick Dunbar");
        lineup.set_starter(Position::Offensive, "Theo Rossi");
        lineup.set_starter(Position::Midfielder, "Clancy Begg");
        lineup.set_starter(Position::Tackler, "Sam Whitfield");
        lineup.set_starter(Position::Ruck, "Angus Crane");
        lineup
    }

    fn full_stats() -> HashMap<String, StatLine> {
        stats_map(&[
            // 2*9 = 18
            ("Lachie Naughton", StatLine { goals: 2, ..Default::default() }),
            // 1*6 + 3*2 = 12
            ("Mick Dunbar", StatLine { goals: 1, marks: 3, ..Default::default() }),
            // 1*7 + 5 = 12
            ("Theo Rossi", StatLine { goals: 1, kicks: 5, ..Default::default() }),
            // 15 disposals = 15
            ("Clancy Begg", StatLine { kicks: 10, handballs: 5, ..Default::default() }),
            // 3*4 + 2 = 14
            ("Sam Whitfield", StatLine { tackles: 3, handballs: 2, ..Default::default() }),
            // 10 + 2 = 12 combined
            ("Angus Crane", StatLine { hitouts: 10, marks: 2, ..Default::default() }),
        ])
    }

    #[test]
    fn totals_sum_slot_scores_and_bonus() {
        let score = compute_team_score(&full_lineup(), &full_stats(), true, 6);
        // 18 + 12 + 12 + 15 + 14 + 12 = 83
        assert_eq!(score.total_score, 83);
        assert_eq!(score.final_score, 89);
        assert_eq!(score.dead_cert_bonus, 6);
        assert!(score.substitutions.is_empty());
        assert!(score.unused.is_empty());
    }

    #[test]
    fn conservation_holds_with_substitutions() {
        let mut lineup = full_lineup();
        lineup.add_bench("Harry Voss", Position::FullForward);
        let mut stats = full_stats();
        stats.insert("Harry Voss".to_string(), StatLine { goals: 4, ..Default::default() });

        let score = compute_team_score(&lineup, &stats, true, -3);
        let slot_sum: u32 = score.slots.iter().map(|slot| slot.final_score).sum();
        assert_eq!(score.total_score, slot_sum);
        assert_eq!(score.final_score, slot_sum as i32 - 3);
    }

    #[test]
    fn negative_bonus_can_push_final_below_zero() {
        let mut lineup = Lineup::new();
        lineup.set_starter(Position::FullForward, "Lachie Naughton");
        let stats = stats_map(&[(
            "Lachie Naughton",
            StatLine { goals: 1, behinds: 1, ..Default::default() },
        )]);

        // 10 - 12 = -2
        let score = compute_team_score(&lineup, &stats, true, -12);
        assert_eq!(score.total_score, 10);
        assert_eq!(score.final_score, -2);
    }

    #[test]
    fn empty_team_scores_zero() {
        let score = compute_team_score(&Lineup::new(), &HashMap::new(), true, 0);
        assert_eq!(score.total_score, 0);
        assert_eq!(score.final_score, 0);
        assert_eq!(score.slots.len(), 6);
        assert!(score.substitutions.is_empty());
        assert!(score.unused.is_empty());
    }

    #[test]
    fn unused_lists_replacements_that_stayed_out() {
        let mut lineup = full_lineup();
        lineup.add_bench("Harry Voss", Position::FullForward);
        lineup.add_bench("Joel Sheedy", Position::Tackler);
        lineup.set_reserve(ReserveGroup::B, "Ollie Trengove", None);
        let mut stats = full_stats();
        // Voss comes in for the FullForward (4*9 = 36 > 18)
        stats.insert("Harry Voss".to_string(), StatLine { goals: 4, ..Default::default() });
        // Sheedy played but cannot beat the Tackler's 14: 2*4 + 1 = 9
        stats.insert(
            "Joel Sheedy".to_string(),
            StatLine { tackles: 2, handballs: 1, ..Default::default() },
        );
        // 8 + 4 = 12 disposals is his best group position (Midfielder)
        stats.insert(
            "Ollie Trengove".to_string(),
            StatLine { kicks: 8, handballs: 4, ..Default::default() },
        );

        let score = compute_team_score(&lineup, &stats, true, 0);
        assert_eq!(score.substitutions.len(), 1);
        assert_eq!(score.unused.len(), 2);

        let sheedy = &score.unused[0];
        assert_eq!(sheedy.player, "Joel Sheedy");
        assert_eq!(sheedy.role, ReplacementRole::Bench { covers: Position::Tackler });
        assert_eq!(sheedy.score, 9);

        let trengove = &score.unused[1];
        assert_eq!(trengove.player, "Ollie Trengove");
        assert_eq!(
            trengove.role,
            ReplacementRole::Reserve { group: ReserveGroup::B, covers: None }
        );
        assert_eq!(trengove.score, 12);
    }

    #[test]
    fn unused_undeclared_reserve_takes_best_group_position() {
        let mut lineup = full_lineup();
        lineup.set_reserve(ReserveGroup::A, "Jack Rennie", None);
        let mut stats = full_stats();
        // FullForward 9, TallForward 6+16 = 22, Ruck 15+3+15 = 33
        stats.insert(
            "Jack Rennie".to_string(),
            StatLine { hitouts: 15, marks: 8, goals: 1, ..Default::default() },
        );

        let score = compute_team_score(&lineup, &stats, true, 0);
        assert_eq!(score.unused.len(), 1);
        assert_eq!(score.unused[0].score, 33);
    }

    #[test]
    fn unused_declared_reserve_scores_its_nominated_position() {
        let mut lineup = full_lineup();
        lineup.set_reserve(ReserveGroup::A, "Jack Rennie", Some(Position::TallForward));
        let mut stats = full_stats();
        // Declared TallForward: 1*6 + 8*2 = 22, even though Ruck would be 33
        stats.insert(
            "Jack Rennie".to_string(),
            StatLine { hitouts: 15, marks: 8, goals: 1, ..Default::default() },
        );

        let score = compute_team_score(&lineup, &stats, true, 0);
        assert_eq!(score.unused[0].score, 22);
    }

    #[test]
    fn unused_includes_a_no_show_bench_at_zero() {
        let mut lineup = full_lineup();
        lineup.add_bench("Harry Voss", Position::FullForward);
        let score = compute_team_score(&lineup, &full_stats(), true, 0);
        assert_eq!(score.unused.len(), 1);
        assert_eq!(score.unused[0].player, "Harry Voss");
        assert_eq!(score.unused[0].score, 0);
    }

    #[test]
    fn repeated_invocations_agree() {
        let mut lineup = full_lineup();
        lineup.add_bench("Harry Voss", Position::FullForward);
        lineup.set_reserve(ReserveGroup::B, "Ollie Trengove", None);
        let mut stats = full_stats();
        stats.insert("Harry Voss".to_string(), StatLine { goals: 4, ..Default::default() });

        let first = compute_team_score(&lineup, &stats, true, 6);
        let second = compute_team_score(&lineup, &stats, true, 6);
        assert_eq!(first, second);
    }
}
