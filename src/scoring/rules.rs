// The six position scoring rules.

use crate::roster::position::Position;
use crate::scoring::stats::StatLine;

/// Disposals at or below this count score face value for a Midfielder;
/// every disposal beyond it scores triple.
const MIDFIELDER_DISPOSAL_CAP: u32 = 30;

/// Combined hitouts-plus-marks at or below this count score face value for a
/// Ruck; once the combined total clears it, surplus marks score triple.
const RUCK_HITOUT_MARK_CAP: u32 = 18;

/// Score one stat line under one position's rule.
///
/// Deterministic integer arithmetic over non-negative counters; the result is
/// always non-negative and the function never panics.
///
/// | Position | Rule |
/// |---|---|
/// | FullForward | goals x9 + behinds |
/// | TallForward | goals x6 + marks x2 |
/// | Offensive | goals x7 + kicks |
/// | Tackler | tackles x4 + handballs |
/// | Midfielder | disposals, tripled past 30 |
/// | Ruck | hitouts + marks, surplus marks tripled past 18 combined |
pub fn position_score(position: Position, stats: &StatLine) -> u32 {
    match position {
        Position::FullForward => stats.goals * 9 + stats.behinds,
        Position::TallForward => stats.goals * 6 + stats.marks * 2,
        Position::Offensive => stats.goals * 7 + stats.kicks,
        Position::Tackler => stats.tackles * 4 + stats.handballs,
        Position::Midfielder => midfielder_score(stats),
        Position::Ruck => ruck_score(stats),
    }
}

/// Score under `position` for a possibly-absent line; absent scores 0 in
/// every position.
pub fn score_or_zero(position: Position, stats: Option<&StatLine>) -> u32 {
    stats.map_or(0, |line| position_score(position, line))
}

fn midfielder_score(stats: &StatLine) -> u32 {
    let disposals = stats.disposals();
    let base = disposals.min(MIDFIELDER_DISPOSAL_CAP);
    let extra = disposals.saturating_sub(MIDFIELDER_DISPOSAL_CAP);
    base + extra * 3
}

fn ruck_score(stats: &StatLine) -> u32 {
    let combined = stats.hitouts + stats.marks;
    if combined <= RUCK_HITOUT_MARK_CAP {
        return combined;
    }
    // combined > cap here, so marks always exceed the regular allowance
    let regular_marks = RUCK_HITOUT_MARK_CAP.saturating_sub(stats.hitouts);
    let bonus_marks = stats.marks - regular_marks;
    stats.hitouts + regular_marks + bonus_marks * 3
}
