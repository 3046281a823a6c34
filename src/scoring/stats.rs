// Per-player, per-round stat counters and play detection.

use serde::{Deserialize, Serialize};

/// One player's raw counters for a single round.
///
/// Fields missing from the source data deserialize as 0. A player with no
/// line at all (not in the round's feed) is simply absent from the stats map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub kicks: u32,
    #[serde(default)]
    pub handballs: u32,
    #[serde(default)]
    pub marks: u32,
    #[serde(default)]
    pub tackles: u32,
    #[serde(default)]
    pub hitouts: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub behinds: u32,
}

impl StatLine {
    /// Kicks plus handballs.
    pub fn disposals(&self) -> u32 {
        self.kicks + self.handballs
    }

    /// Whether this line shows the player took the field: true iff any
    /// counter is above zero.
    ///
    /// This predicate, not a score, is the "did not play" signal. A player
    /// can play and still score 0 in a position (a Tackler who only took
    /// marks, say), and that player must stay in their slot rather than be
    /// treated as a no-show.
    pub fn played(&self) -> bool {
        self.kicks > 0
            || self.handballs > 0
            || self.marks > 0
            || self.tackles > 0
            || self.hitouts > 0
            || self.goals > 0
            || self.behinds > 0
    }
}

/// Play detection over a possibly-absent line: absent means did not play.
pub fn played(stats: Option<&StatLine>) -> bool {
    stats.map_or(false, StatLine::played)
}
