// Position archetypes and reserve coverage groups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six main position archetypes a lineup fields each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    FullForward,
    TallForward,
    Offensive,
    Midfielder,
    Tackler,
    Ruck,
}

impl Position {
    /// Every position in resolution order. Substitutions are resolved
    /// greedily in this order, so earlier slots claim a contested
    /// replacement first.
    pub const ALL: [Position; 6] = [
        Position::FullForward,
        Position::TallForward,
        Position::Offensive,
        Position::Midfielder,
        Position::Tackler,
        Position::Ruck,
    ];

    /// Parse a position label into a Position enum.
    ///
    /// Accepts case, whitespace and underscore variants: "Full Forward",
    /// "full_forward" and "FULL  FORWARD" all parse to FullForward.
    pub fn from_label(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "FULL_FORWARD" => Some(Position::FullForward),
            "TALL_FORWARD" => Some(Position::TallForward),
            "OFFENSIVE" => Some(Position::Offensive),
            "MIDFIELDER" => Some(Position::Midfielder),
            "TACKLER" => Some(Position::Tackler),
            "RUCK" => Some(Position::Ruck),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::FullForward => "Full Forward",
            Position::TallForward => "Tall Forward",
            Position::Offensive => "Offensive",
            Position::Midfielder => "Midfielder",
            Position::Tackler => "Tackler",
            Position::Ruck => "Ruck",
        }
    }

    /// Index of this position within [`Position::ALL`], used to address the
    /// fixed main-slot array.
    pub fn slot_index(&self) -> usize {
        match self {
            Position::FullForward => 0,
            Position::TallForward => 1,
            Position::Offensive => 2,
            Position::Midfielder => 3,
            Position::Tackler => 4,
            Position::Ruck => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Reserve coverage groups. A reserve slot belongs to one group and may stand
/// in for any of the three positions that group covers once the round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReserveGroup {
    A,
    B,
}

impl ReserveGroup {
    /// The three positions this group covers.
    pub fn positions(&self) -> [Position; 3] {
        match self {
            ReserveGroup::A => [Position::FullForward, Position::TallForward, Position::Ruck],
            ReserveGroup::B => [Position::Offensive, Position::Midfielder, Position::Tackler],
        }
    }

    /// Whether this group covers the given position.
    pub fn covers(&self, position: Position) -> bool {
        self.positions().contains(&position)
    }

    /// Parse a reserve-group label ("Reserve A", "RESERVE_B", bare "a").
    pub fn from_label(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "RESERVE_A" | "A" => Some(ReserveGroup::A),
            "RESERVE_B" | "B" => Some(ReserveGroup::B),
            _ => None,
        }
    }

    /// Return the display string for this group.
    pub fn display_str(&self) -> &'static str {
        match self {
            ReserveGroup::A => "Reserve A",
            ReserveGroup::B => "Reserve B",
        }
    }
}

impl fmt::Display for ReserveGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Canonical form of a slot label: trimmed, uppercased, whitespace runs
/// collapsed to single underscores.
pub(crate) fn normalize_label(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join("_").to_uppercase()
}
