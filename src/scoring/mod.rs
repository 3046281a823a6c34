// Scoring engine: stat lines, position rules, substitution resolution,
// team aggregation.

pub mod resolve;
pub mod rules;
pub mod stats;
pub mod team;
