// Roster domain model: positions, coverage groups, lineup slots.

pub mod lineup;
pub mod position;
