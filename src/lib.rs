//! ZRL Manager: rosters, lineups, WTRL imports and reports for a Zwift Racing League community.

pub mod model;
pub mod server;
