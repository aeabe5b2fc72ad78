//! Test fixture modules for database records and mock WTRL endpoints.
//!
//! - `league` - seasons, rounds, races, teams, riders, lineups, results, availability
//! - `user` - user accounts
//! - `wtrl` - WTRL payload factories and mockito endpoints

pub mod league;
pub mod user;
pub mod wtrl;
