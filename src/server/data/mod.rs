//! Data access layer repositories.
//!
//! Each repository wraps one table (results and standings share one) and is generic over
//! `ConnectionTrait`, so the same queries run against the pool or inside an import
//! transaction.

pub mod availability;
pub mod lineup;
pub mod race;
pub mod results;
pub mod round;
pub mod season;
pub mod team;
pub mod user;
pub mod wtrl_rider;
