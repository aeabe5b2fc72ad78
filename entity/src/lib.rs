//! Database entities for the league schema.
//!
//! One module per table. Composite unique keys are created by the `migration`
//! crate; the entities only declare single-column constraints and foreign keys.

pub mod prelude;

pub mod race;
pub mod race_lineup;
pub mod race_results_rider;
pub mod race_results_team;
pub mod rider_availability;
pub mod round;
pub mod round_standing;
pub mod season;
pub mod team;
pub mod user;
pub mod wtrl_rider;
