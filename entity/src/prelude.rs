pub use super::race::Entity as Race;
pub use super::race_lineup::Entity as RaceLineup;
pub use super::race_results_rider::Entity as RaceResultsRider;
pub use super::race_results_team::Entity as RaceResultsTeam;
pub use super::rider_availability::Entity as RiderAvailability;
pub use super::round::Entity as Round;
pub use super::round_standing::Entity as RoundStanding;
pub use super::season::Entity as Season;
pub use super::team::Entity as Team;
pub use super::user::Entity as User;
pub use super::wtrl_rider::Entity as WtrlRider;
