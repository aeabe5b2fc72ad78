//! Type aliases for the sea-orm models used across the server.

pub type SeasonModel = entity::season::Model;
pub type RoundModel = entity::round::Model;
pub type RaceModel = entity::race::Model;
pub type TeamModel = entity::team::Model;
pub type WtrlRiderModel = entity::wtrl_rider::Model;
pub type RaceLineupModel = entity::race_lineup::Model;
pub type RaceResultsTeamModel = entity::race_results_team::Model;
pub type RaceResultsRiderModel = entity::race_results_rider::Model;
pub type RoundStandingModel = entity::round_standing::Model;
pub type UserModel = entity::user::Model;
pub type RiderAvailabilityModel = entity::rider_availability::Model;
