//! Read models for seasons, rosters and standings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RaceDto {
    pub id: i32,
    pub name: String,
    pub race_date: NaiveDate,
    pub category: Option<String>,
    pub format: Option<String>,
    pub world: Option<String>,
    pub course: Option<String>,
    pub laps: Option<i32>,
    pub distance_km: Option<f64>,
    pub elevation_m: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoundDto {
    pub id: i32,
    pub round_number: i32,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub races: Vec<RaceDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SeasonDto {
    pub id: i32,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rounds: Vec<RoundDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RosterRiderDto {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RosterDto {
    pub name: String,
    pub captain: Option<String>,
    pub riders: Vec<RosterRiderDto>,
}

/// Rosters keyed by `"{category}{division}"`
pub type RostersDto = BTreeMap<String, RosterDto>;

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StandingDto {
    pub position: usize,
    pub team_trc: i32,
    pub team_name: String,
    pub total_points: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClassStandingsDto {
    pub season: i32,
    pub class_id: String,
    pub standings: Vec<StandingDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AvailabilityDto {
    pub availability_data: serde_json::Value,
    pub notes: String,
}
