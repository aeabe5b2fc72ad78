use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::league::{RaceDto, RoundDto};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TeamSummaryDto {
    pub trc: i32,
    pub name: String,
    pub category: Option<String>,
    pub division: Option<String>,
    pub captain: Option<String>,
    pub next_race_date: Option<NaiveDate>,
    pub has_lineup: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DashboardDto {
    pub active_round: Option<RoundDto>,
    pub teams: Vec<TeamSummaryDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AvailableRiderDto {
    pub profile_id: i64,
    pub name: String,
    pub team_trc: i32,
    pub start: Option<String>,
    pub end: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CaptainDashboardDto {
    pub next_race: Option<RaceDto>,
    pub teams: Vec<TeamSummaryDto>,
    pub available_riders: Vec<AvailableRiderDto>,
}
