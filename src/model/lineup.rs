use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LineupRiderDto {
    pub profile_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub member_status: Option<String>,
}

/// A rider already fielded by another team on the same date
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BusyRiderDto {
    pub profile_id: i64,
    pub team_trc: i32,
    pub team_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LineupDto {
    pub trc: i32,
    pub team_name: String,
    pub race_id: String,
    pub race_date: NaiveDate,
    pub captain: Option<String>,
    pub riders: Vec<LineupRiderDto>,
    pub selected_ids: Vec<i64>,
    pub busy_riders: Vec<BusyRiderDto>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SaveLineupDto {
    #[serde(default)]
    pub profile_ids: Vec<i64>,
}
