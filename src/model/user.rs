use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub profile_id: i64,
    pub email: String,
    pub role: String,
    pub team_trc: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

/// Body for creating or editing a user.
///
/// `profile_id` is kept as a string so a non-numeric value can be reported as a
/// validation error instead of a deserialization failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserFormDto {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub team_trc: Option<i32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
