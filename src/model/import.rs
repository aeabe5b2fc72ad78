use serde::{Deserialize, Serialize};

/// Progress of the background import, polled by the admin UI
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImportStatusDto {
    /// 0 to 100
    pub progress: u8,
    pub message: String,
    pub is_running: bool,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
pub struct ImportRankingsParams {
    pub season: Option<String>,
    pub class_id: Option<String>,
    pub race_number: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
pub struct ImportTeamsParams {
    pub season: Option<String>,
    /// Comma-separated TRCs; the configured TRC list file is used when absent
    pub trcs: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
pub struct ImportScheduleParams {
    pub season: Option<String>,
}
