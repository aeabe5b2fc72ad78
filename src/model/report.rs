use serde::{Deserialize, Serialize};

/// Query string of `GET /admin/reports/export`
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
pub struct ReportParams {
    /// `riders_compact` (default), `riders`, `teams`, `team_composition`, `lineup` or
    /// `round_standings`
    pub report_type: Option<String>,
    /// `html` (default), `csv`, `xlsx`/`excel` or `pdf`
    pub format: Option<String>,
    /// Team category; empty, `ALL`, `TUTTI`, `TUTTE` and `NONE` disable the filter
    pub category: Option<String>,
    /// Team TRC or name
    pub team: Option<String>,
}
