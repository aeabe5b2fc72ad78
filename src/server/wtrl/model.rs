//! Payload models for the WTRL endpoints.
//!
//! Every field is optional and decoded leniently; a malformed entry is skipped by
//! [`payload_entries`] rather than failing the whole response.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::server::{error::wtrl::WtrlError, wtrl::de};

/// Decodes the `payload` array of a WTRL response.
///
/// Errors when `payload` is missing or not an array. Entries that fail to decode are
/// logged and dropped.
pub fn payload_entries<T: DeserializeOwned>(body: &Value) -> Result<Vec<T>, WtrlError> {
    let Some(items) = body.get("payload").and_then(Value::as_array) else {
        return Err(WtrlError::InvalidPayload(
            "payload is missing or not an array".to_string(),
        ));
    };

    let entries = items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed WTRL payload entry: {}", e);
                None
            }
        })
        .collect();

    Ok(entries)
}

/// One team in a results response
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamResultEntry {
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub id5: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub id1: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub teamname: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub division: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub finp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub pbp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub lpoints: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub falp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub ftsp: Option<f64>,
    #[serde(default, rename = "timeResult", deserialize_with = "de::opt_f64")]
    pub time_result: Option<f64>,
    #[serde(default, rename = "distanceResult", deserialize_with = "de::opt_f64")]
    pub distance_result: Option<f64>,
    /// Finishing position
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub p1: Option<i32>,
    /// Riders
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub a: Vec<MemberResultEntry>,
}

impl TeamResultEntry {
    /// TRC from `id5`, falling back to `id1`
    pub fn trc(&self) -> Option<i32> {
        self.id5.filter(|trc| *trc > 0).or(self.id1.filter(|trc| *trc > 0))
    }
}

/// One rider inside a team result
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberResultEntry {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub zid: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub p1: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub finrp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub pbprp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub totrp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub falrp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub ftsrp: Option<f64>,
    #[serde(default, rename = "timeResult", deserialize_with = "de::opt_f64")]
    pub time_result: Option<f64>,
    #[serde(default, rename = "distanceResult", deserialize_with = "de::opt_f64")]
    pub distance_result: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub wkg: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub watts: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub gap: Option<f64>,
}

impl MemberResultEntry {
    /// Zwift profile ID from `zid`, falling back to `p1`; `0` and `None` mean absent
    pub fn profile_id(&self) -> Option<i64> {
        self.zid
            .as_deref()
            .filter(|pid| !matches!(*pid, "0" | "None"))
            .or_else(|| {
                self.p1
                    .as_deref()
                    .filter(|pid| !matches!(*pid, "0" | "None"))
            })
            .and_then(|pid| pid.parse::<i64>().ok())
            .filter(|pid| *pid > 0)
    }
}

/// One team in a league standings response
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LeagueEntry {
    /// Team name
    #[serde(default, deserialize_with = "de::opt_string")]
    pub d: Option<String>,
    /// Cumulative points
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub n: Option<f64>,
}

/// Team roster response
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamRosterResponse {
    #[serde(default)]
    pub meta: TeamMeta,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub riders: Vec<RosterRider>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMeta {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub division: Option<String>,
    #[serde(default)]
    pub team: TeamInfo,
    #[serde(default)]
    pub competition: CompetitionInfo,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub member_count: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub members_remaining: Option<i32>,
    #[serde(default)]
    pub administrators: Administrators,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamInfo {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub teamid: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub tttid: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub jerseyname: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub jerseyimage: Option<String>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub recruiting: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub isdev: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CompetitionInfo {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub season: Option<i32>,
    #[serde(default, rename = "sportsYear", deserialize_with = "de::opt_i32")]
    pub sports_year: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub roundnumber: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Administrators {
    #[serde(default)]
    pub captain: Option<TeamAdmin>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAdmin {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub profile_id: Option<i64>,
}

impl TeamAdmin {
    pub fn display_name(&self) -> Option<String> {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        (!name.is_empty()).then_some(name)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRider {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub zid: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub zwid: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub profile_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub tmuid: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub member_status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub signedup: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub zftp: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub zftpw: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub zmap: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub zmapw: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub riderpoints: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub teams: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub appearances_round: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub appearances_season: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub user_id: Option<String>,
}

impl RosterRider {
    pub fn profile_id(&self) -> Option<i64> {
        [self.zid, self.zwid, self.profile_id]
            .into_iter()
            .flatten()
            .find(|pid| *pid > 0)
    }
}

/// One race in a schedule response
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub event_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub round_number: Option<i32>,
    /// External race identifier
    #[serde(default, deserialize_with = "de::opt_string")]
    pub race: Option<String>,
    #[serde(default, rename = "subgroup_label", deserialize_with = "de::opt_string")]
    pub subgroup_label: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub race_format: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub course_world: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub course_full: Option<String>,
    /// Laps
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub duration: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub lap_distance_in_meters: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub lap_ascent_in_meters: Option<f64>,
    #[serde(default)]
    pub rules: Option<Value>,
    #[serde(default)]
    pub segments: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub leadin_distance_in_meters: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub leadin_ascent_in_meters: Option<f64>,
}

impl ScheduleEntry {
    /// Accepts `YYYY-MM-DD` or any ISO-8601 datetime prefixed by a date
    pub fn event_date(&self) -> Option<NaiveDate> {
        let raw = self.event_date.as_deref()?.trim();
        let date_part = raw.get(..10).unwrap_or(raw);

        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}
