//! JSON bodies shaped like the WTRL API responses.

use serde_json::{json, Value};

/// Wraps entries in the `{"payload": [...]}` envelope every WTRL endpoint uses
pub fn payload(entries: Vec<Value>) -> Value {
    json!({ "payload": entries })
}

/// Team entry of a results response
pub fn team_result(trc: i32, name: &str, lpoints: f64, members: Vec<Value>) -> Value {
    json!({
        "id5": trc.to_string(),
        "teamname": name,
        "division": "1",
        "finp": 10,
        "pbp": 4,
        "lpoints": lpoints,
        "falp": 2,
        "ftsp": 3,
        "timeResult": 3605.2,
        "distanceResult": "42.1",
        "p1": 1,
        "a": members,
    })
}

/// Rider entry inside a team result
pub fn member_result(zid: i64, name: &str, totrp: f64) -> Value {
    json!({
        "zid": zid.to_string(),
        "name": name,
        "category": "A",
        "finrp": 5,
        "pbprp": 1,
        "totrp": totrp,
        "falrp": 0,
        "ftsrp": 1,
        "timeResult": 3605.2,
        "distanceResult": 42.1,
        "wkg": "4.1",
        "watts": 310,
        "gap": 0,
    })
}

/// League standings response; `d` is the team name and `n` the cumulative points
pub fn league(entries: &[(&str, f64)]) -> Value {
    payload(
        entries
            .iter()
            .map(|(name, points)| json!({ "d": name, "n": points }))
            .collect(),
    )
}

/// Team roster response
pub fn team_roster(trc: i32, name: &str, class: &str, riders: Vec<Value>) -> Value {
    json!({
        "meta": {
            "trc": trc,
            "division": "1",
            "team": {
                "name": name,
                "teamid": trc.to_string(),
                "jerseyname": "Default",
                "jerseyimage": "https://img.example/jersey.png",
                "recruiting": "1",
                "isdev": false,
            },
            "competition": {
                "class": class,
                "season": 17,
                "sportsYear": 2025,
                "roundnumber": 2,
                "status": "ACTIVE",
            },
            "memberCount": riders.len(),
            "membersRemaining": 20 - riders.len() as i64,
            "administrators": {
                "captain": { "firstName": "Cap", "lastName": "Tain", "profileId": 900001 }
            },
        },
        "riders": riders,
    })
}

/// Rider entry of a team roster
pub fn roster_rider(zid: i64, name: &str) -> Value {
    json!({
        "zid": zid,
        "tmuid": format!("tm-{}", zid),
        "name": name,
        "avatar": format!("https://img.example/{}.png", zid),
        "memberStatus": "ACTIVE",
        "signedup": "true",
        "category": "A",
        "zftp": "310",
        "zftpw": 4.3,
        "riderpoints": 120,
        "appearancesRound": 1,
        "appearancesSeason": "3",
    })
}

/// Race entry of a schedule response
pub fn schedule_race(event_date: &str, round_number: i32, race: &str, category: &str) -> Value {
    json!({
        "eventDate": event_date,
        "roundNumber": round_number,
        "race": race,
        "subgroup_label": category,
        "courseName": format!("Course {}", race),
        "raceFormat": "Points Race",
        "courseWorld": "Watopia",
        "courseFull": "Watopia Flat Route",
        "duration": 3,
        "lapDistanceInMeters": 10300,
        "lapAscentInMeters": 52,
        "rules": "No Power-ups",
        "segments": [{"name": "Sprint"}],
        "leadinDistanceInMeters": 400,
        "leadinAscentInMeters": 2,
    })
}
