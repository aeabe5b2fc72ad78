//! Season schedule import: seasons, rounds and races for categories A to D.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use serde_json::Value;

use crate::server::{
    data::{
        race::{RaceRepository, RaceUpsert},
        round::RoundRepository,
        season::SeasonRepository,
    },
    error::Error,
    service::import::{
        finish_transaction, snapshot::write_snapshot, ImportService, ImportSummary,
    },
    wtrl::model::{payload_entries, ScheduleEntry},
};

pub const SCHEDULE_CATEGORIES: [&str; 4] = ["A", "B", "C", "D"];

/// A schedule entry with the fields every race needs
struct ScheduledRace {
    round_number: i32,
    date: NaiveDate,
    race: RaceUpsert,
}

impl<'a> ImportService<'a> {
    /// Fetches the schedule of every category and stores it in one transaction
    pub async fn import_schedule(&self, season: i32) -> Result<ImportSummary, Error> {
        let mut summary = ImportSummary::default();
        let mut scheduled = Vec::new();

        for (index, category) in SCHEDULE_CATEGORIES.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.wtrl_client.poll_config().segment_pause).await;
            }

            self.tracker.set_progress(
                index,
                SCHEDULE_CATEGORIES.len(),
                format!("Fetching schedule for category {}", category),
            );

            let body = match self.wtrl_client.fetch_schedule(season, category).await {
                Ok(body) => body,
                Err(e) => {
                    self.record_error(
                        &mut summary,
                        format!("Unable to fetch schedule for category {}: {}", category, e),
                    );
                    continue;
                }
            };

            if let Some(dir) = self.snapshot_dir {
                write_snapshot(dir, &format!("schedule_{}_{}.json", season, category), &body)
                    .await;
            }

            let entries = match payload_entries::<ScheduleEntry>(&body) {
                Ok(entries) => entries,
                Err(e) => {
                    self.record_error(
                        &mut summary,
                        format!("Invalid schedule for category {}: {}", category, e),
                    );
                    continue;
                }
            };

            for entry in entries {
                match scheduled_race(entry, category) {
                    Some(race) => scheduled.push(race),
                    None => self.record_warning(
                        &mut summary,
                        format!(
                            "Skipping category {} race without date or round number",
                            category
                        ),
                    ),
                }
            }
        }

        if scheduled.is_empty() {
            self.record_warning(
                &mut summary,
                format!("No races found in the schedule for season {}", season),
            );
            return Ok(summary);
        }

        match self.store_season_schedule(season, scheduled).await {
            Ok(races) => {
                summary.races = races;
                summary.segments = 1;
            }
            Err(e) => self.record_error(
                &mut summary,
                format!("Failed to store schedule for season {}: {}", season, e),
            ),
        }

        Ok(summary)
    }

    async fn store_season_schedule(
        &self,
        season: i32,
        scheduled: Vec<ScheduledRace>,
    ) -> Result<usize, Error> {
        let txn = self.db.begin().await?;
        let stored = store_schedule(&txn, season, scheduled).await;

        finish_transaction(txn, stored).await
    }
}

fn scheduled_race(entry: ScheduleEntry, category: &str) -> Option<ScheduledRace> {
    let date = entry.event_date()?;
    let round_number = entry.round_number?;
    let external_id = entry.race.clone().filter(|id| !id.trim().is_empty());

    let name = entry
        .course_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Race {}", external_id.as_deref().unwrap_or("?")));

    Some(ScheduledRace {
        round_number,
        date,
        race: RaceUpsert {
            name,
            race_date: date,
            format: entry.race_format,
            world: entry.course_world,
            course: entry.course_full,
            laps: entry.duration,
            distance_km: entry.lap_distance_in_meters.map(|m| m / 1000.0),
            elevation_m: entry.lap_ascent_in_meters,
            rules: entry.rules.and_then(value_to_text),
            segments: entry.segments.and_then(value_to_text),
            leadin_distance: entry.leadin_distance_in_meters,
            leadin_ascent: entry.leadin_ascent_in_meters,
            category: entry
                .subgroup_label
                .filter(|label| !label.trim().is_empty())
                .or_else(|| Some(category.to_string())),
            external_id,
        },
    })
}

/// Strings are stored as-is, anything else as its JSON text
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

async fn store_schedule(
    txn: &DatabaseTransaction,
    season: i32,
    scheduled: Vec<ScheduledRace>,
) -> Result<usize, Error> {
    let mut rounds: BTreeMap<i32, (NaiveDate, NaiveDate)> = BTreeMap::new();
    for race in &scheduled {
        rounds
            .entry(race.round_number)
            .and_modify(|(start, end)| {
                *start = (*start).min(race.date);
                *end = (*end).max(race.date);
            })
            .or_insert((race.date, race.date));
    }

    let (Some(season_start), Some(season_end)) = (
        rounds.values().map(|(start, _)| *start).min(),
        rounds.values().map(|(_, end)| *end).max(),
    ) else {
        return Ok(0);
    };

    let season_model = SeasonRepository::new(txn)
        .upsert(&season.to_string(), season_start, season_end)
        .await?;

    let round_repo = RoundRepository::new(txn);
    let mut round_ids = BTreeMap::new();
    for (round_number, (start, end)) in &rounds {
        let round = round_repo
            .upsert(season_model.id, *round_number, *start, *end)
            .await?;
        round_ids.insert(*round_number, round.id);
    }

    let race_repo = RaceRepository::new(txn);
    let mut stored = 0;
    for race in scheduled {
        let Some(round_id) = round_ids.get(&race.round_number) else {
            continue;
        };

        race_repo.upsert(*round_id, race.race).await?;
        stored += 1;
    }

    Ok(stored)
}
