//! Race results and league standings import.
//!
//! Work is split into segments of (season, class, race). Each segment is polled from
//! WTRL and stored in its own transaction, so a failing segment rolls back alone.

use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};

use crate::server::{
    data::{
        results::{ResultsRepository, RiderResultUpsert, TeamResultUpsert},
        round::RoundRepository,
        season::SeasonRepository,
        team::TeamRepository,
        wtrl_rider::{rider_id, WtrlRiderRepository},
    },
    error::Error,
    model::db::TeamModel,
    service::import::{
        finish_transaction, snapshot::write_snapshot, ImportService, ImportSummary,
    },
    util::name::normalize_name,
    wtrl::{
        model::{payload_entries, LeagueEntry, TeamResultEntry},
        PollOutcome,
    },
};

/// Rows written for one segment
#[derive(Debug, Default, PartialEq)]
struct SegmentCounts {
    teams: usize,
    riders: usize,
}

impl<'a> ImportService<'a> {
    /// Imports results and standings for every requested (race, class) segment.
    ///
    /// Without `class_id` every class entered in the season is imported; without
    /// `race_number` every round of the season named after `season` is.
    pub async fn import_results(
        &self,
        season: i32,
        class_id: Option<&str>,
        race_number: Option<i32>,
    ) -> Result<ImportSummary, Error> {
        let mut summary = ImportSummary::default();

        let classes = match class_id.map(str::trim).filter(|c| !c.is_empty()) {
            Some(class_id) => vec![class_id.to_string()],
            None => {
                TeamRepository::new(self.db)
                    .get_competition_classes(season)
                    .await?
            }
        };
        if classes.is_empty() {
            self.record_warning(
                &mut summary,
                format!("No competition classes found for season {}", season),
            );
            return Ok(summary);
        }

        let races = match race_number {
            Some(race) => vec![race],
            None => self.season_race_numbers(season).await?,
        };
        if races.is_empty() {
            self.record_warning(
                &mut summary,
                format!("No rounds found for season {}", season),
            );
            return Ok(summary);
        }

        let total = races.len() * classes.len();
        let mut done = 0;

        for race in &races {
            for class_id in &classes {
                if done > 0 {
                    tokio::time::sleep(self.wtrl_client.poll_config().segment_pause).await;
                }

                self.tracker.set_progress(
                    done,
                    total,
                    format!(
                        "Importing season {}, class {}, race {}",
                        season, class_id, race
                    ),
                );

                self.import_segment(season, class_id, *race, &mut summary)
                    .await;

                done += 1;
            }
        }

        Ok(summary)
    }

    /// Round numbers of the season whose name is the season number
    async fn season_race_numbers(&self, season: i32) -> Result<Vec<i32>, Error> {
        let Some(season_model) = SeasonRepository::new(self.db)
            .find_by_name(&season.to_string())
            .await?
        else {
            return Ok(Vec::new());
        };

        Ok(RoundRepository::new(self.db)
            .get_by_season(season_model.id)
            .await?
            .into_iter()
            .map(|round| round.round_number)
            .collect())
    }

    async fn import_segment(
        &self,
        season: i32,
        class_id: &str,
        race: i32,
        summary: &mut ImportSummary,
    ) {
        let body = match self.wtrl_client.poll_results(season, class_id, race).await {
            PollOutcome::Ready(body) => body,
            PollOutcome::Failed(failure) => {
                tracing::debug!(
                    "Results poll failed after {} attempts: {}",
                    failure.attempts,
                    failure.excerpt
                );
                self.record_error(
                    summary,
                    format!(
                        "Unable to fetch results for season {}, class {}, race {} ({})",
                        season, class_id, race, failure
                    ),
                );
                return;
            }
        };

        let league = match self.wtrl_client.poll_league(season, class_id, race).await {
            PollOutcome::Ready(league_body) => league_points(&league_body),
            PollOutcome::Failed(failure) => {
                tracing::warn!(
                    "League standings unavailable for season {}, class {}, race {} ({}), using summed points",
                    season,
                    class_id,
                    race,
                    failure
                );
                HashMap::new()
            }
        };

        let entries = match payload_entries::<TeamResultEntry>(&body) {
            Ok(entries) => entries,
            Err(e) => {
                self.record_error(
                    summary,
                    format!(
                        "Invalid results for season {}, class {}, race {}: {}",
                        season, class_id, race, e
                    ),
                );
                return;
            }
        };

        if let Some(dir) = self.snapshot_dir {
            write_snapshot(
                dir,
                &format!("results_{}_{}_{}.json", season, class_id, race),
                &body,
            )
            .await;
        }

        match self
            .store_segment(season, class_id, race, entries, &league, summary)
            .await
        {
            Ok(counts) => {
                summary.segments += 1;
                summary.teams += counts.teams;
                summary.riders += counts.riders;

                tracing::info!(
                    "Stored season {}, class {}, race {}: {} teams, {} riders",
                    season,
                    class_id,
                    race,
                    counts.teams,
                    counts.riders
                );
            }
            Err(e) => self.record_error(
                summary,
                format!(
                    "Failed to store results for season {}, class {}, race {}: {}",
                    season, class_id, race, e
                ),
            ),
        }
    }

    /// Writes one segment inside a transaction; any error rolls the whole segment back
    async fn store_segment(
        &self,
        season: i32,
        class_id: &str,
        race: i32,
        entries: Vec<TeamResultEntry>,
        league: &HashMap<String, f64>,
        summary: &mut ImportSummary,
    ) -> Result<SegmentCounts, Error> {
        let txn = self.db.begin().await?;
        let stored = store_entries(&txn, season, class_id, race, entries, league).await;
        let (counts, skipped) = finish_transaction(txn, stored).await?;

        for warning in skipped {
            self.record_warning(summary, warning);
        }

        Ok(counts)
    }
}

/// Normalised team name to cumulative league points
fn league_points(body: &serde_json::Value) -> HashMap<String, f64> {
    match payload_entries::<LeagueEntry>(body) {
        Ok(entries) => entries
            .into_iter()
            .filter_map(|entry| Some((normalize_name(entry.d.as_deref()?), entry.n?)))
            .collect(),
        Err(e) => {
            tracing::warn!("Ignoring malformed league standings: {}", e);
            HashMap::new()
        }
    }
}

/// Returns the counts and a warning for every entry that matched no team
async fn store_entries(
    txn: &DatabaseTransaction,
    season: i32,
    class_id: &str,
    race: i32,
    entries: Vec<TeamResultEntry>,
    league: &HashMap<String, f64>,
) -> Result<(SegmentCounts, Vec<String>), Error> {
    let team_repo = TeamRepository::new(txn);
    let rider_repo = WtrlRiderRepository::new(txn);
    let results_repo = ResultsRepository::new(txn);

    let mut teams = team_repo.get_all().await?;
    let mut counts = SegmentCounts::default();
    let mut skipped = Vec::new();

    // Teams named by TRC in this payload are reserved before any name matching
    let mut claimed: HashSet<i32> = entries
        .iter()
        .filter_map(TeamResultEntry::trc)
        .filter(|trc| teams.iter().any(|team| team.trc == *trc))
        .collect();
    let mut bound = HashSet::new();

    for entry in entries {
        let entry_name = entry.teamname.as_deref().unwrap_or("unnamed entry").to_string();

        let Some(team) =
            resolve_team(txn, &mut teams, &claimed, &entry, season, class_id).await?
        else {
            skipped.push(format!(
                "No team matches {:?} in season {}, class {}, race {}",
                entry_name, season, class_id, race
            ));
            continue;
        };

        if !bound.insert(team.trc) {
            skipped.push(format!(
                "Team {} already has a result in season {}, class {}, race {}, skipping {:?}",
                team.trc, season, class_id, race, entry_name
            ));
            continue;
        }
        claimed.insert(team.trc);

        let team_result = results_repo
            .upsert_team_result(
                season,
                class_id,
                race,
                team.trc,
                TeamResultUpsert {
                    finp: entry.finp,
                    pbp: entry.pbp,
                    totp: entry.lpoints,
                    falp: entry.falp,
                    ftsp: entry.ftsp,
                    time_result: entry.time_result,
                    distance_result: entry.distance_result,
                    rank: entry.p1,
                },
            )
            .await?;
        counts.teams += 1;

        for member in &entry.a {
            let Some(profile_id) = member.profile_id() else {
                continue;
            };

            let id = rider_id(team.trc, profile_id);
            if rider_repo.get(&id).await?.is_none() {
                let name = member
                    .name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| format!("Unknown Rider {}", profile_id));

                rider_repo
                    .create_placeholder(team.trc, profile_id, &name, member.category.clone())
                    .await?;
            }

            results_repo
                .upsert_rider_result(
                    team_result.id,
                    &id,
                    RiderResultUpsert {
                        finp: member.finrp,
                        pbp: member.pbprp,
                        totp: member.totrp,
                        falp: member.falrp,
                        ftsp: member.ftsrp,
                        time_result: member.time_result,
                        distance_result: member.distance_result,
                        wkg: member.wkg,
                        watts: member.watts,
                        gap: member.gap,
                    },
                )
                .await?;
            counts.riders += 1;
        }

        let league_total = entry
            .teamname
            .as_deref()
            .and_then(|name| league.get(&normalize_name(name)))
            .or_else(|| league.get(&normalize_name(&team.name)))
            .copied();

        let total_points = match league_total {
            Some(points) => points,
            None => {
                results_repo
                    .sum_team_points(season, class_id, team.trc)
                    .await?
            }
        };

        results_repo
            .upsert_standing(season, class_id, team.trc, total_points)
            .await?;
    }

    Ok((counts, skipped))
}

/// Finds the local team for a results entry.
///
/// An entry with a TRC matches that TRC, then an exact normalised name, and otherwise
/// becomes a placeholder team. An entry without a TRC tries an exact, then a partial
/// normalised name and is `None` when neither matches. Teams in `claimed` are already
/// bound to another entry of the segment and never match by name.
async fn resolve_team<C: ConnectionTrait>(
    db: &C,
    teams: &mut Vec<TeamModel>,
    claimed: &HashSet<i32>,
    entry: &TeamResultEntry,
    season: i32,
    class_id: &str,
) -> Result<Option<TeamModel>, Error> {
    let trc = entry.trc();

    if let Some(trc) = trc {
        if let Some(team) = teams.iter().find(|team| team.trc == trc) {
            return Ok(Some(team.clone()));
        }
    }

    let wanted = entry
        .teamname
        .as_deref()
        .map(normalize_name)
        .filter(|name| !name.is_empty());
    let unclaimed = |team: &&TeamModel| !claimed.contains(&team.trc);

    if let Some(wanted) = &wanted {
        if let Some(team) = teams
            .iter()
            .filter(unclaimed)
            .find(|team| normalize_name(&team.name) == *wanted)
        {
            return Ok(Some(team.clone()));
        }
    }

    let Some(trc) = trc else {
        let Some(wanted) = &wanted else {
            return Ok(None);
        };

        let partial = teams.iter().filter(unclaimed).find(|team| {
            let candidate = normalize_name(&team.name);
            !candidate.is_empty() && (candidate.contains(wanted) || wanted.contains(&candidate))
        });

        if let Some(team) = partial {
            tracing::debug!("Matched {:?} to team {} by partial name", wanted, team.trc);
        }

        return Ok(partial.cloned());
    };

    let name = entry
        .teamname
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Team {}", trc));

    tracing::info!("Creating placeholder team {} ({})", trc, name);

    let team = TeamRepository::new(db)
        .create_placeholder(
            trc,
            &name,
            entry.division.clone(),
            Some(class_id.to_string()),
            Some(season),
        )
        .await?;
    teams.push(team.clone());

    Ok(Some(team))
}
