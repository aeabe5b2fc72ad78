//! Team roster import, one transaction per TRC.

use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::server::{
    data::{
        team::{TeamRepository, TeamUpsert},
        wtrl_rider::{RiderUpsert, WtrlRiderRepository},
    },
    error::Error,
    service::import::{
        finish_transaction, snapshot::write_snapshot, ImportService, ImportSummary,
    },
    wtrl::model::{RosterRider, TeamRosterResponse},
};

impl<'a> ImportService<'a> {
    /// Fetches each team roster and upserts the team with its riders.
    ///
    /// A team that fails to fetch, decode or store is recorded as an error and skipped.
    pub async fn import_teams(&self, season: i32, trcs: &[i32]) -> Result<ImportSummary, Error> {
        let mut summary = ImportSummary::default();

        for (index, trc) in trcs.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.wtrl_client.poll_config().segment_pause).await;
            }

            self.tracker.set_progress(
                index,
                trcs.len(),
                format!("Importing team {} ({}/{})", trc, index + 1, trcs.len()),
            );

            let body = match self.wtrl_client.fetch_team(season, *trc).await {
                Ok(body) => body,
                Err(e) => {
                    self.record_error(
                        &mut summary,
                        format!("Unable to fetch team {}: {}", trc, e),
                    );
                    continue;
                }
            };

            if let Some(dir) = self.snapshot_dir {
                write_snapshot(dir, &format!("team_{}_{}.json", season, trc), &body).await;
            }

            let roster = match serde_json::from_value::<TeamRosterResponse>(body) {
                Ok(roster) => roster,
                Err(e) => {
                    self.record_error(
                        &mut summary,
                        format!("Invalid roster for team {}: {}", trc, e),
                    );
                    continue;
                }
            };

            match self.store_team(season, *trc, roster).await {
                Ok(riders) => {
                    summary.teams += 1;
                    summary.riders += riders;

                    tracing::info!("Stored team {} with {} riders", trc, riders);
                }
                Err(e) => self.record_error(
                    &mut summary,
                    format!("Failed to store team {}: {}", trc, e),
                ),
            }
        }

        Ok(summary)
    }

    /// Stores one roster in its own transaction
    async fn store_team(
        &self,
        season: i32,
        trc: i32,
        roster: TeamRosterResponse,
    ) -> Result<usize, Error> {
        let txn = self.db.begin().await?;
        let stored = store_roster(&txn, season, trc, roster).await;

        finish_transaction(txn, stored).await
    }
}

/// Upserts the team and its riders, returning the number of riders written
async fn store_roster(
    txn: &DatabaseTransaction,
    season: i32,
    trc: i32,
    roster: TeamRosterResponse,
) -> Result<usize, Error> {
    let meta = roster.meta;
    let team_repo = TeamRepository::new(txn);

    let name = match meta.team.name.clone().filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => match team_repo.get(trc).await? {
            Some(existing) => existing.name,
            None => format!("Team {}", trc),
        },
    };

    let class = meta.competition.class.clone();
    let captain = meta.administrators.captain.as_ref();

    team_repo
        .upsert(
            trc,
            TeamUpsert {
                name,
                category: class
                    .as_deref()
                    .and_then(|class| class.get(..1))
                    .map(str::to_string),
                division: meta.division.clone(),
                wtrl_team_id: meta.team.teamid.clone().or(meta.team.tttid.clone()),
                jersey_name: meta.team.jerseyname.clone(),
                jersey_image: meta.team.jerseyimage.clone(),
                recruiting: meta.team.recruiting.unwrap_or(false),
                is_dev: meta.team.isdev.unwrap_or(false),
                competition_class: class,
                competition_season: meta.competition.season.or(Some(season)),
                competition_year: meta.competition.sports_year,
                competition_round: meta.competition.roundnumber,
                competition_status: meta.competition.status.clone(),
                member_count: meta.member_count,
                members_remaining: meta.members_remaining,
                captain_name: captain.and_then(|c| c.display_name()),
                captain_profile_id: captain.and_then(|c| c.profile_id),
            },
        )
        .await?;

    let rider_repo = WtrlRiderRepository::new(txn);
    let mut stored = 0;

    for rider in roster.riders {
        let Some(profile_id) = rider.profile_id() else {
            tracing::warn!("Skipping rider without profile ID in team {}", trc);
            continue;
        };

        rider_repo
            .upsert(trc, profile_id, rider_upsert(rider, profile_id))
            .await?;
        stored += 1;
    }

    Ok(stored)
}

fn rider_upsert(rider: RosterRider, profile_id: i64) -> RiderUpsert {
    RiderUpsert {
        tmuid: rider.tmuid,
        name: rider
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("Unknown Rider {}", profile_id)),
        avatar: rider.avatar,
        member_status: rider.member_status,
        signedup: rider.signedup.unwrap_or(false),
        category: rider.category,
        zftp: rider.zftp,
        zftpw: rider.zftpw,
        zmap: rider.zmap,
        zmapw: rider.zmapw,
        riderpoints: rider.riderpoints,
        teams: rider.teams,
        appearances_round: rider.appearances_round,
        appearances_season: rider.appearances_season,
        user_id: rider.user_id,
    }
}
