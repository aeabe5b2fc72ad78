//! Team lineups per race date.
//!
//! A lineup holds at most [`MAX_LINEUP_SIZE`] riders and a profile can only ride for one
//! team on a given date.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::lineup::{BusyRiderDto, LineupDto, LineupRiderDto},
    server::{
        data::{
            lineup::LineupRepository, race::RaceRepository, team::TeamRepository,
            wtrl_rider::WtrlRiderRepository,
        },
        error::{auth::AuthError, lineup::LineupError, Error},
        model::session::user::SessionUser,
        util::time::{compact_date, today},
    },
};

pub const MAX_LINEUP_SIZE: usize = 6;

/// Parses `YYYY-MM-DD` or `DD/MM/YYYY`
pub fn parse_race_date(value: &str) -> Result<NaiveDate, LineupError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .map_err(|_| LineupError::InvalidDate(value.to_string()))
}

/// Lineup key, `"{trc}_{YYYYMMDD}"`
pub fn race_id(trc: i32, race_date: NaiveDate) -> String {
    format!("{}_{}", trc, compact_date(race_date))
}

pub struct LineupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LineupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Admins and moderators manage every team; captains only the teams they captain
    pub async fn ensure_can_manage(&self, user: &SessionUser, trc: i32) -> Result<(), Error> {
        if user.role.sees_all_teams() {
            return Ok(());
        }

        let team = TeamRepository::new(self.db)
            .get(trc)
            .await?
            .ok_or(LineupError::TeamNotFound(trc))?;

        if team.captain_profile_id != Some(user.profile_id) {
            return Err(AuthError::Forbidden {
                user_id: user.profile_id,
                role: user.role.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Resolves a path date, where `next` means the earliest race from today on
    pub async fn resolve_race_date(&self, value: &str) -> Result<NaiveDate, Error> {
        if value.trim().eq_ignore_ascii_case("next") {
            return RaceRepository::new(self.db)
                .next_race_date(today())
                .await?
                .ok_or_else(|| LineupError::NoUpcomingRace.into());
        }

        Ok(parse_race_date(value)?)
    }

    /// Team, eligible riders, current selection and riders busy with other teams.
    pub async fn get_lineup(&self, trc: i32, race_date: NaiveDate) -> Result<LineupDto, Error> {
        let team = TeamRepository::new(self.db)
            .get(trc)
            .await?
            .ok_or(LineupError::TeamNotFound(trc))?;

        let riders = WtrlRiderRepository::new(self.db).get_eligible(trc).await?;

        let lineup_repo = LineupRepository::new(self.db);
        let selected_ids = lineup_repo.get_selected_ids(trc, race_date).await?;
        let others = lineup_repo.get_other_teams(trc, race_date).await?;

        let other_trcs: Vec<i32> = others
            .iter()
            .map(|row| row.team_trc)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let team_names: HashMap<i32, String> = TeamRepository::new(self.db)
            .get_many(other_trcs)
            .await?
            .into_iter()
            .map(|team| (team.trc, team.name))
            .collect();

        let busy_riders = others
            .into_iter()
            .map(|row| BusyRiderDto {
                profile_id: row.profile_id,
                team_trc: row.team_trc,
                team_name: team_names
                    .get(&row.team_trc)
                    .cloned()
                    .unwrap_or_else(|| format!("TRC {}", row.team_trc)),
            })
            .collect();

        Ok(LineupDto {
            trc,
            team_name: team.name,
            race_id: race_id(trc, race_date),
            race_date,
            captain: team.captain_name,
            riders: riders
                .into_iter()
                .map(|rider| LineupRiderDto {
                    profile_id: rider.profile_id,
                    name: rider.name,
                    category: rider.category,
                    member_status: rider.member_status,
                })
                .collect(),
            selected_ids,
            busy_riders,
        })
    }

    /// Replaces the team's lineup for the date with `profile_ids`.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of riders now in the lineup
    /// - `Err(LineupError::TooManyRiders)` - More than six distinct riders
    /// - `Err(LineupError::RiderNotInTeam)` - A profile is not on the team roster
    /// - `Err(LineupError::RiderConflict)` - Riders already fielded by another team that day
    pub async fn save_lineup(
        &self,
        trc: i32,
        race_date: NaiveDate,
        profile_ids: Vec<i64>,
    ) -> Result<usize, Error> {
        let mut seen = HashSet::new();
        let selected: Vec<i64> = profile_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        if selected.len() > MAX_LINEUP_SIZE {
            return Err(LineupError::TooManyRiders {
                max: MAX_LINEUP_SIZE,
                selected: selected.len(),
            }
            .into());
        }

        if TeamRepository::new(self.db).get(trc).await?.is_none() {
            return Err(LineupError::TeamNotFound(trc).into());
        }

        let roster: HashSet<i64> = WtrlRiderRepository::new(self.db)
            .get_by_team(trc)
            .await?
            .into_iter()
            .map(|rider| rider.profile_id)
            .collect();
        if let Some(profile_id) = selected.iter().find(|id| !roster.contains(id)) {
            return Err(LineupError::RiderNotInTeam {
                trc,
                profile_id: *profile_id,
            }
            .into());
        }

        let txn = self.db.begin().await?;

        // saves for the same team run one after another
        if TeamRepository::new(&txn).get_for_update(trc).await?.is_none() {
            txn.rollback().await?;
            return Err(LineupError::TeamNotFound(trc).into());
        }

        if let Some(conflict) = rider_conflict(&txn, trc, race_date, &selected).await? {
            txn.rollback().await?;
            return Err(conflict.into());
        }

        let key = race_id(trc, race_date);

        if let Err(e) = replace_selection(&txn, &key, trc, race_date, &selected).await {
            if let Err(rollback) = txn.rollback().await {
                tracing::error!("Rollback of lineup {} failed: {}", key, rollback);
            }

            // another team booked one of the riders after the check above
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                if let Some(conflict) = rider_conflict(self.db, trc, race_date, &selected).await? {
                    return Err(conflict.into());
                }
            }

            return Err(e.into());
        }

        txn.commit().await?;

        tracing::info!(
            "Saved lineup {} with {} riders",
            key,
            selected.len()
        );

        Ok(selected.len())
    }

    /// Removes one rider; `false` when the rider was not in the lineup
    pub async fn remove_rider(
        &self,
        trc: i32,
        race_date: NaiveDate,
        profile_id: i64,
    ) -> Result<bool, Error> {
        let removed = LineupRepository::new(self.db)
            .delete_rider(trc, race_date, profile_id)
            .await?;

        Ok(removed > 0)
    }
}

/// [`LineupError::RiderConflict`] naming the selected riders another team fields that day
async fn rider_conflict<C: ConnectionTrait>(
    db: &C,
    trc: i32,
    race_date: NaiveDate,
    selected: &[i64],
) -> Result<Option<LineupError>, DbErr> {
    let busy: HashSet<i64> = LineupRepository::new(db)
        .get_other_teams(trc, race_date)
        .await?
        .into_iter()
        .map(|row| row.profile_id)
        .collect();
    let conflicts: Vec<i64> = selected
        .iter()
        .copied()
        .filter(|id| busy.contains(id))
        .collect();

    if conflicts.is_empty() {
        return Ok(None);
    }

    let names = WtrlRiderRepository::new(db)
        .get_names(conflicts.clone())
        .await?;

    Ok(Some(LineupError::RiderConflict(
        conflicts
            .iter()
            .map(|id| names.get(id).cloned().unwrap_or_else(|| id.to_string()))
            .collect(),
    )))
}

/// Deletes unselected rows and inserts the newly selected riders
async fn replace_selection<C: ConnectionTrait>(
    db: &C,
    key: &str,
    trc: i32,
    race_date: NaiveDate,
    selected: &[i64],
) -> Result<(), DbErr> {
    let lineup_repo = LineupRepository::new(db);

    let existing: HashSet<i64> = lineup_repo
        .get_selected_ids(trc, race_date)
        .await?
        .into_iter()
        .collect();
    lineup_repo
        .delete_not_in(trc, race_date, selected.to_vec())
        .await?;

    for profile_id in selected.iter().filter(|id| !existing.contains(id)) {
        lineup_repo.insert(key, trc, race_date, *profile_id).await?;
    }

    Ok(())
}
