//! Admin and captain dashboards.

use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::join_all;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::{
    model::dashboard::{AvailableRiderDto, CaptainDashboardDto, DashboardDto, TeamSummaryDto},
    server::{
        data::{
            availability::AvailabilityRepository, lineup::LineupRepository,
            race::RaceRepository, round::RoundRepository, season::SeasonRepository,
            team::TeamRepository, wtrl_rider::WtrlRiderRepository,
        },
        error::Error,
        model::{db::TeamModel, session::user::SessionUser},
        service::league::round_dto,
        util::time::{next_race_tuesday, today},
    },
};

/// Availability slot read for Tuesday races
pub const RACE_DAY_SLOT: &str = "tuesday";
/// Seasons whose name contains this are league seasons
const LEAGUE_SEASON_MARKER: &str = "ZRL";

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Active round with its races and the teams visible to `user`
    pub async fn admin_dashboard(&self, user: &SessionUser) -> Result<DashboardDto, Error> {
        let active_round = match RoundRepository::new(self.db).find_active().await? {
            Some(round) => {
                let races = RaceRepository::new(self.db)
                    .get_by_round(round.id)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();

                Some(round_dto(round, races))
            }
            None => None,
        };

        let team_repo = TeamRepository::new(self.db);
        let teams = if user.role.sees_all_teams() {
            team_repo.get_all().await?
        } else {
            team_repo.get_by_captain(user.profile_id).await?
        };

        let next_race_date = RaceRepository::new(self.db)
            .next_race_date(today())
            .await?;

        Ok(DashboardDto {
            active_round,
            teams: self.team_summaries(teams, next_race_date).await?,
        })
    }

    /// Next Tuesday race of the current league season and the captain's available riders
    pub async fn captain_dashboard(
        &self,
        user: &SessionUser,
    ) -> Result<CaptainDashboardDto, Error> {
        let race_day = next_race_tuesday(today());

        let next_race = match SeasonRepository::new(self.db)
            .find_latest_matching(LEAGUE_SEASON_MARKER)
            .await?
        {
            Some(season) => {
                let round_ids = RoundRepository::new(self.db)
                    .get_by_season(season.id)
                    .await?
                    .into_iter()
                    .map(|round| round.id)
                    .collect();

                RaceRepository::new(self.db)
                    .find_on_date(round_ids, race_day)
                    .await?
            }
            None => None,
        };

        if next_race.is_none() {
            tracing::debug!("No league race scheduled on {}", race_day);
        }

        let teams = TeamRepository::new(self.db)
            .get_by_captain(user.profile_id)
            .await?;
        let trcs: Vec<i32> = teams.iter().map(|team| team.trc).collect();

        let available_riders = self.available_riders(trcs).await?;
        let next_race_date = next_race.as_ref().map(|race| race.race_date);

        Ok(CaptainDashboardDto {
            next_race: next_race.map(Into::into),
            teams: self.team_summaries(teams, next_race_date).await?,
            available_riders,
        })
    }

    async fn team_summaries(
        &self,
        teams: Vec<TeamModel>,
        next_race_date: Option<NaiveDate>,
    ) -> Result<Vec<TeamSummaryDto>, Error> {
        let lineup_repo = LineupRepository::new(self.db);

        let lineup_flags = join_all(teams.iter().map(|team| {
            let lineup_repo = &lineup_repo;

            async move {
                match next_race_date {
                    Some(date) => lineup_repo.has_lineup(team.trc, date).await,
                    None => Ok(false),
                }
            }
        }))
        .await;

        teams
            .into_iter()
            .zip(lineup_flags)
            .map(|(team, has_lineup)| -> Result<TeamSummaryDto, Error> {
                Ok(TeamSummaryDto {
                    trc: team.trc,
                    name: team.name,
                    category: team.category,
                    division: team.division,
                    captain: team.captain_name,
                    next_race_date,
                    has_lineup: has_lineup?,
                })
            })
            .collect()
    }

    /// Riders of `trcs` whose availability has a non-null race-day slot, by name
    async fn available_riders(&self, trcs: Vec<i32>) -> Result<Vec<AvailableRiderDto>, Error> {
        let riders = WtrlRiderRepository::new(self.db).get_by_teams(trcs).await?;

        let availability: HashMap<String, _> = AvailabilityRepository::new(self.db)
            .get_by_riders(riders.iter().map(|r| r.id.clone()).collect())
            .await?
            .into_iter()
            .map(|a| (a.wtrl_rider_id.clone(), a))
            .collect();

        let mut available = Vec::new();
        for rider in riders {
            let Some(entry) = availability.get(&rider.id) else {
                continue;
            };

            let slot = match entry.availability_data.get(RACE_DAY_SLOT) {
                None | Some(Value::Null) => continue,
                Some(slot) => slot,
            };

            let time = |key: &str| slot.get(key).and_then(Value::as_str).map(str::to_string);

            available.push(AvailableRiderDto {
                profile_id: rider.profile_id,
                name: rider.name,
                team_trc: rider.team_trc,
                start: time("start"),
                end: time("end"),
                notes: entry.notes.clone(),
            });
        }

        available.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    mod admin_dashboard {
        use chrono::Duration;
        use zrl_test_utils::prelude::*;

        use crate::server::{
            model::{role::Role, session::user::SessionUser},
            service::dashboard::DashboardService,
            util::time::today,
        };

        fn user(role: Role) -> SessionUser {
            SessionUser {
                profile_id: 500,
                role,
                email: "someone@example.com".to_string(),
            }
        }

        /// Expected: admins see every team with lineup flags for the next race
        #[tokio::test]
        async fn lists_all_teams_for_admin() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let next = today() + Duration::days(2);
            let season = test.league().insert_season("ZRL 17", None, None).await?;
            let round = test.league().insert_round(season.id, 1, true).await?;
            test.league().insert_race(round.id, next, Some("A")).await?;
            test.league()
                .insert_captained_team(1, "Alpha", Some("A1"), 500, "Me")
                .await?;
            test.league().insert_team(2, "Bravo", Some("B1")).await?;
            test.league().insert_lineup(1, next, 11).await?;

            let dashboard = DashboardService::new(&test.db)
                .admin_dashboard(&user(Role::Admin))
                .await
                .unwrap();

            let round = dashboard.active_round.unwrap();
            assert_eq!(round.races.len(), 1);
            assert_eq!(dashboard.teams.len(), 2);
            assert!(dashboard.teams[0].has_lineup);
            assert!(!dashboard.teams[1].has_lineup);
            assert_eq!(dashboard.teams[0].next_race_date, Some(next));

            Ok(())
        }

        /// Expected: captains only see the teams they captain
        #[tokio::test]
        async fn limits_captain_to_own_teams() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.league()
                .insert_captained_team(1, "Alpha", Some("A1"), 500, "Me")
                .await?;
            test.league().insert_team(2, "Bravo", Some("B1")).await?;

            let dashboard = DashboardService::new(&test.db)
                .admin_dashboard(&user(Role::Captain))
                .await
                .unwrap();

            assert!(dashboard.active_round.is_none());
            assert_eq!(dashboard.teams.len(), 1);
            assert_eq!(dashboard.teams[0].captain.as_deref(), Some("Me"));
            assert!(dashboard.teams[0].next_race_date.is_none());

            Ok(())
        }
    }

    mod captain_dashboard {
        use serde_json::json;
        use zrl_test_utils::prelude::*;

        use crate::server::{
            model::{role::Role, session::user::SessionUser},
            service::dashboard::DashboardService,
            util::time::{next_race_tuesday, today},
        };

        /// Expected: next Tuesday race found, riders with a null slot left out
        #[tokio::test]
        async fn lists_available_riders() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let tuesday = next_race_tuesday(today());
            let season = test.league().insert_season("ZRL 17", None, None).await?;
            let round = test.league().insert_round(season.id, 1, true).await?;
            test.league().insert_race(round.id, tuesday, Some("A")).await?;
            test.league()
                .insert_captained_team(1, "Alpha", Some("A1"), 500, "Me")
                .await?;
            test.league().insert_team(2, "Other", Some("A2")).await?;
            test.league().insert_rider(1, 11, "Zoe").await?;
            test.league().insert_rider(1, 12, "Ann").await?;
            test.league().insert_rider(1, 13, "Ned").await?;
            test.league().insert_rider(2, 21, "Bob").await?;

            let slot = json!({"tuesday": {"start": "19:00", "end": "21:00"}});
            test.league()
                .insert_availability("1/11", slot.clone(), Some("late"))
                .await?;
            test.league().insert_availability("1/12", slot.clone(), None).await?;
            test.league()
                .insert_availability("1/13", json!({"tuesday": null}), None)
                .await?;
            test.league().insert_availability("2/21", slot, None).await?;

            let dashboard = DashboardService::new(&test.db)
                .captain_dashboard(&SessionUser {
                    profile_id: 500,
                    role: Role::Captain,
                    email: "cap@example.com".to_string(),
                })
                .await
                .unwrap();

            assert_eq!(dashboard.next_race.unwrap().race_date, tuesday);
            let names: Vec<_> = dashboard
                .available_riders
                .iter()
                .map(|r| r.name.as_str())
                .collect();
            assert_eq!(names, vec!["Ann", "Zoe"]);
            assert_eq!(dashboard.available_riders[1].start.as_deref(), Some("19:00"));
            assert_eq!(dashboard.available_riders[1].notes.as_deref(), Some("late"));

            Ok(())
        }
    }
}
