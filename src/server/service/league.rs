//! Public read models: rosters, standings and the season calendar.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    model::league::{
        ClassStandingsDto, RaceDto, RoundDto, RosterDto, RosterRiderDto, RostersDto, SeasonDto,
        StandingDto,
    },
    server::{
        data::{
            race::RaceRepository, results::ResultsRepository, round::RoundRepository,
            season::SeasonRepository, team::TeamRepository,
            wtrl_rider::{WtrlRiderRepository, REMOVED_MEMBER_STATUS},
        },
        error::Error,
        model::db::{RaceModel, RoundModel},
        service::retry::RetryContext,
    },
};

impl From<RaceModel> for RaceDto {
    fn from(race: RaceModel) -> Self {
        Self {
            id: race.id,
            name: race.name,
            race_date: race.race_date,
            category: race.category,
            format: race.format,
            world: race.world,
            course: race.course,
            laps: race.laps,
            distance_km: race.distance_km,
            elevation_m: race.elevation_m,
        }
    }
}

pub fn round_dto(round: RoundModel, races: Vec<RaceDto>) -> RoundDto {
    RoundDto {
        id: round.id,
        round_number: round.round_number,
        name: round.name,
        start_date: round.start_date,
        end_date: round.end_date,
        is_active: round.is_active,
        races,
    }
}

pub struct LeagueService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeagueService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Team rosters keyed by `"{category}{division}"`.
    ///
    /// When two teams share a key the first by category and name wins. Riders removed
    /// from the category are left out.
    pub async fn rosters(&self) -> Result<RostersDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        let teams = ctx
            .execute_with_retry("load teams for rosters", || {
                let db = db.clone();

                Box::pin(async move { Ok(TeamRepository::new(&db).get_all().await?) })
            })
            .await?;

        let mut riders_by_team: HashMap<i32, Vec<RosterRiderDto>> = HashMap::new();
        for rider in WtrlRiderRepository::new(self.db)
            .get_by_teams(teams.iter().map(|t| t.trc).collect())
            .await?
        {
            if rider.member_status.as_deref() == Some(REMOVED_MEMBER_STATUS) {
                continue;
            }

            riders_by_team
                .entry(rider.team_trc)
                .or_default()
                .push(RosterRiderDto {
                    name: rider.name,
                    avatar: rider.avatar,
                });
        }

        let mut rosters = RostersDto::new();
        for team in teams {
            let key = format!(
                "{}{}",
                team.category.as_deref().unwrap_or_default(),
                team.division.as_deref().unwrap_or_default()
            );

            if rosters.contains_key(&key) {
                tracing::debug!("Roster key {} already taken, skipping team {}", key, team.trc);
                continue;
            }

            rosters.insert(
                key,
                RosterDto {
                    name: team.name,
                    captain: team.captain_name,
                    riders: riders_by_team.remove(&team.trc).unwrap_or_default(),
                },
            );
        }

        Ok(rosters)
    }

    /// Standings grouped by season and class, best first
    pub async fn standings(&self) -> Result<Vec<ClassStandingsDto>, Error> {
        let standings = ResultsRepository::new(self.db).get_standings().await?;

        let mut grouped: Vec<ClassStandingsDto> = Vec::new();
        for (standing, team) in standings {
            let is_same_class = grouped
                .last()
                .is_some_and(|g| g.season == standing.season && g.class_id == standing.class_id);

            if !is_same_class {
                grouped.push(ClassStandingsDto {
                    season: standing.season,
                    class_id: standing.class_id.clone(),
                    standings: Vec::new(),
                });
            }

            let Some(class) = grouped.last_mut() else {
                continue;
            };

            class.standings.push(StandingDto {
                position: class.standings.len() + 1,
                team_trc: standing.team_id,
                team_name: team
                    .map(|t| t.name)
                    .unwrap_or_else(|| format!("TRC {}", standing.team_id)),
                total_points: standing.total_points,
            });
        }

        Ok(grouped)
    }

    /// Every season, newest first, with its rounds and races
    pub async fn seasons(&self) -> Result<Vec<SeasonDto>, Error> {
        let seasons = SeasonRepository::new(self.db).get_all().await?;
        let round_repo = RoundRepository::new(self.db);
        let race_repo = RaceRepository::new(self.db);

        let mut result = Vec::with_capacity(seasons.len());
        for season in seasons {
            let rounds = round_repo.get_by_season(season.id).await?;

            let mut races_by_round: HashMap<i32, Vec<RaceDto>> = HashMap::new();
            for race in race_repo
                .get_by_rounds(rounds.iter().map(|r| r.id).collect())
                .await?
            {
                races_by_round
                    .entry(race.round_id)
                    .or_default()
                    .push(race.into());
            }

            result.push(SeasonDto {
                id: season.id,
                name: season.name,
                start_date: season.start_date,
                end_date: season.end_date,
                rounds: rounds
                    .into_iter()
                    .map(|round| {
                        let races = races_by_round.remove(&round.id).unwrap_or_default();
                        round_dto(round, races)
                    })
                    .collect(),
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    mod rosters {
        use zrl_test_utils::prelude::*;

        use crate::server::service::league::LeagueService;

        /// Expected: keyed by category and division, removed riders hidden
        #[tokio::test]
        async fn keys_by_class() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.league()
                .insert_captained_team(1, "Alpha", Some("A1"), 77, "Cap")
                .await?;
            test.league().insert_team(2, "Bravo", Some("B2")).await?;
            test.league().insert_rider(1, 11, "Zed").await?;
            test.league().insert_rider(1, 12, "Amy").await?;
            test.league()
                .insert_rider_with_status(1, 13, "Gone", "REMOVED-CATEGORY")
                .await?;

            let rosters = LeagueService::new(&test.db).rosters().await.unwrap();

            assert_eq!(rosters.len(), 2);
            let alpha = &rosters["A1"];
            assert_eq!(alpha.captain.as_deref(), Some("Cap"));
            assert_eq!(alpha.riders.len(), 2);
            assert_eq!(alpha.riders[0].name, "Amy");
            assert!(rosters["B2"].riders.is_empty());

            Ok(())
        }
    }

    mod standings {
        use zrl_test_utils::prelude::*;

        use crate::server::service::league::LeagueService;

        /// Expected: one group per class with positions by points
        #[tokio::test]
        async fn groups_by_class() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.league().insert_team(1, "Alpha", Some("A1")).await?;
            test.league().insert_team(2, "Bravo", Some("A1")).await?;
            test.league().insert_team(3, "Charlie", Some("B1")).await?;
            test.league().insert_standing("A1", 1, 10.0).await?;
            test.league().insert_standing("A1", 2, 30.0).await?;
            test.league().insert_standing("B1", 3, 5.0).await?;

            let standings = LeagueService::new(&test.db).standings().await.unwrap();

            assert_eq!(standings.len(), 2);
            assert_eq!(standings[0].class_id, "A1");
            assert_eq!(standings[0].standings[0].team_name, "Bravo");
            assert_eq!(standings[0].standings[1].position, 2);
            assert_eq!(standings[1].standings.len(), 1);

            Ok(())
        }
    }

    mod seasons {
        use chrono::NaiveDate;
        use zrl_test_utils::prelude::*;

        use crate::server::service::league::LeagueService;

        /// Expected: races nested under their round
        #[tokio::test]
        async fn nests_rounds_and_races() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let date = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
            let season = test.league().insert_season("ZRL 17", Some(date), None).await?;
            let round_1 = test.league().insert_round(season.id, 1, false).await?;
            let round_2 = test.league().insert_round(season.id, 2, true).await?;
            test.league().insert_race(round_1.id, date, Some("A")).await?;
            test.league().insert_race(round_1.id, date, Some("B")).await?;

            let seasons = LeagueService::new(&test.db).seasons().await.unwrap();

            assert_eq!(seasons.len(), 1);
            assert_eq!(seasons[0].rounds.len(), 2);
            assert_eq!(seasons[0].rounds[0].races.len(), 2);
            assert_eq!(seasons[0].rounds[1].id, round_2.id);
            assert!(seasons[0].rounds[1].races.is_empty());

            Ok(())
        }
    }
}
