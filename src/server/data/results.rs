use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Points and timing of one team in one race.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeamResultUpsert {
    pub finp: Option<f64>,
    pub pbp: Option<f64>,
    pub totp: Option<f64>,
    pub falp: Option<f64>,
    pub ftsp: Option<f64>,
    pub time_result: Option<f64>,
    pub distance_result: Option<f64>,
    pub rank: Option<i32>,
}

/// Points, timing and power of one rider in one race.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiderResultUpsert {
    pub finp: Option<f64>,
    pub pbp: Option<f64>,
    pub totp: Option<f64>,
    pub falp: Option<f64>,
    pub ftsp: Option<f64>,
    pub time_result: Option<f64>,
    pub distance_result: Option<f64>,
    pub wkg: Option<f64>,
    pub watts: Option<f64>,
    pub gap: Option<f64>,
}

pub struct ResultsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResultsRepository<'a, C> {
    /// Creates a new instance of [`ResultsRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates or updates the team result keyed by (season, class, race, team)
    pub async fn upsert_team_result(
        &self,
        season: i32,
        class_id: &str,
        race: i32,
        team_id: i32,
        result: TeamResultUpsert,
    ) -> Result<entity::race_results_team::Model, DbErr> {
        let existing = entity::prelude::RaceResultsTeam::find()
            .filter(entity::race_results_team::Column::Season.eq(season))
            .filter(entity::race_results_team::Column::ClassId.eq(class_id))
            .filter(entity::race_results_team::Column::Race.eq(race))
            .filter(entity::race_results_team::Column::TeamId.eq(team_id))
            .one(self.db)
            .await?;
        let is_new = existing.is_none();

        let mut result_am = match existing {
            Some(existing) => existing.into_active_model(),
            None => entity::race_results_team::ActiveModel {
                season: ActiveValue::Set(season),
                class_id: ActiveValue::Set(class_id.to_string()),
                race: ActiveValue::Set(race),
                team_id: ActiveValue::Set(team_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        };

        result_am.finp = ActiveValue::Set(result.finp);
        result_am.pbp = ActiveValue::Set(result.pbp);
        result_am.totp = ActiveValue::Set(result.totp);
        result_am.falp = ActiveValue::Set(result.falp);
        result_am.ftsp = ActiveValue::Set(result.ftsp);
        result_am.time_result = ActiveValue::Set(result.time_result);
        result_am.distance_result = ActiveValue::Set(result.distance_result);
        result_am.rank = ActiveValue::Set(result.rank);

        if is_new {
            result_am.insert(self.db).await
        } else {
            result_am.update(self.db).await
        }
    }

    /// Creates or updates the rider result keyed by (team result, rider)
    pub async fn upsert_rider_result(
        &self,
        race_team_result_id: i32,
        rider_id: &str,
        result: RiderResultUpsert,
    ) -> Result<entity::race_results_rider::Model, DbErr> {
        let existing = entity::prelude::RaceResultsRider::find()
            .filter(entity::race_results_rider::Column::RaceTeamResultId.eq(race_team_result_id))
            .filter(entity::race_results_rider::Column::RiderId.eq(rider_id))
            .one(self.db)
            .await?;
        let is_new = existing.is_none();

        let mut result_am = match existing {
            Some(existing) => existing.into_active_model(),
            None => entity::race_results_rider::ActiveModel {
                race_team_result_id: ActiveValue::Set(race_team_result_id),
                rider_id: ActiveValue::Set(rider_id.to_string()),
                ..Default::default()
            },
        };

        result_am.finp = ActiveValue::Set(result.finp);
        result_am.pbp = ActiveValue::Set(result.pbp);
        result_am.totp = ActiveValue::Set(result.totp);
        result_am.falp = ActiveValue::Set(result.falp);
        result_am.ftsp = ActiveValue::Set(result.ftsp);
        result_am.time_result = ActiveValue::Set(result.time_result);
        result_am.distance_result = ActiveValue::Set(result.distance_result);
        result_am.wkg = ActiveValue::Set(result.wkg);
        result_am.watts = ActiveValue::Set(result.watts);
        result_am.gap = ActiveValue::Set(result.gap);

        if is_new {
            result_am.insert(self.db).await
        } else {
            result_am.update(self.db).await
        }
    }

    /// Sum of `totp` over the team's results for the season and class
    pub async fn sum_team_points(
        &self,
        season: i32,
        class_id: &str,
        team_id: i32,
    ) -> Result<f64, DbErr> {
        let points = entity::prelude::RaceResultsTeam::find()
            .select_only()
            .column(entity::race_results_team::Column::Totp)
            .filter(entity::race_results_team::Column::Season.eq(season))
            .filter(entity::race_results_team::Column::ClassId.eq(class_id))
            .filter(entity::race_results_team::Column::TeamId.eq(team_id))
            .into_tuple::<Option<f64>>()
            .all(self.db)
            .await?;

        Ok(points.into_iter().flatten().sum())
    }

    pub async fn get_rider_results(
        &self,
        race_team_result_id: i32,
    ) -> Result<Vec<entity::race_results_rider::Model>, DbErr> {
        entity::prelude::RaceResultsRider::find()
            .filter(entity::race_results_rider::Column::RaceTeamResultId.eq(race_team_result_id))
            .order_by_asc(entity::race_results_rider::Column::RiderId)
            .all(self.db)
            .await
    }

    /// Creates or updates the standing keyed by (season, class, team)
    pub async fn upsert_standing(
        &self,
        season: i32,
        class_id: &str,
        team_id: i32,
        total_points: f64,
    ) -> Result<entity::round_standing::Model, DbErr> {
        let existing = entity::prelude::RoundStanding::find()
            .filter(entity::round_standing::Column::Season.eq(season))
            .filter(entity::round_standing::Column::ClassId.eq(class_id))
            .filter(entity::round_standing::Column::TeamId.eq(team_id))
            .one(self.db)
            .await?;
        let is_new = existing.is_none();

        let mut standing_am = match existing {
            Some(existing) => existing.into_active_model(),
            None => entity::round_standing::ActiveModel {
                season: ActiveValue::Set(season),
                class_id: ActiveValue::Set(class_id.to_string()),
                team_id: ActiveValue::Set(team_id),
                ..Default::default()
            },
        };

        standing_am.total_points = ActiveValue::Set(total_points);
        standing_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        if is_new {
            standing_am.insert(self.db).await
        } else {
            standing_am.update(self.db).await
        }
    }

    /// Standings with their team, ordered by season desc, class, then points desc
    pub async fn get_standings(
        &self,
    ) -> Result<Vec<(entity::round_standing::Model, Option<entity::team::Model>)>, DbErr> {
        entity::prelude::RoundStanding::find()
            .find_also_related(entity::prelude::Team)
            .order_by_desc(entity::round_standing::Column::Season)
            .order_by_asc(entity::round_standing::Column::ClassId)
            .order_by_desc(entity::round_standing::Column::TotalPoints)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod upsert_team_result {
        use zrl_test_utils::prelude::*;

        use crate::server::data::results::{ResultsRepository, TeamResultUpsert};

        /// Expected: the composite key is updated in place
        #[tokio::test]
        async fn updates_in_place() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.league().insert_team(10, "Alpha", Some("A1")).await?;
            let repo = ResultsRepository::new(&test.db);
            let result = |totp| TeamResultUpsert {
                totp: Some(totp),
                ..Default::default()
            };

            let first = repo
                .upsert_team_result(TEST_SEASON, "A1", 1, 10, result(40.0))
                .await?;
            let second = repo
                .upsert_team_result(TEST_SEASON, "A1", 1, 10, result(55.0))
                .await?;
            repo.upsert_team_result(TEST_SEASON, "A1", 2, 10, result(30.0))
                .await?;

            assert_eq!(first.id, second.id);
            assert_eq!(second.totp, Some(55.0));
            assert_eq!(
                repo.sum_team_points(TEST_SEASON, "A1", 10).await?,
                85.0
            );

            Ok(())
        }
    }

    mod get_standings {
        use zrl_test_utils::prelude::*;

        use crate::server::data::results::ResultsRepository;

        /// Expected: ordered by class, then points descending, with the team attached
        #[tokio::test]
        async fn orders_by_class_and_points() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.league().insert_team(10, "Alpha", Some("A1")).await?;
            test.league().insert_team(20, "Bravo", Some("A1")).await?;
            test.league().insert_team(30, "Charlie", Some("B1")).await?;
            test.league().insert_standing("B1", 30, 500.0).await?;
            test.league().insert_standing("A1", 10, 100.0).await?;
            test.league().insert_standing("A1", 20, 200.0).await?;

            let standings = ResultsRepository::new(&test.db).get_standings().await?;

            let teams: Vec<i32> = standings.iter().map(|(s, _)| s.team_id).collect();
            assert_eq!(teams, vec![20, 10, 30]);
            assert_eq!(
                standings[0].1.as_ref().map(|t| t.name.as_str()),
                Some("Bravo")
            );

            Ok(())
        }
    }
}
