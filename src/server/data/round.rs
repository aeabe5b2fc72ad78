use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct RoundRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoundRepository<'a, C> {
    /// Creates a new instance of [`RoundRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Rounds of a season ordered by round number
    pub async fn get_by_season(
        &self,
        season_id: i32,
    ) -> Result<Vec<entity::round::Model>, DbErr> {
        entity::prelude::Round::find()
            .filter(entity::round::Column::SeasonId.eq(season_id))
            .order_by_asc(entity::round::Column::RoundNumber)
            .all(self.db)
            .await
    }

    /// Most recently created active round
    pub async fn find_active(&self) -> Result<Option<entity::round::Model>, DbErr> {
        entity::prelude::Round::find()
            .filter(entity::round::Column::IsActive.eq(true))
            .order_by_desc(entity::round::Column::Id)
            .one(self.db)
            .await
    }

    /// Creates the round or widens its date range to cover `start..=end`
    pub async fn upsert(
        &self,
        season_id: i32,
        round_number: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<entity::round::Model, DbErr> {
        let existing = entity::prelude::Round::find()
            .filter(entity::round::Column::SeasonId.eq(season_id))
            .filter(entity::round::Column::RoundNumber.eq(round_number))
            .one(self.db)
            .await?;

        match existing {
            Some(round) => {
                let start = round.start_date.map_or(start_date, |d| d.min(start_date));
                let end = round.end_date.map_or(end_date, |d| d.max(end_date));

                let mut round_am = round.into_active_model();
                round_am.start_date = ActiveValue::Set(Some(start));
                round_am.end_date = ActiveValue::Set(Some(end));

                round_am.update(self.db).await
            }
            None => {
                entity::round::ActiveModel {
                    season_id: ActiveValue::Set(season_id),
                    round_number: ActiveValue::Set(round_number),
                    name: ActiveValue::Set(format!("Round {}", round_number)),
                    start_date: ActiveValue::Set(Some(start_date)),
                    end_date: ActiveValue::Set(Some(end_date)),
                    logo_url: ActiveValue::Set(None),
                    is_active: ActiveValue::Set(true),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    mod get_by_season {
        use zrl_test_utils::prelude::*;

        use crate::server::data::round::RoundRepository;

        /// Expected: only the season's rounds, ordered by number
        #[tokio::test]
        async fn returns_ordered_rounds() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let season = test.league().insert_season("17", None, None).await?;
            let other = test.league().insert_season("16", None, None).await?;
            test.league().insert_round(season.id, 3, false).await?;
            test.league().insert_round(season.id, 1, false).await?;
            test.league().insert_round(other.id, 2, false).await?;

            let rounds = RoundRepository::new(&test.db).get_by_season(season.id).await?;

            let numbers: Vec<i32> = rounds.iter().map(|r| r.round_number).collect();
            assert_eq!(numbers, vec![1, 3]);

            Ok(())
        }
    }

    mod upsert {
        use chrono::NaiveDate;
        use zrl_test_utils::prelude::*;

        use crate::server::data::round::RoundRepository;

        /// Expected: one row per (season, round number)
        #[tokio::test]
        async fn updates_in_place() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let season = test.league().insert_season("17", None, None).await?;
            let repo = RoundRepository::new(&test.db);
            let d = |day| NaiveDate::from_ymd_opt(2025, 11, day).unwrap();

            let first = repo.upsert(season.id, 1, d(4), d(4)).await?;
            let second = repo.upsert(season.id, 1, d(11), d(11)).await?;

            assert_eq!(first.id, second.id);
            assert_eq!(second.name, "Round 1");
            assert_eq!(second.start_date, Some(d(4)));
            assert_eq!(second.end_date, Some(d(11)));

            Ok(())
        }
    }
}
