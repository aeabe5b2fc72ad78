use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Race fields written by the schedule import.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RaceUpsert {
    pub name: String,
    pub race_date: NaiveDate,
    pub format: Option<String>,
    pub world: Option<String>,
    pub course: Option<String>,
    pub laps: Option<i32>,
    pub distance_km: Option<f64>,
    pub elevation_m: Option<f64>,
    pub rules: Option<String>,
    pub segments: Option<String>,
    pub leadin_distance: Option<f64>,
    pub leadin_ascent: Option<f64>,
    pub category: Option<String>,
    pub external_id: Option<String>,
}

pub struct RaceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RaceRepository<'a, C> {
    /// Creates a new instance of [`RaceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_round(&self, round_id: i32) -> Result<Vec<entity::race::Model>, DbErr> {
        entity::prelude::Race::find()
            .filter(entity::race::Column::RoundId.eq(round_id))
            .order_by_asc(entity::race::Column::RaceDate)
            .order_by_asc(entity::race::Column::Category)
            .all(self.db)
            .await
    }

    pub async fn get_by_rounds(
        &self,
        round_ids: Vec<i32>,
    ) -> Result<Vec<entity::race::Model>, DbErr> {
        if round_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Race::find()
            .filter(entity::race::Column::RoundId.is_in(round_ids))
            .order_by_asc(entity::race::Column::RaceDate)
            .order_by_asc(entity::race::Column::Category)
            .all(self.db)
            .await
    }

    /// Earliest race date on or after `from`
    pub async fn next_race_date(&self, from: NaiveDate) -> Result<Option<NaiveDate>, DbErr> {
        entity::prelude::Race::find()
            .select_only()
            .column(entity::race::Column::RaceDate)
            .filter(entity::race::Column::RaceDate.gte(from))
            .order_by_asc(entity::race::Column::RaceDate)
            .into_tuple::<NaiveDate>()
            .one(self.db)
            .await
    }

    /// First race on `date` belonging to one of the given rounds
    pub async fn find_on_date(
        &self,
        round_ids: Vec<i32>,
        date: NaiveDate,
    ) -> Result<Option<entity::race::Model>, DbErr> {
        if round_ids.is_empty() {
            return Ok(None);
        }

        entity::prelude::Race::find()
            .filter(entity::race::Column::RoundId.is_in(round_ids))
            .filter(entity::race::Column::RaceDate.eq(date))
            .order_by_asc(entity::race::Column::Category)
            .one(self.db)
            .await
    }

    /// Creates or updates the race keyed by (round, category, external id)
    pub async fn upsert(
        &self,
        round_id: i32,
        race: RaceUpsert,
    ) -> Result<entity::race::Model, DbErr> {
        let mut query = entity::prelude::Race::find()
            .filter(entity::race::Column::RoundId.eq(round_id));

        query = match &race.category {
            Some(category) => query.filter(entity::race::Column::Category.eq(category.as_str())),
            None => query.filter(entity::race::Column::Category.is_null()),
        };
        query = match &race.external_id {
            Some(external_id) => {
                query.filter(entity::race::Column::ExternalId.eq(external_id.as_str()))
            }
            None => query.filter(entity::race::Column::ExternalId.is_null()),
        };

        let existing = query.one(self.db).await?;
        let is_new = existing.is_none();

        let mut race_am = match existing {
            Some(existing) => existing.into_active_model(),
            None => entity::race::ActiveModel {
                round_id: ActiveValue::Set(round_id),
                ..Default::default()
            },
        };

        race_am.name = ActiveValue::Set(race.name);
        race_am.race_date = ActiveValue::Set(race.race_date);
        race_am.format = ActiveValue::Set(race.format);
        race_am.world = ActiveValue::Set(race.world);
        race_am.course = ActiveValue::Set(race.course);
        race_am.laps = ActiveValue::Set(race.laps);
        race_am.distance_km = ActiveValue::Set(race.distance_km);
        race_am.elevation_m = ActiveValue::Set(race.elevation_m);
        race_am.rules = ActiveValue::Set(race.rules);
        race_am.segments = ActiveValue::Set(race.segments);
        race_am.leadin_distance = ActiveValue::Set(race.leadin_distance);
        race_am.leadin_ascent = ActiveValue::Set(race.leadin_ascent);
        race_am.category = ActiveValue::Set(race.category);
        race_am.external_id = ActiveValue::Set(race.external_id);
        race_am.active = ActiveValue::Set(true);

        if is_new {
            race_am.insert(self.db).await
        } else {
            race_am.update(self.db).await
        }
    }
}

#[cfg(test)]
mod tests {
    mod next_race_date {
        use chrono::NaiveDate;
        use zrl_test_utils::prelude::*;

        use crate::server::data::race::RaceRepository;

        /// Expected: the earliest date on or after the given day
        #[tokio::test]
        async fn returns_earliest_upcoming_date() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let season = test.league().insert_season("17", None, None).await?;
            let round = test.league().insert_round(season.id, 1, true).await?;
            let d = |day| NaiveDate::from_ymd_opt(2025, 11, day).unwrap();
            test.league().insert_race(round.id, d(4), Some("A")).await?;
            test.league().insert_race(round.id, d(11), Some("A")).await?;
            test.league().insert_race(round.id, d(18), Some("A")).await?;

            let repo = RaceRepository::new(&test.db);

            assert_eq!(repo.next_race_date(d(5)).await?, Some(d(11)));
            assert_eq!(repo.next_race_date(d(11)).await?, Some(d(11)));
            assert_eq!(repo.next_race_date(d(19)).await?, None);

            Ok(())
        }
    }

    mod upsert {
        use chrono::NaiveDate;
        use zrl_test_utils::prelude::*;

        use crate::server::data::race::{RaceRepository, RaceUpsert};

        fn race(category: &str, name: &str) -> RaceUpsert {
            RaceUpsert {
                name: name.to_string(),
                race_date: NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(),
                category: Some(category.to_string()),
                external_id: Some("1".to_string()),
                laps: Some(3),
                ..Default::default()
            }
        }

        /// Expected: same key updates in place, a different category inserts
        #[tokio::test]
        async fn keys_on_round_category_and_external_id() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            let season = test.league().insert_season("17", None, None).await?;
            let round = test.league().insert_round(season.id, 1, true).await?;
            let repo = RaceRepository::new(&test.db);

            let first = repo.upsert(round.id, race("A", "Volcano Flat")).await?;
            let updated = repo.upsert(round.id, race("A", "Volcano Circuit")).await?;
            let other = repo.upsert(round.id, race("B", "Volcano Circuit")).await?;

            assert_eq!(first.id, updated.id);
            assert_eq!(updated.name, "Volcano Circuit");
            assert_ne!(other.id, first.id);
            assert_eq!(repo.get_by_round(round.id).await?.len(), 2);

            Ok(())
        }
    }
}
