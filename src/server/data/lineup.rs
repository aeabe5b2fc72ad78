use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

pub struct LineupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LineupRepository<'a, C> {
    /// Creates a new instance of [`LineupRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Profile IDs selected by a team for a race date
    pub async fn get_selected_ids(
        &self,
        trc: i32,
        race_date: NaiveDate,
    ) -> Result<Vec<i64>, DbErr> {
        entity::prelude::RaceLineup::find()
            .select_only()
            .column(entity::race_lineup::Column::ProfileId)
            .filter(entity::race_lineup::Column::TeamTrc.eq(trc))
            .filter(entity::race_lineup::Column::RaceDate.eq(race_date))
            .order_by_asc(entity::race_lineup::Column::Id)
            .into_tuple::<i64>()
            .all(self.db)
            .await
    }

    /// Lineup rows of every other team on the same date
    pub async fn get_other_teams(
        &self,
        trc: i32,
        race_date: NaiveDate,
    ) -> Result<Vec<entity::race_lineup::Model>, DbErr> {
        entity::prelude::RaceLineup::find()
            .filter(entity::race_lineup::Column::TeamTrc.ne(trc))
            .filter(entity::race_lineup::Column::RaceDate.eq(race_date))
            .order_by_asc(entity::race_lineup::Column::TeamTrc)
            .all(self.db)
            .await
    }

    /// Every lineup row on a date, ordered by team
    pub async fn get_on_date(
        &self,
        race_date: NaiveDate,
    ) -> Result<Vec<entity::race_lineup::Model>, DbErr> {
        entity::prelude::RaceLineup::find()
            .filter(entity::race_lineup::Column::RaceDate.eq(race_date))
            .order_by_asc(entity::race_lineup::Column::TeamTrc)
            .order_by_asc(entity::race_lineup::Column::Id)
            .all(self.db)
            .await
    }

    /// Earliest date on or after `from` that has at least one lineup row
    pub async fn next_lineup_date(&self, from: NaiveDate) -> Result<Option<NaiveDate>, DbErr> {
        entity::prelude::RaceLineup::find()
            .select_only()
            .column(entity::race_lineup::Column::RaceDate)
            .filter(entity::race_lineup::Column::RaceDate.gte(from))
            .order_by_asc(entity::race_lineup::Column::RaceDate)
            .into_tuple::<NaiveDate>()
            .one(self.db)
            .await
    }

    pub async fn has_lineup(&self, trc: i32, race_date: NaiveDate) -> Result<bool, DbErr> {
        let count = entity::prelude::RaceLineup::find()
            .filter(entity::race_lineup::Column::TeamTrc.eq(trc))
            .filter(entity::race_lineup::Column::RaceDate.eq(race_date))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn insert(
        &self,
        race_id: &str,
        trc: i32,
        race_date: NaiveDate,
        profile_id: i64,
    ) -> Result<entity::race_lineup::Model, DbErr> {
        entity::prelude::RaceLineup::insert(entity::race_lineup::ActiveModel {
            race_id: ActiveValue::Set(race_id.to_string()),
            race_date: ActiveValue::Set(race_date),
            team_trc: ActiveValue::Set(trc),
            profile_id: ActiveValue::Set(profile_id),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Removes the team's rows for the date whose profile is not in `keep`
    pub async fn delete_not_in(
        &self,
        trc: i32,
        race_date: NaiveDate,
        keep: Vec<i64>,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::RaceLineup::delete_many()
            .filter(entity::race_lineup::Column::TeamTrc.eq(trc))
            .filter(entity::race_lineup::Column::RaceDate.eq(race_date));

        if !keep.is_empty() {
            query = query.filter(entity::race_lineup::Column::ProfileId.is_not_in(keep));
        }

        let result = query.exec(self.db).await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_rider(
        &self,
        trc: i32,
        race_date: NaiveDate,
        profile_id: i64,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::RaceLineup::delete_many()
            .filter(entity::race_lineup::Column::TeamTrc.eq(trc))
            .filter(entity::race_lineup::Column::RaceDate.eq(race_date))
            .filter(entity::race_lineup::Column::ProfileId.eq(profile_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
