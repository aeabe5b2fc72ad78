use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct SeasonRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeasonRepository<'a, C> {
    /// Creates a new instance of [`SeasonRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::season::Model>, DbErr> {
        entity::prelude::Season::find()
            .filter(entity::season::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// All seasons, newest first
    pub async fn get_all(&self) -> Result<Vec<entity::season::Model>, DbErr> {
        entity::prelude::Season::find()
            .order_by_desc(entity::season::Column::Id)
            .all(self.db)
            .await
    }

    /// Newest season whose name contains `fragment`, falling back to the newest season
    pub async fn find_latest_matching(
        &self,
        fragment: &str,
    ) -> Result<Option<entity::season::Model>, DbErr> {
        let matching = entity::prelude::Season::find()
            .filter(entity::season::Column::Name.contains(fragment))
            .order_by_desc(entity::season::Column::Id)
            .one(self.db)
            .await?;

        if matching.is_some() {
            return Ok(matching);
        }

        entity::prelude::Season::find()
            .order_by_desc(entity::season::Column::Id)
            .one(self.db)
            .await
    }

    /// Creates the season or widens its date range to cover `start..=end`
    pub async fn upsert(
        &self,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<entity::season::Model, DbErr> {
        match self.find_by_name(name).await? {
            Some(season) => {
                let start = season.start_date.map_or(start_date, |d| d.min(start_date));
                let end = season.end_date.map_or(end_date, |d| d.max(end_date));

                let mut season_am = season.into_active_model();
                season_am.start_date = ActiveValue::Set(Some(start));
                season_am.end_date = ActiveValue::Set(Some(end));

                season_am.update(self.db).await
            }
            None => {
                entity::season::ActiveModel {
                    name: ActiveValue::Set(name.to_string()),
                    start_date: ActiveValue::Set(Some(start_date)),
                    end_date: ActiveValue::Set(Some(end_date)),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}
