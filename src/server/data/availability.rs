use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use serde_json::Value;

pub struct AvailabilityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AvailabilityRepository<'a, C> {
    /// Creates a new instance of [`AvailabilityRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_rider(
        &self,
        wtrl_rider_id: &str,
    ) -> Result<Option<entity::rider_availability::Model>, DbErr> {
        entity::prelude::RiderAvailability::find()
            .filter(entity::rider_availability::Column::WtrlRiderId.eq(wtrl_rider_id))
            .one(self.db)
            .await
    }

    pub async fn get_by_riders(
        &self,
        wtrl_rider_ids: Vec<String>,
    ) -> Result<Vec<entity::rider_availability::Model>, DbErr> {
        if wtrl_rider_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RiderAvailability::find()
            .filter(entity::rider_availability::Column::WtrlRiderId.is_in(wtrl_rider_ids))
            .all(self.db)
            .await
    }

    /// Creates or replaces the rider's availability declaration
    pub async fn upsert(
        &self,
        wtrl_rider_id: &str,
        availability_data: Value,
        notes: Option<String>,
    ) -> Result<entity::rider_availability::Model, DbErr> {
        let now = Utc::now().naive_utc();

        match self.get_by_rider(wtrl_rider_id).await? {
            Some(existing) => {
                let mut availability_am = existing.into_active_model();
                availability_am.availability_data = ActiveValue::Set(availability_data);
                availability_am.notes = ActiveValue::Set(notes);
                availability_am.updated_at = ActiveValue::Set(now);

                availability_am.update(self.db).await
            }
            None => {
                entity::prelude::RiderAvailability::insert(
                    entity::rider_availability::ActiveModel {
                        wtrl_rider_id: ActiveValue::Set(wtrl_rider_id.to_string()),
                        availability_data: ActiveValue::Set(availability_data),
                        notes: ActiveValue::Set(notes),
                        created_at: ActiveValue::Set(now),
                        updated_at: ActiveValue::Set(now),
                        ..Default::default()
                    },
                )
                .exec_with_returning(self.db)
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    mod upsert {
        use serde_json::json;
        use zrl_test_utils::prelude::*;

        use crate::server::data::availability::AvailabilityRepository;

        /// Expected: one row per rider, replaced on the second save
        #[tokio::test]
        async fn replaces_existing_declaration() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.league().insert_team(10, "Alpha", Some("A1")).await?;
            let rider = test.league().insert_rider(10, 1, "Anna").await?;
            let repo = AvailabilityRepository::new(&test.db);

            let first = repo
                .upsert(&rider.id, json!({"tuesday": null}), None)
                .await?;
            let second = repo
                .upsert(
                    &rider.id,
                    json!({"tuesday": {"start": "19:00", "end": "21:00"}}),
                    Some("late start".to_string()),
                )
                .await?;

            assert_eq!(first.id, second.id);
            assert_eq!(second.availability_data["tuesday"]["start"], "19:00");
            assert_eq!(second.notes.as_deref(), Some("late start"));

            Ok(())
        }
    }
}
