use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use crate::{
    model::{api::MessageDto, league::AvailabilityDto},
    server::{
        data::{availability::AvailabilityRepository, wtrl_rider::WtrlRiderRepository},
        error::{validation::ValidationError, Error},
        model::db::WtrlRiderModel,
    },
};

pub struct AvailabilityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn rider(&self, profile_id: i64) -> Result<WtrlRiderModel, Error> {
        WtrlRiderRepository::new(self.db)
            .find_by_profile_id(profile_id)
            .await?
            .ok_or_else(|| ValidationError::RiderNotFound(profile_id).into())
    }

    /// Current declaration, an empty object when none was saved
    pub async fn get(&self, profile_id: i64) -> Result<AvailabilityDto, Error> {
        let rider = self.rider(profile_id).await?;

        let dto = match AvailabilityRepository::new(self.db)
            .get_by_rider(&rider.id)
            .await?
        {
            Some(entry) => AvailabilityDto {
                availability_data: entry.availability_data,
                notes: entry.notes.unwrap_or_default(),
            },
            None => AvailabilityDto {
                availability_data: Value::Object(Map::new()),
                notes: String::new(),
            },
        };

        Ok(dto)
    }

    /// Validates and stores `{availability_data, notes}` for the rider.
    ///
    /// `availability_data` must be a JSON object; `notes` may be omitted but must be a
    /// string when present.
    pub async fn save(&self, profile_id: i64, body: Value) -> Result<MessageDto, Error> {
        let availability_data = match body.get("availability_data") {
            Some(Value::Object(data)) => Value::Object(data.clone()),
            Some(_) => {
                return Err(ValidationError::InvalidAvailability(
                    "availability_data must be an object".to_string(),
                )
                .into())
            }
            None => return Err(ValidationError::MissingField("availability_data").into()),
        };

        let notes = match body.get("notes") {
            None | Some(Value::Null) => None,
            Some(Value::String(notes)) if notes.trim().is_empty() => None,
            Some(Value::String(notes)) => Some(notes.trim().to_string()),
            Some(_) => {
                return Err(ValidationError::InvalidAvailability(
                    "notes must be a string".to_string(),
                )
                .into())
            }
        };

        let rider = self.rider(profile_id).await?;

        AvailabilityRepository::new(self.db)
            .upsert(&rider.id, availability_data, notes)
            .await?;

        tracing::info!("Saved availability for rider {}", rider.id);

        Ok(MessageDto::success("Availability saved"))
    }
}
