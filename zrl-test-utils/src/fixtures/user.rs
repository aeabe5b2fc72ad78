use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD_HASH, error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Inserts an active user whose password is [`crate::constant::TEST_PASSWORD`]
    pub async fn insert_user(
        &self,
        profile_id: i64,
        email: &str,
        role: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_user_with(profile_id, email, role, TEST_PASSWORD_HASH, true)
            .await
    }

    pub async fn insert_user_with(
        &self,
        profile_id: i64,
        email: &str,
        role: &str,
        password_hash: &str,
        active: bool,
    ) -> Result<entity::user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            profile_id: ActiveValue::Set(profile_id),
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(password_hash.to_string()),
            role: ActiveValue::Set(role.to_string()),
            team_trc: ActiveValue::Set(None),
            active: ActiveValue::Set(active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
