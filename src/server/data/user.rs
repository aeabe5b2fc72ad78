use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        profile_id: i64,
        email: &str,
        password_hash: &str,
        role: &str,
        team_trc: Option<i32>,
        active: bool,
    ) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::User::insert(entity::user::ActiveModel {
            profile_id: ActiveValue::Set(profile_id),
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(password_hash.to_string()),
            role: ActiveValue::Set(role.to_string()),
            team_trc: ActiveValue::Set(team_trc),
            active: ActiveValue::Set(active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, profile_id: i64) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(profile_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Email)
            .all(self.db)
            .await
    }

    /// Updates the account; the password hash is only replaced when `Some`
    ///
    /// Returns `None` if the user does not exist.
    pub async fn update(
        &self,
        profile_id: i64,
        email: &str,
        password_hash: Option<String>,
        role: &str,
        team_trc: Option<i32>,
        active: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.get(profile_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.email = ActiveValue::Set(email.to_string());
        if let Some(hash) = password_hash {
            user_am.password = ActiveValue::Set(hash);
        }
        user_am.role = ActiveValue::Set(role.to_string());
        user_am.team_trc = ActiveValue::Set(team_trc);
        user_am.active = ActiveValue::Set(active);
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    pub async fn delete(&self, profile_id: i64) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(profile_id)
            .exec(self.db)
            .await
    }
}
