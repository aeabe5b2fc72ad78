//! User account administration.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::{UserDto, UserFormDto},
    server::{
        data::user::UserRepository,
        error::{validation::ValidationError, Error},
        model::role::Role,
        service::{auth::password::spawn_hash_password, retry::RetryContext},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            profile_id: user.profile_id,
            email: user.email,
            role: user.role,
            team_trc: user.team_trc,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

/// Form fields after validation
struct ValidatedForm {
    email: String,
    role: Role,
    password: Option<String>,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(&self) -> Result<Vec<UserDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        let users = ctx
            .execute_with_retry("user list", || {
                let db = db.clone();

                Box::pin(async move { Ok(UserRepository::new(&db).get_all().await?) })
            })
            .await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Active account for `profile_id`; `None` when missing or deactivated
    pub async fn get_active_user(&self, profile_id: i64) -> Result<Option<UserDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        let user = ctx
            .execute_with_retry("user lookup", || {
                let db = db.clone();

                Box::pin(async move { Ok(UserRepository::new(&db).get(profile_id).await?) })
            })
            .await?;

        Ok(user.filter(|user| user.active).map(UserDto::from))
    }

    /// Creates a user from the admin form.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created account
    /// - `Err(ValidationError)` - Missing field, bad role, non-numeric or duplicate
    ///   profile ID, duplicate email, or no password
    pub async fn create_user(&self, form: UserFormDto) -> Result<UserDto, Error> {
        let profile_id = parse_profile_id(&form.profile_id)?;
        let validated = validate(&form)?;
        let Some(password) = validated.password else {
            return Err(ValidationError::MissingField("Password").into());
        };

        let user_repo = UserRepository::new(self.db);

        if user_repo.get(profile_id).await?.is_some() {
            return Err(ValidationError::ProfileIdTaken(profile_id).into());
        }
        if user_repo.find_by_email(&validated.email).await?.is_some() {
            return Err(ValidationError::EmailTaken(validated.email).into());
        }

        let password_hash = spawn_hash_password(password).await?;

        let user = user_repo
            .create(
                profile_id,
                &validated.email,
                &password_hash,
                validated.role.as_str(),
                form.team_trc,
                form.active,
            )
            .await?;

        tracing::info!("Created user {} with role {}", user.profile_id, user.role);

        Ok(user.into())
    }

    /// Updates a user; the password only changes when a non-empty one is given
    pub async fn update_user(&self, profile_id: i64, form: UserFormDto) -> Result<UserDto, Error> {
        let validated = validate(&form)?;
        let user_repo = UserRepository::new(self.db);

        if let Some(other) = user_repo.find_by_email(&validated.email).await? {
            if other.profile_id != profile_id {
                return Err(ValidationError::EmailTaken(validated.email).into());
            }
        }

        let password_hash = match validated.password {
            Some(password) => Some(spawn_hash_password(password).await?),
            None => None,
        };

        let user = user_repo
            .update(
                profile_id,
                &validated.email,
                password_hash,
                validated.role.as_str(),
                form.team_trc,
                form.active,
            )
            .await?
            .ok_or(ValidationError::UserNotFound(profile_id))?;

        tracing::info!("Updated user {}", user.profile_id);

        Ok(user.into())
    }

    /// Deletes a user; admin accounts are protected
    pub async fn delete_user(&self, profile_id: i64) -> Result<(), Error> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.get(profile_id).await? else {
            return Err(ValidationError::UserNotFound(profile_id).into());
        };

        if user.role == Role::Admin.as_str() {
            return Err(ValidationError::AdminDeletion.into());
        }

        user_repo.delete(profile_id).await?;

        tracing::info!("Deleted user {}", profile_id);

        Ok(())
    }
}

fn parse_profile_id(value: &str) -> Result<i64, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField("Profile ID"));
    }

    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::InvalidProfileId(value.to_string()))
}

fn validate(form: &UserFormDto) -> Result<ValidatedForm, ValidationError> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("Email"));
    }
    if form.role.trim().is_empty() {
        return Err(ValidationError::MissingField("Role"));
    }

    Ok(ValidatedForm {
        email: email.to_string(),
        role: form.role.parse::<Role>()?,
        password: form
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use crate::model::user::UserFormDto;

    fn form(profile_id: &str, email: &str, role: &str, password: Option<&str>) -> UserFormDto {
        UserFormDto {
            profile_id: profile_id.to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
            role: role.to_string(),
            team_trc: None,
            active: true,
        }
    }

    mod create_user {
        use sea_orm::EntityTrait;
        use zrl_test_utils::prelude::*;

        use super::form;
        use crate::server::{
            error::{validation::ValidationError, Error},
            service::{auth::password::verify_password, user::UserService},
        };

        /// Expected: the stored password is a verifiable hash, never the plain text
        #[tokio::test]
        async fn stores_hashed_password() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;

            let user = UserService::new(&test.db)
                .create_user(form("123", "r@example.com", "user", Some("pw")))
                .await
                .unwrap();

            let stored = entity::prelude::User::find_by_id(user.profile_id)
                .one(&test.db)
                .await?
                .unwrap();
            assert_ne!(stored.password, "pw");
            assert!(verify_password(&stored.password, "pw"));

            Ok(())
        }

        /// Expected: each invalid form maps to its validation error
        #[tokio::test]
        async fn rejects_invalid_forms() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.user().insert_user(1, "taken@example.com", "user").await?;
            let service = UserService::new(&test.db);

            let cases = [
                form("abc", "a@example.com", "user", Some("pw")),
                form("2", "a@example.com", "owner", Some("pw")),
                form("2", "a@example.com", "user", None),
                form("1", "a@example.com", "user", Some("pw")),
                form("2", "taken@example.com", "user", Some("pw")),
            ];

            let mut results = Vec::new();
            for case in cases {
                results.push(service.create_user(case).await);
            }

            assert!(matches!(
                results[0],
                Err(Error::ValidationError(ValidationError::InvalidProfileId(_)))
            ));
            assert!(matches!(
                results[1],
                Err(Error::ValidationError(ValidationError::InvalidRole(_)))
            ));
            assert!(matches!(
                results[2],
                Err(Error::ValidationError(ValidationError::MissingField("Password")))
            ));
            assert!(matches!(
                results[3],
                Err(Error::ValidationError(ValidationError::ProfileIdTaken(1)))
            ));
            assert!(matches!(
                results[4],
                Err(Error::ValidationError(ValidationError::EmailTaken(_)))
            ));

            Ok(())
        }
    }

    mod update_user {
        use sea_orm::EntityTrait;
        use zrl_test_utils::prelude::*;

        use super::form;
        use crate::server::service::{auth::password::verify_password, user::UserService};

        /// Expected: an empty password leaves the old one in place
        #[tokio::test]
        async fn keeps_password_when_empty() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.user().insert_user(5, "r@example.com", "user").await?;

            let user = UserService::new(&test.db)
                .update_user(5, form("5", "r@example.com", "captain", Some("")))
                .await
                .unwrap();

            let stored = entity::prelude::User::find_by_id(5)
                .one(&test.db)
                .await?
                .unwrap();
            assert_eq!(user.role, "captain");
            assert!(verify_password(&stored.password, TEST_PASSWORD));

            Ok(())
        }
    }

    mod delete_user {
        use zrl_test_utils::prelude::*;

        use crate::server::{
            error::{validation::ValidationError, Error},
            service::user::UserService,
        };

        /// Expected: admins are protected, other users are removed
        #[tokio::test]
        async fn protects_admins() -> Result<(), TestError> {
            let test = TestBuilder::new().with_league_tables().build().await?;
            test.user().insert_user(1, "admin@example.com", "admin").await?;
            test.user().insert_user(2, "user@example.com", "user").await?;
            let service = UserService::new(&test.db);

            let admin = service.delete_user(1).await;
            let user = service.delete_user(2).await;

            assert!(matches!(
                admin,
                Err(Error::ValidationError(ValidationError::AdminDeletion))
            ));
            assert!(user.is_ok());
            assert_eq!(service.list_users().await.unwrap().len(), 1);

            Ok(())
        }
    }
}
