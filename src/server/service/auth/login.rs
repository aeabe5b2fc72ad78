use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{role::Role, session::user::SessionUser},
    service::{auth::password::spawn_verify_password, retry::RetryContext},
};

pub struct LoginService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LoginService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks the credentials and returns the user to store in the session.
    ///
    /// # Returns
    /// - `Ok(SessionUser)` - Credentials match an active account
    /// - `Err(AuthError::MissingCredentials)` - Email or password empty
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email, inactive account or wrong
    ///   password; callers show one generic message for all three
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, Error> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let ctx = RetryContext::new();
        let db = self.db.clone();
        let lookup_email = email.to_string();

        let user = ctx
            .execute_with_retry("login user lookup", || {
                let db = db.clone();
                let email = lookup_email.clone();

                Box::pin(async move { Ok(UserRepository::new(&db).find_by_email(&email).await?) })
            })
            .await?;

        let Some(user) = user else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !user.active {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !spawn_verify_password(user.password.clone(), password.to_string()).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let role = user.role.parse::<Role>().map_err(|_| {
            Error::InternalError(format!(
                "User {} has unknown role {:?}",
                user.profile_id, user.role
            ))
        })?;

        tracing::info!("User {} logged in as {}", user.profile_id, role);

        Ok(SessionUser {
            profile_id: user.profile_id,
            role,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use zrl_test_utils::prelude::*;

    use crate::server::{
        error::{auth::AuthError, Error},
        model::role::Role,
        service::auth::login::LoginService,
    };

    /// Expected: correct credentials return the session user with its role
    #[tokio::test]
    async fn logs_in_active_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_league_tables().build().await?;
        test.user().insert_user(42, "cap@example.com", "captain").await?;

        let user = LoginService::new(&test.db)
            .login("cap@example.com", TEST_PASSWORD)
            .await
            .unwrap();

        assert_eq!(user.profile_id, 42);
        assert_eq!(user.role, Role::Captain);

        Ok(())
    }

    /// Expected: wrong password, unknown email and inactive account share one error
    #[tokio::test]
    async fn rejects_bad_credentials_uniformly() -> Result<(), TestError> {
        let test = TestBuilder::new().with_league_tables().build().await?;
        test.user().insert_user(42, "cap@example.com", "captain").await?;
        test.user()
            .insert_user_with(43, "off@example.com", "user", TEST_PASSWORD_HASH, false)
            .await?;
        let service = LoginService::new(&test.db);

        for (email, password) in [
            ("cap@example.com", "wrong"),
            ("nobody@example.com", TEST_PASSWORD),
            ("off@example.com", TEST_PASSWORD),
        ] {
            let result = service.login(email, password).await;
            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));
        }

        Ok(())
    }

    /// Expected: empty fields are reported before any lookup
    #[tokio::test]
    async fn rejects_missing_fields() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        let result = LoginService::new(&test.db).login("  ", "secret").await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::MissingCredentials))
        ));

        Ok(())
    }
}
