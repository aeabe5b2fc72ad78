use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::{error::Error, model::role::Role};

pub const SESSION_USER_ID_KEY: &str = "zrl:user:id";
pub const SESSION_USER_ROLE_KEY: &str = "zrl:user:role";
pub const SESSION_USER_EMAIL_KEY: &str = "zrl:user:email";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Insert user profile ID into session
    pub async fn insert(session: &Session, profile_id: i64) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(profile_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get user profile ID from session
    pub async fn get(session: &Session) -> Result<Option<i64>, Error> {
        session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id_str)| {
                id_str.parse::<i64>().map_err(|e| {
                    Error::ParseError(format!("Failed to parse session user id: {}", e))
                })
            })
            .transpose()
    }
}

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserRole(pub String);

impl SessionUserRole {
    pub async fn insert(session: &Session, role: Role) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ROLE_KEY, SessionUserRole(role.to_string()))
            .await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<Role>, Error> {
        session
            .get::<SessionUserRole>(SESSION_USER_ROLE_KEY)
            .await?
            .map(|SessionUserRole(role)| {
                role.parse::<Role>().map_err(|e| {
                    Error::ParseError(format!("Failed to parse session user role: {}", e))
                })
            })
            .transpose()
    }
}

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserEmail(pub String);

impl SessionUserEmail {
    pub async fn insert(session: &Session, email: &str) -> Result<(), Error> {
        session
            .insert(SESSION_USER_EMAIL_KEY, SessionUserEmail(email.to_string()))
            .await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        Ok(session
            .get::<SessionUserEmail>(SESSION_USER_EMAIL_KEY)
            .await?
            .map(|SessionUserEmail(email)| email))
    }
}

/// The logged-in user as stored across the three session keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub profile_id: i64,
    pub role: Role,
    pub email: String,
}

impl SessionUser {
    pub async fn insert(session: &Session, user: &SessionUser) -> Result<(), Error> {
        SessionUserId::insert(session, user.profile_id).await?;
        SessionUserRole::insert(session, user.role).await?;
        SessionUserEmail::insert(session, &user.email).await?;

        Ok(())
    }

    /// Returns `None` unless both the profile ID and role are present.
    pub async fn get(session: &Session) -> Result<Option<SessionUser>, Error> {
        let Some(profile_id) = SessionUserId::get(session).await? else {
            return Ok(None);
        };
        let Some(role) = SessionUserRole::get(session).await? else {
            return Ok(None);
        };
        let email = SessionUserEmail::get(session).await?.unwrap_or_default();

        Ok(Some(SessionUser {
            profile_id,
            role,
            email,
        }))
    }
}

#[cfg(test)]
mod tests {
    mod session_user_id {
        use zrl_test_utils::prelude::*;

        use crate::server::model::session::user::{SessionUserId, SESSION_USER_ID_KEY};

        /// Expected: Some with the inserted profile ID
        #[tokio::test]
        async fn returns_inserted_profile_id() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            SessionUserId::insert(&test.session, 5_012_345).await.unwrap();
            let result = SessionUserId::get(&test.session).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap(), Some(5_012_345));

            Ok(())
        }

        /// Expected: None when no profile ID is present in session
        #[tokio::test]
        async fn returns_none_for_empty_session() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let result = SessionUserId::get(&test.session).await;

            assert!(result.is_ok());
            assert!(result.unwrap().is_none());

            Ok(())
        }

        /// Expected: Err when the stored profile ID is not numeric
        #[tokio::test]
        async fn fails_on_non_numeric_profile_id() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            test.session
                .insert(SESSION_USER_ID_KEY, SessionUserId("abc".to_string()))
                .await?;

            let result = SessionUserId::get(&test.session).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod session_user {
        use zrl_test_utils::prelude::*;

        use crate::server::model::{
            role::Role,
            session::user::{SessionUser, SessionUserId},
        };

        /// Expected: the user round-trips through the three session keys
        #[tokio::test]
        async fn returns_inserted_user() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;
            let user = SessionUser {
                profile_id: 42,
                role: Role::Captain,
                email: "captain@example.com".to_string(),
            };

            SessionUser::insert(&test.session, &user).await.unwrap();
            let result = SessionUser::get(&test.session).await.unwrap();

            assert_eq!(result, Some(user));

            Ok(())
        }

        /// Expected: None when the role is missing
        #[tokio::test]
        async fn returns_none_without_role() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            SessionUserId::insert(&test.session, 42).await.unwrap();
            let result = SessionUser::get(&test.session).await.unwrap();

            assert!(result.is_none());

            Ok(())
        }
    }
}
