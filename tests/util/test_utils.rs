//! Builds an [`AppState`] on top of the shared test context

use std::{path::PathBuf, sync::Arc};

use zrl_manager::server::{
    model::{app::AppState, role::Role, session::user::SessionUser},
    service::import::{tracker::ImportTracker, ImportSettings},
    wtrl::{PollConfig, WtrlClient},
};
use zrl_test_utils::prelude::*;

/// TRC list path that never exists, so imports without explicit TRCs fail fast
pub static MISSING_TRC_LIST: &str = "target/does-not-exist/team_trc_list.txt";

/// Extension trait for TestContext to create AppState pointing at the mock WTRL server
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;

    /// Inserts an active user with [`TEST_PASSWORD`] and logs them into the session
    async fn login_as(&self, profile_id: i64, role: Role) -> Result<SessionUser, TestError>;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        let wtrl_client = WtrlClient::new(
            &self.server_url(),
            TEST_COOKIE,
            TEST_USER_AGENT,
            PollConfig::fast(3),
        )
        .expect("Failed to build WTRL client");

        AppState {
            db: self.db.clone(),
            wtrl_client,
            imports: ImportTracker::new(),
            import_settings: Arc::new(ImportSettings {
                default_season: TEST_SEASON,
                team_trc_list: PathBuf::from(MISSING_TRC_LIST),
                snapshot_dir: None,
            }),
        }
    }

    async fn login_as(&self, profile_id: i64, role: Role) -> Result<SessionUser, TestError> {
        let email = format!("{}@example.com", profile_id);
        self.user()
            .insert_user(profile_id, &email, role.as_str())
            .await?;

        let user = SessionUser {
            profile_id,
            role,
            email,
        };
        SessionUser::insert(&self.session, &user)
            .await
            .expect("Failed to store session user");

        Ok(user)
    }
}
