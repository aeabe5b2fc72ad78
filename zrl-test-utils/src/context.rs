//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context holds
//! an in-memory SQLite database, a mock WTRL server and a session backed by a memory
//! store.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, Database, DatabaseConnection,
};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let test = TestBuilder::new().with_league_tables().build().await?;
///
/// let team = test.league().insert_team(4411, "Team Rocket", Some("A1")).await?;
/// let client = WtrlClient::new(&test.server_url(), TEST_COOKIE, TEST_USER_AGENT, PollConfig::fast(3))?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session store for authentication flows
    pub session: Session,

    /// Mock HTTP server standing in for WTRL
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            server,
            db,
            session,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    pub(crate) async fn with_indexes(
        &self,
        stmts: Vec<IndexCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock WTRL server, without a trailing slash
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
