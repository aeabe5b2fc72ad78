//! Declarative test builder.
//!
//! Configuration methods queue tables and mock endpoints; everything is created in
//! the final `build()` call.

use mockito::Mock;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};
use serde_json::Value;

use crate::{error::TestError, TestContext};

type MockBuilder = Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>;

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_league_tables: bool,

    mock_builders: Vec<MockBuilder>,

    // (season, class, race, body, pending, hits)
    results_endpoints: Vec<(i32, String, i32, Value, usize, usize)>,
    league_endpoints: Vec<(i32, String, i32, Value, usize, usize)>,
    // (season, trc, body, expected_requests)
    team_endpoints: Vec<(i32, i32, Value, usize)>,
    // (season, category, body, expected_requests)
    schedule_endpoints: Vec<(i32, String, Value, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_league_tables: false,
            mock_builders: Vec::new(),
            results_endpoints: Vec::new(),
            league_endpoints: Vec::new(),
            team_endpoints: Vec::new(),
            schedule_endpoints: Vec::new(),
        }
    }

    /// Create every league table, parents before children so foreign keys resolve.
    pub fn with_league_tables(mut self) -> Self {
        self.include_league_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// ```no_run
    /// use zrl_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), zrl_test_utils::TestError> {
    /// let test = TestBuilder::new().with_table(User).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Results endpoint answering 202 `pending` times, then the body `hits` times
    pub fn with_results_endpoint(
        mut self,
        season: i32,
        class_id: &str,
        race: i32,
        body: Value,
        pending: usize,
        hits: usize,
    ) -> Self {
        self.results_endpoints
            .push((season, class_id.to_string(), race, body, pending, hits));
        self
    }

    /// League standings endpoint answering 202 `pending` times, then the body `hits` times
    pub fn with_league_endpoint(
        mut self,
        season: i32,
        class_id: &str,
        race: i32,
        body: Value,
        pending: usize,
        hits: usize,
    ) -> Self {
        self.league_endpoints
            .push((season, class_id.to_string(), race, body, pending, hits));
        self
    }

    pub fn with_team_endpoint(
        mut self,
        season: i32,
        trc: i32,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.team_endpoints
            .push((season, trc, body, expected_requests));
        self
    }

    pub fn with_schedule_endpoint(
        mut self,
        season: i32,
        category: &str,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.schedule_endpoints
            .push((season, category.to_string(), body, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Creates the tables, then the mock endpoints.
    ///
    /// Custom endpoints are created before the WTRL helpers so a test can queue an
    /// error response ahead of a helper's success response on the same path.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_league_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Season),
                schema.create_table_from_entity(entity::prelude::Round),
                schema.create_table_from_entity(entity::prelude::Race),
                schema.create_table_from_entity(entity::prelude::Team),
                schema.create_table_from_entity(entity::prelude::WtrlRider),
                schema.create_table_from_entity(entity::prelude::RaceLineup),
                schema.create_table_from_entity(entity::prelude::RaceResultsTeam),
                schema.create_table_from_entity(entity::prelude::RaceResultsRider),
                schema.create_table_from_entity(entity::prelude::RoundStanding),
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::RiderAvailability),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        if self.include_league_tables {
            setup.with_indexes(lineup_indexes()).await?;
        }

        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (season, class_id, race, body, pending, hits) in self.results_endpoints {
            mocks.extend(
                setup
                    .wtrl()
                    .create_results_endpoint(season, &class_id, race, &body, pending, hits),
            );
        }

        for (season, class_id, race, body, pending, hits) in self.league_endpoints {
            mocks.extend(
                setup
                    .wtrl()
                    .create_league_endpoint(season, &class_id, race, &body, pending, hits),
            );
        }

        for (season, trc, body, expected) in self.team_endpoints {
            mocks.push(
                setup
                    .wtrl()
                    .create_team_endpoint(season, trc, &body, expected),
            );
        }

        for (season, category, body, expected) in self.schedule_endpoints {
            mocks.push(
                setup
                    .wtrl()
                    .create_schedule_endpoint(season, &category, &body, expected),
            );
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

/// Unique lineup keys that entity-generated tables do not carry
fn lineup_indexes() -> Vec<IndexCreateStatement> {
    use entity::race_lineup::Column;

    vec![
        Index::create()
            .name("idx-race_lineup-race_id-profile_id")
            .table(entity::prelude::RaceLineup)
            .col(Column::RaceId)
            .col(Column::ProfileId)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx-race_lineup-race_date-profile_id")
            .table(entity::prelude::RaceLineup)
            .col(Column::RaceDate)
            .col(Column::ProfileId)
            .unique()
            .to_owned(),
    ]
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
