pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_season_tables;
mod m20251101_000002_create_team_tables;
mod m20251101_000003_create_race_lineup_table;
mod m20251101_000004_create_race_results_tables;
mod m20251101_000005_create_user_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_season_tables::Migration),
            Box::new(m20251101_000002_create_team_tables::Migration),
            Box::new(m20251101_000003_create_race_lineup_table::Migration),
            Box::new(m20251101_000004_create_race_results_tables::Migration),
            Box::new(m20251101_000005_create_user_tables::Migration),
        ]
    }
}
