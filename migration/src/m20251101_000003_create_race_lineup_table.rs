use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_create_team_tables::Teams;

static IDX_RACE_LINEUP_RACE_ID_PROFILE_ID: &str = "idx-race_lineup-race_id-profile_id";
static IDX_RACE_LINEUP_RACE_DATE_PROFILE_ID: &str = "idx-race_lineup-race_date-profile_id";
static FK_RACE_LINEUP_TEAM_TRC: &str = "fk-race_lineup-team_trc";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RaceLineup::Table)
                    .if_not_exists()
                    .col(pk_auto(RaceLineup::Id))
                    .col(string(RaceLineup::RaceId))
                    .col(date(RaceLineup::RaceDate))
                    .col(integer(RaceLineup::TeamTrc))
                    .col(big_integer(RaceLineup::ProfileId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RACE_LINEUP_RACE_ID_PROFILE_ID)
                    .table(RaceLineup::Table)
                    .col(RaceLineup::RaceId)
                    .col(RaceLineup::ProfileId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RACE_LINEUP_RACE_DATE_PROFILE_ID)
                    .table(RaceLineup::Table)
                    .col(RaceLineup::RaceDate)
                    .col(RaceLineup::ProfileId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RACE_LINEUP_TEAM_TRC)
                    .from_tbl(RaceLineup::Table)
                    .from_col(RaceLineup::TeamTrc)
                    .to_tbl(Teams::Table)
                    .to_col(Teams::Trc)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RACE_LINEUP_TEAM_TRC)
                    .table(RaceLineup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RaceLineup::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RaceLineup {
    Table,
    Id,
    RaceId,
    RaceDate,
    TeamTrc,
    ProfileId,
}
