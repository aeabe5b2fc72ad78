use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_create_team_tables::WtrlRiders;

static FK_RIDER_AVAILABILITY_WTRL_RIDER_ID: &str = "fk-rider_availability-wtrl_rider_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(big_integer(Users::ProfileId).primary_key())
                    .col(string_uniq(Users::Email))
                    .col(string(Users::Password))
                    .col(string(Users::Role).default("user"))
                    .col(integer_null(Users::TeamTrc))
                    .col(boolean(Users::Active).default(true))
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RiderAvailability::Table)
                    .if_not_exists()
                    .col(pk_auto(RiderAvailability::Id))
                    .col(string_uniq(RiderAvailability::WtrlRiderId))
                    .col(json(RiderAvailability::AvailabilityData))
                    .col(text_null(RiderAvailability::Notes))
                    .col(timestamp(RiderAvailability::CreatedAt))
                    .col(timestamp(RiderAvailability::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RIDER_AVAILABILITY_WTRL_RIDER_ID)
                    .from_tbl(RiderAvailability::Table)
                    .from_col(RiderAvailability::WtrlRiderId)
                    .to_tbl(WtrlRiders::Table)
                    .to_col(WtrlRiders::Id)
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
                    .name(FK_RIDER_AVAILABILITY_WTRL_RIDER_ID)
                    .table(RiderAvailability::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RiderAvailability::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    ProfileId,
    Email,
    Password,
    Role,
    TeamTrc,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RiderAvailability {
    Table,
    Id,
    WtrlRiderId,
    AvailabilityData,
    Notes,
    CreatedAt,
    UpdatedAt,
}
