use sea_orm_migration::{prelude::*, schema::*};

static IDX_ROUNDS_SEASON_ROUND_NUMBER: &str = "idx-rounds-season_id-round_number";
static IDX_RACES_ROUND_CATEGORY_EXTERNAL_ID: &str = "idx-races-round_id-category-external_id";
static IDX_RACES_RACE_DATE: &str = "idx-races-race_date";
static FK_ROUNDS_SEASON_ID: &str = "fk-rounds-season_id";
static FK_RACES_ROUND_ID: &str = "fk-races-round_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(pk_auto(Seasons::Id))
                    .col(string_uniq(Seasons::Name))
                    .col(date_null(Seasons::StartDate))
                    .col(date_null(Seasons::EndDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(pk_auto(Rounds::Id))
                    .col(integer(Rounds::SeasonId))
                    .col(integer(Rounds::RoundNumber))
                    .col(string(Rounds::Name))
                    .col(date_null(Rounds::StartDate))
                    .col(date_null(Rounds::EndDate))
                    .col(string_null(Rounds::LogoUrl))
                    .col(boolean(Rounds::IsActive))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROUNDS_SEASON_ROUND_NUMBER)
                    .table(Rounds::Table)
                    .col(Rounds::SeasonId)
                    .col(Rounds::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ROUNDS_SEASON_ID)
                    .from_tbl(Rounds::Table)
                    .from_col(Rounds::SeasonId)
                    .to_tbl(Seasons::Table)
                    .to_col(Seasons::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Races::Table)
                    .if_not_exists()
                    .col(pk_auto(Races::Id))
                    .col(integer(Races::RoundId))
                    .col(string(Races::Name))
                    .col(date(Races::RaceDate))
                    .col(string_null(Races::Format))
                    .col(string_null(Races::World))
                    .col(string_null(Races::Course))
                    .col(integer_null(Races::Laps))
                    .col(double_null(Races::DistanceKm))
                    .col(double_null(Races::ElevationM))
                    .col(text_null(Races::Rules))
                    .col(text_null(Races::Segments))
                    .col(double_null(Races::LeadinDistance))
                    .col(double_null(Races::LeadinAscent))
                    .col(string_null(Races::Category))
                    .col(boolean(Races::Active))
                    .col(string_null(Races::ExternalId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RACES_ROUND_CATEGORY_EXTERNAL_ID)
                    .table(Races::Table)
                    .col(Races::RoundId)
                    .col(Races::Category)
                    .col(Races::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RACES_RACE_DATE)
                    .table(Races::Table)
                    .col(Races::RaceDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RACES_ROUND_ID)
                    .from_tbl(Races::Table)
                    .from_col(Races::RoundId)
                    .to_tbl(Rounds::Table)
                    .to_col(Rounds::Id)
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
                    .name(FK_RACES_ROUND_ID)
                    .table(Races::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Races::Table).to_owned())
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ROUNDS_SEASON_ID)
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Seasons::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Seasons {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
pub enum Rounds {
    Table,
    Id,
    SeasonId,
    RoundNumber,
    Name,
    StartDate,
    EndDate,
    LogoUrl,
    IsActive,
}

#[derive(DeriveIden)]
enum Races {
    Table,
    Id,
    RoundId,
    Name,
    RaceDate,
    Format,
    World,
    Course,
    Laps,
    DistanceKm,
    ElevationM,
    Rules,
    Segments,
    LeadinDistance,
    LeadinAscent,
    Category,
    Active,
    ExternalId,
}
