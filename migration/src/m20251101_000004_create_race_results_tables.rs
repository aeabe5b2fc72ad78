use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_create_team_tables::{Teams, WtrlRiders};

static IDX_RESULTS_TEAMS_SEGMENT_TEAM: &str = "idx-race_results_teams-season-class_id-race-team_id";
static IDX_RESULTS_RIDERS_RESULT_RIDER: &str =
    "idx-race_results_riders-race_team_result_id-rider_id";
static IDX_ROUND_STANDINGS_SEASON_CLASS_TEAM: &str =
    "idx-round_standings-season-class_id-team_id";
static FK_RESULTS_TEAMS_TEAM_ID: &str = "fk-race_results_teams-team_id";
static FK_RESULTS_RIDERS_RESULT_ID: &str = "fk-race_results_riders-race_team_result_id";
static FK_RESULTS_RIDERS_RIDER_ID: &str = "fk-race_results_riders-rider_id";
static FK_ROUND_STANDINGS_TEAM_ID: &str = "fk-round_standings-team_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RaceResultsTeams::Table)
                    .if_not_exists()
                    .col(pk_auto(RaceResultsTeams::Id))
                    .col(integer(RaceResultsTeams::Season))
                    .col(string(RaceResultsTeams::ClassId))
                    .col(integer(RaceResultsTeams::Race))
                    .col(integer(RaceResultsTeams::TeamId))
                    .col(double_null(RaceResultsTeams::Finp))
                    .col(double_null(RaceResultsTeams::Pbp))
                    .col(double_null(RaceResultsTeams::Totp))
                    .col(double_null(RaceResultsTeams::Falp))
                    .col(double_null(RaceResultsTeams::Ftsp))
                    .col(double_null(RaceResultsTeams::TimeResult))
                    .col(double_null(RaceResultsTeams::DistanceResult))
                    .col(integer_null(RaceResultsTeams::Rank))
                    .col(timestamp(RaceResultsTeams::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESULTS_TEAMS_SEGMENT_TEAM)
                    .table(RaceResultsTeams::Table)
                    .col(RaceResultsTeams::Season)
                    .col(RaceResultsTeams::ClassId)
                    .col(RaceResultsTeams::Race)
                    .col(RaceResultsTeams::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESULTS_TEAMS_TEAM_ID)
                    .from_tbl(RaceResultsTeams::Table)
                    .from_col(RaceResultsTeams::TeamId)
                    .to_tbl(Teams::Table)
                    .to_col(Teams::Trc)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RaceResultsRiders::Table)
                    .if_not_exists()
                    .col(pk_auto(RaceResultsRiders::Id))
                    .col(integer(RaceResultsRiders::RaceTeamResultId))
                    .col(string(RaceResultsRiders::RiderId))
                    .col(double_null(RaceResultsRiders::Finp))
                    .col(double_null(RaceResultsRiders::Pbp))
                    .col(double_null(RaceResultsRiders::Totp))
                    .col(double_null(RaceResultsRiders::Falp))
                    .col(double_null(RaceResultsRiders::Ftsp))
                    .col(double_null(RaceResultsRiders::TimeResult))
                    .col(double_null(RaceResultsRiders::DistanceResult))
                    .col(double_null(RaceResultsRiders::Wkg))
                    .col(double_null(RaceResultsRiders::Watts))
                    .col(double_null(RaceResultsRiders::Gap))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESULTS_RIDERS_RESULT_RIDER)
                    .table(RaceResultsRiders::Table)
                    .col(RaceResultsRiders::RaceTeamResultId)
                    .col(RaceResultsRiders::RiderId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESULTS_RIDERS_RESULT_ID)
                    .from_tbl(RaceResultsRiders::Table)
                    .from_col(RaceResultsRiders::RaceTeamResultId)
                    .to_tbl(RaceResultsTeams::Table)
                    .to_col(RaceResultsTeams::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESULTS_RIDERS_RIDER_ID)
                    .from_tbl(RaceResultsRiders::Table)
                    .from_col(RaceResultsRiders::RiderId)
                    .to_tbl(WtrlRiders::Table)
                    .to_col(WtrlRiders::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoundStandings::Table)
                    .if_not_exists()
                    .col(pk_auto(RoundStandings::Id))
                    .col(integer(RoundStandings::Season))
                    .col(string(RoundStandings::ClassId))
                    .col(integer(RoundStandings::TeamId))
                    .col(double(RoundStandings::TotalPoints))
                    .col(timestamp(RoundStandings::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROUND_STANDINGS_SEASON_CLASS_TEAM)
                    .table(RoundStandings::Table)
                    .col(RoundStandings::Season)
                    .col(RoundStandings::ClassId)
                    .col(RoundStandings::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ROUND_STANDINGS_TEAM_ID)
                    .from_tbl(RoundStandings::Table)
                    .from_col(RoundStandings::TeamId)
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
                    .name(FK_ROUND_STANDINGS_TEAM_ID)
                    .table(RoundStandings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RoundStandings::Table).to_owned())
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RESULTS_RIDERS_RIDER_ID)
                    .table(RaceResultsRiders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RESULTS_RIDERS_RESULT_ID)
                    .table(RaceResultsRiders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RaceResultsRiders::Table).to_owned())
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RESULTS_TEAMS_TEAM_ID)
                    .table(RaceResultsTeams::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RaceResultsTeams::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RaceResultsTeams {
    Table,
    Id,
    Season,
    ClassId,
    Race,
    TeamId,
    Finp,
    Pbp,
    Totp,
    Falp,
    Ftsp,
    TimeResult,
    DistanceResult,
    Rank,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RaceResultsRiders {
    Table,
    Id,
    RaceTeamResultId,
    RiderId,
    Finp,
    Pbp,
    Totp,
    Falp,
    Ftsp,
    TimeResult,
    DistanceResult,
    Wkg,
    Watts,
    Gap,
}

#[derive(DeriveIden)]
enum RoundStandings {
    Table,
    Id,
    Season,
    ClassId,
    TeamId,
    TotalPoints,
    UpdatedAt,
}
