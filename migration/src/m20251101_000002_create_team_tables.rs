use sea_orm_migration::{prelude::*, schema::*};

static IDX_WTRL_RIDERS_TEAM_TRC: &str = "idx-wtrl_riders-team_trc";
static IDX_WTRL_RIDERS_PROFILE_ID: &str = "idx-wtrl_riders-profile_id";
static FK_WTRL_RIDERS_TEAM_TRC: &str = "fk-wtrl_riders-team_trc";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(integer(Teams::Trc).primary_key())
                    .col(string(Teams::Name))
                    .col(string_null(Teams::Category))
                    .col(string_null(Teams::Division))
                    .col(string_null(Teams::WtrlTeamId))
                    .col(string_null(Teams::JerseyName))
                    .col(string_null(Teams::JerseyImage))
                    .col(boolean(Teams::Recruiting))
                    .col(boolean(Teams::IsDev))
                    .col(string_null(Teams::CompetitionClass))
                    .col(integer_null(Teams::CompetitionSeason))
                    .col(integer_null(Teams::CompetitionYear))
                    .col(integer_null(Teams::CompetitionRound))
                    .col(string_null(Teams::CompetitionStatus))
                    .col(integer_null(Teams::MemberCount))
                    .col(integer_null(Teams::MembersRemaining))
                    .col(string_null(Teams::CaptainName))
                    .col(big_integer_null(Teams::CaptainProfileId))
                    .col(timestamp(Teams::CreatedAt))
                    .col(timestamp(Teams::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WtrlRiders::Table)
                    .if_not_exists()
                    .col(string(WtrlRiders::Id).primary_key())
                    .col(integer(WtrlRiders::TeamTrc))
                    .col(big_integer(WtrlRiders::ProfileId))
                    .col(string_null(WtrlRiders::Tmuid))
                    .col(string(WtrlRiders::Name))
                    .col(string_null(WtrlRiders::Avatar))
                    .col(string_null(WtrlRiders::MemberStatus))
                    .col(boolean(WtrlRiders::Signedup))
                    .col(string_null(WtrlRiders::Category))
                    .col(double_null(WtrlRiders::Zftp))
                    .col(double_null(WtrlRiders::Zftpw))
                    .col(double_null(WtrlRiders::Zmap))
                    .col(double_null(WtrlRiders::Zmapw))
                    .col(integer_null(WtrlRiders::Riderpoints))
                    .col(integer_null(WtrlRiders::Teams))
                    .col(integer_null(WtrlRiders::AppearancesRound))
                    .col(integer_null(WtrlRiders::AppearancesSeason))
                    .col(string_null(WtrlRiders::UserId))
                    .col(timestamp(WtrlRiders::CreatedAt))
                    .col(timestamp(WtrlRiders::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WTRL_RIDERS_TEAM_TRC)
                    .table(WtrlRiders::Table)
                    .col(WtrlRiders::TeamTrc)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WTRL_RIDERS_PROFILE_ID)
                    .table(WtrlRiders::Table)
                    .col(WtrlRiders::ProfileId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WTRL_RIDERS_TEAM_TRC)
                    .from_tbl(WtrlRiders::Table)
                    .from_col(WtrlRiders::TeamTrc)
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
                    .name(FK_WTRL_RIDERS_TEAM_TRC)
                    .table(WtrlRiders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WtrlRiders::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Teams {
    Table,
    Trc,
    Name,
    Category,
    Division,
    WtrlTeamId,
    JerseyName,
    JerseyImage,
    Recruiting,
    IsDev,
    CompetitionClass,
    CompetitionSeason,
    CompetitionYear,
    CompetitionRound,
    CompetitionStatus,
    MemberCount,
    MembersRemaining,
    CaptainName,
    CaptainProfileId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum WtrlRiders {
    Table,
    Id,
    TeamTrc,
    ProfileId,
    Tmuid,
    Name,
    Avatar,
    MemberStatus,
    Signedup,
    Category,
    Zftp,
    Zftpw,
    Zmap,
    Zmapw,
    Riderpoints,
    Teams,
    AppearancesRound,
    AppearancesSeason,
    UserId,
    CreatedAt,
    UpdatedAt,
}
