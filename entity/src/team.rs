use sea_orm::entity::prelude::*;

/// A WTRL team, keyed by its TRC.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trc: i32,
    pub name: String,
    pub category: Option<String>,
    pub division: Option<String>,
    pub wtrl_team_id: Option<String>,
    pub jersey_name: Option<String>,
    pub jersey_image: Option<String>,
    pub recruiting: bool,
    pub is_dev: bool,
    pub competition_class: Option<String>,
    pub competition_season: Option<i32>,
    pub competition_year: Option<i32>,
    pub competition_round: Option<i32>,
    pub competition_status: Option<String>,
    pub member_count: Option<i32>,
    pub members_remaining: Option<i32>,
    pub captain_name: Option<String>,
    pub captain_profile_id: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wtrl_rider::Entity")]
    WtrlRider,
    #[sea_orm(has_many = "super::race_lineup::Entity")]
    RaceLineup,
    #[sea_orm(has_many = "super::race_results_team::Entity")]
    RaceResultsTeam,
    #[sea_orm(has_many = "super::round_standing::Entity")]
    RoundStanding,
}

impl Related<super::wtrl_rider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WtrlRider.def()
    }
}

impl Related<super::race_lineup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RaceLineup.def()
    }
}

impl Related<super::race_results_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RaceResultsTeam.def()
    }
}

impl Related<super::round_standing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundStanding.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
