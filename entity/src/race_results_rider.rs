use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "race_results_riders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub race_team_result_id: i32,
    pub rider_id: String,
    pub finp: Option<f64>,
    pub pbp: Option<f64>,
    pub totp: Option<f64>,
    pub falp: Option<f64>,
    pub ftsp: Option<f64>,
    pub time_result: Option<f64>,
    pub distance_result: Option<f64>,
    pub wkg: Option<f64>,
    pub watts: Option<f64>,
    pub gap: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::race_results_team::Entity",
        from = "Column::RaceTeamResultId",
        to = "super::race_results_team::Column::Id"
    )]
    RaceResultsTeam,
    #[sea_orm(
        belongs_to = "super::wtrl_rider::Entity",
        from = "Column::RiderId",
        to = "super::wtrl_rider::Column::Id"
    )]
    WtrlRider,
}

impl Related<super::race_results_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RaceResultsTeam.def()
    }
}

impl Related<super::wtrl_rider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WtrlRider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
