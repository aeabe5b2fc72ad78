use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "race_results_teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub season: i32,
    pub class_id: String,
    pub race: i32,
    pub team_id: i32,
    pub finp: Option<f64>,
    pub pbp: Option<f64>,
    pub totp: Option<f64>,
    pub falp: Option<f64>,
    pub ftsp: Option<f64>,
    pub time_result: Option<f64>,
    pub distance_result: Option<f64>,
    pub rank: Option<i32>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Trc"
    )]
    Team,
    #[sea_orm(has_many = "super::race_results_rider::Entity")]
    RaceResultsRider,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::race_results_rider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RaceResultsRider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
