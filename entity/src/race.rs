use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "races")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub round_id: i32,
    pub name: String,
    pub race_date: Date,
    pub format: Option<String>,
    pub world: Option<String>,
    pub course: Option<String>,
    pub laps: Option<i32>,
    pub distance_km: Option<f64>,
    pub elevation_m: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rules: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub segments: Option<String>,
    pub leadin_distance: Option<f64>,
    pub leadin_ascent: Option<f64>,
    pub category: Option<String>,
    pub active: bool,
    pub external_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::round::Entity",
        from = "Column::RoundId",
        to = "super::round::Column::Id"
    )]
    Round,
}

impl Related<super::round::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
