use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "race_lineup")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `"{trc}_{YYYYMMDD}"`
    pub race_id: String,
    pub race_date: Date,
    pub team_trc: i32,
    pub profile_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamTrc",
        to = "super::team::Column::Trc"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
