use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rider_availability")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub wtrl_rider_id: String,
    /// Weekday → slot object, e.g. `{"tuesday": {"start": "19:00", "end": "21:00"}}`.
    pub availability_data: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wtrl_rider::Entity",
        from = "Column::WtrlRiderId",
        to = "super::wtrl_rider::Column::Id"
    )]
    WtrlRider,
}

impl Related<super::wtrl_rider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WtrlRider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
