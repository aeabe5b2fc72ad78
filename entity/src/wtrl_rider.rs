use sea_orm::entity::prelude::*;

/// A rider's membership of a team. The primary key is `"{trc}/{profile_id}"`,
/// so the same profile may appear once per team.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wtrl_riders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub team_trc: i32,
    pub profile_id: i64,
    pub tmuid: Option<String>,
    pub name: String,
    pub avatar: Option<String>,
    pub member_status: Option<String>,
    pub signedup: bool,
    pub category: Option<String>,
    pub zftp: Option<f64>,
    pub zftpw: Option<f64>,
    pub zmap: Option<f64>,
    pub zmapw: Option<f64>,
    pub riderpoints: Option<i32>,
    pub teams: Option<i32>,
    pub appearances_round: Option<i32>,
    pub appearances_season: Option<i32>,
    pub user_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamTrc",
        to = "super::team::Column::Trc"
    )]
    Team,
    #[sea_orm(has_many = "super::race_results_rider::Entity")]
    RaceResultsRider,
    #[sea_orm(has_one = "super::rider_availability::Entity")]
    RiderAvailability,
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

impl Related<super::rider_availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RiderAvailability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
