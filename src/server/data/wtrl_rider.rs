use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Member status of riders who may no longer be fielded by their team
pub static REMOVED_MEMBER_STATUS: &str = "REMOVED-CATEGORY";

/// Rider fields taken from a WTRL roster entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiderUpsert {
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
}

/// Composite rider key, one row per (team, profile)
pub fn rider_id(trc: i32, profile_id: i64) -> String {
    format!("{}/{}", trc, profile_id)
}

pub struct WtrlRiderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WtrlRiderRepository<'a, C> {
    /// Creates a new instance of [`WtrlRiderRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> Result<Option<entity::wtrl_rider::Model>, DbErr> {
        entity::prelude::WtrlRider::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    /// Every rider row ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::wtrl_rider::Model>, DbErr> {
        entity::prelude::WtrlRider::find()
            .order_by_asc(entity::wtrl_rider::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get_by_team(
        &self,
        trc: i32,
    ) -> Result<Vec<entity::wtrl_rider::Model>, DbErr> {
        entity::prelude::WtrlRider::find()
            .filter(entity::wtrl_rider::Column::TeamTrc.eq(trc))
            .order_by_asc(entity::wtrl_rider::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get_by_teams(
        &self,
        trcs: Vec<i32>,
    ) -> Result<Vec<entity::wtrl_rider::Model>, DbErr> {
        if trcs.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::WtrlRider::find()
            .filter(entity::wtrl_rider::Column::TeamTrc.is_in(trcs))
            .order_by_asc(entity::wtrl_rider::Column::Name)
            .all(self.db)
            .await
    }

    /// Team riders who can be selected for a lineup, ordered by name
    pub async fn get_eligible(
        &self,
        trc: i32,
    ) -> Result<Vec<entity::wtrl_rider::Model>, DbErr> {
        entity::prelude::WtrlRider::find()
            .filter(entity::wtrl_rider::Column::TeamTrc.eq(trc))
            .filter(
                Condition::any()
                    .add(entity::wtrl_rider::Column::MemberStatus.is_null())
                    .add(entity::wtrl_rider::Column::MemberStatus.ne(REMOVED_MEMBER_STATUS)),
            )
            .order_by_asc(entity::wtrl_rider::Column::Name)
            .all(self.db)
            .await
    }

    /// First rider row for a profile, whichever team it belongs to
    pub async fn find_by_profile_id(
        &self,
        profile_id: i64,
    ) -> Result<Option<entity::wtrl_rider::Model>, DbErr> {
        entity::prelude::WtrlRider::find()
            .filter(entity::wtrl_rider::Column::ProfileId.eq(profile_id))
            .order_by_asc(entity::wtrl_rider::Column::Id)
            .one(self.db)
            .await
    }

    /// Maps profile IDs to rider names; unknown profiles are left out
    pub async fn get_names(&self, profile_ids: Vec<i64>) -> Result<HashMap<i64, String>, DbErr> {
        if profile_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::WtrlRider::find()
            .select_only()
            .column(entity::wtrl_rider::Column::ProfileId)
            .column(entity::wtrl_rider::Column::Name)
            .filter(entity::wtrl_rider::Column::ProfileId.is_in(profile_ids))
            .into_tuple::<(i64, String)>()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Minimal rider row for a member first seen in a results payload
    pub async fn create_placeholder(
        &self,
        trc: i32,
        profile_id: i64,
        name: &str,
        category: Option<String>,
    ) -> Result<entity::wtrl_rider::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::WtrlRider::insert(entity::wtrl_rider::ActiveModel {
            id: ActiveValue::Set(rider_id(trc, profile_id)),
            team_trc: ActiveValue::Set(trc),
            profile_id: ActiveValue::Set(profile_id),
            tmuid: ActiveValue::Set(None),
            name: ActiveValue::Set(name.to_string()),
            avatar: ActiveValue::Set(None),
            member_status: ActiveValue::Set(None),
            signedup: ActiveValue::Set(false),
            category: ActiveValue::Set(category),
            zftp: ActiveValue::Set(None),
            zftpw: ActiveValue::Set(None),
            zmap: ActiveValue::Set(None),
            zmapw: ActiveValue::Set(None),
            riderpoints: ActiveValue::Set(None),
            teams: ActiveValue::Set(None),
            appearances_round: ActiveValue::Set(None),
            appearances_season: ActiveValue::Set(None),
            user_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Creates or refreshes the rider keyed by `"{trc}/{profile_id}"`
    pub async fn upsert(
        &self,
        trc: i32,
        profile_id: i64,
        rider: RiderUpsert,
    ) -> Result<entity::wtrl_rider::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let id = rider_id(trc, profile_id);

        let existing = self.get(&id).await?;
        let is_new = existing.is_none();

        let mut rider_am = match existing {
            Some(existing) => existing.into_active_model(),
            None => entity::wtrl_rider::ActiveModel {
                id: ActiveValue::Set(id),
                team_trc: ActiveValue::Set(trc),
                profile_id: ActiveValue::Set(profile_id),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            },
        };

        rider_am.tmuid = ActiveValue::Set(rider.tmuid);
        rider_am.name = ActiveValue::Set(rider.name);
        rider_am.avatar = ActiveValue::Set(rider.avatar);
        rider_am.member_status = ActiveValue::Set(rider.member_status);
        rider_am.signedup = ActiveValue::Set(rider.signedup);
        rider_am.category = ActiveValue::Set(rider.category);
        rider_am.zftp = ActiveValue::Set(rider.zftp);
        rider_am.zftpw = ActiveValue::Set(rider.zftpw);
        rider_am.zmap = ActiveValue::Set(rider.zmap);
        rider_am.zmapw = ActiveValue::Set(rider.zmapw);
        rider_am.riderpoints = ActiveValue::Set(rider.riderpoints);
        rider_am.teams = ActiveValue::Set(rider.teams);
        rider_am.appearances_round = ActiveValue::Set(rider.appearances_round);
        rider_am.appearances_season = ActiveValue::Set(rider.appearances_season);
        rider_am.user_id = ActiveValue::Set(rider.user_id);
        rider_am.updated_at = ActiveValue::Set(now);

        if is_new {
            rider_am.insert(self.db).await
        } else {
            rider_am.update(self.db).await
        }
    }
}
