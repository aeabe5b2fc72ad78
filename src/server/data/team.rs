use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Team fields taken from a WTRL roster `meta` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeamUpsert {
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
}

pub struct TeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamRepository<'a, C> {
    /// Creates a new instance of [`TeamRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, trc: i32) -> Result<Option<entity::team::Model>, DbErr> {
        entity::prelude::Team::find_by_id(trc).one(self.db).await
    }

    /// Reads the team with a row lock held until the surrounding transaction ends
    pub async fn get_for_update(&self, trc: i32) -> Result<Option<entity::team::Model>, DbErr> {
        entity::prelude::Team::find_by_id(trc)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Every team ordered by category then name
    pub async fn get_all(&self) -> Result<Vec<entity::team::Model>, DbErr> {
        entity::prelude::Team::find()
            .order_by_asc(entity::team::Column::Category)
            .order_by_asc(entity::team::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get_many(&self, trcs: Vec<i32>) -> Result<Vec<entity::team::Model>, DbErr> {
        if trcs.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Team::find()
            .filter(entity::team::Column::Trc.is_in(trcs))
            .order_by_asc(entity::team::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get_by_captain(
        &self,
        captain_profile_id: i64,
    ) -> Result<Vec<entity::team::Model>, DbErr> {
        entity::prelude::Team::find()
            .filter(entity::team::Column::CaptainProfileId.eq(captain_profile_id))
            .order_by_asc(entity::team::Column::Name)
            .all(self.db)
            .await
    }

    /// Distinct competition classes of the teams entered in `season`
    pub async fn get_competition_classes(&self, season: i32) -> Result<Vec<String>, DbErr> {
        let classes = entity::prelude::Team::find()
            .select_only()
            .column(entity::team::Column::CompetitionClass)
            .distinct()
            .filter(entity::team::Column::CompetitionSeason.eq(season))
            .filter(entity::team::Column::CompetitionClass.is_not_null())
            .order_by_asc(entity::team::Column::CompetitionClass)
            .into_tuple::<Option<String>>()
            .all(self.db)
            .await?;

        Ok(classes
            .into_iter()
            .flatten()
            .filter(|class| !class.trim().is_empty())
            .collect())
    }

    /// Minimal team row for a TRC first seen in a results payload
    pub async fn create_placeholder(
        &self,
        trc: i32,
        name: &str,
        division: Option<String>,
        competition_class: Option<String>,
        competition_season: Option<i32>,
    ) -> Result<entity::team::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let category = competition_class
            .as_deref()
            .and_then(|class| class.get(..1))
            .map(str::to_string);

        entity::prelude::Team::insert(entity::team::ActiveModel {
            trc: ActiveValue::Set(trc),
            name: ActiveValue::Set(name.to_string()),
            category: ActiveValue::Set(category),
            division: ActiveValue::Set(division),
            wtrl_team_id: ActiveValue::Set(None),
            jersey_name: ActiveValue::Set(None),
            jersey_image: ActiveValue::Set(None),
            recruiting: ActiveValue::Set(false),
            is_dev: ActiveValue::Set(false),
            competition_class: ActiveValue::Set(competition_class),
            competition_season: ActiveValue::Set(competition_season),
            competition_year: ActiveValue::Set(None),
            competition_round: ActiveValue::Set(None),
            competition_status: ActiveValue::Set(None),
            member_count: ActiveValue::Set(None),
            members_remaining: ActiveValue::Set(None),
            captain_name: ActiveValue::Set(None),
            captain_profile_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Creates or refreshes the team keyed by TRC
    pub async fn upsert(
        &self,
        trc: i32,
        team: TeamUpsert,
    ) -> Result<entity::team::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let existing = self.get(trc).await?;
        let is_new = existing.is_none();

        let mut team_am = match existing {
            Some(existing) => existing.into_active_model(),
            None => entity::team::ActiveModel {
                trc: ActiveValue::Set(trc),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            },
        };

        team_am.name = ActiveValue::Set(team.name);
        team_am.category = ActiveValue::Set(team.category);
        team_am.division = ActiveValue::Set(team.division);
        team_am.wtrl_team_id = ActiveValue::Set(team.wtrl_team_id);
        team_am.jersey_name = ActiveValue::Set(team.jersey_name);
        team_am.jersey_image = ActiveValue::Set(team.jersey_image);
        team_am.recruiting = ActiveValue::Set(team.recruiting);
        team_am.is_dev = ActiveValue::Set(team.is_dev);
        team_am.competition_class = ActiveValue::Set(team.competition_class);
        team_am.competition_season = ActiveValue::Set(team.competition_season);
        team_am.competition_year = ActiveValue::Set(team.competition_year);
        team_am.competition_round = ActiveValue::Set(team.competition_round);
        team_am.competition_status = ActiveValue::Set(team.competition_status);
        team_am.member_count = ActiveValue::Set(team.member_count);
        team_am.members_remaining = ActiveValue::Set(team.members_remaining);
        team_am.captain_name = ActiveValue::Set(team.captain_name);
        team_am.captain_profile_id = ActiveValue::Set(team.captain_profile_id);
        team_am.updated_at = ActiveValue::Set(now);

        if is_new {
            team_am.insert(self.db).await
        } else {
            team_am.update(self.db).await
        }
    }
}
