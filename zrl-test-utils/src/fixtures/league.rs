use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};
use serde_json::Value;

use crate::{constant::TEST_SEASON, error::TestError, TestContext};

impl TestContext {
    pub fn league<'a>(&'a self) -> LeagueFixtures<'a> {
        LeagueFixtures { setup: self }
    }
}

pub struct LeagueFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> LeagueFixtures<'a> {
    pub async fn insert_season(
        &self,
        name: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<entity::season::Model, TestError> {
        Ok(entity::prelude::Season::insert(entity::season::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(end_date),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_round(
        &self,
        season_id: i32,
        round_number: i32,
        is_active: bool,
    ) -> Result<entity::round::Model, TestError> {
        Ok(entity::prelude::Round::insert(entity::round::ActiveModel {
            season_id: ActiveValue::Set(season_id),
            round_number: ActiveValue::Set(round_number),
            name: ActiveValue::Set(format!("Round {}", round_number)),
            start_date: ActiveValue::Set(None),
            end_date: ActiveValue::Set(None),
            logo_url: ActiveValue::Set(None),
            is_active: ActiveValue::Set(is_active),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_race(
        &self,
        round_id: i32,
        race_date: NaiveDate,
        category: Option<&str>,
    ) -> Result<entity::race::Model, TestError> {
        Ok(entity::prelude::Race::insert(entity::race::ActiveModel {
            round_id: ActiveValue::Set(round_id),
            name: ActiveValue::Set(format!("Race {}", race_date)),
            race_date: ActiveValue::Set(race_date),
            format: ActiveValue::Set(Some("Points Race".to_string())),
            world: ActiveValue::Set(Some("Watopia".to_string())),
            course: ActiveValue::Set(None),
            laps: ActiveValue::Set(Some(2)),
            distance_km: ActiveValue::Set(Some(24.5)),
            elevation_m: ActiveValue::Set(Some(180.0)),
            rules: ActiveValue::Set(None),
            segments: ActiveValue::Set(None),
            leadin_distance: ActiveValue::Set(None),
            leadin_ascent: ActiveValue::Set(None),
            category: ActiveValue::Set(category.map(str::to_string)),
            active: ActiveValue::Set(true),
            external_id: ActiveValue::Set(Some(format!("{}", race_date.format("%Y%m%d")))),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts a team in [`TEST_SEASON`]; the category is the first letter of the class
    pub async fn insert_team(
        &self,
        trc: i32,
        name: &str,
        competition_class: Option<&str>,
    ) -> Result<entity::team::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Team::insert(entity::team::ActiveModel {
            trc: ActiveValue::Set(trc),
            name: ActiveValue::Set(name.to_string()),
            category: ActiveValue::Set(
                competition_class.and_then(|class| class.get(..1).map(str::to_string)),
            ),
            division: ActiveValue::Set(
                competition_class.and_then(|class| class.get(1..).map(str::to_string)),
            ),
            wtrl_team_id: ActiveValue::Set(None),
            jersey_name: ActiveValue::Set(None),
            jersey_image: ActiveValue::Set(None),
            recruiting: ActiveValue::Set(false),
            is_dev: ActiveValue::Set(false),
            competition_class: ActiveValue::Set(competition_class.map(str::to_string)),
            competition_season: ActiveValue::Set(Some(TEST_SEASON)),
            competition_year: ActiveValue::Set(None),
            competition_round: ActiveValue::Set(None),
            competition_status: ActiveValue::Set(Some("ACTIVE".to_string())),
            member_count: ActiveValue::Set(None),
            members_remaining: ActiveValue::Set(None),
            captain_name: ActiveValue::Set(None),
            captain_profile_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts a team captained by `captain_profile_id`
    pub async fn insert_captained_team(
        &self,
        trc: i32,
        name: &str,
        competition_class: Option<&str>,
        captain_profile_id: i64,
        captain_name: &str,
    ) -> Result<entity::team::Model, TestError> {
        let team = self.insert_team(trc, name, competition_class).await?;

        Ok(entity::prelude::Team::update(entity::team::ActiveModel {
            trc: ActiveValue::Unchanged(team.trc),
            captain_profile_id: ActiveValue::Set(Some(captain_profile_id)),
            captain_name: ActiveValue::Set(Some(captain_name.to_string())),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?)
    }

    pub async fn insert_rider(
        &self,
        team_trc: i32,
        profile_id: i64,
        name: &str,
    ) -> Result<entity::wtrl_rider::Model, TestError> {
        self.insert_rider_with_status(team_trc, profile_id, name, "ACTIVE")
            .await
    }

    pub async fn insert_rider_with_status(
        &self,
        team_trc: i32,
        profile_id: i64,
        name: &str,
        member_status: &str,
    ) -> Result<entity::wtrl_rider::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::WtrlRider::insert(entity::wtrl_rider::ActiveModel {
                id: ActiveValue::Set(format!("{}/{}", team_trc, profile_id)),
                team_trc: ActiveValue::Set(team_trc),
                profile_id: ActiveValue::Set(profile_id),
                tmuid: ActiveValue::Set(None),
                name: ActiveValue::Set(name.to_string()),
                avatar: ActiveValue::Set(Some(format!("https://img.example/{}.png", profile_id))),
                member_status: ActiveValue::Set(Some(member_status.to_string())),
                signedup: ActiveValue::Set(true),
                category: ActiveValue::Set(Some("A".to_string())),
                zftp: ActiveValue::Set(Some(300.0)),
                zftpw: ActiveValue::Set(Some(4.2)),
                zmap: ActiveValue::Set(None),
                zmapw: ActiveValue::Set(None),
                riderpoints: ActiveValue::Set(Some(100)),
                teams: ActiveValue::Set(Some(1)),
                appearances_round: ActiveValue::Set(Some(0)),
                appearances_season: ActiveValue::Set(Some(0)),
                user_id: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_lineup(
        &self,
        team_trc: i32,
        race_date: NaiveDate,
        profile_id: i64,
    ) -> Result<entity::race_lineup::Model, TestError> {
        Ok(
            entity::prelude::RaceLineup::insert(entity::race_lineup::ActiveModel {
                race_id: ActiveValue::Set(format!(
                    "{}_{}",
                    team_trc,
                    race_date.format("%Y%m%d")
                )),
                race_date: ActiveValue::Set(race_date),
                team_trc: ActiveValue::Set(team_trc),
                profile_id: ActiveValue::Set(profile_id),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_team_result(
        &self,
        class_id: &str,
        race: i32,
        team_trc: i32,
        totp: f64,
    ) -> Result<entity::race_results_team::Model, TestError> {
        Ok(
            entity::prelude::RaceResultsTeam::insert(entity::race_results_team::ActiveModel {
                season: ActiveValue::Set(TEST_SEASON),
                class_id: ActiveValue::Set(class_id.to_string()),
                race: ActiveValue::Set(race),
                team_id: ActiveValue::Set(team_trc),
                finp: ActiveValue::Set(None),
                pbp: ActiveValue::Set(None),
                totp: ActiveValue::Set(Some(totp)),
                falp: ActiveValue::Set(None),
                ftsp: ActiveValue::Set(None),
                time_result: ActiveValue::Set(None),
                distance_result: ActiveValue::Set(None),
                rank: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_standing(
        &self,
        class_id: &str,
        team_trc: i32,
        total_points: f64,
    ) -> Result<entity::round_standing::Model, TestError> {
        Ok(
            entity::prelude::RoundStanding::insert(entity::round_standing::ActiveModel {
                season: ActiveValue::Set(TEST_SEASON),
                class_id: ActiveValue::Set(class_id.to_string()),
                team_id: ActiveValue::Set(team_trc),
                total_points: ActiveValue::Set(total_points),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_availability(
        &self,
        wtrl_rider_id: &str,
        availability_data: Value,
        notes: Option<&str>,
    ) -> Result<entity::rider_availability::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::RiderAvailability::insert(
            entity::rider_availability::ActiveModel {
                wtrl_rider_id: ActiveValue::Set(wtrl_rider_id.to_string()),
                availability_data: ActiveValue::Set(availability_data),
                notes: ActiveValue::Set(notes.map(str::to_string)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
