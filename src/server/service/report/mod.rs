//! Admin reports over riders, teams, lineups and standings.
//!
//! A [`Report`] is a flat table of [`Cell`]s, optionally grouped by team, built once and
//! handed to [`render`] so every export format carries the same rows.

pub mod render;

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        lineup::LineupRepository, results::ResultsRepository, team::TeamRepository,
        wtrl_rider::WtrlRiderRepository,
    },
    error::{report::ReportError, Error},
    model::db::TeamModel,
    service::retry::RetryContext,
    util::time::today,
};

/// Category filter values that mean "every category"
const ANY_CATEGORY: [&str; 5] = ["", "ALL", "TUTTI", "TUTTE", "NONE"];
/// Team filter values that mean "every team"
const ANY_TEAM: [&str; 3] = ["", "ALL", "TUTTI"];

const NO_TEAM: &str = "No Team";
const OTHER_CATEGORY: &str = "OTHER";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportType {
    RidersCompact,
    Riders,
    Teams,
    TeamComposition,
    Lineup,
    RoundStandings,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RidersCompact => "riders_compact",
            Self::Riders => "riders",
            Self::Teams => "teams",
            Self::TeamComposition => "team_composition",
            Self::Lineup => "lineup",
            Self::RoundStandings => "round_standings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::RidersCompact => "Riders (compact)",
            Self::Riders => "Riders",
            Self::Teams => "Teams",
            Self::TeamComposition => "Team composition",
            Self::Lineup => "Next race lineups",
            Self::RoundStandings => "Round standings",
        }
    }

    /// Riders reports can grow many team columns and are printed landscape
    pub fn landscape(&self) -> bool {
        matches!(self, Self::RidersCompact | Self::Riders)
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "riders_compact" => Ok(Self::RidersCompact),
            "riders" => Ok(Self::Riders),
            "teams" => Ok(Self::Teams),
            "team_composition" => Ok(Self::TeamComposition),
            "lineup" => Ok(Self::Lineup),
            "round_standings" => Ok(Self::RoundStandings),
            _ => Err(ReportError::UnknownReportType(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Numeric value, used for totals
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Bool(value) => f.write_str(if *value { "yes" } else { "no" }),
            Self::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    /// Team heading for grouped reports
    pub group: Option<String>,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug)]
pub struct Report {
    pub report_type: ReportType,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
    /// Race date of the lineup report
    pub race_date: Option<NaiveDate>,
}

impl Report {
    fn new(report_type: ReportType, columns: &[&str]) -> Self {
        Self {
            report_type,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            race_date: None,
        }
    }

    fn push(&mut self, group: Option<String>, cells: Vec<Cell>) {
        self.rows.push(ReportRow { group, cells });
    }

    pub fn is_grouped(&self) -> bool {
        self.rows.iter().any(|row| row.group.is_some())
    }

    /// Consecutive rows sharing a group, in report order
    pub fn groups(&self) -> Vec<(Option<&str>, Vec<&ReportRow>)> {
        let mut groups: Vec<(Option<&str>, Vec<&ReportRow>)> = Vec::new();

        for row in &self.rows {
            match groups.last_mut() {
                Some((group, rows)) if *group == row.group.as_deref() => rows.push(row),
                _ => groups.push((row.group.as_deref(), vec![row])),
            }
        }

        groups
    }

    /// Sum of every numeric cell in `column`
    pub fn total(&self, column: &str) -> f64 {
        let Some(index) = self.columns.iter().position(|c| c == column) else {
            return 0.0;
        };

        self.rows
            .iter()
            .filter_map(|row| row.cells.get(index).and_then(Cell::as_f64))
            .sum()
    }

    pub fn title(&self) -> String {
        match self.race_date {
            Some(date) => format!("{} - {}", self.report_type.title(), date.format("%Y-%m-%d")),
            None => self.report_type.title().to_string(),
        }
    }
}

/// Category and team filters shared by every report type
#[derive(Clone, Debug, Default)]
pub struct ReportFilter {
    category: Option<String>,
    team: Option<String>,
}

impl ReportFilter {
    pub fn new(category: Option<&str>, team: Option<&str>) -> Self {
        let category = category
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !ANY_CATEGORY.contains(&c.as_str()));
        let team = team
            .map(|t| t.trim().to_string())
            .filter(|t| !ANY_TEAM.contains(&t.to_uppercase().as_str()));

        Self { category, team }
    }

    /// Resolves the team filter against the known teams.
    ///
    /// An exact TRC or name pins a single team; anything else matches by partial name.
    fn resolve(&self, teams: &[TeamModel]) -> ResolvedFilter {
        let team = self.team.as_ref().map(|value| {
            let lowered = value.to_lowercase();

            teams
                .iter()
                .find(|t| t.trc.to_string() == *value || t.name.to_lowercase() == lowered)
                .map(|t| TeamSelector::Trc(t.trc))
                .unwrap_or(TeamSelector::NamePart(lowered))
        });

        ResolvedFilter {
            category: self.category.clone(),
            team,
        }
    }
}

#[derive(Debug)]
enum TeamSelector {
    Trc(i32),
    NamePart(String),
}

#[derive(Debug)]
struct ResolvedFilter {
    category: Option<String>,
    team: Option<TeamSelector>,
}

impl ResolvedFilter {
    /// Whether rows of `team` pass; rows without a team only pass an empty filter
    fn matches(&self, team: Option<&TeamModel>) -> bool {
        if let Some(category) = &self.category {
            let team_category = team
                .and_then(|t| t.category.as_deref())
                .map(str::to_uppercase);

            if team_category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        match (&self.team, team) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(TeamSelector::Trc(trc)), Some(team)) => team.trc == *trc,
            (Some(TeamSelector::NamePart(part)), Some(team)) => {
                team.name.to_lowercase().contains(part.as_str())
            }
        }
    }
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the rows of a report with the filters applied
    pub async fn build(
        &self,
        report_type: ReportType,
        filter: &ReportFilter,
    ) -> Result<Report, Error> {
        let mut teams = self.load_teams().await?;
        teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let resolved = filter.resolve(&teams);

        let report = match report_type {
            ReportType::RidersCompact | ReportType::Riders => {
                self.riders(report_type, &teams, &resolved).await?
            }
            ReportType::Teams => self.teams(&teams, &resolved).await?,
            ReportType::TeamComposition => self.team_composition(&teams, &resolved).await?,
            ReportType::Lineup => self.lineup(&teams, &resolved).await?,
            ReportType::RoundStandings => self.round_standings(&resolved).await?,
        };

        tracing::debug!(
            "Built {} report with {} rows",
            report.report_type.as_str(),
            report.rows.len()
        );

        Ok(report)
    }

    async fn load_teams(&self) -> Result<Vec<TeamModel>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("load teams for report", || {
            let db = db.clone();

            Box::pin(async move { Ok(TeamRepository::new(&db).get_all().await?) })
        })
        .await
    }

    /// One row per profile with every team the rider appears in
    async fn riders(
        &self,
        report_type: ReportType,
        teams: &[TeamModel],
        filter: &ResolvedFilter,
    ) -> Result<Report, Error> {
        struct RiderRow {
            profile_id: i64,
            name: String,
            riderpoints: Option<i32>,
            status: Option<String>,
            teams: Vec<String>,
        }

        let teams_by_trc: HashMap<i32, &TeamModel> = teams.iter().map(|t| (t.trc, t)).collect();
        let riders = WtrlRiderRepository::new(self.db).get_all().await?;

        let mut order = Vec::new();
        let mut aggregated: HashMap<i64, RiderRow> = HashMap::new();

        for rider in riders {
            let team = teams_by_trc.get(&rider.team_trc).copied();
            if !filter.matches(team) {
                continue;
            }

            let team_name = team
                .map(|t| t.name.clone())
                .unwrap_or_else(|| NO_TEAM.to_string());

            aggregated
                .entry(rider.profile_id)
                .or_insert_with(|| {
                    order.push(rider.profile_id);

                    RiderRow {
                        profile_id: rider.profile_id,
                        name: rider.name.clone(),
                        riderpoints: rider.riderpoints,
                        status: rider.member_status.clone(),
                        teams: Vec::new(),
                    }
                })
                .teams
                .push(team_name);
        }

        let mut rows: Vec<RiderRow> = order
            .into_iter()
            .filter_map(|profile_id| aggregated.remove(&profile_id))
            .collect();
        for row in rows.iter_mut() {
            row.teams.sort();
            row.teams.dedup();
        }

        let team_columns = rows.iter().map(|row| row.teams.len()).max().unwrap_or(0);
        let full = report_type == ReportType::Riders;

        let mut columns = vec!["profile_id", "name"];
        if full {
            columns.extend(["riderpoints", "status"]);
        }
        let mut report = Report::new(report_type, &columns);
        report
            .columns
            .extend((1..=team_columns).map(|i| format!("Team {}", i)));

        for row in rows {
            let mut cells = vec![Cell::from(row.profile_id), Cell::from(row.name)];
            if full {
                cells.push(Cell::from(row.riderpoints));
                cells.push(Cell::from(row.status));
            }

            let padding = team_columns - row.teams.len();
            cells.extend(row.teams.into_iter().map(Cell::from));
            cells.extend((0..padding).map(|_| Cell::Empty));

            report.push(None, cells);
        }

        Ok(report)
    }

    async fn teams(&self, teams: &[TeamModel], filter: &ResolvedFilter) -> Result<Report, Error> {
        let mut rider_counts: HashMap<i32, usize> = HashMap::new();
        for rider in WtrlRiderRepository::new(self.db).get_all().await? {
            *rider_counts.entry(rider.team_trc).or_default() += 1;
        }

        let mut report = Report::new(
            ReportType::Teams,
            &["team", "trc", "category", "captain", "n_riders"],
        );

        for team in teams.iter().filter(|t| filter.matches(Some(t))) {
            report.push(
                None,
                vec![
                    Cell::from(team.name.as_str()),
                    Cell::from(team.trc),
                    Cell::from(team.category.clone()),
                    Cell::from(team.captain_name.clone().unwrap_or_default()),
                    Cell::from(rider_counts.get(&team.trc).copied().unwrap_or(0)),
                ],
            );
        }

        Ok(report)
    }

    async fn team_composition(
        &self,
        teams: &[TeamModel],
        filter: &ResolvedFilter,
    ) -> Result<Report, Error> {
        let selected: Vec<&TeamModel> = teams.iter().filter(|t| filter.matches(Some(t))).collect();

        let mut riders_by_team: HashMap<i32, Vec<_>> = HashMap::new();
        for rider in WtrlRiderRepository::new(self.db)
            .get_by_teams(selected.iter().map(|t| t.trc).collect())
            .await?
        {
            riders_by_team.entry(rider.team_trc).or_default().push(rider);
        }

        let mut report = Report::new(
            ReportType::TeamComposition,
            &[
                "team_name",
                "profile_id",
                "rider_name",
                "category",
                "status",
                "signedup",
                "riderpoints",
                "captain",
            ],
        );

        for team in selected {
            let Some(mut riders) = riders_by_team.remove(&team.trc) else {
                continue;
            };
            riders.sort_by_key(|r| r.profile_id);

            let captain = team.captain_name.clone().unwrap_or_default();

            for rider in riders {
                let category = rider
                    .category
                    .or_else(|| team.category.clone())
                    .unwrap_or_else(|| OTHER_CATEGORY.to_string());

                report.push(
                    Some(team.name.clone()),
                    vec![
                        Cell::from(team.name.as_str()),
                        Cell::from(rider.profile_id),
                        Cell::from(rider.name),
                        Cell::from(category),
                        Cell::from(rider.member_status.unwrap_or_else(|| "N/A".to_string())),
                        Cell::from(rider.signedup),
                        Cell::from(rider.riderpoints),
                        Cell::from(captain.as_str()),
                    ],
                );
            }
        }

        Ok(report)
    }

    /// Lineups of the earliest race date from today on
    async fn lineup(&self, teams: &[TeamModel], filter: &ResolvedFilter) -> Result<Report, Error> {
        let lineup_repo = LineupRepository::new(self.db);

        let race_date = lineup_repo
            .next_lineup_date(today())
            .await?
            .ok_or(ReportError::NoFutureRace)?;

        let teams_by_trc: HashMap<i32, &TeamModel> = teams.iter().map(|t| (t.trc, t)).collect();
        let rows: Vec<_> = lineup_repo
            .get_on_date(race_date)
            .await?
            .into_iter()
            .filter(|row| filter.matches(teams_by_trc.get(&row.team_trc).copied()))
            .collect();

        let names = WtrlRiderRepository::new(self.db)
            .get_names(rows.iter().map(|row| row.profile_id).collect())
            .await?;

        let mut entries: Vec<(String, String, i64, String)> = rows
            .into_iter()
            .map(|row| {
                let team = teams_by_trc.get(&row.team_trc);
                let team_name = team
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| NO_TEAM.to_string());
                let category = team
                    .and_then(|t| t.category.clone())
                    .unwrap_or_else(|| OTHER_CATEGORY.to_string());
                let rider_name = names
                    .get(&row.profile_id)
                    .cloned()
                    .unwrap_or_else(|| row.profile_id.to_string());

                (team_name, rider_name, row.profile_id, category)
            })
            .collect();
        entries.sort();

        let mut report = Report::new(
            ReportType::Lineup,
            &["team", "profile_id", "rider_name", "category", "race_date"],
        );
        report.race_date = Some(race_date);

        for (team_name, rider_name, profile_id, category) in entries {
            report.push(
                Some(team_name.clone()),
                vec![
                    Cell::from(team_name),
                    Cell::from(profile_id),
                    Cell::from(rider_name),
                    Cell::from(category),
                    Cell::from(race_date),
                ],
            );
        }

        Ok(report)
    }

    /// Positions are ranked within each season and class before filtering
    async fn round_standings(&self, filter: &ResolvedFilter) -> Result<Report, Error> {
        let standings = ResultsRepository::new(self.db).get_standings().await?;

        let mut report = Report::new(
            ReportType::RoundStandings,
            &[
                "season",
                "class_id",
                "position",
                "team",
                "category",
                "total_points",
            ],
        );

        let mut current: Option<(i32, String)> = None;
        let mut position = 0;

        for (standing, team) in standings {
            let key = (standing.season, standing.class_id.clone());
            if current.as_ref() != Some(&key) {
                current = Some(key);
                position = 0;
            }
            position += 1;

            if !filter.matches(team.as_ref()) {
                continue;
            }

            let (team_name, category) = match team {
                Some(team) => (team.name, team.category),
                None => (format!("TRC {}", standing.team_id), None),
            };

            report.push(
                None,
                vec![
                    Cell::from(standing.season),
                    Cell::from(standing.class_id),
                    Cell::from(position as i64),
                    Cell::from(team_name),
                    Cell::from(category),
                    Cell::from(standing.total_points),
                ],
            );
        }

        Ok(report)
    }
}
