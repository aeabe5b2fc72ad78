//! WTRL imports: race results and standings, team rosters and the season schedule.
//!
//! Imports run one at a time in a spawned task. [`ImportJob::spawn`] claims the shared
//! [`ImportTracker`], returns the initial status to the triggering request and reports
//! progress through the tracker while the job runs.

pub mod results;
pub mod schedule;
pub mod snapshot;
pub mod teams;
pub mod tracker;

use std::path::{Path, PathBuf};

use sea_orm::{DatabaseConnection, DatabaseTransaction};

use crate::{
    model::import::ImportStatusDto,
    server::{
        config::Config,
        error::{import::ImportError, Error},
        wtrl::WtrlClient,
    },
};

use self::tracker::{ImportRun, ImportTracker};

/// Import defaults taken from the configuration.
#[derive(Clone, Debug)]
pub struct ImportSettings {
    pub default_season: i32,
    pub team_trc_list: PathBuf,
    /// Raw payloads are written here when set
    pub snapshot_dir: Option<PathBuf>,
}

impl ImportSettings {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            default_season: config.wtrl_season.parse::<i32>().map_err(|_| {
                ImportError::InvalidSeason(config.wtrl_season.clone())
            })?,
            team_trc_list: config.team_trc_list.clone(),
            snapshot_dir: config.snapshot_dir.clone(),
        })
    }
}

/// Counts and messages collected by an import run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub segments: usize,
    pub teams: usize,
    pub riders: usize,
    pub races: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        let mut message = format!(
            "Import finished: {} segments, {} teams, {} riders, {} races",
            self.segments, self.teams, self.riders, self.races
        );

        if !self.warnings.is_empty() {
            message.push_str(&format!(" ({})", self.warnings.join("; ")));
        }
        if !self.errors.is_empty() {
            message.push_str(&format!(", {} errors", self.errors.len()));
        }

        message
    }
}

/// Runs the import steps against one database and WTRL client
pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
    wtrl_client: &'a WtrlClient,
    tracker: &'a ImportTracker,
    snapshot_dir: Option<&'a Path>,
}

impl<'a> ImportService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        wtrl_client: &'a WtrlClient,
        tracker: &'a ImportTracker,
        snapshot_dir: Option<&'a Path>,
    ) -> Self {
        Self {
            db,
            wtrl_client,
            tracker,
            snapshot_dir,
        }
    }

    /// Records an error in both the summary and the live status
    fn record_error(&self, summary: &mut ImportSummary, error: String) {
        tracing::error!("{}", error);
        self.tracker.push_error(error.clone());
        summary.errors.push(error);
    }

    fn record_warning(&self, summary: &mut ImportSummary, warning: String) {
        tracing::warn!("{}", warning);
        summary.warnings.push(warning);
    }
}

/// Commits `txn` when `result` is `Ok`, otherwise rolls it back and returns the original
/// error. A failed rollback is only logged.
async fn finish_transaction<T>(
    txn: DatabaseTransaction,
    result: Result<T, Error>,
) -> Result<T, Error> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::error!("Rollback failed after \"{}\": {}", e, rollback);
            }
            Err(e)
        }
    }
}

/// An import requested by an admin
#[derive(Clone, Debug, PartialEq)]
pub enum ImportJob {
    Results {
        season: i32,
        class_id: Option<String>,
        race_number: Option<i32>,
    },
    Teams {
        season: i32,
        trcs: Vec<i32>,
    },
    Schedule {
        season: i32,
    },
}

impl ImportJob {
    fn description(&self) -> String {
        match self {
            Self::Results { season, .. } => format!("Importing results for season {}", season),
            Self::Teams { season, trcs } => {
                format!("Importing {} teams for season {}", trcs.len(), season)
            }
            Self::Schedule { season } => format!("Importing schedule for season {}", season),
        }
    }

    /// Claims the tracker and runs the job in the background.
    ///
    /// # Returns
    /// - `Ok(ImportStatusDto)` - The status right after the job was started
    /// - `Err(ImportError::AlreadyRunning)` - Another import holds the tracker
    pub fn spawn(
        self,
        db: DatabaseConnection,
        wtrl_client: WtrlClient,
        tracker: ImportTracker,
        snapshot_dir: Option<PathBuf>,
    ) -> Result<ImportStatusDto, ImportError> {
        let description = self.description();
        let (run, status) = ImportRun::start(tracker, description.clone())?;

        tracing::info!("{}", description);

        tokio::spawn(async move {
            let service =
                ImportService::new(&db, &wtrl_client, run.tracker(), snapshot_dir.as_deref());

            let result = match self {
                Self::Results {
                    season,
                    class_id,
                    race_number,
                } => {
                    service
                        .import_results(season, class_id.as_deref(), race_number)
                        .await
                }
                Self::Teams { season, trcs } => service.import_teams(season, &trcs).await,
                Self::Schedule { season } => service.import_schedule(season).await,
            };

            match result {
                Ok(summary) => {
                    tracing::info!("{}", summary.message());
                    run.finish(&summary);
                }
                Err(e) => {
                    tracing::error!("Import aborted: {}", e);
                    run.fail(e.to_string());
                }
            }
        });

        Ok(status)
    }
}

/// Season from a request parameter; blank means the configured default
pub fn parse_season(value: Option<&str>, default: i32) -> Result<i32, ImportError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v
            .parse::<i32>()
            .ok()
            .filter(|season| *season > 0)
            .ok_or_else(|| ImportError::InvalidSeason(v.to_string())),
    }
}

pub fn parse_race_number(value: Option<&str>) -> Result<Option<i32>, ImportError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i32>()
            .ok()
            .filter(|race| *race > 0)
            .map(Some)
            .ok_or_else(|| ImportError::InvalidRaceNumber(v.to_string())),
    }
}

/// Comma or whitespace separated TRCs; `None` when the parameter is blank
pub fn parse_trcs(value: Option<&str>) -> Result<Option<Vec<i32>>, ImportError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| ImportError::InvalidTrc(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Reads one TRC per line; blank lines and `#` comments are ignored
pub async fn read_trc_list(path: &Path) -> Result<Vec<i32>, ImportError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| {
        ImportError::TrcListUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let trcs: Vec<i32> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match line.parse::<i32>() {
            Ok(trc) => Some(trc),
            Err(_) => {
                tracing::warn!("Ignoring invalid TRC {:?} in {:?}", line, path);
                None
            }
        })
        .collect();

    if trcs.is_empty() {
        return Err(ImportError::EmptyTrcList);
    }

    Ok(trcs)
}
