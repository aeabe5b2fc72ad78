//! Shared progress of the single background import.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};

use crate::{
    model::import::ImportStatusDto,
    server::{error::import::ImportError, service::import::ImportSummary},
};

/// Handle to the import status, cloned into the spawned import task.
///
/// The running flag is claimed with a compare-exchange so two concurrent triggers cannot
/// both start an import.
#[derive(Clone, Default)]
pub struct ImportTracker {
    running: Arc<AtomicBool>,
    status: Arc<Mutex<ImportStatusDto>>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the tracker for a new import and resets its status
    pub fn try_start(&self, message: impl Into<String>) -> Result<ImportStatusDto, ImportError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ImportError::AlreadyRunning);
        }

        let mut status = self.lock();
        *status = ImportStatusDto {
            progress: 0,
            message: message.into(),
            is_running: true,
            errors: Vec::new(),
        };

        Ok(status.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn status(&self) -> ImportStatusDto {
        self.lock().clone()
    }

    /// Progress of `done` out of `total` units, capped below 100 until the import finishes
    pub fn set_progress(&self, done: usize, total: usize, message: impl Into<String>) {
        let progress = if total == 0 {
            0
        } else {
            ((done * 100) / total).min(99) as u8
        };

        let mut status = self.lock();
        status.progress = progress;
        status.message = message.into();
    }

    pub fn push_error(&self, error: impl Into<String>) {
        self.lock().errors.push(error.into());
    }

    /// Marks the import as done and releases the running flag
    pub fn finish(&self, summary: &ImportSummary) {
        {
            let mut status = self.lock();
            status.progress = 100;
            status.message = summary.message();
            status.is_running = false;
        }

        self.running.store(false, Ordering::Release);
    }

    /// Marks the import as aborted and releases the running flag
    pub fn fail(&self, error: impl Into<String>) {
        {
            let error = error.into();
            let mut status = self.lock();
            status.message = format!("Import failed: {}", error);
            status.errors.push(error);
            status.is_running = false;
        }

        self.running.store(false, Ordering::Release);
    }

    fn lock(&self) -> MutexGuard<'_, ImportStatusDto> {
        // status stays readable after a panicked writer
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Ownership of a started import, held by the import task.
///
/// Dropping it before [`ImportRun::finish`] or [`ImportRun::fail`], as a panicking task
/// does, marks the import failed and releases the tracker.
pub struct ImportRun {
    tracker: ImportTracker,
    done: bool,
}

impl ImportRun {
    /// Claims `tracker` like [`ImportTracker::try_start`]
    pub fn start(
        tracker: ImportTracker,
        message: impl Into<String>,
    ) -> Result<(Self, ImportStatusDto), ImportError> {
        let status = tracker.try_start(message)?;

        Ok((
            Self {
                tracker,
                done: false,
            },
            status,
        ))
    }

    pub fn tracker(&self) -> &ImportTracker {
        &self.tracker
    }

    pub fn finish(mut self, summary: &ImportSummary) {
        self.done = true;
        self.tracker.finish(summary);
    }

    pub fn fail(mut self, error: impl Into<String>) {
        self.done = true;
        self.tracker.fail(error);
    }
}

impl Drop for ImportRun {
    fn drop(&mut self) {
        if !self.done {
            tracing::error!("Import task stopped before reporting a result");
            self.tracker.fail("Import stopped unexpectedly");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{
        error::import::ImportError,
        service::import::{
            tracker::{ImportRun, ImportTracker},
            ImportSummary,
        },
    };

    /// Expected: a second start while running is refused
    #[test]
    fn refuses_concurrent_start() {
        let tracker = ImportTracker::new();

        assert!(tracker.try_start("first").is_ok());
        assert!(matches!(
            tracker.try_start("second"),
            Err(ImportError::AlreadyRunning)
        ));
        assert_eq!(tracker.status().message, "first");
    }

    /// Expected: finishing releases the flag and reports 100%
    #[test]
    fn finish_releases_tracker() {
        let tracker = ImportTracker::new();
        tracker.try_start("running").unwrap();
        tracker.set_progress(1, 2, "halfway");

        assert_eq!(tracker.status().progress, 50);

        tracker.finish(&ImportSummary::default());

        let status = tracker.status();
        assert_eq!(status.progress, 100);
        assert!(!status.is_running);
        assert!(!tracker.is_running());
        assert!(tracker.try_start("again").is_ok());
    }

    /// Expected: a restart clears the errors of the previous run
    #[test]
    fn restart_clears_errors() {
        let tracker = ImportTracker::new();
        tracker.try_start("run").unwrap();
        tracker.fail("boom");

        assert_eq!(tracker.status().errors, vec!["boom".to_string()]);

        tracker.try_start("rerun").unwrap();

        assert!(tracker.status().errors.is_empty());
    }

    /// Expected: a panicking import task still releases the tracker
    #[tokio::test]
    async fn panicking_run_releases_tracker() {
        let tracker = ImportTracker::new();
        let (run, _) = ImportRun::start(tracker.clone(), "doomed").unwrap();

        let result = tokio::spawn(async move {
            let _run = run;
            panic!("import crashed");
        })
        .await;

        assert!(result.is_err());
        assert!(!tracker.is_running());
        assert_eq!(tracker.status().message, "Import failed: Import stopped unexpectedly");
        assert!(tracker.try_start("again").is_ok());
    }

    /// Expected: finishing through the run does not report a failure afterwards
    #[test]
    fn finished_run_keeps_summary() {
        let tracker = ImportTracker::new();
        let (run, _) = ImportRun::start(tracker.clone(), "run").unwrap();

        run.finish(&ImportSummary::default());

        assert!(tracker.status().errors.is_empty());
        assert_eq!(tracker.status().progress, 100);
    }
}
