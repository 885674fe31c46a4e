use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::services::{ReportFormat, ReportRenderer, StatsReport, Tracker};
use carbon_db::Db;

/// Paths and files needed to run the local tracker.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub template_dir: Option<PathBuf>,
}

/// Application state shared by host adapters.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub renderer: ReportRenderer,
}

impl AppState {
    pub fn new(db_path: PathBuf, template_dir: Option<PathBuf>) -> Self {
        let renderer = ReportRenderer::new(template_dir.clone());
        let config = AppConfig {
            db_path,
            template_dir,
        };
        Self { config, renderer }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    /// Migrates the store and loads the tracker with its persisted state.
    pub fn initialize(&self) -> Result<Tracker> {
        let is_fresh_db = self.is_fresh_db();
        self.setup_db()?;
        if is_fresh_db {
            tracing::info!(path = %self.config.db_path.display(), "created tracker store");
        }
        self.open_tracker()
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }

    pub fn open_tracker(&self) -> Result<Tracker> {
        Tracker::open(self.open_db()?)
    }

    pub fn render_report(&self, tracker: &Tracker, format: ReportFormat) -> Result<String> {
        self.renderer
            .render(&StatsReport::from_tracker(tracker), format)
    }
}

pub fn setup_db(path: &Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
