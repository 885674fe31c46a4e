use std::fs;
use std::path::Path;

use carbon_core::{
    AiModel, CarbonMetrics, CurrentModel, DEFAULT_MODEL, ExportSnapshot, Region, TextChange,
    export_snapshot, status_text,
};
use carbon_db::Db;
use chrono::Utc;

use crate::error::Result;

/// Owns the running totals and the active model/region for one installation.
///
/// Every mutation is applied to a copy, persisted, and only then made
/// visible, so a failed write leaves the in-memory totals unchanged.
pub struct Tracker {
    db: Db,
    metrics: CarbonMetrics,
    model: AiModel,
    region: Region,
}

impl Tracker {
    pub fn open(db: Db) -> Result<Self> {
        let now = Utc::now();
        let metrics = match db.load_metrics()? {
            Some(stored) => stored.normalized(now),
            None => CarbonMetrics::new(now),
        };
        let model = load_model_preference(&db)?;
        let region = load_region_preference(&db)?;
        Ok(Self {
            db,
            metrics,
            model,
            region,
        })
    }

    pub fn metrics(&self) -> &CarbonMetrics {
        &self.metrics
    }

    pub fn model(&self) -> AiModel {
        self.model
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn current_model(&self) -> CurrentModel {
        CurrentModel::from(self.model)
    }

    /// Folds every qualifying change into the totals and returns how many
    /// were counted. Nothing is written when no change qualifies.
    pub fn track_text_change(&mut self, changes: &[TextChange]) -> Result<usize> {
        let now = Utc::now();
        let mut next = self.metrics.clone();
        let mut accepted = 0usize;
        for change in changes {
            if let Some(suggestion) =
                next.record_suggestion_accepted(change, self.model, self.region, now)
            {
                tracing::debug!(
                    tokens = suggestion.tokens,
                    co2_grams = suggestion.co2_grams,
                    model = %self.model,
                    region = %self.region,
                    "accepted suggestion"
                );
                accepted += 1;
            }
        }
        if accepted > 0 {
            self.commit(next)?;
        }
        Ok(accepted)
    }

    pub fn track_suggestion_shown(&mut self) -> Result<()> {
        let mut next = self.metrics.clone();
        next.record_suggestion_shown();
        self.commit(next)
    }

    pub fn acceptance_rate(&self) -> f64 {
        self.metrics.acceptance_rate()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.commit(CarbonMetrics::new(Utc::now()))?;
        tracing::info!("carbon metrics reset");
        Ok(())
    }

    pub fn increment_session(&mut self) -> Result<()> {
        let mut next = self.metrics.clone();
        next.increment_session();
        self.commit(next)?;
        tracing::info!(sessions = self.metrics.sessions_count, "session started");
        Ok(())
    }

    /// Only affects suggestions recorded from now on.
    pub fn set_model(&mut self, model: AiModel) -> Result<()> {
        self.db.set_model_preference(model.id())?;
        self.model = model;
        tracing::info!(model = %model, "active model changed");
        Ok(())
    }

    pub fn set_region(&mut self, region: Region) -> Result<()> {
        self.db.set_region_preference(region.code())?;
        self.region = region;
        tracing::info!(region = %region, "active region changed");
        Ok(())
    }

    pub fn days_since_start(&self) -> f64 {
        self.metrics.days_since_start(Utc::now())
    }

    pub fn export_snapshot(&self) -> ExportSnapshot {
        export_snapshot(&self.metrics, self.model, Utc::now())
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_snapshot())?)
    }

    pub fn export_to(&self, path: &Path) -> Result<()> {
        let data = self.export_json()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    pub fn status_line(&self) -> String {
        status_text(self.metrics.total_co2_grams)
    }

    fn commit(&mut self, next: CarbonMetrics) -> Result<()> {
        self.db.save_metrics(&next)?;
        self.metrics = next;
        Ok(())
    }
}

fn load_model_preference(db: &Db) -> Result<AiModel> {
    match db.get_model_preference()? {
        Some(stored) => match stored.parse::<AiModel>() {
            Ok(model) => Ok(model),
            Err(err) => {
                tracing::warn!(stored = %stored, "{err}; using {DEFAULT_MODEL}");
                db.set_model_preference(DEFAULT_MODEL.id())?;
                Ok(DEFAULT_MODEL)
            }
        },
        None => {
            db.set_model_preference(DEFAULT_MODEL.id())?;
            Ok(DEFAULT_MODEL)
        }
    }
}

fn load_region_preference(db: &Db) -> Result<Region> {
    let Some(stored) = db.get_region_preference()? else {
        return Ok(Region::default());
    };
    Ok(stored.parse::<Region>().unwrap_or_else(|err| {
        tracing::warn!(stored = %stored, "{err}; using {}", Region::default());
        Region::default()
    }))
}
