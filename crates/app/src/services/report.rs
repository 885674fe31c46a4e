use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use carbon_core::{
    Comparisons, ExportSnapshot, Region, format_tokens, primary_comparison, project_yearly,
    status_text,
};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::error::Result;
use crate::services::Tracker;

const STATS_TXT: &str = "stats.txt";
const STATS_HTML: &str = "stats.html";
const STYLES_CSS: &str = "styles.css";

const EMBEDDED_STATS_TXT: &str = include_str!("../../templates/stats.txt");
const EMBEDDED_STATS_HTML: &str = include_str!("../../templates/stats.html");
const EMBEDDED_STYLES_CSS: &str = include_str!("../../templates/styles.css");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
}

/// Display-ready values for the stats view. Numbers are pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub status: String,
    pub days_since_start: String,
    pub model_description: String,
    pub region: String,
    pub carbon_intensity: String,
    pub total_co2_grams: String,
    pub primary_comparison: String,
    pub total_tokens: String,
    pub total_characters: String,
    pub suggestions_accepted: u64,
    pub suggestions_shown: u64,
    pub acceptance_rate: String,
    pub sessions_count: u64,
    pub session_average: String,
    pub daily_average: String,
    pub hourly_average: String,
    pub per_suggestion: String,
    pub comparisons: Comparisons,
    pub yearly_kg: String,
    pub yearly_comparison: String,
}

impl StatsReport {
    pub fn from_tracker(tracker: &Tracker) -> Self {
        Self::build(
            &tracker.export_snapshot(),
            tracker.region(),
            tracker.days_since_start(),
            tracker.acceptance_rate(),
        )
    }

    pub fn build(
        snapshot: &ExportSnapshot,
        region: Region,
        days_since_start: f64,
        acceptance_rate: f64,
    ) -> Self {
        let metrics = &snapshot.metrics;
        let averages = &snapshot.averages;
        let yearly = project_yearly(averages.daily_average);
        Self {
            status: status_text(metrics.total_co2_grams),
            days_since_start: format!("{days_since_start:.1}"),
            model_description: snapshot.model.description.clone(),
            region: region.code().to_string(),
            carbon_intensity: format!("{}", region.carbon_intensity()),
            total_co2_grams: format!("{:.2}", metrics.total_co2_grams),
            primary_comparison: primary_comparison(metrics.total_co2_grams),
            total_tokens: format_tokens(metrics.total_tokens),
            total_characters: format_tokens(metrics.total_characters),
            suggestions_accepted: metrics.suggestions_accepted,
            suggestions_shown: metrics.suggestions_shown,
            acceptance_rate: format!("{acceptance_rate:.1}"),
            sessions_count: metrics.sessions_count,
            session_average: format!("{:.2}", metrics.session_average()),
            daily_average: format!("{:.2}", averages.daily_average),
            hourly_average: format!("{:.2}", averages.hourly_average),
            per_suggestion: format!("{:.3}", averages.per_suggestion),
            comparisons: snapshot.comparisons.clone(),
            yearly_kg: format!("{:.2}", yearly.yearly_kg),
            yearly_comparison: yearly.comparison,
        }
    }
}

/// Renders the stats view from embedded templates, or from `template_dir`
/// when one is configured.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    template_dir: Option<PathBuf>,
}

impl ReportRenderer {
    pub fn new(template_dir: Option<PathBuf>) -> Self {
        Self { template_dir }
    }

    pub fn render(&self, report: &StatsReport, format: ReportFormat) -> Result<String> {
        let env = Environment::new();
        let rendered = match format {
            ReportFormat::Text => {
                let source = self.load_template(STATS_TXT, EMBEDDED_STATS_TXT);
                let template = env.template_from_named_str(STATS_TXT, &source)?;
                template.render(context! { report => report })?
            }
            ReportFormat::Html => {
                let source = self.load_template(STATS_HTML, EMBEDDED_STATS_HTML);
                let styles = self.load_template(STYLES_CSS, EMBEDDED_STYLES_CSS);
                let template = env.template_from_named_str(STATS_HTML, &source)?;
                template.render(context! { report => report, styles => styles.as_ref() })?
            }
        };
        Ok(rendered)
    }

    /// A missing override renders as a visible error line instead of failing.
    fn load_template(&self, name: &str, embedded: &'static str) -> Cow<'static, str> {
        let Some(dir) = &self.template_dir else {
            return Cow::Borrowed(embedded);
        };
        let path = dir.join(name);
        match fs::read_to_string(&path) {
            Ok(source) => Cow::Owned(source),
            Err(err) => {
                tracing::error!(path = %path.display(), "error loading template: {err}");
                Cow::Owned(missing_template_placeholder(name))
            }
        }
    }
}

pub fn missing_template_placeholder(name: &str) -> String {
    format!("Error: Could not load {name}. Please check the installation.")
}
