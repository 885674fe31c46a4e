use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::{Averages, Comparisons, calculate_averages, comparisons};
use crate::metrics::CarbonMetrics;
use crate::models::AiModel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentModel {
    pub model: AiModel,
    pub description: String,
}

impl From<AiModel> for CurrentModel {
    fn from(model: AiModel) -> Self {
        Self {
            model,
            description: model.spec().description.to_string(),
        }
    }
}

/// Everything the export file and the stats report are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub metrics: CarbonMetrics,
    pub averages: Averages,
    pub comparisons: Comparisons,
    pub model: CurrentModel,
    pub export_date: String,
}

pub fn export_snapshot(metrics: &CarbonMetrics, model: AiModel, now: DateTime<Utc>) -> ExportSnapshot {
    ExportSnapshot {
        metrics: metrics.clone(),
        averages: calculate_averages(metrics, now),
        comparisons: comparisons(metrics.total_co2_grams),
        model: CurrentModel::from(model),
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn snapshot_is_stable_without_mutation() {
        let start = Utc::now() - Duration::days(3);
        let mut metrics = CarbonMetrics::new(start);
        metrics.total_co2_grams = 42.0;
        metrics.suggestions_accepted = 7;

        let now = Utc::now();
        let first = export_snapshot(&metrics, AiModel::ClaudeSonnet4, now);
        let second = export_snapshot(&metrics, AiModel::ClaudeSonnet4, now);
        assert_eq!(first, second);
        assert_eq!(first.averages.per_suggestion, 6.0);
    }

    #[test]
    fn snapshot_serializes_with_export_keys() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).single().expect("date");
        let metrics = CarbonMetrics::new(now);
        let snapshot = export_snapshot(&metrics, AiModel::Gpt4o, now);
        assert_eq!(snapshot.export_date, "2025-03-01T12:00:00.000Z");

        let value = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(value["model"]["model"], "gpt-4o");
        assert_eq!(value["model"]["description"], "GitHub Copilot (GPT-4o - Omni)");
        assert_eq!(value["exportDate"], "2025-03-01T12:00:00.000Z");
        assert!(value["averages"].get("dailyAverage").is_some());
        assert!(value["comparisons"].get("laptopMinutes").is_some());
        assert!(value["metrics"].get("totalCO2Grams").is_some());
    }
}
