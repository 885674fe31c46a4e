use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate_co2, estimate_tokens, is_likely_ai_suggestion};
use crate::constants::{Region, time};
use crate::models::AiModel;

/// Running totals for one installation.
///
/// Timestamps are epoch milliseconds. Fields missing from an older stored
/// blob deserialize as zero, or as "now" for the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonMetrics {
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default, rename = "totalCO2Grams")]
    pub total_co2_grams: f64,
    #[serde(default)]
    pub sessions_count: u64,
    #[serde(default)]
    pub suggestions_accepted: u64,
    #[serde(default)]
    pub suggestions_shown: u64,
    #[serde(default)]
    pub total_characters: u64,
    #[serde(default = "now_millis")]
    pub start_date: i64,
    #[serde(default = "now_millis")]
    pub last_update_date: i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl Default for CarbonMetrics {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

/// One edit delivered by the host: the inserted text and how many
/// characters it replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    pub text: String,
    #[serde(default)]
    pub range_length: usize,
}

impl TextChange {
    pub fn insertion(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            range_length: 0,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Heuristic only: long pure insertions are counted as accepted
    /// suggestions. Pasted text is a false positive and short completions
    /// are missed.
    pub fn is_likely_ai_suggestion(&self) -> bool {
        self.range_length == 0 && is_likely_ai_suggestion(self.char_len())
    }
}

/// Contribution of a single accepted suggestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedSuggestion {
    pub tokens: u64,
    pub co2_grams: f64,
    pub characters: u64,
}

impl AcceptedSuggestion {
    pub fn estimate(change: &TextChange, model: AiModel, region: Region) -> Self {
        let tokens = estimate_tokens(&change.text);
        Self {
            tokens,
            co2_grams: calculate_co2(tokens, model, region),
            characters: change.char_len() as u64,
        }
    }
}

impl CarbonMetrics {
    pub fn new(now: DateTime<Utc>) -> Self {
        let now = now.timestamp_millis();
        Self {
            total_tokens: 0,
            total_co2_grams: 0.0,
            sessions_count: 0,
            suggestions_accepted: 0,
            suggestions_shown: 0,
            total_characters: 0,
            start_date: now,
            last_update_date: now,
        }
    }

    /// Replaces unset (zero) timestamps left by older blobs.
    pub fn normalized(mut self, now: DateTime<Utc>) -> Self {
        let now = now.timestamp_millis();
        if self.start_date == 0 {
            self.start_date = now;
        }
        if self.last_update_date == 0 {
            self.last_update_date = now;
        }
        self
    }

    /// Folds `change` into the totals when it passes the suggestion
    /// heuristic. CO2 is computed with the model and region given here and
    /// never recomputed later.
    pub fn record_suggestion_accepted(
        &mut self,
        change: &TextChange,
        model: AiModel,
        region: Region,
        now: DateTime<Utc>,
    ) -> Option<AcceptedSuggestion> {
        if !change.is_likely_ai_suggestion() {
            return None;
        }
        let accepted = AcceptedSuggestion::estimate(change, model, region);
        self.apply(accepted, now);
        Some(accepted)
    }

    pub fn apply(&mut self, accepted: AcceptedSuggestion, now: DateTime<Utc>) {
        self.total_tokens = self.total_tokens.saturating_add(accepted.tokens);
        self.total_co2_grams += accepted.co2_grams;
        self.total_characters = self.total_characters.saturating_add(accepted.characters);
        self.suggestions_accepted = self.suggestions_accepted.saturating_add(1);
        self.last_update_date = now.timestamp_millis();
    }

    pub fn record_suggestion_shown(&mut self) {
        self.suggestions_shown = self.suggestions_shown.saturating_add(1);
    }

    pub fn increment_session(&mut self) {
        self.sessions_count = self.sessions_count.saturating_add(1);
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }

    /// Percentage of shown suggestions that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.suggestions_shown == 0 {
            return 0.0;
        }
        (self.suggestions_accepted as f64 / self.suggestions_shown as f64) * 100.0
    }

    pub fn days_since_start(&self, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = now.timestamp_millis().saturating_sub(self.start_date);
        let days = elapsed_ms as f64 / time::ONE_DAY as f64;
        days.max(0.01)
    }

    pub fn session_average(&self) -> f64 {
        self.total_co2_grams / self.sessions_count.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate_averages;
    use chrono::Duration;

    fn change(len: usize, range_length: usize) -> TextChange {
        TextChange {
            text: "a".repeat(len),
            range_length,
        }
    }

    #[test]
    fn qualification_heuristic() {
        assert!(change(11, 0).is_likely_ai_suggestion());
        assert!(!change(9, 0).is_likely_ai_suggestion());
        assert!(!change(10, 0).is_likely_ai_suggestion());
        assert!(!change(20, 5).is_likely_ai_suggestion());
    }

    #[test]
    fn accepted_suggestion_updates_all_counters() {
        let start = Utc::now() - Duration::hours(1);
        let now = Utc::now();
        let mut metrics = CarbonMetrics::new(start);
        let accepted = metrics
            .record_suggestion_accepted(&change(40, 0), AiModel::Gpt4o, Region::Global, now)
            .expect("qualifies");

        assert_eq!(accepted.tokens, 10);
        assert_eq!(metrics.total_tokens, 10);
        assert_eq!(metrics.total_characters, 40);
        assert_eq!(metrics.suggestions_accepted, 1);
        assert_eq!(metrics.last_update_date, now.timestamp_millis());
        assert_eq!(
            metrics.total_co2_grams,
            calculate_co2(10, AiModel::Gpt4o, Region::Global)
        );
    }

    #[test]
    fn rejected_change_leaves_metrics_untouched() {
        let now = Utc::now();
        let mut metrics = CarbonMetrics::new(now);
        let before = metrics.clone();
        assert!(
            metrics
                .record_suggestion_accepted(&change(9, 0), AiModel::Gpt4o, Region::Global, now)
                .is_none()
        );
        assert!(
            metrics
                .record_suggestion_accepted(&change(20, 3), AiModel::Gpt4o, Region::Global, now)
                .is_none()
        );
        assert_eq!(metrics, before);
    }

    #[test]
    fn totals_keep_write_time_model() {
        let now = Utc::now();
        let mut metrics = CarbonMetrics::new(now);
        let event = change(400, 0);
        metrics.record_suggestion_accepted(&event, AiModel::Codex, Region::Global, now);
        metrics.record_suggestion_accepted(&event, AiModel::Gpt5, Region::EuNorth, now);

        let expected = calculate_co2(100, AiModel::Codex, Region::Global)
            + calculate_co2(100, AiModel::Gpt5, Region::EuNorth);
        assert!((metrics.total_co2_grams - expected).abs() < 1e-12);
    }

    #[test]
    fn acceptance_rate_handles_zero_shown() {
        let mut metrics = CarbonMetrics::new(Utc::now());
        assert_eq!(metrics.acceptance_rate(), 0.0);
        metrics.suggestions_shown = 10;
        metrics.suggestions_accepted = 5;
        assert_eq!(metrics.acceptance_rate(), 50.0);
    }

    #[test]
    fn reset_zeroes_counters_and_restarts_clock() {
        let now = Utc::now();
        let mut metrics = CarbonMetrics::new(now - Duration::days(10));
        metrics.total_tokens = 500;
        metrics.total_co2_grams = 12.0;
        metrics.sessions_count = 3;
        metrics.suggestions_shown = 8;
        metrics.suggestions_accepted = 4;
        metrics.total_characters = 2000;

        metrics.reset(now);

        assert_eq!(metrics, CarbonMetrics::new(now));
        assert_eq!(metrics.start_date, now.timestamp_millis());
        let averages = calculate_averages(&metrics, now);
        assert_eq!(averages.daily_average, 0.0);
        assert_eq!(averages.hourly_average, 0.0);
        assert_eq!(averages.per_suggestion, 0.0);
    }

    #[test]
    fn missing_fields_default_on_deserialize() {
        let before = Utc::now().timestamp_millis();
        let metrics: CarbonMetrics =
            serde_json::from_str(r#"{"totalTokens":42,"totalCO2Grams":1.5}"#).expect("parse");
        assert_eq!(metrics.total_tokens, 42);
        assert_eq!(metrics.total_co2_grams, 1.5);
        assert_eq!(metrics.sessions_count, 0);
        assert_eq!(metrics.total_characters, 0);
        assert!(metrics.start_date >= before);
        assert!(metrics.last_update_date >= before);
    }

    #[test]
    fn zero_timestamps_are_normalized() {
        let now = Utc::now();
        let metrics: CarbonMetrics =
            serde_json::from_str(r#"{"startDate":0,"lastUpdateDate":0}"#).expect("parse");
        let metrics = metrics.normalized(now);
        assert_eq!(metrics.start_date, now.timestamp_millis());
        assert_eq!(metrics.last_update_date, now.timestamp_millis());
    }

    #[test]
    fn serializes_with_stored_key_names() {
        let metrics = CarbonMetrics::new(Utc::now());
        let value = serde_json::to_value(&metrics).expect("serialize");
        for key in [
            "totalTokens",
            "totalCO2Grams",
            "sessionsCount",
            "suggestionsAccepted",
            "suggestionsShown",
            "totalCharacters",
            "startDate",
            "lastUpdateDate",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn days_since_start_has_a_floor() {
        let now = Utc::now();
        let metrics = CarbonMetrics::new(now);
        assert_eq!(metrics.days_since_start(now), 0.01);
        let older = CarbonMetrics::new(now - Duration::days(3));
        assert!((older.days_since_start(now) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn corrupt_start_date_does_not_overflow() {
        let now = Utc::now();
        let mut metrics = CarbonMetrics::new(now);
        metrics.start_date = i64::MIN;
        assert!(metrics.days_since_start(now).is_finite());
        metrics.start_date = i64::MAX;
        assert_eq!(metrics.days_since_start(now), 0.01);
    }

    #[test]
    fn session_average_uses_at_least_one_session() {
        let mut metrics = CarbonMetrics::new(Utc::now());
        metrics.total_co2_grams = 6.0;
        assert_eq!(metrics.session_average(), 6.0);
        metrics.sessions_count = 3;
        assert_eq!(metrics.session_average(), 2.0);
    }
}
