pub mod calculator;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod models;
pub mod snapshot;

pub use calculator::{
    Averages, Co2Unit, Comparisons, YearlyProjection, calculate_averages, calculate_co2,
    comparisons, energy_kwh, estimate_tokens, format_co2, format_tokens, is_likely_ai_suggestion,
    primary_comparison, project_yearly,
};
pub use constants::{Region, UiColor, carbon_intensity, ui_color, ui_emoji};
pub use error::ParseError;
pub use metrics::{AcceptedSuggestion, CarbonMetrics, TextChange};
pub use models::{
    AiModel, DEFAULT_MODEL, MODEL_SPECS, ModelOption, ModelProvider, ModelSpec, PROVIDERS,
    all_models, available_models, model_energy, model_spec, models_by_feature,
    models_by_provider,
};
pub use snapshot::{CurrentModel, ExportSnapshot, export_snapshot};

/// Live display string, e.g. `🌱 3.20g`.
pub fn status_text(co2_grams: f64) -> String {
    format!(
        "{} {}",
        ui_emoji(co2_grams),
        format_co2(co2_grams, Co2Unit::Grams)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_combines_icon_and_total() {
        assert_eq!(status_text(3.2), "🌱 3.20g");
        assert_eq!(status_text(12.0), "🟡 12.00g");
        assert_eq!(status_text(75.456), "🔴 75.46g");
    }
}
