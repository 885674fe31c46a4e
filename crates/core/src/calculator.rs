//! Pure conversions from inserted text to tokens, energy, CO2 and the
//! comparisons shown to the user. The active model and region are always
//! passed in by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CHARS_PER_TOKEN, MIN_SUGGESTION_LENGTH, Region, co2, decimals, time,
};
use crate::metrics::CarbonMetrics;
use crate::models::AiModel;

/// Character-count heuristic: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(CHARS_PER_TOKEN)
}

pub fn is_likely_ai_suggestion(text_length: usize) -> bool {
    text_length > MIN_SUGGESTION_LENGTH
}

pub fn energy_kwh(tokens: u64, model: AiModel) -> f64 {
    (tokens as f64 / 1000.0) * model.spec().energy_per_1k_tokens
}

/// Grams of CO2e for `tokens` of inference on `model` in `region`.
pub fn calculate_co2(tokens: u64, model: AiModel, region: Region) -> f64 {
    let co2_kg = energy_kwh(tokens, model) * region.carbon_intensity();
    co2_kg * 1000.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparisons {
    pub smartphones: String,
    pub car_miles: String,
    pub led_bulb_hours: String,
    pub trees_daily: String,
    pub streaming: String,
    pub google_searches: String,
    pub laptop_minutes: String,
}

pub fn comparisons(co2_grams: f64) -> Comparisons {
    let precision = decimals::COMPARISONS;
    Comparisons {
        smartphones: format!(
            "{:.precision$} smartphone charges",
            co2_grams / co2::SMARTPHONE_CHARGE
        ),
        car_miles: format!("{:.3} miles in an average car", co2_grams / co2::CAR_MILE),
        led_bulb_hours: format!(
            "{:.precision$} hours of LED bulb",
            co2_grams / co2::LED_BULB_HOUR
        ),
        trees_daily: format!(
            "{:.3} trees needed (daily)",
            co2_grams / co2::TREE_ABSORPTION_DAILY
        ),
        streaming: format!(
            "{:.precision$} minutes of HD video streaming",
            co2_grams / co2::HD_STREAMING_HOUR * 60.0
        ),
        google_searches: format!("{:.0} Google searches", co2_grams / co2::GOOGLE_SEARCH),
        laptop_minutes: format!(
            "{:.precision$} minutes of laptop usage",
            co2_grams / co2::LAPTOP_HOUR * 60.0
        ),
    }
}

/// One equivalent, picked so the number stays readable at any magnitude.
pub fn primary_comparison(co2_grams: f64) -> String {
    if co2_grams < 1.0 {
        let percentage = co2_grams / co2::SMARTPHONE_CHARGE * 100.0;
        format!("{percentage:.0}% of a phone charge")
    } else if co2_grams < 10.0 {
        let charges = co2_grams / co2::SMARTPHONE_CHARGE;
        format!("{charges:.1} phone charges")
    } else if co2_grams < 100.0 {
        let minutes = co2_grams / co2::HD_STREAMING_HOUR * 60.0;
        format!("{minutes:.0} min of HD streaming")
    } else if co2_grams < 500.0 {
        let miles = co2_grams / co2::CAR_MILE;
        format!("{miles:.2} miles in a car")
    } else {
        let trees = co2_grams / co2::TREE_ABSORPTION_DAILY;
        format!("{trees:.2} trees needed for a day")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub daily_average: f64,
    pub hourly_average: f64,
    pub per_suggestion: f64,
}

pub fn calculate_averages(metrics: &CarbonMetrics, now: DateTime<Utc>) -> Averages {
    let elapsed_ms = now.timestamp_millis().saturating_sub(metrics.start_date) as f64;
    // Floors keep brand-new data from producing huge or infinite rates.
    let days_active = (elapsed_ms / time::ONE_DAY as f64).max(1.0);
    let hours_active = (elapsed_ms / time::ONE_HOUR as f64).max(0.1);
    let per_suggestion = if metrics.suggestions_accepted > 0 {
        metrics.total_co2_grams / metrics.suggestions_accepted as f64
    } else {
        0.0
    };
    Averages {
        daily_average: metrics.total_co2_grams / days_active,
        hourly_average: metrics.total_co2_grams / hours_active,
        per_suggestion,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    pub yearly_grams: f64,
    pub yearly_kg: f64,
    pub comparison: String,
}

pub fn project_yearly(daily_average: f64) -> YearlyProjection {
    let yearly_grams = daily_average * 365.0;
    let yearly_kg = yearly_grams / 1000.0;
    let comparison = if yearly_kg < 1.0 {
        let charges = yearly_kg * 1000.0 / co2::SMARTPHONE_CHARGE;
        format!("{charges:.0} phone charges")
    } else if yearly_kg < 10.0 {
        let miles = yearly_kg * 1000.0 / co2::CAR_MILE;
        format!("{miles:.1} miles driven")
    } else {
        let trees = yearly_kg / (co2::TREE_ABSORPTION_YEARLY / 1000.0);
        format!("{trees:.2} trees needed for a year")
    };
    YearlyProjection {
        yearly_grams,
        yearly_kg,
        comparison,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Co2Unit {
    #[default]
    Grams,
    Kilograms,
}

pub fn format_co2(co2_grams: f64, unit: Co2Unit) -> String {
    match unit {
        Co2Unit::Grams => format!("{:.*}g", decimals::CO2_GRAMS, co2_grams),
        Co2Unit::Kilograms => format!("{:.*} kg", decimals::CO2_KG, co2_grams / 1000.0),
    }
}

/// en-US grouping, e.g. `1,234,567`.
pub fn format_tokens(tokens: u64) -> String {
    let digits = tokens.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
