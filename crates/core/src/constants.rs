use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Global average carbon intensity for cloud data centers, kg CO2e per kWh.
pub const CARBON_INTENSITY_GLOBAL: f64 = 0.429;

pub const CHARS_PER_TOKEN: u64 = 4;
pub const MIN_SUGGESTION_LENGTH: usize = 10;
pub const AVERAGE_CODE_SUGGESTION_TOKENS: u64 = 75;

/// Grams of CO2e for everyday equivalents used in comparisons.
pub mod co2 {
    /// 15Wh battery at ~85% charging efficiency.
    pub const SMARTPHONE_CHARGE: f64 = 8.0;
    /// Average passenger car.
    pub const CAR_MILE: f64 = 404.0;
    /// 10W bulb for one hour at the global intensity.
    pub const LED_BULB_HOUR: f64 = 4.3;
    pub const INCANDESCENT_BULB_HOUR: f64 = 25.7;
    /// Device, network and data center combined.
    pub const HD_STREAMING_HOUR: f64 = 55.0;
    pub const UHD_STREAMING_HOUR: f64 = 100.0;
    pub const TREE_ABSORPTION_DAILY: f64 = 57.5;
    pub const TREE_ABSORPTION_YEARLY: f64 = 21_000.0;
    pub const GOOGLE_SEARCH: f64 = 0.2;
    /// 1MB attachment.
    pub const EMAIL_WITH_ATTACHMENT: f64 = 50.0;
    /// 50W laptop.
    pub const LAPTOP_HOUR: f64 = 21.5;
    /// One liter.
    pub const BOIL_WATER_LITER: f64 = 70.0;
    pub const COFFEE_CUP: f64 = 21.0;
}

pub mod thresholds {
    pub const LOW: f64 = 10.0;
    pub const MEDIUM: f64 = 50.0;

    pub const FEW_SUGGESTIONS: u64 = 10;
    pub const MANY_SUGGESTIONS: u64 = 100;

    // Daily CO2 targets in grams.
    pub const DAILY_TARGET_LOW: f64 = 20.0;
    pub const DAILY_TARGET_MEDIUM: f64 = 50.0;
    pub const DAILY_TARGET_HIGH: f64 = 100.0;
}

/// Durations in milliseconds.
pub mod time {
    pub const ONE_HOUR: i64 = 60 * 60 * 1000;
    pub const ONE_DAY: i64 = 24 * ONE_HOUR;
    pub const ONE_WEEK: i64 = 7 * ONE_DAY;
    pub const ONE_YEAR: i64 = 365 * ONE_DAY;
}

pub mod decimals {
    pub const CO2_GRAMS: usize = 2;
    pub const CO2_KG: usize = 2;
    pub const TOKENS: usize = 0;
    pub const PERCENTAGES: usize = 1;
    pub const COMPARISONS: usize = 1;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    UsEast,
    UsWest,
    EuWest,
    EuNorth,
    AsiaPacific,
    #[default]
    Global,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::UsEast,
        Region::UsWest,
        Region::EuWest,
        Region::EuNorth,
        Region::AsiaPacific,
        Region::Global,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Region::UsEast => "US_EAST",
            Region::UsWest => "US_WEST",
            Region::EuWest => "EU_WEST",
            Region::EuNorth => "EU_NORTH",
            Region::AsiaPacific => "ASIA_PACIFIC",
            Region::Global => "GLOBAL",
        }
    }

    /// kg CO2e per kWh.
    pub fn carbon_intensity(self) -> f64 {
        match self {
            Region::UsEast => 0.385,
            Region::UsWest => 0.313,
            Region::EuWest => 0.295,
            Region::EuNorth => 0.008,
            Region::AsiaPacific => 0.581,
            Region::Global => CARBON_INTENSITY_GLOBAL,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.code() == value)
            .ok_or_else(|| ParseError::UnknownRegion(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiColor {
    Green,
    Yellow,
    Red,
}

impl UiColor {
    pub fn emoji(self) -> &'static str {
        match self {
            UiColor::Green => "🌱",
            UiColor::Yellow => "🟡",
            UiColor::Red => "🔴",
        }
    }
}

/// Lookup by region code; absent or unknown codes use the global intensity.
pub fn carbon_intensity(region: Option<&str>) -> f64 {
    region
        .and_then(|code| code.parse::<Region>().ok())
        .map(Region::carbon_intensity)
        .unwrap_or(CARBON_INTENSITY_GLOBAL)
}

pub fn ui_color(co2_grams: f64) -> UiColor {
    if co2_grams < thresholds::LOW {
        UiColor::Green
    } else if co2_grams < thresholds::MEDIUM {
        UiColor::Yellow
    } else {
        UiColor::Red
    }
}

pub fn ui_emoji(co2_grams: f64) -> &'static str {
    ui_color(co2_grams).emoji()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_region_uses_global_intensity() {
        assert_eq!(carbon_intensity(Some("not-a-region")), carbon_intensity(None));
        assert_eq!(carbon_intensity(None), 0.429);
    }

    #[test]
    fn known_region_codes_resolve() {
        assert_eq!(carbon_intensity(Some("EU_NORTH")), 0.008);
        assert_eq!(carbon_intensity(Some("US_EAST")), 0.385);
        // Codes are exact.
        assert_eq!(carbon_intensity(Some("eu_north")), CARBON_INTENSITY_GLOBAL);
    }

    #[test]
    fn region_code_round_trips_through_from_str() {
        for region in Region::ALL {
            assert_eq!(region.code().parse::<Region>().expect("region"), region);
        }
    }

    #[test]
    fn ui_color_boundaries() {
        assert_eq!(ui_color(9.0), UiColor::Green);
        assert_eq!(ui_color(10.0), UiColor::Yellow);
        assert_eq!(ui_color(49.9), UiColor::Yellow);
        assert_eq!(ui_color(50.0), UiColor::Red);
        assert_eq!(ui_emoji(0.0), "🌱");
        assert_eq!(ui_emoji(50.0), "🔴");
    }
}
