//! Climate inputs
//!
//! The engine never reads climate files. It asks a [`ClimateProvider`] for the
//! [`ClimateSample`] of each day's month. Providers are responsible for applying their own
//! cloud-cover discount to PAR before the sample reaches the engine.
//!
//! Months are approximated as 30 days, so day `d` of a run that starts in month `m`
//! (1-based) falls in month index `(m - 1 + d / 30) mod 12`.

mod constant;
mod monthly;

pub use constant::ConstantClimate;
pub use monthly::{Location, MonthlyClimate, MonthlyClimateProfile, MONTH_NAMES};

use crate::errors::{ensure_within, AlgaeSimError, AlgaeSimResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

pub const DAYS_PER_MONTH: usize = 30;
pub const MONTHS_PER_YEAR: usize = 12;

/// Zero-based month index of the zero-based `day` of a run starting at `start_month_index`.
pub fn month_index_for_day(start_month_index: usize, day: usize) -> usize {
    (start_month_index + day / DAYS_PER_MONTH) % MONTHS_PER_YEAR
}

/// Fraction of clear-sky PAR transmitted under a cloud cover fraction (Kasten & Czeplak, 1980).
pub fn cloud_transmission(cloud_cover_fraction: FloatValue) -> FloatValue {
    1.0 - 0.75 * cloud_cover_fraction.clamp(0.0, 1.0).powf(3.4)
}

/// Climatic season of the Indian subcontinent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Dry,
    Hot,
    Monsoon,
}

impl Season {
    /// All seasons in reporting order.
    pub const ALL: [Season; 3] = [Season::Dry, Season::Hot, Season::Monsoon];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Dry => "Dry",
            Season::Hot => "Hot",
            Season::Monsoon => "Monsoon",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Climate forcing for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateSample {
    /// Surface PAR after the cloud-cover discount
    /// unit: umol/m2/s
    pub par_surface: FloatValue,
    /// unit: degC
    pub temp_day: FloatValue,
    /// unit: degC
    pub temp_night: FloatValue,
    /// Hours of daylight, strictly between 0 and 24
    pub photoperiod_hours: FloatValue,
    /// Fraction of clear-sky PAR transmitted through cloud
    pub cloud_cover_factor: FloatValue,
    pub season: Season,
}

impl ClimateSample {
    pub fn validate(&self) -> AlgaeSimResult<()> {
        ensure_within("climate.par_surface", self.par_surface, 0.0, FloatValue::MAX)?;
        ensure_within(
            "climate.cloud_cover_factor",
            self.cloud_cover_factor,
            0.0,
            1.0,
        )?;
        for (field, value) in [
            ("climate.temp_day", self.temp_day),
            ("climate.temp_night", self.temp_night),
        ] {
            if !value.is_finite() {
                return Err(AlgaeSimError::invalid(field, "must be finite"));
            }
        }
        if !(self.photoperiod_hours > 0.0 && self.photoperiod_hours < 24.0) {
            return Err(AlgaeSimError::invalid(
                "climate.photoperiod_hours",
                format!("must be within (0, 24), got {}", self.photoperiod_hours),
            ));
        }
        Ok(())
    }
}

/// Source of daily climate forcing.
///
/// Implementations are immutable and may be shared between concurrent runs.
#[typetag::serde(tag = "type")]
pub trait ClimateProvider: Debug + Send + Sync {
    /// Sample for a zero-based month index (0 = January).
    fn sample(&self, month_index: usize) -> ClimateSample;

    /// Human readable description of where the forcing comes from.
    fn description(&self) -> String;

    /// Check that every sample this provider can return is usable.
    fn validate(&self) -> AlgaeSimResult<()> {
        (0..MONTHS_PER_YEAR).try_for_each(|m| self.sample(m).validate())
    }

    /// Sample for the zero-based `day` of a run starting at `start_month_index`.
    fn sample_for_day(&self, start_month_index: usize, day: usize) -> ClimateSample {
        self.sample(month_index_for_day(start_month_index, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn month_mapping_wraps() {
        assert_eq!(month_index_for_day(0, 0), 0);
        assert_eq!(month_index_for_day(0, 29), 0);
        assert_eq!(month_index_for_day(0, 30), 1);
        assert_eq!(month_index_for_day(0, 359), 11);
        assert_eq!(month_index_for_day(0, 360), 0);
        assert_eq!(month_index_for_day(10, 65), 0);
    }

    #[test]
    fn cloud_transmission_bounds() {
        assert_eq!(cloud_transmission(0.0), 1.0);
        assert!(is_close!(cloud_transmission(1.0), 0.25));
        let mid = cloud_transmission(0.5);
        assert!(mid > 0.25 && mid < 1.0);
    }

    #[test]
    fn photoperiod_must_be_inside_day() {
        let mut sample = ClimateSample {
            par_surface: 400.0,
            temp_day: 30.0,
            temp_night: 20.0,
            photoperiod_hours: 12.0,
            cloud_cover_factor: 1.0,
            season: Season::Hot,
        };
        assert!(sample.validate().is_ok());
        sample.photoperiod_hours = 24.0;
        assert_eq!(
            sample.validate().unwrap_err().field(),
            Some("climate.photoperiod_hours")
        );
    }

    #[test]
    fn season_serializes_lowercase() {
        let json = serde_json::to_string(&Season::Monsoon).unwrap();
        assert_eq!(json, "\"monsoon\"");
        assert_eq!(Season::Monsoon.to_string(), "Monsoon");
    }
}
