//! Simulation results
//!
//! Immutable output of a completed run: one [`DailyRecord`] per simulated day, the harvest
//! log and the summary derived from them.

use crate::climate::Season;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// State of the pond at the end of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// 1-based day of the run
    pub day: usize,
    /// Calendar month, 1 = January
    pub month: u32,
    pub season: Season,
    /// Standing biomass after any harvest
    /// unit: g/L
    pub biomass: FloatValue,
    /// Net specific growth rate
    /// unit: 1/d
    pub growth_rate: FloatValue,
    /// Depth-averaged Steele response
    pub light_response: FloatValue,
    /// Analytical mean irradiance over the water column
    /// unit: umol/m2/s
    pub mean_irradiance: FloatValue,
    /// Net areal production before any harvest, negative on declining days
    /// unit: g/m2/d
    pub productivity: FloatValue,
    /// unit: g
    pub co2_daily_g: FloatValue,
    /// unit: g
    pub co2_cumulative_g: FloatValue,
    pub harvested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestEvent {
    /// 1-based day on which the threshold was reached
    pub day: usize,
    /// unit: g/L
    pub biomass_before: FloatValue,
    /// unit: g/L
    pub biomass_after: FloatValue,
    /// Dry biomass removed from the whole pond
    /// unit: kg
    pub harvested_biomass_kg: FloatValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalSummary {
    pub season: Season,
    pub days: usize,
    pub co2_g: FloatValue,
    /// Mean captured biomass per square metre per day
    /// unit: g/m2/d
    pub mean_productivity: FloatValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// unit: 1/d
    pub mean_growth_rate: FloatValue,
    /// Mean captured biomass per square metre per day
    /// unit: g/m2/d
    pub mean_productivity: FloatValue,
    pub total_co2_g: FloatValue,
    pub total_co2_kg: FloatValue,
    pub total_co2_tonnes: FloatValue,
    pub harvest_count: usize,
    pub total_harvested_kg: FloatValue,
    /// unit: g/L
    pub final_biomass: FloatValue,
    /// Seasons present in the run, in Dry, Hot, Monsoon order
    pub seasonal: Vec<SeasonalSummary>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub species: String,
    pub climate: String,
    pub duration_days: usize,
    pub start_month: u32,
    /// unit: m2
    pub surface_area: FloatValue,
    /// unit: m
    pub depth: FloatValue,
}

/// Finalized output of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub metadata: RunMetadata,
    pub summary: SimulationSummary,
    pub harvests: Vec<HarvestEvent>,
    pub daily: Vec<DailyRecord>,
}

impl SimulationResults {
    pub fn days(&self) -> Vec<usize> {
        self.daily.iter().map(|r| r.day).collect()
    }

    pub fn biomass_series(&self) -> Vec<FloatValue> {
        self.daily.iter().map(|r| r.biomass).collect()
    }

    pub fn growth_rate_series(&self) -> Vec<FloatValue> {
        self.daily.iter().map(|r| r.growth_rate).collect()
    }

    pub fn co2_daily_series(&self) -> Vec<FloatValue> {
        self.daily.iter().map(|r| r.co2_daily_g).collect()
    }

    pub fn co2_cumulative_series(&self) -> Vec<FloatValue> {
        self.daily.iter().map(|r| r.co2_cumulative_g).collect()
    }

    pub fn season_series(&self) -> Vec<Season> {
        self.daily.iter().map(|r| r.season).collect()
    }

    pub fn harvest_days(&self) -> Vec<usize> {
        self.harvests.iter().map(|h| h.day).collect()
    }

    /// Summary entry for `season`, if the run covered it.
    pub fn seasonal(&self, season: Season) -> Option<&SeasonalSummary> {
        self.summary.seasonal.iter().find(|s| s.season == season)
    }
}
