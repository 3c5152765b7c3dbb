//! CO2 Accounting
//!
//! Converts biomass increments into fixed CO2 and aggregates a finished run.
//!
//! $$CO_2 = \max(\Delta X, 0) \cdot D \cdot 1000 \cdot r_{CO_2} \cdot A$$
//!
//! where $\Delta X$ is the daily concentration change (g/L), $D$ the depth (m), $A$ the
//! surface area (m2) and $r_{CO_2}$ the CO2-to-biomass ratio. A declining day fixes
//! nothing and a harvest removes standing biomass without touching the ledger.
//!
//! The ledger is kept in grams. Conversion to kilograms and tonnes happens once, when the
//! summary is built.

use crate::climate::Season;
use crate::kinetics::productivity_warning;
use crate::parameters::{CarbonParameters, PondGeometry};
use crate::results::{DailyRecord, HarvestEvent, SeasonalSummary, SimulationSummary};
use crate::FloatValue;
use log::warn;
use serde::{Deserialize, Serialize};

pub const G_PER_KG: FloatValue = 1.0e3;
pub const G_PER_TONNE: FloatValue = 1.0e6;

/// CO2 (g) fixed by a concentration change of `delta_biomass` (g/L) over the whole pond.
pub fn co2_from_biomass_delta(
    delta_biomass: FloatValue,
    pond: &PondGeometry,
    carbon: &CarbonParameters,
) -> FloatValue {
    delta_biomass.max(0.0) * pond.volume_litres() * carbon.co2_biomass_ratio
}

/// Dry biomass (kg) removed by taking the pond from `before` to `after` (g/L).
pub fn harvested_biomass_kg(before: FloatValue, after: FloatValue, pond: &PondGeometry) -> FloatValue {
    (before - after).max(0.0) * pond.volume_litres() / G_PER_KG
}

/// Running total of fixed CO2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonLedger {
    total_g: FloatValue,
}

impl CarbonLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book the CO2 fixed by one day's growth and return the daily amount (g).
    pub fn record(
        &mut self,
        delta_biomass: FloatValue,
        pond: &PondGeometry,
        carbon: &CarbonParameters,
    ) -> FloatValue {
        let daily = co2_from_biomass_delta(delta_biomass, pond, carbon);
        self.total_g += daily;
        daily
    }

    pub fn total_g(&self) -> FloatValue {
        self.total_g
    }
}

fn mean(values: impl Iterator<Item = FloatValue>) -> FloatValue {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as FloatValue
    }
}

/// Captured biomass per square metre for a record; zero on declining days.
fn captured_productivity(record: &DailyRecord) -> FloatValue {
    record.productivity.max(0.0)
}

/// Aggregate a completed run.
pub fn summarize(
    daily: &[DailyRecord],
    harvests: &[HarvestEvent],
    ledger: &CarbonLedger,
    final_biomass: FloatValue,
) -> SimulationSummary {
    let mean_productivity = mean(daily.iter().map(captured_productivity));

    let seasonal = Season::ALL
        .iter()
        .filter_map(|&season| {
            let records: Vec<&DailyRecord> = daily.iter().filter(|r| r.season == season).collect();
            if records.is_empty() {
                return None;
            }
            Some(SeasonalSummary {
                season,
                days: records.len(),
                co2_g: records.iter().map(|r| r.co2_daily_g).sum(),
                mean_productivity: mean(records.iter().map(|r| captured_productivity(r))),
            })
        })
        .collect();

    let warnings: Vec<String> = productivity_warning(mean_productivity).into_iter().collect();
    for warning in &warnings {
        warn!("{}", warning);
    }

    let total_co2_g = ledger.total_g();
    SimulationSummary {
        mean_growth_rate: mean(daily.iter().map(|r| r.growth_rate)),
        mean_productivity,
        total_co2_g,
        total_co2_kg: total_co2_g / G_PER_KG,
        total_co2_tonnes: total_co2_g / G_PER_TONNE,
        harvest_count: harvests.len(),
        total_harvested_kg: harvests.iter().map(|h| h.harvested_biomass_kg).sum(),
        final_biomass,
        seasonal,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    fn record(day: usize, season: Season, productivity: FloatValue, co2: FloatValue) -> DailyRecord {
        DailyRecord {
            day,
            month: 1,
            season,
            biomass: 1.0,
            growth_rate: productivity / 300.0,
            light_response: 0.5,
            mean_irradiance: 100.0,
            productivity,
            co2_daily_g: co2,
            co2_cumulative_g: 0.0,
            harvested: false,
        }
    }

    #[test]
    fn declines_fix_no_co2() {
        let pond = PondGeometry::default();
        let carbon = CarbonParameters::default();
        assert_eq!(co2_from_biomass_delta(-0.1, &pond, &carbon), 0.0);
        // 0.01 g/L * 30000 L * 1.83
        assert!(is_close!(co2_from_biomass_delta(0.01, &pond, &carbon), 549.0));
    }

    #[test]
    fn ledger_accumulates() {
        let pond = PondGeometry::default();
        let carbon = CarbonParameters::default();
        let mut ledger = CarbonLedger::new();
        let first = ledger.record(0.01, &pond, &carbon);
        ledger.record(-0.02, &pond, &carbon);
        let third = ledger.record(0.005, &pond, &carbon);
        assert!(is_close!(ledger.total_g(), first + third));
    }

    #[test]
    fn harvest_mass() {
        let pond = PondGeometry::default();
        // 1.5 g/L over 30000 L
        assert!(is_close!(harvested_biomass_kg(2.0, 0.5, &pond), 45.0));
    }

    #[test]
    fn summary_converts_units_once() {
        let daily = vec![
            record(1, Season::Dry, 6.0, 1_000.0),
            record(2, Season::Dry, -2.0, 0.0),
            record(3, Season::Monsoon, 9.0, 1_500.0),
        ];
        let mut ledger = CarbonLedger::new();
        ledger.total_g = 2_500.0;
        let summary = summarize(&daily, &[], &ledger, 1.2);

        assert!(is_close!(summary.total_co2_kg, 2.5));
        assert!(is_close!(summary.total_co2_tonnes, 0.0025));
        assert!(is_close!(summary.mean_productivity, 5.0));
        assert_eq!(summary.harvest_count, 0);
        assert_eq!(summary.final_biomass, 1.2);
        assert!(summary.warnings.is_empty());

        let seasons: Vec<Season> = summary.seasonal.iter().map(|s| s.season).collect();
        assert_eq!(seasons, vec![Season::Dry, Season::Monsoon]);
        assert_eq!(summary.seasonal[0].days, 2);
        assert!(is_close!(summary.seasonal[0].mean_productivity, 3.0));
        assert!(is_close!(summary.seasonal[1].co2_g, 1_500.0));
    }

    #[test]
    fn unrealistic_productivity_warns() {
        let daily = vec![record(1, Season::Hot, 14.0, 100.0)];
        let summary = summarize(&daily, &[], &CarbonLedger::new(), 1.0);
        assert_eq!(summary.warnings.len(), 1);
    }
}
