use crate::errors::{ensure_positive, ensure_within, AlgaeSimError, AlgaeSimResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Longest run the engine accepts, ten 365-day years.
pub const MAX_DURATION_DAYS: usize = 3650;

/// Run-level settings: duration, initial state and harvest policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of daily steps
    /// default: 365
    pub duration_days: usize,

    /// Calendar month of day 1 (1 = January)
    /// default: 1
    pub start_month: u32,

    /// Biomass concentration at the start of the run
    /// unit: g/L
    /// default: 0.5
    pub initial_biomass: FloatValue,

    /// Concentration at or above which the pond is harvested
    /// unit: g/L
    /// default: 2.0
    pub harvest_threshold: FloatValue,

    /// Concentration left in the pond after a harvest; `None` resets to `initial_biomass`
    /// unit: g/L
    #[serde(default)]
    pub residual_biomass: Option<FloatValue>,

    /// Dissolved CO2 concentration, held constant over the run
    /// unit: mg/L
    /// default: 5.0
    pub co2_concentration: FloatValue,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration_days: 365,
            start_month: 1,
            initial_biomass: 0.5,
            harvest_threshold: 2.0,
            residual_biomass: None,
            co2_concentration: 5.0,
        }
    }
}

impl SimulationConfig {
    /// Concentration the pond is reset to after a harvest.
    pub fn residual(&self) -> FloatValue {
        self.residual_biomass.unwrap_or(self.initial_biomass)
    }

    /// Zero-based month index of day 1.
    pub fn start_month_index(&self) -> usize {
        (self.start_month.saturating_sub(1) % 12) as usize
    }

    pub fn validate(&self) -> AlgaeSimResult<()> {
        if !(1..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(AlgaeSimError::invalid(
                "simulation.duration_days",
                format!(
                    "must be within [1, {}], got {}",
                    MAX_DURATION_DAYS, self.duration_days
                ),
            ));
        }
        if !(1..=12).contains(&self.start_month) {
            return Err(AlgaeSimError::invalid(
                "simulation.start_month",
                format!("must be within [1, 12], got {}", self.start_month),
            ));
        }
        ensure_positive("simulation.initial_biomass", self.initial_biomass)?;
        ensure_positive("simulation.harvest_threshold", self.harvest_threshold)?;
        if self.harvest_threshold <= self.initial_biomass {
            return Err(AlgaeSimError::invalid(
                "simulation.harvest_threshold",
                format!(
                    "must exceed the initial biomass ({}), got {}",
                    self.initial_biomass, self.harvest_threshold
                ),
            ));
        }
        if let Some(residual) = self.residual_biomass {
            ensure_positive("simulation.residual_biomass", residual)?;
            if residual >= self.harvest_threshold {
                return Err(AlgaeSimError::invalid(
                    "simulation.residual_biomass",
                    format!(
                        "must be below the harvest threshold ({}), got {}",
                        self.harvest_threshold, residual
                    ),
                ));
            }
        }
        ensure_within(
            "simulation.co2_concentration",
            self.co2_concentration,
            0.0,
            FloatValue::MAX,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.residual(), 0.5);
        assert_eq!(config.start_month_index(), 0);
    }

    #[test]
    fn explicit_residual_used() {
        let config = SimulationConfig {
            residual_biomass: Some(0.8),
            ..Default::default()
        };
        assert_eq!(config.residual(), 0.8);
    }

    #[test]
    fn threshold_must_exceed_initial() {
        let config = SimulationConfig {
            initial_biomass: 2.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().field(),
            Some("simulation.harvest_threshold")
        );
    }

    #[test]
    fn month_out_of_range_rejected() {
        for start_month in [0, 13] {
            let config = SimulationConfig {
                start_month,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "month {} accepted", start_month);
        }
    }

    #[test]
    fn residual_optional_in_toml() {
        let config: SimulationConfig = toml::from_str(
            r#"
            duration_days = 30
            start_month = 4
            initial_biomass = 1.5
            harvest_threshold = 2.0
            co2_concentration = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.residual_biomass, None);
        assert_eq!(config.residual(), 1.5);
        assert_eq!(config.start_month_index(), 3);
    }

    #[test]
    fn zero_duration_rejected() {
        let config = SimulationConfig {
            duration_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_duration_rejected() {
        for duration_days in [MAX_DURATION_DAYS + 1, usize::MAX] {
            let config = SimulationConfig {
                duration_days,
                ..Default::default()
            };
            assert_eq!(
                config.validate().unwrap_err().field(),
                Some("simulation.duration_days")
            );
        }
        let config = SimulationConfig {
            duration_days: MAX_DURATION_DAYS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
