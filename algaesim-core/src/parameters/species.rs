//! Species parameters
//!
//! Growth kinetics, light absorption, carbon stoichiometry and cardinal temperatures for a
//! single microalgal species.
//!
//! # References
//!
//! - Schediwy et al. (2019): *C. vulgaris* kinetic parameters (mu_max, K_s, CO2 ratio)
//! - Razzak et al. (2024), citing Metsoviti et al.: I_opt = 80 umol/m2/s
//! - Bernard & Remond (2012), Converti et al. (2009): cardinal temperatures

use crate::errors::{ensure_positive, ensure_within, AlgaeSimError, AlgaeSimResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Monod / Steele growth kinetics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParameters {
    /// Maximum specific growth rate
    /// unit: 1/d
    /// default: 1.0
    pub mu_max: FloatValue,

    /// Half-saturation constant for dissolved CO2
    /// unit: mg/L
    /// default: 0.5
    pub ks_co2: FloatValue,

    /// Optimal irradiance of the Steele photoinhibition curve
    /// unit: umol/m2/s
    /// default: 80.0
    pub i_opt: FloatValue,

    /// Maintenance respiration rate, charged during the dark hours
    /// unit: 1/d
    /// default: 0.01 (ASSUMED, no primary source)
    pub r_maintenance: FloatValue,

    /// Lab-to-field derating of the gross growth rate (40-60% yield gap midpoint)
    /// unit: dimensionless
    /// default: 0.5
    pub discount_factor: FloatValue,
}

impl Default for GrowthParameters {
    fn default() -> Self {
        Self {
            mu_max: 1.0,
            ks_co2: 0.5,
            i_opt: 80.0,
            r_maintenance: 0.01,
            discount_factor: 0.5,
        }
    }
}

/// Beer-Lambert light attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightParameters {
    /// Biomass-specific absorption (self-shading) coefficient
    /// unit: m2/g
    /// default: 0.2
    pub sigma_x: FloatValue,

    /// Background extinction of the medium (water, dissolved organics, suspended solids)
    /// unit: 1/m
    /// default: 0.5 (ASSUMED, no primary source)
    pub background_attenuation: FloatValue,
}

impl Default for LightParameters {
    fn default() -> Self {
        Self {
            sigma_x: 0.2,
            background_attenuation: 0.5,
        }
    }
}

/// Carbon stoichiometry used by the CO2 ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonParameters {
    /// Carbon mass fraction of dry biomass
    /// unit: g_C/g_DW
    /// default: 0.50
    pub carbon_content: FloatValue,

    /// CO2 fixed per unit of biomass produced, (44/12) x carbon_content
    /// unit: g_CO2/g_DW
    /// default: 1.83
    pub co2_biomass_ratio: FloatValue,
}

impl Default for CarbonParameters {
    fn default() -> Self {
        Self {
            carbon_content: 0.50,
            co2_biomass_ratio: 1.83,
        }
    }
}

impl CarbonParameters {
    /// Molar mass ratio of CO2 to carbon.
    pub const CO2_PER_CARBON: FloatValue = 44.0 / 12.0;

    /// CO2-to-biomass ratio implied by the carbon content alone.
    pub fn stoichiometric_ratio(&self) -> FloatValue {
        Self::CO2_PER_CARBON * self.carbon_content
    }
}

/// Cardinal temperatures of the CTMI thermal response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardinalTemperatures {
    /// Minimum temperature for growth
    /// unit: degC
    /// default: 8.0
    pub t_min: FloatValue,

    /// Optimal temperature, where the response is exactly 1
    /// unit: degC
    /// default: 28.0
    pub t_opt: FloatValue,

    /// Maximum temperature for growth
    /// unit: degC
    /// default: 40.0
    pub t_max: FloatValue,
}

impl Default for CardinalTemperatures {
    fn default() -> Self {
        Self {
            t_min: 8.0,
            t_opt: 28.0,
            t_max: 40.0,
        }
    }
}

impl CardinalTemperatures {
    pub fn validate(&self) -> AlgaeSimResult<()> {
        for (field, value) in [
            ("temperature.t_min", self.t_min),
            ("temperature.t_opt", self.t_opt),
            ("temperature.t_max", self.t_max),
        ] {
            if !value.is_finite() {
                return Err(AlgaeSimError::invalid(field, "must be finite"));
            }
        }
        if !(self.t_min < self.t_opt && self.t_opt < self.t_max) {
            return Err(AlgaeSimError::invalid(
                "temperature",
                format!(
                    "cardinal temperatures must satisfy t_min < t_opt < t_max, got {} / {} / {}",
                    self.t_min, self.t_opt, self.t_max
                ),
            ));
        }
        Ok(())
    }
}

/// Complete parameter set for one species.
///
/// Built once from a cited source table and shared read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParameters {
    pub name: String,
    pub growth: GrowthParameters,
    pub light: LightParameters,
    pub carbon: CarbonParameters,
    pub temperature: CardinalTemperatures,
}

impl Default for SpeciesParameters {
    fn default() -> Self {
        Self::chlorella_vulgaris()
    }
}

impl SpeciesParameters {
    /// Literature parameter set for *Chlorella vulgaris*.
    pub fn chlorella_vulgaris() -> Self {
        Self {
            name: "Chlorella vulgaris".to_string(),
            growth: GrowthParameters::default(),
            light: LightParameters::default(),
            carbon: CarbonParameters::default(),
            temperature: CardinalTemperatures::default(),
        }
    }

    /// Check the structural invariants the model relies on.
    ///
    /// Range checks against literature bounds belong to the loader; this only rejects
    /// values for which the equations are meaningless.
    pub fn validate(&self) -> AlgaeSimResult<()> {
        if self.name.trim().is_empty() {
            return Err(AlgaeSimError::invalid("species", "name must not be empty"));
        }

        ensure_positive("growth.mu_max", self.growth.mu_max)?;
        ensure_positive("growth.ks_co2", self.growth.ks_co2)?;
        ensure_positive("growth.i_opt", self.growth.i_opt)?;
        ensure_positive("growth.r_maintenance", self.growth.r_maintenance)?;
        // A maintenance rate of 1/d or more could drive Euler steps below zero biomass
        ensure_within("growth.r_maintenance", self.growth.r_maintenance, 0.0, 0.999)?;
        ensure_positive("growth.discount_factor", self.growth.discount_factor)?;
        ensure_within(
            "growth.discount_factor",
            self.growth.discount_factor,
            0.0,
            1.0,
        )?;

        ensure_positive("light.sigma_x", self.light.sigma_x)?;
        ensure_within(
            "light.background_attenuation",
            self.light.background_attenuation,
            0.0,
            FloatValue::MAX,
        )?;

        ensure_positive("carbon.carbon_content", self.carbon.carbon_content)?;
        ensure_within("carbon.carbon_content", self.carbon.carbon_content, 0.0, 1.0)?;
        ensure_positive("carbon.co2_biomass_ratio", self.carbon.co2_biomass_ratio)?;

        self.temperature.validate()
    }

    /// Copy of these parameters with different growth kinetics.
    pub fn with_growth(&self, growth: GrowthParameters) -> Self {
        Self {
            growth,
            ..self.clone()
        }
    }

    /// Copy of these parameters with different light absorption.
    pub fn with_light(&self, light: LightParameters) -> Self {
        Self {
            light,
            ..self.clone()
        }
    }

    /// Copy of these parameters with different cardinal temperatures.
    pub fn with_temperature(&self, temperature: CardinalTemperatures) -> Self {
        Self {
            temperature,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn defaults_are_valid() {
        let params = SpeciesParameters::default();
        assert_eq!(params.name, "Chlorella vulgaris");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn co2_ratio_matches_stoichiometry() {
        let carbon = CarbonParameters::default();
        // (44/12) * 0.5 = 1.833
        assert!(is_close!(
            carbon.stoichiometric_ratio(),
            carbon.co2_biomass_ratio,
            rel_tol = 1e-2
        ));
    }

    #[test]
    fn unordered_cardinal_temperatures_rejected() {
        let params = SpeciesParameters::default().with_temperature(CardinalTemperatures {
            t_min: 30.0,
            t_opt: 28.0,
            t_max: 40.0,
        });
        let err = params.validate().unwrap_err();
        assert_eq!(err.field(), Some("temperature"));
    }

    #[test]
    fn non_positive_rates_rejected() {
        let base = SpeciesParameters::default();
        let params = base.with_growth(GrowthParameters {
            mu_max: 0.0,
            ..base.growth
        });
        assert_eq!(params.validate().unwrap_err().field(), Some("growth.mu_max"));

        let params = base.with_light(LightParameters {
            sigma_x: -0.2,
            ..base.light
        });
        assert_eq!(params.validate().unwrap_err().field(), Some("light.sigma_x"));
    }

    #[test]
    fn overrides_leave_original_untouched() {
        let base = SpeciesParameters::default();
        let changed = base.with_growth(GrowthParameters {
            mu_max: 2.0,
            ..base.growth
        });
        assert_eq!(base.growth.mu_max, 1.0);
        assert_eq!(changed.growth.mu_max, 2.0);
        assert_eq!(changed.light, base.light);
    }

    #[test]
    fn test_serialization() {
        let params = SpeciesParameters::default();
        let json = serde_json::to_string(&params).expect("Serialization failed");
        let parsed: SpeciesParameters = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(params, parsed);
    }
}
