//! Growth Kinetics
//!
//! Combines the depth-averaged light response, Monod CO2 saturation and the day/night
//! temperature responses into a net daily specific growth rate.
//!
//! # What This Module Does
//!
//! 1. Gross daytime growth, scaled by the photoperiod fraction:
//!    $\mu_{day} = \mu_{max} \bar{f}(I) f(CO_2) \phi(T_{day}) \delta \frac{h}{24}$
//! 2. Maintenance respiration over the dark hours:
//!    $\mu_{night} = r \phi(T_{night}) \frac{24 - h}{24}$
//! 3. Net rate $\mu_{net} = \mu_{day} - \mu_{night}$, which is negative on days where heat
//!    stress suppresses photosynthesis more than respiration
//!
//! The light response passed in is already averaged over depth and is used as is.

use crate::climate::ClimateSample;
use crate::parameters::SpeciesParameters;
use crate::temperature::cardinal_temperature_response;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: FloatValue = 24.0;

/// Upper bound of field-realistic open-pond productivity (g/m2/d).
pub const PRODUCTIVITY_CEILING: FloatValue = 10.0;

/// Monod saturation for dissolved CO2 (mg/L).
pub fn monod_co2_response(co2: FloatValue, ks_co2: FloatValue) -> FloatValue {
    if co2 <= 0.0 {
        return 0.0;
    }
    co2 / (ks_co2 + co2)
}

/// Day, night and net specific growth rates for one simulated day (1/d).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyGrowth {
    pub day: FloatValue,
    pub night: FloatValue,
    pub net: FloatValue,
}

/// Net daily specific growth rate.
///
/// # Arguments
///
/// * `species` - Species parameters
/// * `light_response` - Depth-averaged Steele response from
///   [`crate::light::depth_averaged_light_response`]
/// * `co2` - Dissolved CO2 (mg/L)
/// * `climate` - Day/night temperature and photoperiod for the day
pub fn daily_growth_rate(
    species: &SpeciesParameters,
    light_response: FloatValue,
    co2: FloatValue,
    climate: &ClimateSample,
) -> DailyGrowth {
    let growth = &species.growth;
    let light_hours = climate.photoperiod_hours.clamp(0.0, HOURS_PER_DAY);
    let dark_hours = HOURS_PER_DAY - light_hours;

    let phi_day = cardinal_temperature_response(climate.temp_day, &species.temperature);
    let phi_night = cardinal_temperature_response(climate.temp_night, &species.temperature);

    let day = growth.mu_max
        * light_response
        * monod_co2_response(co2, growth.ks_co2)
        * phi_day
        * growth.discount_factor
        * (light_hours / HOURS_PER_DAY);
    let night = growth.r_maintenance * phi_night * (dark_hours / HOURS_PER_DAY);

    DailyGrowth {
        day,
        night,
        net: day - night,
    }
}

/// Areal productivity (g/m2/d) of a pond of `depth` (m) at concentration `biomass` (g/L).
pub fn areal_productivity(mu: FloatValue, biomass: FloatValue, depth: FloatValue) -> FloatValue {
    mu * biomass * depth * 1000.0
}

/// Warning text when a productivity exceeds what open ponds achieve in the field.
pub fn productivity_warning(productivity: FloatValue) -> Option<String> {
    (productivity > PRODUCTIVITY_CEILING).then(|| {
        format!(
            "Mean productivity {:.2} g/m2/day exceeds the field-realistic ceiling of {} g/m2/day",
            productivity, PRODUCTIVITY_CEILING
        )
    })
}
