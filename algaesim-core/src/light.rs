//! Light Attenuation
//!
//! Depth-resolved light field of an open pond and the growth response it supports.
//!
//! # What This Module Does
//!
//! 1. Computes the total attenuation coefficient from biomass self-shading and the
//!    background extinction of the medium
//! 2. Evaluates Beer-Lambert irradiance at the midpoint of each of the
//!    [`LAYER_COUNT`] layers
//! 3. Applies the Steele photoinhibition response to each layer
//! 4. Returns the mean of the per-layer *responses*
//!
//! The Steele curve is not linear, so the response of the mean irradiance is not the mean
//! response. Only the latter is used for growth.
//!
//! $$I(z) = I_0 \exp(-(\sigma_X X + k_{bg}) z)$$
//!
//! $$f(I) = \frac{I}{I_{opt}} \exp\left(1 - \frac{I}{I_{opt}}\right)$$
//!
//! $$\bar{f} = \frac{1}{L} \sum_{i=0}^{L-1} f\left(I\left(\frac{(i + 0.5) D}{L}\right)\right)$$

use crate::parameters::{LightParameters, LAYER_COUNT};
use crate::FloatValue;

/// Below this optical depth (K * D) the water column is treated as uniformly lit.
pub const UNIFORM_OPTICAL_DEPTH: FloatValue = 1e-10;

/// Total attenuation coefficient (1/m) for a biomass concentration (g/L).
pub fn attenuation_coefficient(light: &LightParameters, biomass: FloatValue) -> FloatValue {
    light.sigma_x * biomass + light.background_attenuation
}

/// Irradiance at depth `z` (m) for surface irradiance `i0` and attenuation `k` (1/m).
pub fn beer_lambert(i0: FloatValue, k: FloatValue, z: FloatValue) -> FloatValue {
    i0 * (-k * z).exp()
}

/// Steele photoinhibition response.
///
/// Rises from 0, peaks at exactly 1 when `irradiance == i_opt` and declines beyond it.
/// Non-positive irradiance gives no response.
pub fn steele_response(irradiance: FloatValue, i_opt: FloatValue) -> FloatValue {
    if irradiance <= 0.0 {
        return 0.0;
    }
    let ratio = irradiance / i_opt;
    ratio * (1.0 - ratio).exp()
}

/// Depth-averaged Steele response of a pond with surface PAR `i0` (umol/m2/s).
///
/// # Arguments
///
/// * `i0` - Surface irradiance, already discounted for cloud cover
/// * `biomass` - Biomass concentration (g/L)
/// * `depth` - Culture depth (m)
/// * `light` - Attenuation parameters
/// * `i_opt` - Optimal irradiance of the species
pub fn depth_averaged_light_response(
    i0: FloatValue,
    biomass: FloatValue,
    depth: FloatValue,
    light: &LightParameters,
    i_opt: FloatValue,
) -> FloatValue {
    if i0 <= 0.0 {
        return 0.0;
    }

    let k = attenuation_coefficient(light, biomass);
    if k * depth < UNIFORM_OPTICAL_DEPTH {
        return steele_response(i0, i_opt);
    }

    let layer_thickness = depth / LAYER_COUNT as FloatValue;
    let total: FloatValue = (0..LAYER_COUNT)
        .map(|i| {
            let z = (i as FloatValue + 0.5) * layer_thickness;
            steele_response(beer_lambert(i0, k, z), i_opt)
        })
        .sum();

    total / LAYER_COUNT as FloatValue
}

/// Analytical mean irradiance over the water column, I0 (1 - exp(-KD)) / KD.
///
/// Diagnostic only. Growth is driven by [`depth_averaged_light_response`].
pub fn depth_averaged_irradiance(i0: FloatValue, k: FloatValue, depth: FloatValue) -> FloatValue {
    if i0 <= 0.0 {
        return 0.0;
    }
    let optical_depth = k * depth;
    if optical_depth < UNIFORM_OPTICAL_DEPTH {
        return i0;
    }
    i0 * (1.0 - (-optical_depth).exp()) / optical_depth
}
