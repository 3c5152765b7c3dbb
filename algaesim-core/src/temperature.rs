//! Temperature Response
//!
//! Cardinal Temperature Model with Inflexion (Rosso et al., 1993), as applied to
//! microalgae by Bernard & Remond (2012).
//!
//! $$\phi(T) = \frac{(T - T_{max})(T - T_{min})^2}{(T_{opt} - T_{min})
//!   \left[(T_{opt} - T_{min})(T - T_{opt}) - (T_{opt} - T_{max})(T_{opt} + T_{min} - 2T)\right]}$$
//!
//! The response is 0 outside `(t_min, t_max)` and exactly 1 at `t_opt`. Day and night
//! temperatures must each be passed through [`cardinal_temperature_response`]; evaluating
//! a daily mean would hide heat inhibition during the afternoon.

use crate::parameters::CardinalTemperatures;
use crate::FloatValue;

/// Thermal efficiency in `[0, 1]` at temperature `t` (degC).
pub fn cardinal_temperature_response(t: FloatValue, cardinal: &CardinalTemperatures) -> FloatValue {
    let CardinalTemperatures {
        t_min,
        t_opt,
        t_max,
    } = *cardinal;

    if t <= t_min || t >= t_max {
        return 0.0;
    }
    if (t - t_opt).abs() < 1e-10 {
        return 1.0;
    }

    let numerator = (t - t_max) * (t - t_min).powi(2);
    let denominator =
        (t_opt - t_min) * ((t_opt - t_min) * (t - t_opt) - (t_opt - t_max) * (t_opt + t_min - 2.0 * t));

    // Only vanishes at the open-interval boundaries, where the response is zero
    if denominator.abs() < FloatValue::EPSILON {
        return 0.0;
    }

    (numerator / denominator).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn cardinal_points() {
        let cardinal = CardinalTemperatures::default();
        assert_eq!(cardinal_temperature_response(8.0, &cardinal), 0.0);
        assert_eq!(cardinal_temperature_response(40.0, &cardinal), 0.0);
        assert_eq!(cardinal_temperature_response(28.0, &cardinal), 1.0);
        assert_eq!(cardinal_temperature_response(-5.0, &cardinal), 0.0);
        assert_eq!(cardinal_temperature_response(45.0, &cardinal), 0.0);
    }

    #[test]
    fn known_values() {
        let cardinal = CardinalTemperatures::default();
        let cases = [(15.0, 0.326), (24.0, 0.914), (30.0, 0.976), (37.0, 0.457)];
        for (t, expected) in cases {
            let phi = cardinal_temperature_response(t, &cardinal);
            assert!(
                is_close!(phi, expected, abs_tol = 1e-3),
                "phi({}) = {}, expected {}",
                t,
                phi,
                expected
            );
        }
    }

    #[test]
    fn positive_inside_interval() {
        let cardinal = CardinalTemperatures::default();
        let mut t = 8.1;
        while t < 40.0 {
            let phi = cardinal_temperature_response(t, &cardinal);
            assert!(phi > 0.0 && phi <= 1.0, "phi({}) = {}", t, phi);
            t += 0.1;
        }
    }

    #[test]
    fn heat_inhibition_is_steeper_than_cold() {
        let cardinal = CardinalTemperatures::default();
        // 37 degC is 9 above optimum, 19 is 9 below
        let hot = cardinal_temperature_response(37.0, &cardinal);
        let cold = cardinal_temperature_response(19.0, &cardinal);
        assert!(hot < cold, "hot {} cold {}", hot, cold);
    }
}
