use crate::errors::{ensure_positive, AlgaeSimResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Number of equal-thickness layers used for depth integration of the light field.
pub const LAYER_COUNT: usize = 20;

pub const LITRES_PER_CUBIC_METRE: FloatValue = 1000.0;

/// Open raceway pond geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PondGeometry {
    /// Free surface area
    /// unit: m2
    /// default: 100.0
    pub surface_area: FloatValue,

    /// Culture depth
    /// unit: m
    /// default: 0.3
    pub depth: FloatValue,
}

impl Default for PondGeometry {
    fn default() -> Self {
        Self {
            surface_area: 100.0,
            depth: 0.3,
        }
    }
}

impl PondGeometry {
    pub fn new(surface_area: FloatValue, depth: FloatValue) -> AlgaeSimResult<Self> {
        let pond = Self {
            surface_area,
            depth,
        };
        pond.validate()?;
        Ok(pond)
    }

    pub fn validate(&self) -> AlgaeSimResult<()> {
        ensure_positive("pond.surface_area", self.surface_area)?;
        ensure_positive("pond.depth", self.depth)
    }

    /// Culture volume in litres.
    pub fn volume_litres(&self) -> FloatValue {
        self.surface_area * self.depth * LITRES_PER_CUBIC_METRE
    }

    /// Litres of culture under each square metre of surface.
    pub fn litres_per_square_metre(&self) -> FloatValue {
        self.depth * LITRES_PER_CUBIC_METRE
    }

    /// Convert a volumetric concentration (g/L) into an areal density (g/m2).
    pub fn areal_density(&self, concentration: FloatValue) -> FloatValue {
        concentration * self.litres_per_square_metre()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn volume_of_default_pond() {
        let pond = PondGeometry::default();
        // 100 m2 * 0.3 m = 30 m3
        assert!(is_close!(pond.volume_litres(), 30_000.0));
        assert!(is_close!(pond.areal_density(1.0), 300.0));
    }

    #[test]
    fn zero_depth_rejected() {
        let err = PondGeometry::new(100.0, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("pond.depth"));
    }
}
