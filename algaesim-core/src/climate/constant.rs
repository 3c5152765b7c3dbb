use super::{ClimateProvider, ClimateSample};
use crate::errors::AlgaeSimResult;
use serde::{Deserialize, Serialize};

/// Returns the same sample for every day of the run.
///
/// Used when a caller overrides the site climate with fixed conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantClimate {
    pub sample: ClimateSample,
}

impl ConstantClimate {
    pub fn new(sample: ClimateSample) -> AlgaeSimResult<Self> {
        sample.validate()?;
        Ok(Self { sample })
    }
}

#[typetag::serde]
impl ClimateProvider for ConstantClimate {
    fn sample(&self, _month_index: usize) -> ClimateSample {
        self.sample
    }

    fn description(&self) -> String {
        format!(
            "Constant ({:.0} umol/m2/s, {:.1}/{:.1} degC)",
            self.sample.par_surface, self.sample.temp_day, self.sample.temp_night
        )
    }
}
