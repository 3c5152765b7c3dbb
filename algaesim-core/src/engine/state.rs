use crate::accounting::CarbonLedger;
use crate::results::{DailyRecord, HarvestEvent};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Completed,
}

/// Mutable state of a single run.
///
/// Owned exclusively by one [`super::Simulation`] and consumed when results are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Standing biomass concentration (g/L)
    pub biomass: FloatValue,
    /// Number of days already simulated
    pub day: usize,
    pub ledger: CarbonLedger,
    pub harvests: Vec<HarvestEvent>,
    pub daily: Vec<DailyRecord>,
}

impl SimulationState {
    pub fn new(initial_biomass: FloatValue, duration_days: usize) -> Self {
        Self {
            biomass: initial_biomass,
            day: 0,
            ledger: CarbonLedger::new(),
            harvests: vec![],
            daily: Vec::with_capacity(duration_days),
        }
    }

    pub fn cumulative_co2_g(&self) -> FloatValue {
        self.ledger.total_g()
    }
}
