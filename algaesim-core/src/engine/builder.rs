use super::runtime::Simulation;
use crate::climate::{ClimateProvider, MonthlyClimateProfile};
use crate::errors::AlgaeSimResult;
use crate::parameters::{PondGeometry, SimulationConfig, SpeciesParameters};
use log::debug;
use std::sync::Arc;

/// Build a new simulation.
///
/// Every part defaults to the reference configuration: *Chlorella vulgaris* in a
/// 100 m2, 0.3 m deep raceway at Surat for one year starting in January.
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    species: SpeciesParameters,
    pond: PondGeometry,
    config: SimulationConfig,
    climate: Arc<dyn ClimateProvider>,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self {
            species: SpeciesParameters::default(),
            pond: PondGeometry::default(),
            config: SimulationConfig::default(),
            climate: Arc::new(MonthlyClimateProfile::surat()),
        }
    }

    pub fn with_species(&mut self, species: SpeciesParameters) -> &mut Self {
        self.species = species;
        self
    }

    pub fn with_pond(&mut self, pond: PondGeometry) -> &mut Self {
        self.pond = pond;
        self
    }

    pub fn with_config(&mut self, config: SimulationConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Set the climate provider.
    ///
    /// The provider is shared, not copied, so one profile can drive many runs.
    pub fn with_climate(&mut self, climate: Arc<dyn ClimateProvider>) -> &mut Self {
        self.climate = climate;
        self
    }

    pub fn with_duration(&mut self, duration_days: usize) -> &mut Self {
        self.config.duration_days = duration_days;
        self
    }

    pub fn with_start_month(&mut self, start_month: u32) -> &mut Self {
        self.config.start_month = start_month;
        self
    }

    /// Validate the static configuration and create the simulation.
    ///
    /// Nothing is simulated when validation fails.
    pub fn build(&self) -> AlgaeSimResult<Simulation> {
        self.species.validate()?;
        self.pond.validate()?;
        self.config.validate()?;
        self.climate.validate()?;

        debug!(
            "Built simulation of {} for {} days using {}",
            self.species.name,
            self.config.duration_days,
            self.climate.description()
        );

        Ok(Simulation::new(
            self.species.clone(),
            self.pond,
            self.config,
            Arc::clone(&self.climate),
        ))
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
