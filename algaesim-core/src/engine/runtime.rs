//! Simulation struct and daily stepping.

use super::state::{RunStatus, SimulationState};
use crate::accounting::{harvested_biomass_kg, summarize};
use crate::climate::{month_index_for_day, ClimateProvider};
use crate::errors::{AlgaeSimError, AlgaeSimResult};
use crate::kinetics::{areal_productivity, daily_growth_rate};
use crate::light::{attenuation_coefficient, depth_averaged_irradiance, depth_averaged_light_response};
use crate::parameters::{PondGeometry, SimulationConfig, SpeciesParameters};
use crate::results::{DailyRecord, HarvestEvent, RunMetadata, SimulationResults};
use crate::FloatValue;
use log::{debug, info};
use std::sync::Arc;

/// Result of advancing the simulation by one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Continued(DailyRecord),
    /// The threshold was reached and the pond was reset to the residual biomass
    Harvested(DailyRecord, HarvestEvent),
}

impl StepOutcome {
    pub fn record(&self) -> &DailyRecord {
        match self {
            StepOutcome::Continued(record) | StepOutcome::Harvested(record, _) => record,
        }
    }

    pub fn harvest(&self) -> Option<&HarvestEvent> {
        match self {
            StepOutcome::Continued(_) => None,
            StepOutcome::Harvested(_, event) => Some(event),
        }
    }
}

/// A single pond run over a fixed number of days.
///
/// Created by [`super::SimulationBuilder::build`], which has already validated every input.
#[derive(Debug)]
pub struct Simulation {
    species: SpeciesParameters,
    pond: PondGeometry,
    config: SimulationConfig,
    climate: Arc<dyn ClimateProvider>,
    state: SimulationState,
}

impl Simulation {
    pub(super) fn new(
        species: SpeciesParameters,
        pond: PondGeometry,
        config: SimulationConfig,
        climate: Arc<dyn ClimateProvider>,
    ) -> Self {
        let state = SimulationState::new(config.initial_biomass, config.duration_days);
        Self {
            species,
            pond,
            config,
            climate,
            state,
        }
    }

    pub fn species(&self) -> &SpeciesParameters {
        &self.species
    }

    pub fn pond(&self) -> &PondGeometry {
        &self.pond
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current standing biomass (g/L).
    pub fn biomass(&self) -> FloatValue {
        self.state.biomass
    }

    pub fn status(&self) -> RunStatus {
        if self.finished() {
            RunStatus::Completed
        } else {
            RunStatus::Running
        }
    }

    /// Returns true once every day of the run has been simulated.
    pub fn finished(&self) -> bool {
        self.state.day >= self.config.duration_days
    }

    /// Advance the simulation by one day.
    pub fn step(&mut self) -> AlgaeSimResult<StepOutcome> {
        if self.finished() {
            return Err(AlgaeSimError::AlreadyCompleted(self.state.day));
        }

        let day_index = self.state.day;
        let month_index = month_index_for_day(self.config.start_month_index(), day_index);
        let climate = self.climate.sample(month_index);

        let biomass = self.state.biomass;
        let depth = self.pond.depth;
        let light_response = depth_averaged_light_response(
            climate.par_surface,
            biomass,
            depth,
            &self.species.light,
            self.species.growth.i_opt,
        );
        let mean_irradiance = depth_averaged_irradiance(
            climate.par_surface,
            attenuation_coefficient(&self.species.light, biomass),
            depth,
        );

        let growth = daily_growth_rate(
            &self.species,
            light_response,
            self.config.co2_concentration,
            &climate,
        );

        // Forward Euler
        let mut next_biomass = biomass + growth.net * biomass;
        let co2_daily_g =
            self.state
                .ledger
                .record(next_biomass - biomass, &self.pond, &self.species.carbon);

        let day = day_index + 1;
        let harvest = if next_biomass >= self.config.harvest_threshold {
            let residual = self.config.residual();
            let event = HarvestEvent {
                day,
                biomass_before: next_biomass,
                biomass_after: residual,
                harvested_biomass_kg: harvested_biomass_kg(next_biomass, residual, &self.pond),
            };
            debug!(
                "Harvest on day {}: {:.3} -> {:.3} g/L ({:.1} kg)",
                day, event.biomass_before, event.biomass_after, event.harvested_biomass_kg
            );
            next_biomass = residual;
            Some(event)
        } else {
            None
        };

        let record = DailyRecord {
            day,
            month: month_index as u32 + 1,
            season: climate.season,
            biomass: next_biomass,
            growth_rate: growth.net,
            light_response,
            mean_irradiance,
            productivity: areal_productivity(growth.net, biomass, depth),
            co2_daily_g,
            co2_cumulative_g: self.state.cumulative_co2_g(),
            harvested: harvest.is_some(),
        };

        self.state.biomass = next_biomass;
        self.state.day = day;
        self.state.daily.push(record);

        Ok(match harvest {
            Some(event) => {
                self.state.harvests.push(event);
                StepOutcome::Harvested(record, event)
            }
            None => StepOutcome::Continued(record),
        })
    }

    /// Step until every day has been simulated and produce the results.
    ///
    /// Days already simulated with [`Simulation::step`] are kept.
    pub fn run(mut self) -> SimulationResults {
        info!(
            "Running {} for {} days from month {} ({})",
            self.species.name,
            self.config.duration_days,
            self.config.start_month,
            self.climate.description()
        );

        while !self.finished() {
            // Cannot fail while days remain
            if self.step().is_err() {
                break;
            }
        }

        let results = self.into_results();
        info!(
            "Completed {} days: {:.1} kg CO2 captured, {} harvests",
            results.metadata.duration_days,
            results.summary.total_co2_kg,
            results.summary.harvest_count
        );
        results
    }

    fn into_results(self) -> SimulationResults {
        let SimulationState {
            biomass,
            ledger,
            harvests,
            daily,
            ..
        } = self.state;

        let summary = summarize(&daily, &harvests, &ledger, biomass);
        SimulationResults {
            metadata: RunMetadata {
                species: self.species.name,
                climate: self.climate.description(),
                duration_days: self.config.duration_days,
                start_month: self.config.start_month,
                surface_area: self.pond.surface_area,
                depth: self.pond.depth,
            },
            summary,
            harvests,
            daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulationBuilder;
    use crate::parameters::SimulationConfig;
    use is_close::is_close;

    fn short_run(duration_days: usize) -> Simulation {
        SimulationBuilder::new()
            .with_config(SimulationConfig {
                duration_days,
                ..Default::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn first_day_matches_hand_calculation() {
        let mut simulation = short_run(1);
        let outcome = simulation.step().unwrap();
        let record = outcome.record();

        assert_eq!(record.day, 1);
        assert_eq!(record.month, 1);
        assert!(!record.harvested);
        // Surat January from 0.5 g/L
        assert!(is_close!(record.biomass, 0.50758, abs_tol = 1e-4));
        assert!(is_close!(record.co2_daily_g, 415.9, abs_tol = 1.0));
        assert_eq!(record.co2_cumulative_g, record.co2_daily_g);
        assert!(simulation.finished());
    }

    #[test]
    fn stepping_past_the_end_fails() {
        let mut simulation = short_run(1);
        simulation.step().unwrap();
        assert_eq!(simulation.status(), RunStatus::Completed);
        assert_eq!(simulation.step(), Err(AlgaeSimError::AlreadyCompleted(1)));
    }

    #[test]
    fn harvest_resets_to_residual() {
        let mut simulation = SimulationBuilder::new()
            .with_config(SimulationConfig {
                duration_days: 10,
                start_month: 7,
                initial_biomass: 1.0,
                harvest_threshold: 1.02,
                residual_biomass: Some(0.8),
                co2_concentration: 5.0,
            })
            .build()
            .unwrap();

        let outcome = simulation.step().unwrap();
        let event = outcome.harvest().expect("first monsoon day should cross 1.02 g/L");
        assert_eq!(event.day, 1);
        assert!(event.biomass_before >= 1.02);
        assert_eq!(event.biomass_after, 0.8);
        assert_eq!(simulation.biomass(), 0.8);
        assert!(outcome.record().harvested);
        assert!(outcome.record().co2_daily_g > 0.0);
    }

    #[test]
    fn harvest_threshold_is_inclusive() {
        let mut first_day = short_run(1);
        first_day.step().unwrap();
        let reached = first_day.biomass();
        assert!(reached > 0.5);

        let mut simulation = SimulationBuilder::new()
            .with_config(SimulationConfig {
                duration_days: 1,
                harvest_threshold: reached,
                ..Default::default()
            })
            .build()
            .unwrap();

        let outcome = simulation.step().unwrap();
        let event = outcome
            .harvest()
            .expect("biomass equal to the threshold should be harvested");
        assert_eq!(event.day, 1);
        assert_eq!(event.biomass_before, reached);
        assert_eq!(event.biomass_after, 0.5);
        assert_eq!(simulation.biomass(), 0.5);
        assert!(simulation.finished());
    }

    #[test]
    fn run_continues_after_manual_steps() {
        let mut simulation = short_run(5);
        simulation.step().unwrap();
        simulation.step().unwrap();
        let results = simulation.run();
        assert_eq!(results.days(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn results_carry_metadata() {
        let results = short_run(3).run();
        assert_eq!(results.metadata.species, "Chlorella vulgaris");
        assert_eq!(results.metadata.duration_days, 3);
        assert_eq!(results.metadata.start_month, 1);
        assert_eq!(results.summary.final_biomass, results.daily[2].biomass);
    }
}
