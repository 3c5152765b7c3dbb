//! Core model for open-pond microalgae growth and CO2 capture.
//!
//! The crate converts environmental inputs (surface irradiance, day/night temperature,
//! dissolved CO2 and pond geometry) into a daily biomass trajectory and an auditable CO2
//! ledger.
//!
//! # Module Organisation
//!
//! Leaves first:
//! - `light`: depth-resolved Beer-Lambert attenuation and the Steele photoinhibition response
//! - `temperature`: cardinal-temperature (CTMI) thermal efficiency
//! - `kinetics`: Monod CO2 saturation and the combined day/night growth rate
//! - `climate`: climate samples and the providers that supply them
//! - `engine`: forward-Euler daily stepping with harvest resets
//! - `accounting`: the CO2 ledger and summary aggregation
//!
//! # Parameters
//!
//! Species, pond and run parameters live in the `parameters` module. Each struct has
//! defaults matching the cited *Chlorella vulgaris* / raceway pond configuration and is
//! validated once before a simulation is built.

pub mod accounting;
pub mod climate;
pub mod engine;
pub mod errors;
pub mod kinetics;
pub mod light;
pub mod parameters;
pub mod results;
pub mod temperature;

/// Floating point type used throughout the model.
pub type FloatValue = f64;

pub use engine::{Simulation, SimulationBuilder, StepOutcome};
pub use errors::{AlgaeSimError, AlgaeSimResult};
pub use results::SimulationResults;
