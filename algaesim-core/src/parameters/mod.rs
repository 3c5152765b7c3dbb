//! Model parameters
//!
//! Immutable parameter records for a simulation run. Each struct provides defaults
//! matching the cited *Chlorella vulgaris* raceway-pond configuration.
//!
//! Parameters are never edited in place. The `with_*` methods return a new value so that
//! a record loaded once can be shared read-only between runs.

mod pond;
mod simulation;
mod species;

pub use pond::{PondGeometry, LAYER_COUNT, LITRES_PER_CUBIC_METRE};
pub use simulation::{SimulationConfig, MAX_DURATION_DAYS};
pub use species::{
    CardinalTemperatures, CarbonParameters, GrowthParameters, LightParameters, SpeciesParameters,
};
