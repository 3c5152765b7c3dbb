//! A simulation integrates one pond configuration forward in daily steps.
//!
//! The [`SimulationBuilder`] collects the species, pond, run settings and climate provider,
//! validates them once and produces a [`Simulation`]. A simulation that was built is
//! guaranteed to run to completion: every per-step calculation is total.
//!
//! Each day the simulation resolves the climate sample, computes the depth-averaged light
//! response and net growth rate, advances biomass with a forward Euler step, books captured
//! CO2 and harvests the pond when the threshold is reached. The outcome of each step is
//! returned as a [`StepOutcome`] so callers can observe harvests as they happen.
//!
//! Runs share no mutable state. The same configuration always produces bit-identical
//! results.

mod builder;
mod runtime;
mod state;

pub use builder::SimulationBuilder;
pub use runtime::{Simulation, StepOutcome};
pub use state::{RunStatus, SimulationState};
