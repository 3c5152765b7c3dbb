//! Open-pond microalgae growth and CO2 capture simulator.
//!
//! The model itself lives in [`algaesim_core`]. This crate adds the outer surface:
//!
//! - [`config`]: cited TOML documents for species and climate, and scenario files
//! - [`export`]: CSV and JSON output
//!
//! ```no_run
//! use algaesim::config::Scenario;
//!
//! let scenario = Scenario::load("scenarios/surat_annual.toml")?;
//! let results = scenario.run()?;
//! println!("{:.1} kg CO2", results.summary.total_co2_kg);
//! # Ok::<(), algaesim::config::ConfigError>(())
//! ```

pub mod config;
pub mod export;

pub use algaesim_core as model;
