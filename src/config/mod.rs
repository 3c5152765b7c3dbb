//! Configuration documents
//!
//! Species and climate data are TOML documents in which every number carries its unit and
//! literature source. A scenario document selects the documents to use and sets the pond
//! and run settings.
//!
//! Documents are parsed into typed sections (unknown keys are rejected), checked against
//! literature ranges and then converted once into the immutable parameter structs of
//! `algaesim_core`. The engine never sees the documents themselves.

mod climate;
mod scenario;
mod species;

pub use algaesim_core::parameters::MAX_DURATION_DAYS;
pub use climate::{ClimateDocument, MonthEntry, MonthsSection};
pub use scenario::{PondSection, Scenario, ScenarioDocument, SimulationSection};
pub use species::{
    CarbonSection, GrowthSection, LightSection, SpeciesDocument, TemperatureSection,
};

use algaesim_core::AlgaeSimError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker used in citation notes for values without a primary source.
pub const ASSUMED_MARKER: &str = "ASSUMED";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("`{field}` = {value} is outside the accepted range {range}")]
    OutOfRange {
        field: String,
        value: f64,
        range: ParameterRange,
    },
    #[error(transparent)]
    Invalid(#[from] AlgaeSimError),
}

impl ConfigError {
    /// Name of the offending field, if the error refers to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::OutOfRange { field, .. } => Some(field),
            ConfigError::Invalid(err) => err.field(),
            _ => None,
        }
    }
}

/// Accepted interval for a configuration value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub min_exclusive: bool,
    pub max_exclusive: bool,
}

impl ParameterRange {
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: false,
            max_exclusive: false,
        }
    }

    pub const fn open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
            max_exclusive: true,
        }
    }

    /// `(min, max]`
    pub const fn left_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
            max_exclusive: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        let below_max = if self.max_exclusive {
            value < self.max
        } else {
            value <= self.max
        };
        above_min && below_max
    }

    pub fn check(&self, field: &str, value: f64) -> Result<(), ConfigError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field: field.to_string(),
                value,
                range: *self,
            })
        }
    }
}

impl Display for ParameterRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.min_exclusive { '(' } else { '[' },
            self.min,
            self.max,
            if self.max_exclusive { ')' } else { ']' }
        )
    }
}

/// A parameter value with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cited<T> {
    pub value: T,
    #[serde(default)]
    pub unit: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<T> Cited<T> {
    /// True when the value has no primary literature source.
    pub fn is_assumed(&self) -> bool {
        self.note
            .as_deref()
            .map_or(false, |note| note.contains(ASSUMED_MARKER))
    }
}

impl Cited<f64> {
    pub fn checked(&self, field: &str, range: ParameterRange) -> Result<f64, ConfigError> {
        range.check(field, self.value)?;
        Ok(self.value)
    }

    fn citation(&self, parameter: impl Into<String>) -> Citation {
        Citation {
            parameter: parameter.into(),
            value: self.value,
            unit: self.unit.clone(),
            source: self.source.clone(),
            note: self.note.clone(),
            assumed: self.is_assumed(),
        }
    }
}

/// One row of the citation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub source: String,
    pub note: Option<String>,
    pub assumed: bool,
}

pub(crate) fn read_document(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_document<T: serde::de::DeserializeOwned>(
    text: &str,
    origin: &Path,
) -> Result<T, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}
