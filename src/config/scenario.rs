use super::{
    parse_document, read_document, ClimateDocument, ConfigError, ParameterRange, SpeciesDocument,
};
use algaesim_core::climate::{ClimateProvider, MonthlyClimateProfile};
use algaesim_core::parameters::{
    PondGeometry, SimulationConfig, SpeciesParameters, MAX_DURATION_DAYS,
};
use algaesim_core::{SimulationBuilder, SimulationResults};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const INITIAL_BIOMASS: ParameterRange = ParameterRange::closed(0.01, 5.0);
const HARVEST_THRESHOLD: ParameterRange = ParameterRange::closed(0.5, 10.0);
const CO2_CONCENTRATION: ParameterRange = ParameterRange::closed(0.0, 50.0);
const DEPTH: ParameterRange = ParameterRange::closed(0.05, 2.0);
const SURFACE_AREA: ParameterRange = ParameterRange::closed(1.0, 10000.0);

fn default_duration_days() -> usize {
    365
}

fn default_start_month() -> u32 {
    1
}

fn default_initial_biomass() -> f64 {
    0.5
}

fn default_harvest_threshold() -> f64 {
    2.0
}

fn default_co2_concentration() -> f64 {
    5.0
}

fn default_depth() -> f64 {
    0.3
}

fn default_surface_area() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    #[serde(default = "default_duration_days")]
    pub duration_days: usize,
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// unit: g/L
    #[serde(default = "default_initial_biomass")]
    pub initial_biomass: f64,
    /// unit: g/L
    #[serde(default = "default_harvest_threshold")]
    pub harvest_threshold: f64,
    /// unit: g/L, defaults to `initial_biomass`
    #[serde(default)]
    pub residual_biomass: Option<f64>,
    /// unit: mg/L
    #[serde(default = "default_co2_concentration")]
    pub co2_concentration: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            duration_days: default_duration_days(),
            start_month: default_start_month(),
            initial_biomass: default_initial_biomass(),
            harvest_threshold: default_harvest_threshold(),
            residual_biomass: None,
            co2_concentration: default_co2_concentration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PondSection {
    /// unit: m
    #[serde(default = "default_depth")]
    pub depth: f64,
    /// unit: m2
    #[serde(default = "default_surface_area")]
    pub surface_area: f64,
}

impl Default for PondSection {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            surface_area: default_surface_area(),
        }
    }
}

/// Run settings plus optional paths to the species and climate documents.
///
/// Paths are relative to the scenario file. Omitted documents fall back to the bundled
/// *Chlorella vulgaris* and Surat tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDocument {
    #[serde(default)]
    pub species: Option<PathBuf>,
    #[serde(default)]
    pub climate: Option<PathBuf>,
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub pond: PondSection,
}

impl ScenarioDocument {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let document: ScenarioDocument = parse_document(text, origin)?;
        debug!("Loaded scenario document from {}", origin.display());
        Ok(document)
    }

    pub fn to_config(&self) -> Result<SimulationConfig, ConfigError> {
        let section = &self.simulation;
        let duration = ParameterRange::closed(1.0, MAX_DURATION_DAYS as f64);
        duration.check("simulation.duration_days", section.duration_days as f64)?;
        ParameterRange::closed(1.0, 12.0)
            .check("simulation.start_month", f64::from(section.start_month))?;
        INITIAL_BIOMASS.check("simulation.initial_biomass", section.initial_biomass)?;
        HARVEST_THRESHOLD.check("simulation.harvest_threshold", section.harvest_threshold)?;
        if let Some(residual) = section.residual_biomass {
            INITIAL_BIOMASS.check("simulation.residual_biomass", residual)?;
        }
        CO2_CONCENTRATION.check("simulation.co2_concentration", section.co2_concentration)?;

        let config = SimulationConfig {
            duration_days: section.duration_days,
            start_month: section.start_month,
            initial_biomass: section.initial_biomass,
            harvest_threshold: section.harvest_threshold,
            residual_biomass: section.residual_biomass,
            co2_concentration: section.co2_concentration,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_pond(&self) -> Result<PondGeometry, ConfigError> {
        DEPTH.check("pond.depth", self.pond.depth)?;
        SURFACE_AREA.check("pond.surface_area", self.pond.surface_area)?;
        Ok(PondGeometry::new(self.pond.surface_area, self.pond.depth)?)
    }
}

/// A fully resolved and validated scenario.
///
/// Holds the source documents alongside the parameters built from them so that citations
/// can be reported for exactly the data that was simulated.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub species_document: SpeciesDocument,
    pub climate_document: ClimateDocument,
    pub species: SpeciesParameters,
    pub climate: MonthlyClimateProfile,
    pub pond: PondGeometry,
    pub config: SimulationConfig,
}

impl Scenario {
    /// Bundled species and climate with default pond and run settings.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::resolve(
            ScenarioDocument::default(),
            SpeciesDocument::bundled()?,
            ClimateDocument::bundled()?,
        )
    }

    /// Load a scenario file and the documents it refers to.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read_document(path)?;
        let document = ScenarioDocument::from_toml_str(&text, path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let species = match &document.species {
            Some(file) => SpeciesDocument::load(base_dir.join(file))?,
            None => SpeciesDocument::bundled()?,
        };
        let climate = match &document.climate {
            Some(file) => ClimateDocument::load(base_dir.join(file))?,
            None => ClimateDocument::bundled()?,
        };
        Self::resolve(document, species, climate)
    }

    fn resolve(
        document: ScenarioDocument,
        species_document: SpeciesDocument,
        climate_document: ClimateDocument,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            species: species_document.to_parameters()?,
            climate: climate_document.to_profile()?,
            pond: document.to_pond()?,
            config: document.to_config()?,
            species_document,
            climate_document,
        })
    }

    /// Replace the species with the document at `path`.
    pub fn with_species_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let species_document = SpeciesDocument::load(path)?;
        Ok(Self {
            species: species_document.to_parameters()?,
            species_document,
            ..self
        })
    }

    /// Replace the climate with the document at `path`.
    pub fn with_climate_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let climate_document = ClimateDocument::load(path)?;
        Ok(Self {
            climate: climate_document.to_profile()?,
            climate_document,
            ..self
        })
    }

    pub fn with_duration(self, duration_days: usize) -> Result<Self, ConfigError> {
        ParameterRange::closed(1.0, MAX_DURATION_DAYS as f64)
            .check("simulation.duration_days", duration_days as f64)?;
        Ok(Self {
            config: SimulationConfig {
                duration_days,
                ..self.config
            },
            ..self
        })
    }

    pub fn with_start_month(self, start_month: u32) -> Result<Self, ConfigError> {
        ParameterRange::closed(1.0, 12.0).check("simulation.start_month", f64::from(start_month))?;
        Ok(Self {
            config: SimulationConfig {
                start_month,
                ..self.config
            },
            ..self
        })
    }

    pub fn builder(&self) -> SimulationBuilder {
        let climate: Arc<dyn ClimateProvider> = Arc::new(self.climate.clone());
        let mut builder = SimulationBuilder::new();
        builder
            .with_species(self.species.clone())
            .with_pond(self.pond)
            .with_config(self.config)
            .with_climate(climate);
        builder
    }

    pub fn run(&self) -> Result<SimulationResults, ConfigError> {
        Ok(self.builder().build()?.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let document = ScenarioDocument::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(document.to_config().unwrap(), SimulationConfig::default());
        assert_eq!(document.to_pond().unwrap(), PondGeometry::default());
    }

    #[test]
    fn partial_sections_filled_in() {
        let document = ScenarioDocument::from_toml_str(
            r#"
            [simulation]
            duration_days = 90
            start_month = 6

            [pond]
            depth = 0.2
            "#,
            Path::new("partial.toml"),
        )
        .unwrap();
        let config = document.to_config().unwrap();
        assert_eq!(config.duration_days, 90);
        assert_eq!(config.start_month, 6);
        assert_eq!(config.initial_biomass, 0.5);
        assert_eq!(document.to_pond().unwrap().surface_area, 100.0);
    }

    #[test]
    fn duration_capped() {
        let document = ScenarioDocument {
            simulation: SimulationSection {
                duration_days: MAX_DURATION_DAYS + 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = document.to_config().unwrap_err();
        assert_eq!(err.field(), Some("simulation.duration_days"));
    }

    #[test]
    fn shallow_pond_rejected() {
        let document = ScenarioDocument {
            pond: PondSection {
                depth: 0.01,
                surface_area: 100.0,
            },
            ..Default::default()
        };
        assert_eq!(document.to_pond().unwrap_err().field(), Some("pond.depth"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result = ScenarioDocument::from_toml_str("[reactor]\nvolume = 3", Path::new("x.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn overrides_keep_other_settings() {
        let scenario = Scenario::bundled()
            .unwrap()
            .with_duration(30)
            .unwrap()
            .with_start_month(4)
            .unwrap();
        assert_eq!(scenario.config.duration_days, 30);
        assert_eq!(scenario.config.start_month, 4);
        assert_eq!(scenario.config.harvest_threshold, 2.0);
        assert!(scenario.clone().with_start_month(13).is_err());
    }
}
