use super::{parse_document, read_document, Citation, Cited, ConfigError, ParameterRange};
use algaesim_core::parameters::{
    CardinalTemperatures, CarbonParameters, GrowthParameters, LightParameters, SpeciesParameters,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUNDLED_SPECIES: &str = include_str!("../../data/species/chlorella_vulgaris.toml");
const BUNDLED_ORIGIN: &str = "<bundled>/species/chlorella_vulgaris.toml";

const MU_MAX: ParameterRange = ParameterRange::closed(0.1, 5.0);
const KS_CO2: ParameterRange = ParameterRange::closed(0.01, 10.0);
const I_OPT: ParameterRange = ParameterRange::closed(10.0, 500.0);
const R_MAINTENANCE: ParameterRange = ParameterRange::left_open(0.0, 0.1);
const DISCOUNT_FACTOR: ParameterRange = ParameterRange::closed(0.1, 1.0);
const SIGMA_X: ParameterRange = ParameterRange::closed(0.01, 1.0);
const BACKGROUND_ATTENUATION: ParameterRange = ParameterRange::closed(0.0, 5.0);
const CARBON_CONTENT: ParameterRange = ParameterRange::closed(0.3, 0.7);
const CO2_BIOMASS_RATIO: ParameterRange = ParameterRange::closed(1.0, 3.0);
const T_MIN: ParameterRange = ParameterRange::closed(-10.0, 20.0);
const T_OPT: ParameterRange = ParameterRange::closed(15.0, 40.0);
const T_MAX: ParameterRange = ParameterRange::closed(25.0, 55.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrowthSection {
    pub mu_max: Cited<f64>,
    pub ks_co2: Cited<f64>,
    pub i_opt: Cited<f64>,
    pub r_maintenance: Cited<f64>,
    pub discount_factor: Cited<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightSection {
    pub sigma_x: Cited<f64>,
    pub background_attenuation: Cited<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarbonSection {
    pub carbon_content: Cited<f64>,
    pub co2_biomass_ratio: Cited<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemperatureSection {
    pub t_min: Cited<f64>,
    pub t_opt: Cited<f64>,
    pub t_max: Cited<f64>,
}

/// Cited parameter table for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeciesDocument {
    pub species: String,
    pub growth: GrowthSection,
    pub light: LightSection,
    pub carbon: CarbonSection,
    pub temperature: TemperatureSection,
}

impl SpeciesDocument {
    /// The compiled-in *Chlorella vulgaris* table.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_SPECIES, Path::new(BUNDLED_ORIGIN))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read_document(path)?;
        Self::from_toml_str(&text, path)
    }

    /// Parse a document; `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let document: SpeciesDocument = parse_document(text, origin)?;
        debug!(
            "Loaded species document for {} from {}",
            document.species,
            origin.display()
        );
        Ok(document)
    }

    /// Range-check every value and build the immutable parameters.
    pub fn to_parameters(&self) -> Result<SpeciesParameters, ConfigError> {
        let growth = GrowthParameters {
            mu_max: self.growth.mu_max.checked("growth.mu_max", MU_MAX)?,
            ks_co2: self.growth.ks_co2.checked("growth.ks_co2", KS_CO2)?,
            i_opt: self.growth.i_opt.checked("growth.i_opt", I_OPT)?,
            r_maintenance: self
                .growth
                .r_maintenance
                .checked("growth.r_maintenance", R_MAINTENANCE)?,
            discount_factor: self
                .growth
                .discount_factor
                .checked("growth.discount_factor", DISCOUNT_FACTOR)?,
        };
        let light = LightParameters {
            sigma_x: self.light.sigma_x.checked("light.sigma_x", SIGMA_X)?,
            background_attenuation: self
                .light
                .background_attenuation
                .checked("light.background_attenuation", BACKGROUND_ATTENUATION)?,
        };
        let carbon = CarbonParameters {
            carbon_content: self
                .carbon
                .carbon_content
                .checked("carbon.carbon_content", CARBON_CONTENT)?,
            co2_biomass_ratio: self
                .carbon
                .co2_biomass_ratio
                .checked("carbon.co2_biomass_ratio", CO2_BIOMASS_RATIO)?,
        };
        let temperature = CardinalTemperatures {
            t_min: self.temperature.t_min.checked("temperature.t_min", T_MIN)?,
            t_opt: self.temperature.t_opt.checked("temperature.t_opt", T_OPT)?,
            t_max: self.temperature.t_max.checked("temperature.t_max", T_MAX)?,
        };

        let parameters = SpeciesParameters {
            name: self.species.clone(),
            growth,
            light,
            carbon,
            temperature,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Every parameter with its source, in document order.
    pub fn citations(&self) -> Vec<Citation> {
        vec![
            self.growth.mu_max.citation("growth.mu_max"),
            self.growth.ks_co2.citation("growth.ks_co2"),
            self.growth.i_opt.citation("growth.i_opt"),
            self.growth.r_maintenance.citation("growth.r_maintenance"),
            self.growth.discount_factor.citation("growth.discount_factor"),
            self.light.sigma_x.citation("light.sigma_x"),
            self.light
                .background_attenuation
                .citation("light.background_attenuation"),
            self.carbon.carbon_content.citation("carbon.carbon_content"),
            self.carbon.co2_biomass_ratio.citation("carbon.co2_biomass_ratio"),
            self.temperature.t_min.citation("temperature.t_min"),
            self.temperature.t_opt.citation("temperature.t_opt"),
            self.temperature.t_max.citation("temperature.t_max"),
        ]
    }

    /// Parameters lacking a primary literature source.
    pub fn assumed_parameters(&self) -> Vec<String> {
        self.citations()
            .into_iter()
            .filter(|c| c.assumed)
            .map(|c| c.parameter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_matches_core_defaults() {
        let document = SpeciesDocument::bundled().unwrap();
        let parameters = document.to_parameters().unwrap();
        assert_eq!(parameters, SpeciesParameters::default());
    }

    #[test]
    fn bundled_flags_assumed_values() {
        let document = SpeciesDocument::bundled().unwrap();
        assert_eq!(
            document.assumed_parameters(),
            vec![
                "growth.r_maintenance".to_string(),
                "light.background_attenuation".to_string()
            ]
        );
        assert_eq!(document.citations().len(), 12);
        assert!(document.citations().iter().all(|c| !c.source.is_empty()));
    }

    #[test]
    fn out_of_range_value_rejected() {
        let mut document = SpeciesDocument::bundled().unwrap();
        document.growth.mu_max.value = 7.0;
        let err = document.to_parameters().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
        assert_eq!(err.field(), Some("growth.mu_max"));
    }

    #[test]
    fn ordering_checked_after_ranges() {
        let mut document = SpeciesDocument::bundled().unwrap();
        // Each value is inside its own range but t_min > t_opt
        document.temperature.t_min.value = 18.0;
        document.temperature.t_opt.value = 16.0;
        let err = document.to_parameters().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(err.field(), Some("temperature"));
    }

    #[test]
    fn parse_error_names_origin() {
        let err = SpeciesDocument::from_toml_str("species = 3", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
