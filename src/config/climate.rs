use super::{parse_document, read_document, Citation, Cited, ConfigError, ParameterRange};
use algaesim_core::climate::{Location, MonthlyClimate, MonthlyClimateProfile, Season, MONTH_NAMES};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUNDLED_CLIMATE: &str = include_str!("../../data/climate/surat.toml");
const BUNDLED_ORIGIN: &str = "<bundled>/climate/surat.toml";

const LATITUDE: ParameterRange = ParameterRange::closed(-90.0, 90.0);
const LONGITUDE: ParameterRange = ParameterRange::closed(-180.0, 180.0);
const TEMP_DAY: ParameterRange = ParameterRange::closed(-10.0, 55.0);
const TEMP_NIGHT: ParameterRange = ParameterRange::closed(-10.0, 45.0);
const PAR: ParameterRange = ParameterRange::closed(0.0, 2500.0);
const PHOTOPERIOD: ParameterRange = ParameterRange::open(0.0, 24.0);
const RAINFALL: ParameterRange = ParameterRange::closed(0.0, 2000.0);
const CLOUD_COVER: ParameterRange = ParameterRange::closed(0.0, 1.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthEntry {
    pub season: Season,
    pub temp_day: Cited<f64>,
    pub temp_night: Cited<f64>,
    /// Clear-sky daytime mean PAR
    pub par: Cited<f64>,
    pub photoperiod: Cited<f64>,
    pub rainfall: Cited<f64>,
    pub cloud_cover_fraction: Cited<f64>,
}

impl MonthEntry {
    fn to_monthly(&self, month: &str) -> Result<MonthlyClimate, ConfigError> {
        let field = |name: &str| format!("months.{}.{}", month, name);
        Ok(MonthlyClimate {
            season: self.season,
            temp_day: self.temp_day.checked(&field("temp_day"), TEMP_DAY)?,
            temp_night: self.temp_night.checked(&field("temp_night"), TEMP_NIGHT)?,
            clear_sky_par: self.par.checked(&field("par"), PAR)?,
            photoperiod_hours: self.photoperiod.checked(&field("photoperiod"), PHOTOPERIOD)?,
            rainfall_mm: self.rainfall.checked(&field("rainfall"), RAINFALL)?,
            cloud_cover_fraction: self
                .cloud_cover_fraction
                .checked(&field("cloud_cover_fraction"), CLOUD_COVER)?,
        })
    }

    fn citations(&self, month: &str) -> Vec<Citation> {
        let name = |field: &str| format!("months.{}.{}", month, field);
        vec![
            self.temp_day.citation(name("temp_day")),
            self.temp_night.citation(name("temp_night")),
            self.par.citation(name("par")),
            self.photoperiod.citation(name("photoperiod")),
            self.rainfall.citation(name("rainfall")),
            self.cloud_cover_fraction.citation(name("cloud_cover_fraction")),
        ]
    }
}

/// All twelve months are required; a missing month is a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthsSection {
    pub january: MonthEntry,
    pub february: MonthEntry,
    pub march: MonthEntry,
    pub april: MonthEntry,
    pub may: MonthEntry,
    pub june: MonthEntry,
    pub july: MonthEntry,
    pub august: MonthEntry,
    pub september: MonthEntry,
    pub october: MonthEntry,
    pub november: MonthEntry,
    pub december: MonthEntry,
}

impl MonthsSection {
    /// Months in calendar order.
    pub fn entries(&self) -> [&MonthEntry; 12] {
        [
            &self.january,
            &self.february,
            &self.march,
            &self.april,
            &self.may,
            &self.june,
            &self.july,
            &self.august,
            &self.september,
            &self.october,
            &self.november,
            &self.december,
        ]
    }
}

/// Cited monthly climate normals for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateDocument {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub months: MonthsSection,
}

impl ClimateDocument {
    /// The compiled-in Surat climate.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_CLIMATE, Path::new(BUNDLED_ORIGIN))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read_document(path)?;
        Self::from_toml_str(&text, path)
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let document: ClimateDocument = parse_document(text, origin)?;
        debug!(
            "Loaded climate document for {}, {} from {}",
            document.city,
            document.country,
            origin.display()
        );
        Ok(document)
    }

    /// Range-check every month and build the climate provider.
    pub fn to_profile(&self) -> Result<MonthlyClimateProfile, ConfigError> {
        LATITUDE.check("latitude", self.latitude)?;
        LONGITUDE.check("longitude", self.longitude)?;

        let entries = self.months.entries();
        let mut months = Vec::with_capacity(entries.len());
        for (entry, name) in entries.iter().zip(MONTH_NAMES) {
            months.push(entry.to_monthly(name)?);
        }
        let months: [MonthlyClimate; 12] = months
            .try_into()
            .map_err(|_| algaesim_core::AlgaeSimError::invalid("months", "expected 12 months"))?;

        let location = Location {
            city: self.city.clone(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        };
        Ok(MonthlyClimateProfile::new(location, months)?)
    }

    pub fn citations(&self) -> Vec<Citation> {
        self.months
            .entries()
            .iter()
            .zip(MONTH_NAMES)
            .flat_map(|(entry, name)| entry.citations(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_matches_core_surat() {
        let profile = ClimateDocument::bundled().unwrap().to_profile().unwrap();
        assert_eq!(profile, MonthlyClimateProfile::surat());
    }

    #[test]
    fn missing_month_is_parse_error() {
        let text = BUNDLED_CLIMATE.replace("[months.june]", "[months.junee]");
        let err = ClimateDocument::from_toml_str(&text, Path::new("surat.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn photoperiod_must_be_inside_day() {
        let mut document = ClimateDocument::bundled().unwrap();
        document.months.march.photoperiod.value = 24.0;
        let err = document.to_profile().unwrap_err();
        assert_eq!(err.field(), Some("months.march.photoperiod"));
    }

    #[test]
    fn citations_cover_every_month() {
        let document = ClimateDocument::bundled().unwrap();
        let citations = document.citations();
        assert_eq!(citations.len(), 72);
        assert_eq!(citations[0].parameter, "months.january.temp_day");
        assert!(citations.iter().all(|c| !c.assumed));
    }
}
