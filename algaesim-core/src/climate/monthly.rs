use super::{cloud_transmission, ClimateProvider, ClimateSample, Season, MONTHS_PER_YEAR};
use crate::errors::{ensure_within, AlgaeSimError, AlgaeSimResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    /// unit: degrees north
    pub latitude: FloatValue,
    /// unit: degrees east
    pub longitude: FloatValue,
}

/// Climate normals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClimate {
    pub season: Season,
    /// Mean daytime air temperature
    /// unit: degC
    pub temp_day: FloatValue,
    /// Mean nighttime air temperature
    /// unit: degC
    pub temp_night: FloatValue,
    /// Clear-sky daytime mean PAR, before the cloud discount
    /// unit: umol/m2/s
    pub clear_sky_par: FloatValue,
    /// unit: h
    pub photoperiod_hours: FloatValue,
    /// Not used by the growth model, carried for reporting
    /// unit: mm/month
    pub rainfall_mm: FloatValue,
    /// Fraction of the sky covered by cloud
    pub cloud_cover_fraction: FloatValue,
}

impl MonthlyClimate {
    pub fn to_sample(&self) -> ClimateSample {
        let transmission = cloud_transmission(self.cloud_cover_fraction);
        ClimateSample {
            par_surface: self.clear_sky_par * transmission,
            temp_day: self.temp_day,
            temp_night: self.temp_night,
            photoperiod_hours: self.photoperiod_hours,
            cloud_cover_factor: transmission,
            season: self.season,
        }
    }

    fn validate(&self, month: &str) -> AlgaeSimResult<()> {
        ensure_within(
            &format!("months.{}.cloud_cover_fraction", month),
            self.cloud_cover_fraction,
            0.0,
            1.0,
        )?;
        ensure_within(
            &format!("months.{}.clear_sky_par", month),
            self.clear_sky_par,
            0.0,
            FloatValue::MAX,
        )?;
        self.to_sample().validate().map_err(|err| match err {
            AlgaeSimError::InvalidConfiguration { field, reason } => AlgaeSimError::invalid(
                field.replacen("climate", &format!("months.{}", month), 1),
                reason,
            ),
            other => other,
        })
    }
}

/// Twelve months of climate normals for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClimateProfile {
    pub location: Location,
    pub months: [MonthlyClimate; MONTHS_PER_YEAR],
}

impl MonthlyClimateProfile {
    pub fn new(location: Location, months: [MonthlyClimate; MONTHS_PER_YEAR]) -> AlgaeSimResult<Self> {
        let profile = Self { location, months };
        profile.validate_months()?;
        Ok(profile)
    }

    fn validate_months(&self) -> AlgaeSimResult<()> {
        self.months
            .iter()
            .zip(MONTH_NAMES)
            .try_for_each(|(month, name)| month.validate(name))
    }

    /// Surat, Gujarat (21.17 N, 72.83 E).
    ///
    /// Temperatures and rainfall follow IMD climate normals for Surat. Clear-sky PAR and
    /// cloud fractions are derived from NASA POWER monthly means.
    pub fn surat() -> Self {
        use Season::*;
        // season, T_day, T_night, clear-sky PAR, photoperiod, rainfall, cloud fraction
        let table: [(Season, f64, f64, f64, f64, f64, f64); 12] = [
            (Dry, 30.0, 15.0, 450.0, 11.0, 2.0, 0.10),
            (Dry, 32.0, 17.0, 480.0, 11.5, 1.0, 0.08),
            (Hot, 35.0, 21.0, 510.0, 12.0, 1.0, 0.10),
            (Hot, 37.0, 24.0, 525.0, 12.7, 2.0, 0.15),
            (Hot, 36.0, 27.0, 530.0, 13.2, 10.0, 0.30),
            (Monsoon, 33.0, 27.0, 500.0, 13.4, 320.0, 0.70),
            (Monsoon, 31.0, 26.0, 600.0, 13.3, 580.0, 0.85),
            (Monsoon, 30.0, 25.0, 590.0, 12.8, 400.0, 0.85),
            (Monsoon, 31.0, 25.0, 520.0, 12.2, 210.0, 0.60),
            (Dry, 34.0, 23.0, 470.0, 11.6, 40.0, 0.25),
            (Dry, 33.0, 19.0, 455.0, 11.1, 6.0, 0.10),
            (Dry, 31.0, 17.0, 440.0, 10.9, 1.0, 0.08),
        ];

        Self {
            location: Location {
                city: "Surat".to_string(),
                country: "India".to_string(),
                latitude: 21.17,
                longitude: 72.83,
            },
            months: table.map(
                |(season, temp_day, temp_night, clear_sky_par, photoperiod_hours, rainfall_mm, cloud)| {
                    MonthlyClimate {
                        season,
                        temp_day,
                        temp_night,
                        clear_sky_par,
                        photoperiod_hours,
                        rainfall_mm,
                        cloud_cover_fraction: cloud,
                    }
                },
            ),
        }
    }

    pub fn month(&self, month_index: usize) -> &MonthlyClimate {
        &self.months[month_index % MONTHS_PER_YEAR]
    }
}

impl Default for MonthlyClimateProfile {
    fn default() -> Self {
        Self::surat()
    }
}

#[typetag::serde]
impl ClimateProvider for MonthlyClimateProfile {
    fn sample(&self, month_index: usize) -> ClimateSample {
        self.month(month_index).to_sample()
    }

    fn description(&self) -> String {
        format!(
            "{}, {} ({:.2}, {:.2})",
            self.location.city, self.location.country, self.location.latitude, self.location.longitude
        )
    }

    fn validate(&self) -> AlgaeSimResult<()> {
        self.validate_months()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn surat_is_valid() {
        let profile = MonthlyClimateProfile::surat();
        assert!(ClimateProvider::validate(&profile).is_ok());
        assert_eq!(profile.description(), "Surat, India (21.17, 72.83)");
    }

    #[test]
    fn surat_seasons() {
        let profile = MonthlyClimateProfile::surat();
        let seasons: Vec<Season> = profile.months.iter().map(|m| m.season).collect();
        use Season::*;
        assert_eq!(
            seasons,
            vec![Dry, Dry, Hot, Hot, Hot, Monsoon, Monsoon, Monsoon, Monsoon, Dry, Dry, Dry]
        );
    }

    #[test]
    fn monsoon_par_is_discounted() {
        let profile = MonthlyClimateProfile::surat();
        let july = profile.sample(6);
        // 600 * (1 - 0.75 * 0.85^3.4)
        let expected = 600.0 * (1.0 - 0.75 * 0.85f64.powf(3.4));
        assert!(is_close!(july.par_surface, expected));
        assert!(july.par_surface < profile.months[6].clear_sky_par);
        assert!(is_close!(july.cloud_cover_factor, july.par_surface / 600.0));
    }

    #[test]
    fn invalid_month_reports_name() {
        let mut months = MonthlyClimateProfile::surat().months;
        months[3].photoperiod_hours = 0.0;
        let err = MonthlyClimateProfile::new(MonthlyClimateProfile::surat().location, months)
            .unwrap_err();
        assert_eq!(err.field(), Some("months.april.photoperiod_hours"));
    }

    #[test]
    fn round_trips_as_trait_object() {
        let provider: Box<dyn ClimateProvider> = Box::new(MonthlyClimateProfile::surat());
        let json = serde_json::to_string(&provider).unwrap();
        assert!(json.contains("\"type\":\"MonthlyClimateProfile\""));
        let parsed: Box<dyn ClimateProvider> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sample(0), provider.sample(0));
    }
}
