//! Rendering of simulation results.
//!
//! CSV has one row per simulated day with CO2 in kilograms. JSON is the full
//! [`SimulationResults`] structure (`metadata`, `summary`, `harvests`, `daily`) with CO2 in
//! grams. Neither format adds methodology or disclaimer text.

use algaesim_core::accounting::G_PER_KG;
use algaesim_core::SimulationResults;
use std::fmt::Write as _;
use std::io::{self, Write};

pub const CSV_HEADER: [&str; 9] = [
    "day",
    "month",
    "season",
    "biomass_g_per_l",
    "growth_rate_per_day",
    "productivity_g_per_m2_day",
    "co2_daily_kg",
    "co2_cumulative_kg",
    "harvested",
];

pub fn write_csv<W: Write>(results: &SimulationResults, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    for record in &results.daily {
        writeln!(
            writer,
            "{},{},{},{:.4},{:.6},{:.3},{:.4},{:.4},{}",
            record.day,
            record.month,
            record.season,
            record.biomass,
            record.growth_rate,
            record.productivity,
            record.co2_daily_g / G_PER_KG,
            record.co2_cumulative_g / G_PER_KG,
            record.harvested
        )?;
    }
    writer.flush()
}

pub fn to_csv_string(results: &SimulationResults) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail
    let _ = write_csv(results, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

pub fn write_json<W: Write>(results: &SimulationResults, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, results)
}

pub fn to_json_string(results: &SimulationResults) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Lowercase ASCII slug with runs of other characters collapsed to `_`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

/// `algaesim_<species>_<duration>d_m<start_month>.<extension>`
pub fn export_filename(results: &SimulationResults, extension: &str) -> String {
    format!(
        "algaesim_{}_{}d_m{}.{}",
        slugify(&results.metadata.species),
        results.metadata.duration_days,
        results.metadata.start_month,
        extension
    )
}

/// Plain-text summary for terminal output.
pub fn format_summary(results: &SimulationResults) -> String {
    let metadata = &results.metadata;
    let summary = &results.summary;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Species:            {}", metadata.species);
    let _ = writeln!(out, "Climate:            {}", metadata.climate);
    let _ = writeln!(
        out,
        "Pond:               {} m2 x {} m",
        metadata.surface_area, metadata.depth
    );
    let _ = writeln!(
        out,
        "Run:                {} days from month {}",
        metadata.duration_days, metadata.start_month
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Mean growth rate:   {:.4} 1/day", summary.mean_growth_rate);
    let _ = writeln!(
        out,
        "Mean productivity:  {:.2} g/m2/day",
        summary.mean_productivity
    );
    let _ = writeln!(
        out,
        "CO2 captured:       {:.1} kg ({:.3} t)",
        summary.total_co2_kg, summary.total_co2_tonnes
    );
    let _ = writeln!(
        out,
        "Harvests:           {} ({:.1} kg dry biomass)",
        summary.harvest_count, summary.total_harvested_kg
    );
    let _ = writeln!(out, "Final biomass:      {:.3} g/L", summary.final_biomass);

    if !summary.seasonal.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<10}{:>6}{:>14}{:>16}",
            "Season", "Days", "CO2 (kg)", "g/m2/day"
        );
        for season in &summary.seasonal {
            let _ = writeln!(
                out,
                "{:<10}{:>6}{:>14.1}{:>16.2}",
                season.season.label(),
                season.days,
                season.co2_g / G_PER_KG,
                season.mean_productivity
            );
        }
    }

    for warning in &summary.warnings {
        let _ = writeln!(out, "\nWarning: {}", warning);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("Chlorella vulgaris"), "chlorella_vulgaris");
        assert_eq!(slugify("  Nanno-chloropsis  (strain 3) "), "nanno_chloropsis_strain_3");
    }
}
