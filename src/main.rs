use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};

use algaesim::config::{ClimateDocument, Citation, Scenario, SpeciesDocument};
use algaesim::export::{format_summary, write_csv, write_json};

/// Open-pond microalgae growth and CO2 capture simulator
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log debug output (harvest events, loaded documents)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a simulation and print the summary
    Run(RunArgs),
    /// List every cited parameter, flagging values without a primary source
    Citations(DocumentArgs),
}

#[derive(Debug, Args)]
struct DocumentArgs {
    /// Species document (defaults to the bundled Chlorella vulgaris table)
    #[arg(long)]
    species: Option<PathBuf>,

    /// Climate document (defaults to the bundled Surat climate)
    #[arg(long)]
    climate: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Scenario file; bundled defaults are used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[command(flatten)]
    documents: DocumentArgs,

    /// Override the run length in days
    #[arg(long)]
    days: Option<usize>,

    /// Override the starting month (1-12)
    #[arg(long)]
    start_month: Option<u32>,

    /// Write daily results as CSV; a directory gets the default file name
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write full results as JSON; a directory gets the default file name
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default, --verbose overrides both
    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Info).parse_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Citations(args) => citations(args),
    }
}

fn load_scenario(args: &RunArgs) -> Result<Scenario> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::bundled().context("Failed to load bundled defaults")?,
    };
    if let Some(path) = &args.documents.species {
        scenario = scenario.with_species_file(path)?;
    }
    if let Some(path) = &args.documents.climate {
        scenario = scenario.with_climate_file(path)?;
    }
    if let Some(days) = args.days {
        scenario = scenario.with_duration(days)?;
    }
    if let Some(month) = args.start_month {
        scenario = scenario.with_start_month(month)?;
    }
    Ok(scenario)
}

/// Use `requested` as is, or the default file name inside it when it is a directory.
fn output_path(requested: &Path, default_name: String) -> PathBuf {
    if requested.is_dir() {
        requested.join(default_name)
    } else {
        requested.to_path_buf()
    }
}

fn run(args: RunArgs) -> Result<()> {
    let scenario = load_scenario(&args)?;
    let results = scenario.run().context("Invalid simulation configuration")?;

    print!("{}", format_summary(&results));

    if let Some(requested) = &args.csv {
        let path = output_path(requested, algaesim::export::export_filename(&results, "csv"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv(&results, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if let Some(requested) = &args.json {
        let path = output_path(requested, algaesim::export::export_filename(&results, "json"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_json(&results, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

fn print_citations(title: &str, citations: &[Citation]) {
    println!("{}", title);
    for citation in citations {
        println!(
            "  {:<40} {:>10} {:<14} {}{}",
            citation.parameter,
            citation.value,
            citation.unit,
            citation.source,
            if citation.assumed { "  [ASSUMED]" } else { "" }
        );
    }
}

fn citations(args: DocumentArgs) -> Result<()> {
    let species = match &args.species {
        Some(path) => SpeciesDocument::load(path)?,
        None => SpeciesDocument::bundled()?,
    };
    let climate = match &args.climate {
        Some(path) => ClimateDocument::load(path)?,
        None => ClimateDocument::bundled()?,
    };

    print_citations(&format!("Species: {}", species.species), &species.citations());
    println!();
    print_citations(
        &format!("Climate: {}, {}", climate.city, climate.country),
        &climate.citations(),
    );

    let assumed = species.assumed_parameters();
    if !assumed.is_empty() {
        println!();
        println!(
            "{} parameter(s) lack a primary source: {}",
            assumed.len(),
            assumed.join(", ")
        );
    }
    Ok(())
}
