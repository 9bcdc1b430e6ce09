//! Event Analyzer CLI Application
//!
//! Command-line front end for the event-analyzer library. It adds what the
//! library deliberately leaves out:
//! - Reading event records from JSON-lines files
//! - TOML-driven analysis configuration
//! - CSV training-row output (zero-padded fixed-width rows)
//! - Plain-text run summaries

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

mod config;
mod records;
mod summary;
mod writer;

use config::OutputConfig;
use event_analyzer::{
    AnalysisConfig, ObservableKind, Particle, SelectorConfig, OBSERVABLE_SENTINEL,
};
use records::EventReader;
use summary::RunSummary;
use writer::CsvWriter;

/// Event Analyzer - classify particles and trace decay chains in event records
#[derive(Parser, Debug)]
#[command(name = "event-cli")]
#[command(about = "Analyze particle-physics event records (JSON-lines)", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a JSON-lines event file to analyze
    #[arg(short, long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Output CSV file for training rows (default: summary only)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml) - full analysis control
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of events to analyze (for testing)
    #[arg(long, value_name = "COUNT")]
    max_events: Option<usize>,

    /// Particle blocks per CSV row
    #[arg(long, value_name = "COUNT", default_value_t = config::DEFAULT_MAX_PARTICLES)]
    max_particles: usize,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Event Analyzer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using analyzer library v{}", event_analyzer::VERSION);

    if let Some(events) = &args.events {
        // Simple mode - built-in analysis over an event file
        simple_mode(events, &args)?;
    } else if let Some(config_path) = &args.config {
        // Config mode - full TOML-driven analysis
        config_mode(config_path, &args)?;
    } else {
        // No arguments - show help
        println!("Event Analyzer - No input specified");
        println!("\nQuick Start:");
        println!("  event-cli --events events.jsonl");
        println!("  event-cli --events events.jsonl --output rows.csv");
        println!("\nFor full analysis control:");
        println!("  event-cli --config analysis.toml");
        println!("\nUse --help for more options");
    }

    Ok(())
}

/// The built-in analysis: charged final state, incoming beams, hard process,
/// invariant mass of the hard process, signal search seeded by the hard
/// process
fn default_analysis() -> AnalysisConfig {
    AnalysisConfig::new()
        .with_category("final", SelectorConfig::final_charged())
        .with_category("initial", SelectorConfig::InitialState)
        .with_category("hard-process", SelectorConfig::HardProcessOutgoing)
        .with_observable("invariantMass", ObservableKind::InvariantMass, "hard-process")
        .with_signal("hard-process", SelectorConfig::final_charged())
}

/// Simple mode - run the built-in analysis over an event file
fn simple_mode(events: &Path, args: &Args) -> Result<()> {
    let analysis = default_analysis();
    let output = OutputConfig {
        csv: args.output.clone(),
        max_particles: args.max_particles,
        ..OutputConfig::default()
    };
    run_analysis(&analysis, events, &output, args.max_events)
}

/// Config mode - load a TOML configuration and run the analysis it describes
fn config_mode(config_path: &Path, args: &Args) -> Result<()> {
    log::info!("Loading configuration from: {:?}", config_path);
    let app_config = config::load_config(config_path)?;
    log::debug!("Configuration loaded successfully");

    // command line overrides the config's event limit
    let max_events = args.max_events.or(app_config.input.max_events);
    run_analysis(
        &app_config.analysis,
        &app_config.input.events,
        &app_config.output,
        max_events,
    )
}

/// The analysis loop shared by both modes: read, classify, trace, write
fn run_analysis(
    analysis: &AnalysisConfig,
    events_path: &Path,
    output: &OutputConfig,
    max_events: Option<usize>,
) -> Result<()> {
    let analyzer = analysis.build_analyzer()?;
    let searcher = analysis.build_searcher()?;
    let reader = EventReader::open(events_path)?;

    let mut csv = match &output.csv {
        Some(path) => Some(CsvWriter::create(path, output.max_particles)?),
        None => None,
    };

    // which observable feeds the first CSV column
    let observable = match &output.observable {
        Some(name) => analysis.observables.iter().find(|o| &o.name == name),
        None => analysis.observables.first(),
    };
    let seed_category = output.seed_category.as_deref().unwrap_or("initial");

    let mut summary = RunSummary::new();
    for event in reader {
        if let Some(limit) = max_events {
            if summary.events() >= limit {
                log::info!("Reached event limit ({}), stopping", limit);
                break;
            }
        }
        let event = event?;
        let classification = analyzer.analyze(&event);

        let signal = match (&searcher, &analysis.signal) {
            (Some(searcher), Some(signal_config)) => Some(searcher.search(
                &event,
                classification.particles_of(&signal_config.seed_category),
            )),
            _ => None,
        };

        if let Some(csv) = csv.as_mut() {
            let q2 = match observable {
                Some(o) => {
                    analyzer.evaluate_observable(&event, &classification, &o.name, &o.category)
                }
                None => OBSERVABLE_SENTINEL,
            };
            let seed_pid = classification
                .particles_of(seed_category)
                .first()
                .map(|&id| event.particle(id).abs_pid())
                .unwrap_or(0);
            let row_particles: Vec<&Particle> = match &output.particles_from {
                Some(label) => classification.resolve(&event, label),
                None => match &signal {
                    Some(ids) => ids.iter().map(|&id| event.particle(id)).collect(),
                    None => match analysis.categories.first() {
                        Some(category) => classification.resolve(&event, &category.label),
                        None => Vec::new(),
                    },
                },
            };
            csv.write_event(q2, seed_pid, &row_particles)?;
        }

        summary.record(&classification, signal.as_ref().map(Vec::len));
        log::debug!(
            "event {}: {} of {} particles assigned",
            summary.events(),
            classification.assigned_count(),
            event.particle_count()
        );
    }

    if let Some(csv) = csv {
        csv.finish()?;
    }

    match &output.summary {
        Some(path) => summary.write_to_file(path)?,
        None => summary.write(&mut io::stdout())?,
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
