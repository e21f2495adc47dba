//! Command-line front end: evaluate classifiers on a labelled dataset,
//! classify trajectories, or generate synthetic data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use motion_classifier::{
    config::{Config, EXAMPLE_CONFIG},
    dataset::{self, LabeledTrajectory},
    labels::TransportMode,
    report,
    synthetic::TrajectoryGenerator,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every classifier against a labelled dataset
    Evaluate {
        /// Dataset file (JSON)
        dataset: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print labels for every trajectory in a dataset
    Classify {
        /// Dataset file (JSON)
        dataset: PathBuf,

        /// Only run this classifier
        #[arg(short = 'k', long)]
        classifier: Option<String>,
    },

    /// Write a synthetic dataset
    Generate {
        /// Transport mode to simulate
        #[arg(short, long)]
        mode: TransportMode,

        /// Number of trajectories
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Samples per trajectory
        #[arg(short, long, default_value = "200")]
        samples: usize,

        /// Seconds between samples
        #[arg(short, long, default_value = "10")]
        interval: i64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an example configuration file
    ExampleConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Evaluate { dataset, format } => {
            let data = dataset::load(&dataset)?;
            let report = report::evaluate(&config, &data)?;
            match format {
                OutputFormat::Text => print!("{}", report.render_text()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
        }
        Command::Classify { dataset, classifier } => {
            let data = dataset::load(&dataset)?;
            let classifiers = match classifier {
                Some(name) => vec![config.create_classifier(&name)?],
                None => config.create_all()?,
            };
            for (i, trajectory) in data.iter().enumerate() {
                let labels: Vec<String> = classifiers
                    .iter()
                    .map(|c| format!("{}={}", c.name(), c.classify(&trajectory.samples)))
                    .collect();
                println!(
                    "{}\tactual={}\t{}",
                    trajectory.display_id(i),
                    trajectory.label.as_deref().unwrap_or("-"),
                    labels.join("\t")
                );
            }
        }
        Command::Generate {
            mode,
            count,
            samples,
            interval,
            seed,
            output,
        } => {
            let mut generator = TrajectoryGenerator::new(seed).with_interval(interval);
            let data: Vec<LabeledTrajectory> = generator
                .generate_many(mode, count, samples)
                .into_iter()
                .enumerate()
                .map(|(i, s)| LabeledTrajectory::new(format!("{mode}-{i}"), mode, s))
                .collect();
            match output {
                Some(path) => {
                    dataset::save(&path, &data)?;
                    info!("Wrote {count} {mode} trajectories to {}", path.display());
                }
                None => println!("{}", dataset::to_json(&data)?),
            }
        }
        Command::ExampleConfig => print!("{EXAMPLE_CONFIG}"),
    }

    Ok(())
}

/// Load and validate the configuration, defaults when no file is given
fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    info!("Loading configuration from: {}", path.display());
    Config::load(Some(path)).with_context(|| format!("failed to load configuration from {}", path.display()))
}
