//! Woodcalc command-line front end.

mod job;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use woodcalc_core::{default_stock_types, StockPlan, StockSettings};
use woodcalc_linear::Optimizer;

use crate::job::Job;

#[derive(Parser)]
#[command(name = "woodcalc")]
#[command(about = "Plan how to cut requested lengths from purchasable stock bars")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute cutting plans for a job file
    Plan {
        /// Path to the JSON job file
        job: PathBuf,

        /// Only plan this stock type (by id)
        #[arg(short, long)]
        stock_type: Option<String>,

        /// Print the plans as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the purchasable bar lengths
    Lengths {
        /// Read settings from this job file
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Minimum length (overrides the job/default settings)
        #[arg(long)]
        min: Option<f64>,

        /// Maximum length
        #[arg(long)]
        max: Option<f64>,

        /// Increment between lengths
        #[arg(long)]
        increment: Option<f64>,
    },

    /// List the built-in stock types
    StockTypes,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Plan {
            job,
            stock_type,
            json,
            output,
        } => {
            let job = Job::load(&job)?;
            let pieces = job.all_pieces();
            let optimizer = Optimizer::new();

            let plans: Vec<StockPlan> = match stock_type {
                Some(id) => {
                    let Some(stock_type) = job.find_stock_type(&id) else {
                        bail!("unknown stock type '{}'", id);
                    };
                    let plan = optimizer.optimize(&pieces, &job.settings, &stock_type)?;
                    vec![StockPlan { stock_type, plan }]
                }
                None => optimizer.optimize_all(&pieces, &job.settings)?,
            };

            for stock_plan in &plans {
                if !stock_plan.plan.all_placed() {
                    log::warn!(
                        "{}: {} pieces fit no purchasable length",
                        stock_plan.stock_type.name,
                        stock_plan.plan.unplaced.len()
                    );
                }
            }

            let rendered = if json {
                serde_json::to_string_pretty(&plans)?
            } else {
                report::render(&plans, &job.settings.unit)?
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Plan written to {}", path.display());
                }
                None => println!("{}", rendered.trim_end()),
            }
        }

        Commands::Lengths {
            job,
            min,
            max,
            increment,
        } => {
            let base = match job {
                Some(path) => Job::load(&path)?.settings,
                None => StockSettings::default(),
            };
            let settings = StockSettings {
                min_length: min.unwrap_or(base.min_length),
                max_length: max.unwrap_or(base.max_length),
                increment: increment.unwrap_or(base.increment),
                ..base
            };
            settings.validate()?;

            println!("Available lengths ({}):", settings.unit);
            for length in settings.available_lengths() {
                println!("  {}", length);
            }
        }

        Commands::StockTypes => {
            println!("Built-in stock types:");
            for stock_type in default_stock_types() {
                println!("  {:>2}  {}", stock_type.id, stock_type.name);
            }
        }
    }

    Ok(())
}
