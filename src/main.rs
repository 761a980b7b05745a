mod config;
mod fetcher;
mod parser;
mod store;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use config::{MinerConfig, DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_TITLE, DEFAULT_RAW_DATA_DIR};
use parser::rules::SegmentRules;
use store::{DishRecord, RawData};

#[derive(Parser)]
#[command(name = "sibu_food_miner", about = "Mine local dishes from a Wikipedia cuisine section")]
struct Cli {
    /// Article title to fetch
    #[arg(long, global = true, default_value = DEFAULT_PAGE_TITLE)]
    title: String,
    /// Directory for the raw-data artifact
    #[arg(long, global = true, default_value = DEFAULT_RAW_DATA_DIR)]
    raw_dir: PathBuf,
    /// Directory for timestamped dish files
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Defaults to `run`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Fetch the article, segment dishes, save them
    Run,
    /// Re-segment a saved raw-data file without fetching
    Segment {
        /// Path to a raw-data JSON file
        input: PathBuf,
    },
    /// Print the summary of a saved dish file
    Show {
        /// Path to a dish JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = MinerConfig::with_paths(cli.title, cli.raw_dir, cli.output_dir);
    let rules = SegmentRules::default();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            println!("Starting food data mining for '{}'...", config.page_title);
            store::ensure_dirs(&[config.output_dir.as_path(), config.raw_data_dir.as_path()])?;

            let client = fetcher::build_client(&config)?;
            let Some(section) = fetcher::fetch(&client, &config).await else {
                println!("No data was collected!");
                anyhow::bail!("no cuisine data for '{}'", config.page_title);
            };

            let dishes = parser::dishes::segment(&section.content, &rules);
            save_and_print(&config.output_dir, &dishes)?;
            println!("Data mining and processing completed!");
            Ok(())
        }
        Commands::Segment { input } => {
            store::ensure_dirs(&[config.output_dir.as_path()])?;
            let raw: RawData = store::load_raw(&input)?;
            info!(
                "Loaded {} characters from {}",
                raw.cuisine.content.chars().count(),
                input.display()
            );

            let dishes = parser::process_raw(&raw, &rules);
            save_and_print(&config.output_dir, &dishes)?;
            Ok(())
        }
        Commands::Show { file } => {
            let dishes = store::load_dishes(&file)
                .with_context(|| format!("Failed to load dishes from {}", file.display()))?;
            print_summary(&dishes);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn save_and_print(output_dir: &Path, dishes: &[DishRecord]) -> anyhow::Result<()> {
    let path = store::save_dishes(output_dir, dishes, chrono::Local::now())?;
    println!("\nData saved to: {}", path.display());
    print_summary(dishes);
    Ok(())
}

fn print_summary(dishes: &[DishRecord]) {
    println!("\nCollected dishes:");
    for dish in dishes {
        println!("- {}", dish.display_name());
    }
    println!("\nTotal dishes collected: {}", dishes.len());
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
