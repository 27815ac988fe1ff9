use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error};
use whentogo::models::STATE_NAMES;
use whentogo::{TravelPlanner, TravelQuery, WeatherBand, WhenToGoConfig, logging};

/// Find where to travel for the weather you want, or what a state is like in a given month
#[derive(Parser)]
#[command(name = "whentogo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Travel date in MM-DD-YYYY format
    #[arg(short, long, required_unless_present = "list_options")]
    date: Option<String>,

    /// Desired weather: very cold, cold, mild, hot or very hot
    #[arg(short, long)]
    weather_type: Option<String>,

    /// State to visit, by name or two-letter code
    #[arg(short, long)]
    state: Option<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, env = "WHENTOGO_CONFIG")]
    config: Option<PathBuf>,

    /// Print the accepted weather types and states, then exit
    #[arg(long)]
    list_options: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn print_options() {
    println!("Weather types:");
    for band in WeatherBand::ALL {
        let (low, high) = band.range();
        println!("  {band} ({low}-{high}°C)");
    }
    println!();
    println!("States:");
    for state in STATE_NAMES {
        println!("  {state}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_options {
        print_options();
        return Ok(());
    }

    let mut config = match WhenToGoConfig::load_from_path(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };

    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    logging::init(&config.logging);
    debug!("Using API key {}", config.masked_api_key());

    let planner = TravelPlanner::from_config(&config).inspect_err(|e| {
        error!("Failed to build planner: {}", e);
    })?;

    let query = TravelQuery {
        date: cli.date.unwrap_or_default(),
        weather_type: cli.weather_type,
        state: cli.state,
    };

    println!("{}", planner.plan(&query));
    Ok(())
}
