//! Paddle Arena entry point
//!
//! Runs a headless match: no paddle input, frames go to the log.

use std::path::PathBuf;

use clap::Parser;

use paddle_arena::driver::{IdleInput, LogPresenter};
use paddle_arena::{Config, Driver, Game, Variant};

#[derive(Parser, Debug)]
#[command(name = "paddle-arena", about = "Headless Pong / Squash simulation")]
struct Args {
    /// Game variant; with --config, the preset the file is laid over
    #[arg(short, long, value_enum)]
    variant: Option<Variant>,

    /// JSON config overriding the variant preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for ball launches
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Run as fast as possible instead of at the tick rate
    #[arg(long)]
    unpaced: bool,

    /// Log every Nth frame at debug level (0 = none)
    #[arg(long, default_value_t = 120)]
    log_every: u64,
}

/// Preset for `--variant`, with the `--config` file laid over it
fn load_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = &args.config else {
        return Ok(args.variant.unwrap_or_default().preset());
    };
    let json = std::fs::read_to_string(path)?;
    let config = match args.variant {
        Some(variant) => Config::from_json_for(variant, &json)?,
        None => Config::from_json(&json)?,
    };
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Could not load configuration: {}", e);
            return Err(e);
        }
    };

    let game = match Game::new(config, args.seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let mut driver = Driver::new(game, IdleInput, LogPresenter::new(args.log_every));
    if let Some(max) = args.max_ticks {
        driver = driver.with_tick_limit(max);
    }

    let summary = if args.unpaced {
        driver.run_unpaced()
    } else {
        driver.run()
    };

    log::info!(
        "Finished after {} ticks: {:?} (winner {:?})",
        summary.ticks,
        summary.tally,
        summary.winner
    );
    println!("{:?}", summary.tally);
    Ok(())
}
