//! dicedist - print the damage distribution of a dice-based attack

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dicedist::{Attack, Config, DiceRoll, OutputFormat, Report};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exact damage distribution calculator
#[derive(Parser, Debug)]
#[command(
    name = "dicedist",
    version,
    about = "Exact damage distributions for dice-based attacks"
)]
struct Args {
    /// Damage dice, e.g. 3d10
    dice: String,

    /// Flat bonus added to each hit
    #[arg(short, long, allow_negative_numbers = true)]
    modifier: Option<i64>,

    /// Probability the attack lands, in [0, 1]
    #[arg(long)]
    hit_chance: Option<f64>,

    /// A miss (successful save) still deals half damage
    #[arg(long)]
    half_damage: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dicedist=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout carries only the report
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = Config::load(args.config.as_deref()).context("failed to load configuration")?;

    // CLI flags override every config layer
    if let Some(modifier) = args.modifier {
        config.modifier = modifier;
    }
    if let Some(hit_chance) = args.hit_chance {
        config.hit_chance = hit_chance;
    }
    if args.half_damage {
        config.half_damage = true;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    config.validate()?;

    let dice: DiceRoll = args.dice.parse()?;
    let attack = Attack::new(dice, config.modifier, config.hit_chance, config.half_damage)?;
    info!(
        "computing {}{:+} at hit chance {} (half damage: {})",
        dice, config.modifier, config.hit_chance, config.half_damage
    );

    let report = Report::new(attack)?;
    print!("{}", report.render(config.format)?);

    Ok(())
}
