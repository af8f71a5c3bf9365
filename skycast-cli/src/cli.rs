use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::{Config, IpLocator, Place, Units, fetch_report, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and 5-day forecast lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and default units.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Unit system override: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Show weather for your current (IP-geolocated) position.
    Here {
        /// Unit system override: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Switch the preferred unit system and refetch the last location.
    Units {
        /// "metric" or "imperial".
        units: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units } => {
                let config = Config::load()?;
                let units = resolve_units(&config, units)?;
                run_lookup(config, Place::City(city), units).await
            }
            Command::Here { units } => {
                let config = Config::load()?;
                let units = resolve_units(&config, units)?;

                let coords = IpLocator::new().locate().await?;
                run_lookup(config, Place::Coords(coords), units).await
            }
            Command::Units { units } => switch_units(&units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new("Preferred units:", vec![Units::Metric, Units::Imperial])
        .prompt()
        .context("Failed to read unit preference")?;

    config.set_api_key(api_key.trim().to_owned());
    config.set_units(units);
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Per-invocation `--units` override; the configured preference otherwise.
fn resolve_units(config: &Config, flag: Option<String>) -> anyhow::Result<Units> {
    match flag {
        Some(value) => Units::try_from(value.as_str()),
        None => Ok(config.units),
    }
}

async fn switch_units(value: &str) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let units = Units::try_from(value)?;

    if units == config.units {
        println!("Already using {units} units.");
        return Ok(());
    }

    config.set_units(units);
    config.save()?;

    // Refetch the last-known location, coordinates preferred over city text.
    let Some(place) = config.last_place() else {
        println!("Units set to {units}. Look up a city to see them applied.");
        return Ok(());
    };

    run_lookup(config, place, units).await
}

async fn run_lookup(mut config: Config, place: Place, units: Units) -> anyhow::Result<()> {
    let provider = provider_from_config(&config)?;

    let report = fetch_report(&provider, &place, units).await?;

    let city = match &place {
        Place::City(name) => Some(name.clone()),
        Place::Coords(_) => None,
    };
    config.remember_query(city, report.current.coords);
    config.save()?;

    render::print_report(&report);
    Ok(())
}
