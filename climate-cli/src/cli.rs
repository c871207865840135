use std::path::PathBuf;

use anyhow::anyhow;
use chrono::Local;
use clap::{Parser, Subcommand};
use climate_core::{Action, FetchContext, Settings, Units, WeatherError, config};

use crate::{console::TerminalConsole, menu};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "climate", version, about = "CLI-Mate: weather in your terminal")]
pub struct Cli {
    /// Settings file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// City lookup dataset (OpenWeatherMap `city.list.json`).
    #[arg(long, global = true)]
    pub cities: Option<PathBuf>,

    /// Override the saved units for this run: imperial, metric or standard.
    #[arg(long, global = true)]
    pub units: Option<String>,

    /// Run a single action instead of the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current weather at the saved zip code.
    Now,

    /// Forecast at the saved zip code.
    Forecast {
        /// Print every forecast step instead of choosing a date.
        #[arg(long)]
        all: bool,
    },

    /// Current weather for a city by name.
    City {
        /// City name, e.g. "Springfield".
        name: String,
    },

    /// Edit the API key, zip code and units.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings_path = match self.settings {
            Some(path) => path,
            None => Settings::settings_file_path()?,
        };
        let city_list = match self.cities {
            Some(path) => path,
            None => config::city_list_path()?,
        };
        let ctx = FetchContext {
            tz: Local,
            city_list,
        };
        let mut console = TerminalConsole::new();

        let mut settings = match Settings::load_from(&settings_path)? {
            Some(settings) => settings,
            None => match menu::first_run(&settings_path, &mut console) {
                Ok(settings) => settings,
                Err(WeatherError::Interrupted) => return Ok(()),
                Err(e) => return Err(e.into()),
            },
        };

        if let Some(units) = self.units.as_deref() {
            settings.units = Units::try_from(units)?;
        }

        let action = match self.command {
            None => {
                return menu::main_menu(&mut settings, &settings_path, &mut console, &ctx).await;
            }
            Some(Command::Configure) => {
                return match menu::settings_menu(&mut settings, &settings_path, &mut console) {
                    Ok(()) | Err(WeatherError::Interrupted) => Ok(()),
                    Err(e) => Err(e.into()),
                };
            }
            Some(Command::Now) => Action::Current,
            Some(Command::Forecast { all }) => Action::Forecast { select_date: !all },
            Some(Command::City { name }) => Action::ByCity { name },
        };

        match menu::perform(&action, &settings, &mut console, &ctx).await {
            Ok(()) | Err(WeatherError::Interrupted) => Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "weather action failed");
                Err(anyhow!(e.user_message()))
            }
        }
    }
}
