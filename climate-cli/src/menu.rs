use std::path::Path;

use chrono::TimeZone;
use climate_core::{
    Action, Console, FetchContext, Settings, Units, WeatherError, console::select_index, fetch,
    provider_from_settings,
};

const MAIN_MENU: &str = "
CLI-Mate
    (1) Information
    (2) Settings
    (3) Get Weather
    (4) Get Forecast
    (5) Search by City
    (6) Exit";

const INFO: &str = "
    CLI-Mate fetches weather data from OpenWeatherMap and prints it in the
    terminal.

    You need an OpenWeatherMap account to use it. Sign up at
    https://home.openweathermap.org/users/sign_up and your API key will be
    emailed to you; it is also listed under 'API keys' in your profile.

    The first run opens Settings, where you enter the API key and your zip
    code. Both can be changed at any time from the main menu.

    Get Weather and Get Forecast use your saved zip code. Search by City
    looks a place up by name and asks which one you meant when several
    cities share it.

    Set RUST_LOG=debug to see what is sent to the weather service.";

/// Run the interactive main menu until the user exits or input closes.
pub async fn main_menu<C, Tz>(
    settings: &mut Settings,
    settings_path: &Path,
    console: &mut C,
    ctx: &FetchContext<Tz>,
) -> anyhow::Result<()>
where
    C: Console,
    Tz: TimeZone,
{
    console.show("\nWelcome to CLI-Mate!\nA simple weather fetching application written in Rust");

    loop {
        console.show(MAIN_MENU);
        let choice = match console.read_line("What would you like to do? ") {
            Ok(choice) => choice,
            Err(WeatherError::Interrupted) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let outcome = match choice.trim() {
            "1" => {
                console.show(INFO);
                Ok(())
            }
            "2" => settings_menu(settings, settings_path, console),
            "3" => perform(&Action::Current, settings, console, ctx).await,
            "4" => forecast(settings, console, ctx).await,
            "5" => by_city(settings, console, ctx).await,
            "6" => return Ok(()),
            other => {
                tracing::debug!(choice = other, "invalid menu choice");
                console.show("INVALID INPUT. Please choose a number from 1 to 6.");
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(WeatherError::Interrupted) => return Ok(()),
            Err(e @ WeatherError::Input(_)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "weather action failed");
                console.show(&format!("\n{}", e.user_message()));
            }
        }
    }
}

async fn forecast<C, Tz>(
    settings: &Settings,
    console: &mut C,
    ctx: &FetchContext<Tz>,
) -> Result<(), WeatherError>
where
    C: Console,
    Tz: TimeZone,
{
    let select_date = console.confirm("Do you want to select a particular date?")?;
    perform(&Action::Forecast { select_date }, settings, console, ctx).await
}

async fn by_city<C, Tz>(
    settings: &Settings,
    console: &mut C,
    ctx: &FetchContext<Tz>,
) -> Result<(), WeatherError>
where
    C: Console,
    Tz: TimeZone,
{
    let name = console.read_line("Enter city name: ")?;
    perform(&Action::ByCity { name }, settings, console, ctx).await
}

/// Fetch and print; reports are only printed once all of them rendered.
pub async fn perform<C, Tz>(
    action: &Action,
    settings: &Settings,
    console: &mut C,
    ctx: &FetchContext<Tz>,
) -> Result<(), WeatherError>
where
    C: Console,
    Tz: TimeZone,
{
    let provider = provider_from_settings(settings)?;
    let reports = fetch::run(action, settings, provider.as_ref(), console, ctx).await?;

    if reports.is_empty() {
        console.show("\nNo weather data available for that selection.");
    }
    for report in &reports {
        console.show("");
        console.show(&report.to_string());
    }
    Ok(())
}

/// Edit settings until the user saves. Changes are kept in memory even if
/// writing the file fails.
pub fn settings_menu<C: Console>(
    settings: &mut Settings,
    settings_path: &Path,
    console: &mut C,
) -> Result<(), WeatherError> {
    loop {
        console.show("\nSettings");
        console.show(&format!(
            "
    (1) Enter an API key
    (2) Enter your zip code
    (3) Choose units (currently {})
    (4) Enter your country code (currently {})
    (5) Save and exit",
            settings.units, settings.country_code
        ));

        match console.read_line("What would you like to do? ")?.trim() {
            "1" => {
                settings.api_key = console.read_line("Enter your API key: ")?.trim().to_string()
            }
            "2" => {
                settings.zip_code = console.read_line("Enter your zip code: ")?.trim().to_string()
            }
            "3" => {
                let labels: Vec<String> = Units::all().iter().map(ToString::to_string).collect();
                let choice = select_index(console, "Units:", &labels)?;
                settings.units = Units::all()[choice];
            }
            "4" => {
                let code = console.read_line("Enter your country code (e.g. us): ")?;
                if code.trim().is_empty() {
                    console.show("Country code left unchanged");
                } else {
                    settings.country_code = code.trim().to_lowercase();
                }
            }
            "5" => {
                match settings.save_to(settings_path) {
                    Ok(()) => console.show("Settings saved"),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to save settings");
                        console.show(&format!("There is an issue with the settings file: {e:#}"));
                    }
                }
                return Ok(());
            }
            _ => console.show("Please enter a valid selection"),
        }
    }
}

/// First run: no settings file yet.
pub fn first_run<C: Console>(
    settings_path: &Path,
    console: &mut C,
) -> Result<Settings, WeatherError> {
    console.show("It seems that settings have not been entered. Please enter them now.");
    let mut settings = Settings::default();
    settings_menu(&mut settings, settings_path, console)?;
    Ok(settings)
}
