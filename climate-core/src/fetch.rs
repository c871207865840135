//! Ties a provider call to the refinement pipeline.
//!
//! Every action either yields all of its reports or an error; nothing is
//! rendered until the whole response has been processed.

use chrono::TimeZone;
use std::path::PathBuf;

use crate::{
    Settings,
    city::{disambiguate, find_candidates, load_dataset, normalize_city_query},
    console::Console,
    error::WeatherError,
    model::{LocationQuery, WeatherRecord},
    partition::partition_by_date,
    provider::WeatherProvider,
    report::Report,
};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Current conditions at the configured zip code.
    Current,
    /// 5 day / 3 hour forecast at the configured zip code.
    Forecast { select_date: bool },
    /// Current conditions for a named city.
    ByCity { name: String },
}

/// Environment an action runs in.
#[derive(Debug, Clone)]
pub struct FetchContext<Tz: TimeZone> {
    /// Zone used for calendar dates and times of day.
    pub tz: Tz,
    /// City lookup dataset, read fresh on every city search.
    pub city_list: PathBuf,
}

pub async fn run<P, C, Tz>(
    action: &Action,
    settings: &Settings,
    provider: &P,
    console: &mut C,
    ctx: &FetchContext<Tz>,
) -> Result<Vec<Report>, WeatherError>
where
    P: WeatherProvider + ?Sized,
    C: Console + ?Sized,
    Tz: TimeZone,
{
    tracing::debug!(?action, "running weather action");

    match action {
        Action::Current => {
            let location = zip_location(settings)?;
            let record = provider.current(&location).await?;
            render_all(&[record], settings.zip_code.trim(), settings, ctx)
        }
        Action::Forecast { select_date } => {
            let location = zip_location(settings)?;
            let forecast = provider.forecast(&location).await?;
            let records = partition_by_date(forecast.list, *select_date, &ctx.tz, console)?;
            render_all(&records, &forecast.city.name, settings, ctx)
        }
        Action::ByCity { name } => {
            let name = normalize_city_query(name);
            let location = resolve_city(&name, console, ctx)?;
            let record = provider.current(&location).await?;
            render_all(&[record], &name, settings, ctx)
        }
    }
}

fn zip_location(settings: &Settings) -> Result<LocationQuery, WeatherError> {
    if !settings.has_zip_code() {
        return Err(WeatherError::NotConfigured("zip code"));
    }
    Ok(LocationQuery::Zip {
        zip: settings.zip_code.trim().to_string(),
        country: settings.country_code.trim().to_string(),
    })
}

/// Narrow a city name to one location. Only when the dataset holds several
/// cities of that name does the user pick one; otherwise the name alone is sent.
fn resolve_city<C, Tz>(
    name: &str,
    console: &mut C,
    ctx: &FetchContext<Tz>,
) -> Result<LocationQuery, WeatherError>
where
    C: Console + ?Sized,
    Tz: TimeZone,
{
    let dataset = load_dataset(&ctx.city_list);
    let candidates = find_candidates(name, &dataset);

    let location = match candidates.as_slice() {
        [] | [_] => LocationQuery::City {
            name: name.to_string(),
            state: None,
            country: None,
        },
        many => LocationQuery::from(&disambiguate(many, console)?),
    };
    Ok(location)
}

fn render_all<Tz: TimeZone>(
    records: &[WeatherRecord],
    fallback_name: &str,
    settings: &Settings,
    ctx: &FetchContext<Tz>,
) -> Result<Vec<Report>, WeatherError> {
    records
        .iter()
        .map(|r| Report::extract(r, fallback_name, &ctx.tz, settings.units))
        .collect()
}
