use chrono::{NaiveDateTime, NaiveTime, TimeZone};
use std::fmt;

use crate::{
    compass::{CompassPoint, resolve_direction},
    config::Units,
    error::WeatherError,
    model::{Precipitation, WeatherRecord, local_datetime},
};

const RULE_WIDTH: usize = 29;

/// Which accumulation window a precipitation amount covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationWindow {
    OneHour,
    ThreeHours,
}

impl PrecipitationWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecipitationWindow::OneHour => "1h",
            PrecipitationWindow::ThreeHours => "3h",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationReading {
    /// Millimeters, as reported by the provider.
    pub amount: f64,
    pub window: PrecipitationWindow,
}

impl PrecipitationReading {
    /// Prefer the 1h amount, fall back to 3h.
    fn from_source(source: Option<&Precipitation>) -> Option<Self> {
        let source = source?;
        source
            .one_hour
            .map(|amount| Self {
                amount,
                window: PrecipitationWindow::OneHour,
            })
            .or_else(|| {
                source.three_hours.map(|amount| Self {
                    amount,
                    window: PrecipitationWindow::ThreeHours,
                })
            })
    }
}

/// Display fields extracted from one [`WeatherRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Uppercased place name.
    pub location: String,
    pub observed_at: NaiveDateTime,
    pub description: String,
    pub units: Units,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// How far the maximum sits above the current temperature; never negative.
    pub high_variance: f64,
    /// How far the minimum sits below the current temperature; never negative.
    pub low_variance: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: CompassPoint,
    pub rainfall: Option<PrecipitationReading>,
    pub snowfall: Option<PrecipitationReading>,
    pub cloud_coverage: u8,
    pub visibility_km: Option<f64>,
    pub sunrise: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
}

impl Report {
    /// Pull the display fields out of `record`, rendering times in `tz`.
    ///
    /// `fallback_name` is used when the record carries no place name of its
    /// own, which is the case for every step of a forecast.
    pub fn extract<Tz: TimeZone>(
        record: &WeatherRecord,
        fallback_name: &str,
        tz: &Tz,
        units: Units,
    ) -> Result<Self, WeatherError> {
        let description = record
            .weather
            .first()
            .and_then(|c| c.description.clone())
            .ok_or(WeatherError::MissingField("weather[0].description"))?;

        let observed_at = record
            .observed_at(tz)
            .ok_or(WeatherError::MissingField("dt"))?
            .naive_local();

        let location = record
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(fallback_name)
            .to_uppercase();

        let main = &record.main;
        let sun = record.sys.as_ref();
        let time_of_day = |ts: Option<i64>| {
            ts.and_then(|ts| local_datetime(ts, tz))
                .map(|dt| dt.naive_local().time())
        };

        Ok(Self {
            location,
            observed_at,
            description,
            units,
            temperature: main.temp,
            feels_like: main.feels_like,
            temp_min: main.temp_min,
            temp_max: main.temp_max,
            high_variance: (main.temp_max - main.temp).max(0.0),
            low_variance: (main.temp - main.temp_min).max(0.0),
            humidity: main.humidity,
            wind_speed: record.wind.speed,
            wind_direction: resolve_direction(record.wind.deg),
            rainfall: PrecipitationReading::from_source(record.rain.as_ref()),
            snowfall: PrecipitationReading::from_source(record.snow.as_ref()),
            cloud_coverage: record.clouds.all,
            visibility_km: record.visibility.map(|m| f64::from(m) / 1000.0),
            sunrise: time_of_day(sun.and_then(|s| s.sunrise)),
            sunset: time_of_day(sun.and_then(|s| s.sunset)),
        })
    }
}

/// Round to one decimal, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deg = self.units.temperature_label();
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "Weather for {}", self.location)?;
        writeln!(f, "{}", self.observed_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Current Temperature: {:.1}{deg}", round1(self.temperature))?;
        writeln!(f, "Feels Like: {:.1}{deg}", round1(self.feels_like))?;
        writeln!(f, "Min Temperature: {:.1}{deg}", round1(self.temp_min))?;
        writeln!(f, "Max Temperature: {:.1}{deg}", round1(self.temp_max))?;
        writeln!(
            f,
            "Variance: +{:.1} / -{:.1}",
            round1(self.high_variance),
            round1(self.low_variance)
        )?;
        writeln!(f, "Humidity: {}%", self.humidity)?;
        writeln!(
            f,
            "Wind Speed: {:.1} {}",
            round1(self.wind_speed),
            self.units.speed_label()
        )?;
        writeln!(f, "Wind Direction: {}", self.wind_direction)?;
        if let Some(rain) = &self.rainfall {
            writeln!(f, "Rainfall: {} mm ({})", rain.amount, rain.window.as_str())?;
        }
        if let Some(snow) = &self.snowfall {
            writeln!(f, "Snowfall: {} mm ({})", snow.amount, snow.window.as_str())?;
        }
        writeln!(f, "Cloud Coverage: {}%", self.cloud_coverage)?;
        if let Some(km) = self.visibility_km {
            writeln!(f, "Visibility: {:.1} km", round1(km))?;
        }
        if let Some(sunrise) = self.sunrise {
            writeln!(f, "Sunrise: {}", sunrise.format("%H:%M"))?;
        }
        if let Some(sunset) = self.sunset {
            writeln!(f, "Sunset: {}", sunset.format("%H:%M"))?;
        }
        write!(f, "{rule}")
    }
}
