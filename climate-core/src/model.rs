//! Provider payloads and city dataset entries.
//!
//! Field names follow OpenWeatherMap's 2.5 API; anything the API may omit is an `Option`.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// One observation or forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub clouds: Clouds,
    pub main: Temperature,
    pub wind: Wind,
    /// Unix epoch seconds.
    pub dt: i64,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub snow: Option<Precipitation>,
    /// Meters.
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub sys: Option<Sun>,
    #[serde(default)]
    pub name: Option<String>,
}

impl WeatherRecord {
    /// The observation time in `tz`, if `dt` is representable.
    pub fn observed_at<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        local_datetime(self.dt, tz)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    /// Percent.
    pub all: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Bearing in degrees.
    pub deg: f64,
}

/// Rain or snow volume in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// Body of the 5 day / 3 hour forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub city: ForecastCity,
    pub list: Vec<WeatherRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Where to ask the provider about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    Zip {
        zip: String,
        country: String,
    },
    City {
        name: String,
        state: Option<String>,
        country: Option<String>,
    },
}

impl LocationQuery {
    /// Query parameter for the provider: `zip={zip},{country}` or `q={name}[,{state}][,{country}]`.
    pub fn query_param(&self) -> (&'static str, String) {
        match self {
            LocationQuery::Zip { zip, country } => {
                ("zip", format!("{},{}", zip.trim(), country.trim()))
            }
            LocationQuery::City {
                name,
                state,
                country,
            } => {
                let mut q = name.clone();
                for part in [state, country].into_iter().flatten() {
                    q.push(',');
                    q.push_str(part);
                }
                ("q", q)
            }
        }
    }
}

impl From<&CityCandidate> for LocationQuery {
    fn from(city: &CityCandidate) -> Self {
        LocationQuery::City {
            name: city.name.clone(),
            state: city.state.clone(),
            country: Some(city.country.clone()),
        }
    }
}

/// An entry of the city lookup dataset (`city.list.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub state: Option<String>,
    pub country: String,
    pub coord: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

pub(crate) fn local_datetime<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(ts, 0).map(|utc| utc.with_timezone(tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_weather_payload_decodes() {
        let record: WeatherRecord = serde_json::from_value(json!({
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "main": {"temp": 71.3, "feels_like": 70.9, "temp_min": 69.8, "temp_max": 73.0,
                     "pressure": 1012, "humidity": 64},
            "visibility": 10000,
            "wind": {"speed": 8.05, "deg": 200},
            "rain": {"1h": 0.25},
            "clouds": {"all": 75},
            "dt": 1717257600,
            "sys": {"country": "US", "sunrise": 1717243200, "sunset": 1717296000},
            "name": "Beverly Hills",
            "cod": 200
        }))
        .expect("payload should decode");

        assert_eq!(record.name.as_deref(), Some("Beverly Hills"));
        assert_eq!(record.rain.as_ref().and_then(|r| r.one_hour), Some(0.25));
        assert!(record.snow.is_none());
        assert_eq!(record.visibility, Some(10000));
        assert_eq!(record.sys.as_ref().and_then(|s| s.sunset), Some(1717296000));
    }

    #[test]
    fn forecast_step_without_optional_fields_decodes() {
        let record: WeatherRecord = serde_json::from_value(json!({
            "dt": 1717268400,
            "main": {"temp": 60.0, "feels_like": 59.0, "temp_min": 58.0, "temp_max": 61.0, "humidity": 80},
            "weather": [{"description": "overcast clouds"}],
            "clouds": {"all": 100},
            "wind": {"speed": 3.2, "deg": 10},
            "sys": {"pod": "n"},
            "dt_txt": "2024-06-01 19:00:00"
        }))
        .expect("payload should decode");

        assert!(record.rain.is_none());
        assert!(record.visibility.is_none());
        assert!(record.name.is_none());
        let sun = record.sys.expect("sys present");
        assert!(sun.sunrise.is_none());
        assert!(sun.sunset.is_none());
    }

    #[test]
    fn missing_weather_list_decodes_empty() {
        let record: WeatherRecord = serde_json::from_value(json!({
            "dt": 0,
            "main": {"temp": 1.0, "feels_like": 1.0, "temp_min": 1.0, "temp_max": 1.0, "humidity": 1},
            "clouds": {"all": 0},
            "wind": {"speed": 0.0, "deg": 0}
        }))
        .unwrap();
        assert!(record.weather.is_empty());
    }

    #[test]
    fn missing_required_field_fails() {
        let res: Result<WeatherRecord, _> = serde_json::from_value(json!({
            "dt": 0,
            "clouds": {"all": 0},
            "wind": {"speed": 0.0, "deg": 0}
        }));
        assert!(res.is_err());
    }

    #[test]
    fn city_entry_treats_empty_state_as_absent() {
        let cities: Vec<CityCandidate> = serde_json::from_value(json!([
            {"id": 1, "name": "Paris", "state": "", "country": "FR", "coord": {"lon": 2.35, "lat": 48.85}},
            {"id": 2, "name": "Paris", "state": "TX", "country": "US", "coord": {"lon": -95.55, "lat": 33.66}},
            {"id": 3, "name": "Paris", "country": "CA", "coord": {"lon": -80.38, "lat": 43.2}}
        ]))
        .unwrap();

        assert_eq!(cities[0].state, None);
        assert_eq!(cities[1].state.as_deref(), Some("TX"));
        assert_eq!(cities[2].state, None);
    }

    #[test]
    fn query_params() {
        let zip = LocationQuery::Zip {
            zip: " 90210 ".into(),
            country: "us".into(),
        };
        assert_eq!(zip.query_param(), ("zip", "90210,us".to_string()));

        let bare = LocationQuery::City {
            name: "Paris".into(),
            state: None,
            country: None,
        };
        assert_eq!(bare.query_param(), ("q", "Paris".to_string()));

        let city = CityCandidate {
            name: "Springfield".into(),
            state: Some("MO".into()),
            country: "US".into(),
            coord: Coordinates { lat: 37.2, lon: -93.3 },
        };
        assert_eq!(
            LocationQuery::from(&city).query_param(),
            ("q", "Springfield,MO,US".to_string())
        );
    }
}
