use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf};

/// Unit system requested from the provider; also decides the report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Imperial => "°F",
            Units::Metric => "°C",
            Units::Standard => "K",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Imperial, Units::Metric, Units::Standard]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "imperial" => Ok(Units::Imperial),
            "metric" => Ok(Units::Metric),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow!(
                "Unknown units '{value}'. Supported units: imperial, metric, standard."
            )),
        }
    }
}

fn default_country_code() -> String {
    "us".to_string()
}

/// User settings persisted as JSON.
///
/// Example:
/// {"API_KEY": "...", "zip_code": "90210"}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "API_KEY", default)]
    pub api_key: String,

    #[serde(default)]
    pub zip_code: String,

    /// Country paired with the zip code in `zip={zip},{country}` queries.
    #[serde(default = "default_country_code")]
    pub country_code: String,

    #[serde(default)]
    pub units: Units,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            zip_code: String::new(),
            country_code: default_country_code(),
            units: Units::default(),
        }
    }
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn has_zip_code(&self) -> bool {
        !self.zip_code.trim().is_empty()
    }

    /// Load settings from `path`. `Ok(None)` means first run: the file does not exist yet.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(Some(settings))
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Default path of the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("settings.json"))
    }
}

/// Default path of the city lookup dataset (OpenWeatherMap's `city.list.json`).
pub fn city_list_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("city.list.json"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "cli-mate", "climate")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            api_key: "KEY123".into(),
            zip_code: "90210".into(),
            ..Settings::default()
        };
        settings.save_to(&path).expect("save should succeed");

        let loaded = Settings::load_from(&path)
            .expect("load should succeed")
            .expect("file should exist");
        assert_eq!(loaded.api_key, "KEY123");
        assert_eq!(loaded.zip_code, "90210");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_is_first_run() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = Settings::load_from(&dir.path().join("settings.json")).expect("no error");
        assert!(loaded.is_none());
    }

    #[test]
    fn legacy_two_key_file_gets_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"API_KEY": "abc", "zip_code": "12345"}"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.api_key, "abc");
        assert_eq!(loaded.zip_code, "12345");
        assert_eq!(loaded.country_code, "us");
        assert_eq!(loaded.units, Units::Imperial);
    }

    #[test]
    fn saved_file_uses_upper_case_api_key_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        Settings::default().save_to(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("API_KEY").is_some());
        assert!(raw.get("zip_code").is_some());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn blank_fields_are_not_configured() {
        let settings = Settings {
            api_key: "   ".into(),
            ..Settings::default()
        };
        assert!(!settings.has_api_key());
        assert!(!settings.has_zip_code());
    }

    #[test]
    fn units_parse_roundtrip() {
        for units in Units::all() {
            assert_eq!(Units::try_from(units.as_str()).unwrap(), *units);
        }
        assert!(Units::try_from("kelvinish").is_err());
    }
}
