use std::{collections::HashSet, fs, path::Path};

use crate::{
    console::{Console, select_index},
    error::WeatherError,
    model::CityCandidate,
};

/// Load the city lookup dataset.
///
/// A missing or unreadable file is not an error: city search then behaves as
/// if every name were unambiguous.
pub fn load_dataset(path: &Path) -> Vec<CityCandidate> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("City dataset unavailable at {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(cities) => cities,
        Err(e) => {
            tracing::warn!("City dataset at {} could not be parsed: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Exact, case-sensitive name matches, deduplicated on (name, state, country).
pub fn find_candidates(city_name: &str, dataset: &[CityCandidate]) -> Vec<CityCandidate> {
    let mut seen: HashSet<(&str, Option<&str>, &str)> = HashSet::new();
    let mut found = Vec::new();

    for candidate in dataset.iter().filter(|c| c.name == city_name) {
        let key = (
            candidate.name.as_str(),
            candidate.state.as_deref(),
            candidate.country.as_str(),
        );
        if seen.insert(key) {
            found.push(candidate.clone());
        }
    }

    tracing::debug!(city_name, matches = found.len(), "looked up city candidates");
    found
}

/// One menu line per candidate, e.g. "Springfield, IL, US (39.80, -89.64)".
pub fn describe(candidate: &CityCandidate) -> String {
    let mut line = candidate.name.clone();
    if let Some(state) = &candidate.state {
        line.push_str(", ");
        line.push_str(state);
    }
    format!(
        "{line}, {} ({:.2}, {:.2})",
        candidate.country, candidate.coord.lat, candidate.coord.lon
    )
}

/// Ask the user which of several same-named cities they meant.
pub fn disambiguate<C: Console + ?Sized>(
    candidates: &[CityCandidate],
    console: &mut C,
) -> Result<CityCandidate, WeatherError> {
    let labels: Vec<String> = candidates.iter().map(describe).collect();
    let choice = select_index(console, "Several cities match that name:", &labels)?;
    Ok(candidates[choice].clone())
}

/// Trim and title-case a city query ("new york" -> "New York").
///
/// Letters following any non-letter start a new word, so hyphenated and
/// apostrophe names are capitalized the same way the dataset spells them.
pub fn normalize_city_query(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.trim().chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
