use chrono::{NaiveDate, TimeZone};

use crate::{
    console::{Console, select_index},
    error::WeatherError,
    model::WeatherRecord,
};

fn local_date<Tz: TimeZone>(record: &WeatherRecord, tz: &Tz) -> Option<NaiveDate> {
    record.observed_at(tz).map(|dt| dt.date_naive())
}

/// Distinct calendar dates of `records` in `tz`, in first-seen order.
pub fn distinct_dates<Tz: TimeZone>(records: &[WeatherRecord], tz: &Tz) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for date in records.iter().filter_map(|r| local_date(r, tz)) {
        if !dates.contains(&date) {
            dates.push(date);
        }
    }
    dates
}

/// Records whose local date is `date`, keeping their relative order.
pub fn filter_by_date<Tz: TimeZone>(
    records: &[WeatherRecord],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<WeatherRecord> {
    records
        .iter()
        .filter(|r| local_date(r, tz) == Some(date))
        .cloned()
        .collect()
}

/// Narrow a forecast series to a single day picked by the user.
///
/// With `want_filter == false` the records come back untouched and nothing is
/// shown. Otherwise the distinct dates are listed and the user picks one; the
/// menu is skipped when there is nothing to choose between.
pub fn partition_by_date<Tz, C>(
    records: Vec<WeatherRecord>,
    want_filter: bool,
    tz: &Tz,
    console: &mut C,
) -> Result<Vec<WeatherRecord>, WeatherError>
where
    Tz: TimeZone,
    C: Console + ?Sized,
{
    if !want_filter {
        return Ok(records);
    }

    let dates = distinct_dates(&records, tz);
    if dates.len() <= 1 {
        tracing::debug!(dates = dates.len(), "nothing to choose between, keeping all records");
        return Ok(records);
    }

    let labels: Vec<String> = dates
        .iter()
        .map(|d| format!("{} ({})", d.format("%Y-%m-%d"), d.format("%A")))
        .collect();
    let choice = select_index(console, "Available dates:", &labels)?;
    let date = dates[choice];

    let selected = filter_by_date(&records, date, tz);
    tracing::debug!(%date, before = records.len(), after = selected.len(), "filtered forecast");
    Ok(selected)
}
