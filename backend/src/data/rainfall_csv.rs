//! Daily rainfall table: one row per (state, district, month), one column per day
//!
//! The file is semicolon separated and its headers may carry stray double
//! quotes. Day columns are named `1st`, `2nd`, ... `31st`; blank or
//! non-numeric cells count as missing.

use std::io::Read;
use std::path::Path;

use shared::{DailyRainfallRecord, RegionKey, MONTH_NAMES};

use super::DatasetError;

const STATE_COLUMN: &str = "state";
const DISTRICT_COLUMN: &str = "district";
const MONTH_COLUMN: &str = "month";

/// Header name of a day column (1 -> "1st", 22 -> "22nd", 11 -> "11th")
pub fn day_column_name(day: u32) -> String {
    let suffix = match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

fn clean_header(header: &str) -> String {
    header.replace('"', "").trim().to_string()
}

/// Month as a number in 1..=12 or an English month name
fn parse_month(cell: &str) -> Option<u8> {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<f64>() {
        if value.fract() == 0.0 && (1.0..=12.0).contains(&value) {
            return Some(value as u8);
        }
        return None;
    }
    let lower = cell.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.to_lowercase().starts_with(&lower))
        .map(|index| index as u8 + 1)
}

fn parse_reading(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse daily rainfall rows from any reader
pub fn parse_daily_rainfall<R: Read>(reader: R) -> Result<Vec<DailyRainfallRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(clean_header).collect();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let state_idx = column(STATE_COLUMN)?;
    let district_idx = column(DISTRICT_COLUMN)?;
    let month_idx = column(MONTH_COLUMN)?;
    let day_indices: Vec<usize> = (1..=31)
        .filter_map(|day| headers.iter().position(|h| *h == day_column_name(day)))
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rdr.records() {
        let row = row?;
        let state = row.get(state_idx).map(str::trim).unwrap_or_default();
        let district = row.get(district_idx).map(str::trim).unwrap_or_default();
        let month = row.get(month_idx).and_then(parse_month);

        let month = match month {
            Some(month) if !state.is_empty() && !district.is_empty() => month,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let daily = day_indices
            .iter()
            .map(|&i| row.get(i).and_then(parse_reading))
            .collect();
        records.push(DailyRainfallRecord {
            region: RegionKey::new(state, district),
            month,
            daily,
        });
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped rainfall rows without region or valid month");
    }
    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

/// Load the daily rainfall table from disk
pub fn load_daily_rainfall(path: &Path) -> Result<Vec<DailyRainfallRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_daily_rainfall(file)?;
    tracing::info!(path = %path.display(), rows = records.len(), "loaded daily rainfall");
    Ok(records)
}
