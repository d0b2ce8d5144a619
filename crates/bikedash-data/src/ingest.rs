//! CSV ingest for the daily and hourly rental tables.
//!
//! Both loaders enforce the table invariants up front: required columns
//! present, every value parseable, hours within 0-23, and no duplicate
//! keys. Any violation is fatal; there is no row skipping.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use bikedash_common::{BikedashError, DailyRecord, DayKind, HourlyRecord, Result, Season};
use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

const DAILY_COLUMNS: [&str; 7] = [
    "dteday",
    "yr",
    "mnth",
    "season",
    "workingday",
    "cnt",
    "registered",
];
const HOURLY_COLUMNS: [&str; 3] = ["dteday", "hr", "cnt"];

/// Load the daily rentals table, sorted by date ascending.
pub fn load_daily_records<P: AsRef<Path>>(path: P) -> Result<Vec<DailyRecord>> {
    let path = path.as_ref();
    debug!("Loading daily rentals table from {}", path.display());

    let mut reader = open_reader(path)?;
    let header_map = read_header_map(&mut reader)?;
    ensure_columns(&header_map, &DAILY_COLUMNS, path)?;

    let mut records = Vec::new();
    let mut seen_dates: HashSet<NaiveDate> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        // Data rows are 1-based and start after the header line.
        let line = idx + 2;
        let record = result?;

        let row =
            parse_daily_row(&record, &header_map).map_err(|msg| row_error(path, line, &msg))?;

        if !seen_dates.insert(row.date) {
            return Err(row_error(path, line, &format!("duplicate date {}", row.date)));
        }

        records.push(row);
    }

    records.sort_by_key(|record| record.date);

    info!(
        "Loaded {} daily rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Load the hourly rentals table, sorted by date then hour.
pub fn load_hourly_records<P: AsRef<Path>>(path: P) -> Result<Vec<HourlyRecord>> {
    let path = path.as_ref();
    debug!("Loading hourly rentals table from {}", path.display());

    let mut reader = open_reader(path)?;
    let header_map = read_header_map(&mut reader)?;
    ensure_columns(&header_map, &HOURLY_COLUMNS, path)?;

    let mut records = Vec::new();
    let mut seen_slots: HashSet<(NaiveDate, u8)> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result?;

        let row =
            parse_hourly_row(&record, &header_map).map_err(|msg| row_error(path, line, &msg))?;

        if !seen_slots.insert((row.date, row.hour)) {
            return Err(row_error(
                path,
                line,
                &format!("duplicate slot {} hour {}", row.date, row.hour),
            ));
        }

        records.push(row);
    }

    records.sort_by_key(|record| (record.date, record.hour));

    info!(
        "Loaded {} hourly rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| {
        BikedashError::data_with_source(format!("failed to open '{}'", path.display()), e)
    })?;

    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn read_header_map(reader: &mut csv::Reader<File>) -> Result<HashMap<String, usize>> {
    let headers = reader.headers()?.clone();
    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect())
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM;
    // without stripping it the column would be reported as missing.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn ensure_columns(
    header_map: &HashMap<String, usize>,
    required: &[&str],
    path: &Path,
) -> Result<()> {
    for column in required {
        if !header_map.contains_key(*column) {
            return Err(BikedashError::data(format!(
                "{}: missing required column '{column}'",
                path.display()
            )));
        }
    }
    Ok(())
}

fn parse_daily_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> std::result::Result<DailyRecord, String> {
    let date = parse_date(get_field(record, header_map, "dteday")?)?;

    let year_raw = get_field(record, header_map, "yr")?;
    let year: i32 = year_raw
        .parse()
        .map_err(|_| format!("invalid year '{year_raw}'"))?;

    let month = parse_month(get_field(record, header_map, "mnth")?)?;

    let season_raw = get_field(record, header_map, "season")?;
    let season: Season = season_raw
        .parse()
        .map_err(|_| format!("invalid season '{season_raw}'"))?;

    let day_raw = get_field(record, header_map, "workingday")?;
    let day_kind: DayKind = day_raw
        .parse()
        .map_err(|_| format!("invalid working-day flag '{day_raw}'"))?;

    let rentals = parse_count(get_field(record, header_map, "cnt")?, "cnt")?;
    let registered = parse_count(get_field(record, header_map, "registered")?, "registered")?;

    Ok(DailyRecord {
        date,
        year,
        month,
        season,
        day_kind,
        rentals,
        registered,
    })
}

fn parse_hourly_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> std::result::Result<HourlyRecord, String> {
    let date = parse_date(get_field(record, header_map, "dteday")?)?;

    let hour_raw = get_field(record, header_map, "hr")?;
    let hour: u8 = hour_raw
        .parse()
        .map_err(|_| format!("invalid hour '{hour_raw}'"))?;
    if hour > 23 {
        return Err(format!("hour '{hour_raw}' out of range 0-23"));
    }

    let rentals = parse_count(get_field(record, header_map, "cnt")?, "cnt")?;

    Ok(HourlyRecord {
        date,
        hour,
        rentals,
    })
}

fn get_field<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> std::result::Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("missing required column '{name}'"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("missing value for '{name}'"))
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    // The cleaned exports use ISO dates, but accept the other separators
    // and orderings that show up in spreadsheet round trips.
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    Err(format!(
        "invalid date '{s}' (expected YYYY-MM-DD, YYYY/MM/DD, or DD/MM/YYYY)"
    ))
}

fn parse_month(s: &str) -> std::result::Result<u32, String> {
    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    if let Ok(number) = s.parse::<u32>() {
        if (1..=12).contains(&number) {
            return Ok(number);
        }
        return Err(format!("month '{s}' out of range 1-12"));
    }

    let lower = s.to_ascii_lowercase();
    NAMES
        .iter()
        .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| format!("invalid month '{s}'"))
}

fn parse_count(s: &str, column: &str) -> std::result::Result<u64, String> {
    s.parse()
        .map_err(|_| format!("invalid {column} value '{s}' (expected a non-negative integer)"))
}

fn row_error(path: &Path, line: usize, message: &str) -> BikedashError {
    BikedashError::data(format!("{}:{line}: {message}", path.display()))
}
