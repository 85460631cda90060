//! Parses best-track lines into [`ObservationPoint`]s.
//!
//! A line is comma separated. Only four fields are read:
//!
//! | index | content                                  |
//! |-------|------------------------------------------|
//! | 1     | storm number                             |
//! | 2     | `YYYYMMDDHH`, whitespace ignored          |
//! | 6     | latitude in tenths, `N`/`S` suffix        |
//! | 7     | longitude in tenths, `E`/`W` suffix       |

use chrono::NaiveDate;
use thiserror::Error;

use super::{Axis, GeoCoordinate, Hemisphere, ObservationPoint};

const MIN_FIELDS: usize = 8;
const STORM_ID_FIELD: usize = 1;
const DATE_FIELD: usize = 2;
const LATITUDE_FIELD: usize = 6;
const LONGITUDE_FIELD: usize = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("expected at least 8 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid date `{0}`, expected YYYYMMDDHH")]
    Date(String),

    #[error("invalid storm id `{0}`")]
    StormId(String),

    #[error("invalid {axis} `{value}`: {reason}")]
    Coordinate {
        axis: Axis,
        value: String,
        reason: String,
    },
}

impl ObservationPoint {
    pub fn from_line(line: &str) -> Result<Self, MalformedRecord> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < MIN_FIELDS {
            return Err(MalformedRecord::FieldCount(fields.len()));
        }

        let timestamp = parse_date(fields[DATE_FIELD])?;
        let storm_id = parse_storm_id(fields[STORM_ID_FIELD])?;
        let latitude = parse_coordinate(fields[LATITUDE_FIELD], Axis::Latitude)?;
        let longitude = parse_coordinate(fields[LONGITUDE_FIELD], Axis::Longitude)?;

        Ok(ObservationPoint {
            timestamp,
            storm_id,
            latitude,
            longitude,
        })
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_date(field: &str) -> Result<chrono::NaiveDateTime, MalformedRecord> {
    let date = strip_whitespace(field);
    if date.len() != 10 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedRecord::Date(date));
    }

    let number = |from: usize, to: usize| date[from..to].parse::<u32>().ok();

    number(0, 4)
        .and_then(|year| {
            NaiveDate::from_ymd_opt(year as i32, number(4, 6)?, number(6, 8)?)?
                .and_hms_opt(number(8, 10)?, 0, 0)
        })
        .ok_or(MalformedRecord::Date(date))
}

fn parse_storm_id(field: &str) -> Result<i64, MalformedRecord> {
    let id = field.trim();
    id.parse()
        .map_err(|_| MalformedRecord::StormId(id.to_string()))
}

fn parse_coordinate(field: &str, axis: Axis) -> Result<GeoCoordinate, MalformedRecord> {
    let value = strip_whitespace(field);
    let invalid = |reason: String| MalformedRecord::Coordinate {
        axis,
        value: value.clone(),
        reason,
    };

    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, letters) = value.split_at(split);

    if digits.is_empty() || letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Err(invalid(
            "expected digits followed by a hemisphere letter".to_string(),
        ));
    }

    let mut codes = letters.chars();
    let hemisphere = match (codes.next().and_then(Hemisphere::from_code), codes.next()) {
        (Some(hemisphere), None) => hemisphere,
        _ => return Err(invalid(format!("unknown hemisphere `{}`", letters))),
    };

    let tenths: u16 = digits
        .parse()
        .map_err(|_| invalid("magnitude out of range".to_string()))?;

    GeoCoordinate::new(axis, tenths, hemisphere).map_err(|e| invalid(e.to_string()))
}

// -- Tests -------------------------------------------------------------------
