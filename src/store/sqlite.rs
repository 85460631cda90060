//! SQLite-backed [`Store`].

use std::{fs, path::Path};

use chrono::{Datelike, NaiveDateTime};
use log::debug;
use rusqlite::{params, types::Type, Connection, Row};

use super::{CoordRange, RangeQuery, Store};
use crate::{
    error::{Error, Result},
    observation::{Axis, GeoCoordinate, Hemisphere, ObservationPoint},
};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS fixes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        year INTEGER NOT NULL,
        storm_id INTEGER NOT NULL,
        latitude_value INTEGER NOT NULL,
        latitude_direction TEXT NOT NULL,
        longitude_value INTEGER NOT NULL,
        longitude_direction TEXT NOT NULL,
        latitude INTEGER NOT NULL,
        longitude INTEGER NOT NULL,
        UNIQUE (date, storm_id, latitude, longitude)
    );
    CREATE INDEX IF NOT EXISTS fixes_year ON fixes (year);
    CREATE INDEX IF NOT EXISTS fixes_position ON fixes (latitude, longitude);
"#;

/// Owns the single connection to the fixes database. The connection closes
/// when the store is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        debug!("opening store {}", db_path.display());

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path).map_err(|source| Error::StoreConnection {
            path: db_path.to_path_buf(),
            source,
        })?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(|source| Error::StoreConnection {
                path: db_path.to_path_buf(),
                source,
            })?;

        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::StoreConnection {
            path: ":memory:".into(),
            source,
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).map_err(Error::StoreWrite)?;

        Ok(SqliteStore { conn })
    }
}

impl Store for SqliteStore {
    fn insert_all(&mut self, points: &[ObservationPoint]) -> Result<usize> {
        let tx = self.conn.transaction().map_err(Error::StoreWrite)?;
        let mut stored = 0;

        {
            let mut stmt = tx
                .prepare(
                    r#"
                    INSERT OR IGNORE INTO fixes (
                        date, year, storm_id,
                        latitude_value, latitude_direction,
                        longitude_value, longitude_direction,
                        latitude, longitude
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                )
                .map_err(Error::StoreWrite)?;

            for p in points {
                let lat = p.latitude();
                let lon = p.longitude();
                stored += stmt
                    .execute(params![
                        p.timestamp(),
                        p.timestamp().year(),
                        p.storm_id(),
                        lat.tenths(),
                        lat.hemisphere().code().to_string(),
                        lon.tenths(),
                        lon.hemisphere().code().to_string(),
                        lat.signed_tenths(),
                        lon.signed_tenths(),
                    ])
                    .map_err(Error::StoreWrite)?;
            }
        }

        // dropping `tx` on any error above rolls the whole batch back
        tx.commit().map_err(Error::StoreWrite)?;
        debug!("committed {} of {} fixes", stored, points.len());

        Ok(stored)
    }

    fn query_range(&self, query: &RangeQuery) -> Result<Vec<ObservationPoint>> {
        let (first_year, last_year) = query.years.unwrap_or((i32::MIN, i32::MAX));
        let direction = |range: &CoordRange| range.hemisphere.map(|h| h.code().to_string());

        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT date, storm_id,
                       latitude_value, latitude_direction,
                       longitude_value, longitude_direction
                FROM fixes
                WHERE latitude BETWEEN ?1 AND ?2
                  AND longitude BETWEEN ?3 AND ?4
                  AND year BETWEEN ?5 AND ?6
                  AND (?7 IS NULL OR latitude_direction = ?7)
                  AND (?8 IS NULL OR longitude_direction = ?8)
                ORDER BY date ASC, id ASC
                "#,
            )
            .map_err(Error::StoreQuery)?;

        let rows = stmt
            .query_map(
                params![
                    query.latitude.min,
                    query.latitude.max,
                    query.longitude.min,
                    query.longitude.max,
                    first_year,
                    last_year,
                    direction(&query.latitude),
                    direction(&query.longitude),
                ],
                point_from_row,
            )
            .map_err(Error::StoreQuery)?;

        let points = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::StoreQuery)?;
        debug!("query {:?} matched {} fixes", query, points.len());

        Ok(points)
    }

    fn year_range(&self) -> Result<Option<(i32, i32)>> {
        let range: (Option<i32>, Option<i32>) = self
            .conn
            .query_row("SELECT MIN(year), MAX(year) FROM fixes", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(Error::StoreQuery)?;

        Ok(match range {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        })
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM fixes", [], |row| row.get(0))
            .map_err(Error::StoreQuery)?;

        Ok(count as usize)
    }
}

fn point_from_row(row: &Row) -> rusqlite::Result<ObservationPoint> {
    let timestamp: NaiveDateTime = row.get(0)?;
    let storm_id: i64 = row.get(1)?;
    let latitude = coordinate_from_row(row, Axis::Latitude, 2)?;
    let longitude = coordinate_from_row(row, Axis::Longitude, 4)?;

    ObservationPoint::new(timestamp, storm_id, latitude, longitude)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))
}

fn coordinate_from_row(row: &Row, axis: Axis, idx: usize) -> rusqlite::Result<GeoCoordinate> {
    let tenths: u16 = row.get(idx)?;
    let direction: String = row.get(idx + 1)?;

    let hemisphere = direction
        .chars()
        .next()
        .and_then(Hemisphere::from_code)
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx + 1,
                Type::Text,
                format!("unknown hemisphere `{}`", direction).into(),
            )
        })?;

    GeoCoordinate::new(axis, tenths, hemisphere)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

// -- Tests -------------------------------------------------------------------
