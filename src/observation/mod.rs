//! Storm position fixes.

pub mod geo;
pub mod parser;

use std::fmt;

use chrono::NaiveDateTime;

pub use geo::{Axis, CoordinateError, GeoCoordinate, Hemisphere};
pub use parser::MalformedRecord;

/// One timestamped position of a storm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationPoint {
    timestamp: NaiveDateTime,
    storm_id: i64,
    latitude: GeoCoordinate,
    longitude: GeoCoordinate,
}

impl ObservationPoint {
    /// Fails if either coordinate is on the wrong axis.
    pub fn new(
        timestamp: NaiveDateTime,
        storm_id: i64,
        latitude: GeoCoordinate,
        longitude: GeoCoordinate,
    ) -> Result<Self, CoordinateError> {
        if latitude.axis() != Axis::Latitude {
            return Err(CoordinateError::WrongAxis {
                expected: Axis::Latitude,
                hemisphere: latitude.hemisphere(),
            });
        }
        if longitude.axis() != Axis::Longitude {
            return Err(CoordinateError::WrongAxis {
                expected: Axis::Longitude,
                hemisphere: longitude.hemisphere(),
            });
        }

        Ok(ObservationPoint {
            timestamp,
            storm_id,
            latitude,
            longitude,
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn storm_id(&self) -> i64 {
        self.storm_id
    }

    pub fn latitude(&self) -> GeoCoordinate {
        self.latitude
    }

    pub fn longitude(&self) -> GeoCoordinate {
        self.longitude
    }
}

impl fmt::Display for ObservationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.latitude,
            self.longitude
        )
    }
}
