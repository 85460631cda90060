//! Fixed-point geographic coordinates.
//!
//! Best-track files encode positions in tenths of a degree with a trailing
//! hemisphere letter (`152S`). Magnitudes are kept as integer tenths so that
//! range comparisons in the store never see float rounding.

use std::fmt;

use thiserror::Error;

/// Largest latitude magnitude, in tenths of a degree.
pub const MAX_LATITUDE_TENTHS: u16 = 900;
/// Largest longitude magnitude, in tenths of a degree.
pub const MAX_LONGITUDE_TENTHS: u16 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn max_tenths(&self) -> u16 {
        match self {
            Axis::Latitude => MAX_LATITUDE_TENTHS,
            Axis::Longitude => MAX_LONGITUDE_TENTHS,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Maps a one-letter code to a hemisphere, case-insensitively.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("hemisphere {} is not valid for {expected}", .hemisphere.code())]
    WrongAxis { expected: Axis, hemisphere: Hemisphere },
    #[error("{axis} {}.{} exceeds {}", .tenths / 10, .tenths % 10, .axis.max_tenths() / 10)]
    OutOfRange { axis: Axis, tenths: u16 },
}

/// A degree magnitude (in tenths) paired with its hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoCoordinate {
    tenths: u16,
    hemisphere: Hemisphere,
}

impl GeoCoordinate {
    pub fn new(axis: Axis, tenths: u16, hemisphere: Hemisphere) -> Result<Self, CoordinateError> {
        if hemisphere.axis() != axis {
            return Err(CoordinateError::WrongAxis {
                expected: axis,
                hemisphere,
            });
        }
        if tenths > axis.max_tenths() {
            return Err(CoordinateError::OutOfRange { axis, tenths });
        }

        Ok(GeoCoordinate { tenths, hemisphere })
    }

    pub fn tenths(&self) -> u16 {
        self.tenths
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn axis(&self) -> Axis {
        self.hemisphere.axis()
    }

    pub fn degrees(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// Negative in the southern and western hemispheres.
    pub fn signed_tenths(&self) -> i32 {
        let tenths = i32::from(self.tenths);
        if self.hemisphere.is_negative() {
            -tenths
        } else {
            tenths
        }
    }

    pub fn signed_degrees(&self) -> f64 {
        if self.hemisphere.is_negative() {
            -self.degrees()
        } else {
            self.degrees()
        }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}{}",
            self.tenths / 10,
            self.tenths % 10,
            self.hemisphere.code()
        )
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_project_sign_from_hemisphere() {
        let south = GeoCoordinate::new(Axis::Latitude, 78, Hemisphere::South).unwrap();
        let north = GeoCoordinate::new(Axis::Latitude, 78, Hemisphere::North).unwrap();
        let west = GeoCoordinate::new(Axis::Longitude, 1523, Hemisphere::West).unwrap();
        let east = GeoCoordinate::new(Axis::Longitude, 1523, Hemisphere::East).unwrap();

        assert_eq!(south.signed_tenths(), -78);
        assert_eq!(north.signed_tenths(), 78);
        assert_eq!(west.signed_degrees(), -152.3);
        assert_eq!(east.signed_degrees(), 152.3);
    }

    #[test]
    fn should_keep_tenths_exact() {
        let c = GeoCoordinate::new(Axis::Latitude, 152, Hemisphere::North).unwrap();

        assert_eq!(c.degrees(), 15.2);
        assert_eq!(c.to_string(), "15.2N");
    }

    #[test]
    fn should_reject_hemisphere_for_other_axis() {
        let err = GeoCoordinate::new(Axis::Latitude, 100, Hemisphere::East).unwrap_err();

        assert_eq!(
            err,
            CoordinateError::WrongAxis {
                expected: Axis::Latitude,
                hemisphere: Hemisphere::East
            }
        );
    }

    #[test]
    fn should_enforce_axis_bounds() {
        assert!(GeoCoordinate::new(Axis::Latitude, 900, Hemisphere::South).is_ok());
        assert!(GeoCoordinate::new(Axis::Latitude, 901, Hemisphere::South).is_err());
        assert!(GeoCoordinate::new(Axis::Longitude, 1800, Hemisphere::West).is_ok());
        assert!(GeoCoordinate::new(Axis::Longitude, 1801, Hemisphere::West).is_err());
    }

    #[test]
    fn should_map_codes_case_insensitively() {
        assert_eq!(Hemisphere::from_code('s'), Some(Hemisphere::South));
        assert_eq!(Hemisphere::from_code('W'), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_code('X'), None);
    }
}
