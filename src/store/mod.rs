//! Persistent, time-ordered collection of fixes.

pub mod sqlite;

use crate::{
    error::Result,
    observation::{Axis, Hemisphere, ObservationPoint},
};

pub use sqlite::SqliteStore;

pub trait Store {
    /// Inserts every point in one transaction. Either all points become
    /// visible or none do. Returns the number of rows added; a fix already
    /// present is not stored twice.
    fn insert_all(&mut self, points: &[ObservationPoint]) -> Result<usize>;

    /// Matching fixes ordered by timestamp, ties in insertion order.
    fn query_range(&self, query: &RangeQuery) -> Result<Vec<ObservationPoint>>;

    /// First and last year present, `None` when empty.
    fn year_range(&self) -> Result<Option<(i32, i32)>>;

    fn count(&self) -> Result<usize>;
}

/// Inclusive range over signed tenths of a degree. A range given inside one
/// hemisphere only matches fixes written with that hemisphere, so `0N` never
/// falls in a southern range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordRange {
    pub min: i32,
    pub max: i32,
    pub hemisphere: Option<Hemisphere>,
}

impl CoordRange {
    pub fn full(axis: Axis) -> Self {
        let max = i32::from(axis.max_tenths());
        CoordRange {
            min: -max,
            max,
            hemisphere: None,
        }
    }

    /// Builds a range from signed degrees, rounding to the nearest tenth.
    pub fn from_degrees(a: f64, b: f64) -> Self {
        let a = to_tenths(a);
        let b = to_tenths(b);
        CoordRange {
            min: a.min(b),
            max: a.max(b),
            hemisphere: None,
        }
    }

    /// Magnitudes `a..b` measured inside one hemisphere.
    pub fn in_hemisphere(a: f64, b: f64, hemisphere: Hemisphere) -> Self {
        let signed = if hemisphere.is_negative() {
            Self::from_degrees(-a, -b)
        } else {
            Self::from_degrees(a, b)
        };

        CoordRange {
            hemisphere: Some(hemisphere),
            ..signed
        }
    }

    /// Parses `LO..HI` in signed degrees, or `LO..HI<H>` with magnitudes in
    /// the hemisphere `<H>` (`5..25S` is `-25.0..-5.0`, south only). The
    /// hemisphere must belong to `axis` and both bounds must lie within it.
    pub fn parse(axis: Axis, s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();
        let (body, hemisphere) = match s.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => match Hemisphere::from_code(c) {
                Some(h) if h.axis() == axis => (&s[..s.len() - 1], Some(h)),
                Some(h) => {
                    return Err(format!("hemisphere {} is not valid for {}", h.code(), axis))
                }
                None => return Err(format!("unknown hemisphere `{}`", c)),
            },
            _ => (s, None),
        };

        let (lo, hi) = body
            .split_once("..")
            .ok_or_else(|| format!("expected LO..HI, got `{}`", s))?;
        let lo = parse_bound(lo)?;
        let hi = parse_bound(hi)?;

        let range = match hemisphere {
            Some(h) if lo < 0.0 || hi < 0.0 => {
                return Err(format!(
                    "bounds in hemisphere {} must be magnitudes, got `{}`",
                    h.code(),
                    s
                ))
            }
            Some(h) => CoordRange::in_hemisphere(lo, hi, h),
            None => CoordRange::from_degrees(lo, hi),
        };

        let limit = i32::from(axis.max_tenths());
        if range.min < -limit || range.max > limit {
            return Err(format!(
                "{} range `{}` exceeds {} degrees",
                axis,
                s,
                limit / 10
            ));
        }

        Ok(range)
    }
}

fn parse_bound(bound: &str) -> std::result::Result<f64, String> {
    bound
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|b| b.is_finite())
        .ok_or_else(|| format!("invalid bound `{}`", bound))
}

fn to_tenths(degrees: f64) -> i32 {
    (degrees * 10.0).round() as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    pub latitude: CoordRange,
    pub longitude: CoordRange,
    /// Inclusive first and last year.
    pub years: Option<(i32, i32)>,
}

impl Default for RangeQuery {
    fn default() -> Self {
        RangeQuery {
            latitude: CoordRange::full(Axis::Latitude),
            longitude: CoordRange::full(Axis::Longitude),
            years: None,
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn signed(min: i32, max: i32) -> CoordRange {
        CoordRange {
            min,
            max,
            hemisphere: None,
        }
    }

    #[test]
    fn should_parse_signed_range() {
        let r = CoordRange::parse(Axis::Latitude, "-20..10.5").unwrap();

        assert_eq!(r, signed(-200, 105));
    }

    #[test]
    fn should_parse_hemisphere_range() {
        let south = CoordRange::parse(Axis::Latitude, "5..25S").unwrap();
        let west = CoordRange::parse(Axis::Longitude, "140..180w").unwrap();
        let north = CoordRange::parse(Axis::Latitude, "0..30N").unwrap();

        assert_eq!((south.min, south.max), (-250, -50));
        assert_eq!(south.hemisphere, Some(Hemisphere::South));
        assert_eq!((west.min, west.max), (-1800, -1400));
        assert_eq!(west.hemisphere, Some(Hemisphere::West));
        assert_eq!((north.min, north.max), (0, 300));
        assert_eq!(north.hemisphere, Some(Hemisphere::North));
    }

    #[test]
    fn should_order_reversed_bounds() {
        let r = CoordRange::parse(Axis::Longitude, "10..-10").unwrap();

        assert_eq!(r, signed(-100, 100));
    }

    #[test]
    fn should_reject_bad_ranges() {
        assert!(CoordRange::parse(Axis::Latitude, "10").is_err());
        assert!(CoordRange::parse(Axis::Latitude, "a..b").is_err());
        assert!(CoordRange::parse(Axis::Latitude, "5..25Q").is_err());
        assert!(CoordRange::parse(Axis::Latitude, "-5..25S").is_err());
        assert!(CoordRange::parse(Axis::Latitude, "0..NaN").is_err());
    }

    #[test]
    fn should_reject_hemisphere_of_other_axis() {
        assert!(CoordRange::parse(Axis::Latitude, "5..25W").is_err());
        assert!(CoordRange::parse(Axis::Longitude, "5..25S").is_err());
    }

    #[test]
    fn should_reject_bounds_beyond_axis() {
        assert!(CoordRange::parse(Axis::Latitude, "0..500").is_err());
        assert!(CoordRange::parse(Axis::Latitude, "80..91N").is_err());
        assert!(CoordRange::parse(Axis::Longitude, "-181..0").is_err());

        assert_eq!(
            CoordRange::parse(Axis::Latitude, "-90..90").unwrap(),
            CoordRange::full(Axis::Latitude)
        );
        assert!(CoordRange::parse(Axis::Longitude, "170..180E").is_ok());
    }

    #[test]
    fn should_default_to_whole_globe() {
        let q = RangeQuery::default();

        assert_eq!(q.latitude, signed(-900, 900));
        assert_eq!(q.longitude, signed(-1800, 1800));
        assert_eq!(q.years, None);
    }
}
