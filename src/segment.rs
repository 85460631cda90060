//! Splits a time-ordered stream of fixes into renderable track paths.
//!
//! A change of storm id always closes the open path. For the same storm id,
//! fixes in the same calendar year always extend the path; across a
//! calendar-year boundary the path is extended only when the gap is under
//! [`MAX_YEAR_CROSSING_GAP_DAYS`] days.

use chrono::{Datelike, Duration, NaiveDateTime};
use log::trace;

use crate::observation::ObservationPoint;

pub const MAX_YEAR_CROSSING_GAP_DAYS: i64 = 365;

/// Consecutive fixes of one storm. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPath {
    storm_id: i64,
    points: Vec<ObservationPoint>,
}

impl TrackPath {
    fn start(first: ObservationPoint) -> Self {
        TrackPath {
            storm_id: first.storm_id(),
            points: vec![first],
        }
    }

    fn push(&mut self, point: ObservationPoint) {
        debug_assert_eq!(point.storm_id(), self.storm_id);
        self.points.push(point);
    }

    pub fn storm_id(&self) -> i64 {
        self.storm_id
    }

    pub fn points(&self) -> &[ObservationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> &ObservationPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &ObservationPoint {
        &self.points[self.points.len() - 1]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Append,
    NewPath,
}

/// Decides how a fix relates to the open path of the same storm.
pub fn step_for(last: NaiveDateTime, next: NaiveDateTime) -> Step {
    if last.year() == next.year() {
        return Step::Append;
    }

    if next - last < Duration::days(MAX_YEAR_CROSSING_GAP_DAYS) {
        Step::Append
    } else {
        Step::NewPath
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Open {
        path: TrackPath,
        last_timestamp: NaiveDateTime,
    },
}

/// Streaming segmenter. Feed fixes in timestamp order with [`push`], then
/// call [`finish`] to collect the path still open.
///
/// [`push`]: PathSegmenter::push
/// [`finish`]: PathSegmenter::finish
#[derive(Debug, Default)]
pub struct PathSegmenter {
    state: State,
}

impl PathSegmenter {
    pub fn new() -> Self {
        PathSegmenter::default()
    }

    /// Returns the path closed by this fix, if any.
    pub fn push(&mut self, point: ObservationPoint) -> Option<TrackPath> {
        let timestamp = point.timestamp();

        let (next, closed) = match std::mem::take(&mut self.state) {
            State::Idle => (TrackPath::start(point), None),
            State::Open {
                mut path,
                last_timestamp,
            } => {
                if point.storm_id() != path.storm_id() {
                    (TrackPath::start(point), Some(path))
                } else {
                    match step_for(last_timestamp, timestamp) {
                        Step::Append => {
                            path.push(point);
                            (path, None)
                        }
                        Step::NewPath => (TrackPath::start(point), Some(path)),
                    }
                }
            }
        };

        if let Some(path) = &closed {
            trace!(
                "closed path for storm {} with {} points",
                path.storm_id(),
                path.len()
            );
        }

        self.state = State::Open {
            path: next,
            last_timestamp: timestamp,
        };

        closed
    }

    pub fn finish(self) -> Option<TrackPath> {
        match self.state {
            State::Idle => None,
            State::Open { path, .. } => Some(path),
        }
    }
}

/// Segments a store result. Points are stably sorted by timestamp first, so
/// fixes sharing a timestamp keep their incoming order.
pub fn segment(mut points: Vec<ObservationPoint>) -> Vec<TrackPath> {
    points.sort_by_key(|p| p.timestamp());

    let mut segmenter = PathSegmenter::new();
    let mut paths: Vec<TrackPath> = points
        .into_iter()
        .filter_map(|p| segmenter.push(p))
        .collect();
    paths.extend(segmenter.finish());

    paths
}

// -- Tests -------------------------------------------------------------------
