//! Query the database and split the result into storm paths.

use std::path::Path;

use anyhow::Result;

use crate::{
    cli::create_spinner,
    segment::{segment, TrackPath},
    store::{RangeQuery, SqliteStore, Store},
};

pub fn paths(db_path: &Path, query: &RangeQuery) -> Result<Vec<TrackPath>> {
    let store = SqliteStore::open(db_path)?;

    let bar = create_spinner("Querying fixes...".to_string());
    let points = store.query_range(query)?;
    bar.finish_with_message(format!("{} fixes matched", points.len()));

    Ok(segment(points))
}

/// One line per path: index, storm, size, then first and last fix.
pub fn describe(idx: usize, path: &TrackPath) -> String {
    format!(
        "{:>5}  storm {:>3}  {:>4} fixes  {}  ->  {}",
        idx,
        path.storm_id(),
        path.len(),
        path.first(),
        path.last()
    )
}

// -- Tests -------------------------------------------------------------------
