//! Export storm paths to parquet for external renderers.

use std::path::Path;

use anyhow::Result;

use crate::{parquet, store::RangeQuery};

use super::paths;

/// Returns the number of paths and rows written.
pub fn export(db_path: &Path, query: &RangeQuery, file_path: &Path) -> Result<(usize, usize)> {
    let paths = paths(db_path, query)?;
    let rows = parquet::save_paths(&paths, file_path)?;

    Ok((paths.len(), rows))
}

// -- Tests -------------------------------------------------------------------
