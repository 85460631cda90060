//! Loads a tree of best-track files into a [`Store`].
//!
//! The root holds one directory per year, each holding raw track files:
//!
//! ```text
//! root/
//!   1999/
//!     bsh011999.dat
//!     bsh021999.dat
//!   2000/
//!     ...
//! ```
//!
//! Year directories and the files inside them are visited in file-name
//! order. Files are parsed in parallel, but nothing reaches the store until
//! every file has parsed cleanly, and the store write is one transaction.

use std::{
    fs::File,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

use futures::future::join_all;
use log::{debug, info};

use crate::{
    cli::create_progress_bar,
    error::{Error, Result},
    observation::ObservationPoint,
    store::Store,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub years: usize,
    pub files: usize,
    /// Lines parsed.
    pub records: usize,
    /// Rows added to the store.
    pub stored: usize,
}

/// Parses every file under `root` and writes the fixes to `store`. On any
/// error the store is left as it was.
pub async fn ingest(root: &Path, store: &mut impl Store) -> Result<IngestSummary> {
    let year_dirs = list_sorted(root, |p| p.is_dir())?;
    info!("found {} year directories in {}", year_dirs.len(), root.display());

    let mut files = Vec::new();
    for year_dir in &year_dirs {
        let year_files = list_sorted(year_dir, |p| p.is_file())?;
        debug!("{}: {} files", year_dir.display(), year_files.len());
        files.extend(year_files);
    }

    let points = parse_files(files.clone()).await?;
    let records = points.len();
    let stored = store.insert_all(&points)?;
    info!(
        "ingested {} records from {} files, {} new",
        records,
        files.len(),
        stored
    );

    Ok(IngestSummary {
        years: year_dirs.len(),
        files: files.len(),
        records,
        stored,
    })
}

/// Entries of `dir` accepted by `keep`, sorted by file name.
fn list_sorted(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let enumeration_error = |source| Error::DirectoryEnumeration {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = dir
        .read_dir()
        .map_err(enumeration_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(enumeration_error)?;

    paths.retain(|p| keep(p.as_path()));
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths)
}

/// Parses files on blocking tasks. Results keep the order of `files`; the
/// first failure in that order is returned.
async fn parse_files(files: Vec<PathBuf>) -> Result<Vec<ObservationPoint>> {
    let progress_bar = create_progress_bar(files.len() as u64, "Parsing track files".to_string());

    let tasks: Vec<_> = files
        .into_iter()
        .map(|file| {
            let pb = progress_bar.clone();
            tokio::task::spawn_blocking(move || {
                let points = parse_file(&file);
                pb.inc(1);
                points
            })
        })
        .collect();

    let mut points = Vec::new();
    for result in join_all(tasks).await {
        points.extend(result??);
    }
    progress_bar.finish_with_message("Track files parsed");

    Ok(points)
}

fn parse_file(file_path: &Path) -> Result<Vec<ObservationPoint>> {
    let read_error = |source| Error::FileRead {
        path: file_path.to_path_buf(),
        source,
    };

    let file = File::open(file_path).map_err(read_error)?;
    let reader = io::BufReader::new(file);
    let mut points = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(read_error)?;
        if line.trim().is_empty() {
            continue;
        }

        let point = ObservationPoint::from_line(&line).map_err(|source| Error::MalformedRecord {
            path: file_path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        points.push(point);
    }

    Ok(points)
}

// -- Tests -------------------------------------------------------------------
