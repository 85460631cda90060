//! Error types shared by ingestion, storage and export.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::observation::MalformedRecord;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed record at {}:{line}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: MalformedRecord,
    },

    #[error("Failed to list directory `{}`", .path.display())]
    DirectoryEnumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read `{}`", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open store `{}`", .path.display())]
    StoreConnection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to write to store")]
    StoreWrite(#[source] rusqlite::Error),

    #[error("Failed to query store")]
    StoreQuery(#[source] rusqlite::Error),

    #[error("Worker task failed")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to write parquet file")]
    Export(#[from] parquet::errors::ParquetError),

    #[error("Failed to build record batch")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
