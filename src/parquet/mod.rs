//! Handles serialising segmented tracks to disk in the _parquet_ file format.

pub mod paths;

pub use paths::save_paths;
