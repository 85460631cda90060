//! Load raw best-track files into the database.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    ingest::{self, IngestSummary},
    store::SqliteStore,
};

pub async fn ingest(root: &Path, db_path: &Path) -> Result<IngestSummary> {
    let mut store = SqliteStore::open(db_path)?;

    let summary = ingest::ingest(root, &mut store)
        .await
        .with_context(|| format!("Nothing ingested from `{}`", root.display()))?;

    Ok(summary)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::store::Store;

    #[tokio::test]
    async fn should_ingest_into_database_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("raw");
        fs::create_dir_all(root.join("2004")).unwrap();
        fs::write(
            root.join("2004").join("bwp122004.dat"),
            "WP, 12, 2004081006, , BEST, 0, 152N, 1301E, 45\n",
        )
        .unwrap();
        let db_path = dir.path().join("cyclones.sqlite");

        let summary = ingest(&root, &db_path).await.unwrap();
        assert_eq!(summary.stored, 1);

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.year_range().unwrap(), Some((2004, 2004)));
    }

    #[tokio::test]
    async fn should_name_root_in_error() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("missing");

        let err = ingest(&root, &dir.path().join("cyclones.sqlite"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("missing"));
    }
}
