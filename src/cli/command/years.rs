use std::path::Path;

use anyhow::Result;

use crate::store::{SqliteStore, Store};

/// First and last year in the database, with the number of stored fixes.
pub fn years(db_path: &Path) -> Result<(Option<(i32, i32)>, usize)> {
    let store = SqliteStore::open(db_path)?;

    Ok((store.year_range()?, store.count()?))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;
    use crate::observation::ObservationPoint;

    #[test]
    fn should_report_empty_database() {
        let dir = TempDir::new().unwrap();

        let (range, count) = years(&dir.path().join("cyclones.sqlite")).unwrap();

        assert_eq!(range, None);
        assert_eq!(count, 0);
    }

    #[test]
    fn should_report_year_span_and_count() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("cyclones.sqlite");
        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            let points: Vec<ObservationPoint> = [
                "SH, 01, 1989120100, , BEST, 0, 100S, 1500E",
                "SH, 01, 1990010100, , BEST, 0, 110S, 1500E",
                "SH, 04, 1994030100, , BEST, 0, 120S, 1600E",
            ]
            .iter()
            .map(|l| ObservationPoint::from_line(l).unwrap())
            .collect();
            store.insert_all(&points).unwrap();
        }

        assert_eq!(years(&db_path).unwrap(), (Some((1989, 1994)), 3));
    }
}
