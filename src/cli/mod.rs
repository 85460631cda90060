//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    observation::Axis,
    store::{CoordRange, RangeQuery},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// Fixes database [default: <data dir>/cyclone-tracks/cyclones.sqlite]
    #[arg(long, global = true, env = "CYCLONE_TRACKS_DB")]
    pub db: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a directory of year folders of best-track files
    Ingest {
        /// Directory containing one folder per year
        root: PathBuf,
    },
    /// List storm paths matching the filters
    Paths {
        #[command(flatten)]
        filter: QueryArgs,
    },
    /// Show the first and last year in the database
    Years {},
    /// Write storm paths matching the filters to a parquet file
    Export {
        /// Output file
        file: PathBuf,
        #[command(flatten)]
        filter: QueryArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Latitude range, signed (`-30..-5`) or in one hemisphere (`5..30S`)
    #[arg(long, allow_hyphen_values = true, value_parser = latitude_range)]
    pub lat: Option<CoordRange>,

    /// Longitude range, signed (`140..180`) or in one hemisphere (`140..180W`)
    #[arg(long, allow_hyphen_values = true, value_parser = longitude_range)]
    pub lon: Option<CoordRange>,

    /// First year, inclusive
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year, inclusive
    #[arg(long)]
    pub to: Option<i32>,
}

impl QueryArgs {
    pub fn to_query(&self) -> RangeQuery {
        let years = match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some((from.unwrap_or(i32::MIN), to.unwrap_or(i32::MAX))),
        };

        RangeQuery {
            latitude: self.lat.unwrap_or(CoordRange::full(Axis::Latitude)),
            longitude: self.lon.unwrap_or(CoordRange::full(Axis::Longitude)),
            years,
        }
    }
}

fn latitude_range(s: &str) -> Result<CoordRange, String> {
    CoordRange::parse(Axis::Latitude, s)
}

fn longitude_range(s: &str) -> Result<CoordRange, String> {
    CoordRange::parse(Axis::Longitude, s)
}

/// Where the database lives when `--db` is not given.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_default()
        .join("cyclone-tracks")
        .join("cyclones.sqlite")
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_have_valid_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_filters() {
        let cli = Cli::parse_from([
            "cyclone-tracks",
            "paths",
            "--lat",
            "5..25S",
            "--lon",
            "-180..-140",
            "--from",
            "1990",
            "--to",
            "1999",
        ]);

        let Commands::Paths { filter } = cli.command else {
            panic!("expected paths command");
        };
        let query = filter.to_query();

        assert_eq!(
            query.latitude,
            CoordRange::parse(Axis::Latitude, "5..25S").unwrap()
        );
        assert_eq!((query.latitude.min, query.latitude.max), (-250, -50));
        assert_eq!(query.longitude.hemisphere, None);
        assert_eq!((query.longitude.min, query.longitude.max), (-1800, -1400));
        assert_eq!(query.years, Some((1990, 1999)));
    }

    #[test]
    fn should_check_range_against_its_axis() {
        let parse = |flag: &str, value: &str| {
            Cli::try_parse_from(["cyclone-tracks", "paths", flag, value])
        };

        assert!(parse("--lat", "5..25W").is_err());
        assert!(parse("--lat", "0..500").is_err());
        assert!(parse("--lon", "5..25S").is_err());
        assert!(parse("--lon", "-190..-170").is_err());
        assert!(parse("--lat", "5..25N").is_ok());
        assert!(parse("--lon", "170..180W").is_ok());
    }

    #[test]
    fn should_default_to_unfiltered_query() {
        let cli = Cli::parse_from(["cyclone-tracks", "--db", "x.sqlite", "export", "out.parquet"]);

        let Commands::Export { file, filter } = cli.command else {
            panic!("expected export command");
        };

        assert_eq!(cli.db, Some(PathBuf::from("x.sqlite")));
        assert_eq!(file, PathBuf::from("out.parquet"));
        assert_eq!(filter.to_query(), RangeQuery::default());
    }

    #[test]
    fn should_open_year_range_on_one_side() {
        let filter = QueryArgs {
            lat: None,
            lon: None,
            from: Some(2000),
            to: None,
        };

        assert_eq!(filter.to_query().years, Some((2000, i32::MAX)));
    }

    #[test]
    fn should_place_default_db_under_app_dir() {
        assert!(default_db_path().ends_with("cyclone-tracks/cyclones.sqlite"));
    }
}
