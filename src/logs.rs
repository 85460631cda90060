//! Terminal logging. Progress bars go to stderr as well, so the default level
//! only lets warnings through.

use anyhow::Result;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

pub fn init(verbosity: u8) -> Result<()> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    TermLogger::init(
        level_for(verbosity),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// -- Tests -------------------------------------------------------------------
