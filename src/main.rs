mod cli;
mod error;
mod ingest;
mod logs;
mod observation;
mod parquet;
mod segment;
mod store;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    logs::init(cli.verbose)?;

    let db_path = cli.db.clone().unwrap_or_else(cli::default_db_path);

    let outcome = match &cli.command {
        Commands::Ingest { root } => command::ingest(root, &db_path).await.map(|summary| {
            println!(
                "Ingested {} records from {} files in {} year directories ({} new) into `{}`",
                summary.records,
                summary.files,
                summary.years,
                summary.stored,
                db_path.display()
            )
        }),
        Commands::Paths { filter } => command::paths(&db_path, &filter.to_query()).map(|paths| {
            for (idx, path) in paths.iter().enumerate() {
                println!("{}", command::paths::describe(idx, path));
            }
            println!("{} paths", paths.len());
        }),
        Commands::Years {} => command::years(&db_path).map(|(range, count)| match range {
            Some((first, last)) => println!("{}..{} ({} fixes)", first, last, count),
            None => println!("No fixes in `{}`", db_path.display()),
        }),
        Commands::Export { file, filter } => command::export(&db_path, &filter.to_query(), file)
            .map(|(paths, rows)| {
                println!(
                    "{} paths ({} fixes) saved to `{}`",
                    paths,
                    rows,
                    file.display()
                )
            }),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
