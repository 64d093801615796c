use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

mod api;
mod config;
mod db;
mod error;
mod etl;
mod models;

use api::CocktailClient;
use config::Config;
use db::Repository;
use error::{AppError, Result};

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    db_path: Option<String>,
    letters: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| AppError::Config(format!("{} expects a value", flag)))
        };
        match flag.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--db" => parsed.db_path = Some(value()?),
            "--letters" => parsed.letters = Some(value()?),
            other => return Err(AppError::Config(format!("unknown argument: {}", other))),
        }
    }

    Ok(parsed)
}

fn init_logging(log_file: Option<&str>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // An empty log_file sends logs to stderr.
    match log_file.filter(|p| !p.is_empty()) {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db_path) = args.db_path {
        config.db_path = db_path;
    }
    if let Some(letters) = args.letters {
        config.letters = letters;
    }
    config.validate()?;

    init_logging(config.log_file.as_deref())?;

    if let Some(parent) = Path::new(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let repository = Repository::new(&config.db_path).await?;
    let client = CocktailClient::new(&config)?;

    let summary = etl::run(&client, &repository, &config.search_letters()).await?;
    println!(
        "Loaded {} drinks from {} letters ({} without German instructions)",
        summary.drinks_loaded, summary.letters_searched, summary.unprocessed
    );

    Ok(())
}
