use anyhow::{bail, Context, Result};
use polars::prelude::*;
use retlabel::config::ConfigManager;
use retlabel::data::CsvConnector;
use retlabel::labeling::label_frame;

const USAGE: &str = "usage: retlabel <prices.csv> [config.toml|config.json]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(prices_path) = args.next() else {
        bail!(USAGE);
    };

    let manager = ConfigManager::new();
    match args.next() {
        Some(config_path) => manager
            .load_from_file(&config_path)
            .with_context(|| format!("loading config {}", config_path))?,
        None => manager.load_from_env().context("loading config from environment")?,
    }
    let config = manager.get();

    let (df, metadata) = CsvConnector::load_and_validate(&prices_path, &config.data)
        .with_context(|| format!("loading prices {}", prices_path))?;
    log::info!(
        "Loaded {} rows from {} ({} price columns, range {:?})",
        metadata.num_rows,
        metadata.file_path,
        metadata.price_columns.len(),
        metadata.date_range
    );

    let mut outcome = label_frame(
        &df,
        &metadata.time_column,
        &metadata.price_columns,
        &config.labeling,
    )?;

    for (column, diagnostic) in &outcome.diagnostics {
        log::info!("Labels for {} are all missing: {}", column, diagnostic);
    }

    let mut stdout = std::io::stdout().lock();
    CsvWriter::new(&mut stdout)
        .include_header(true)
        .finish(&mut outcome.frame)
        .context("writing labels")?;

    Ok(())
}
