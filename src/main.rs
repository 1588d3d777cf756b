use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{error, info};

use crate::{
    client::{
        collector::Collector,
        export::{write_export, ExportCache, ExportFormat, Table},
        pipeline::{Pipeline, RunRequest},
        recorder::RunRecorder,
        settings::Settings,
    },
    commons::{error::ExportError, post_record::PostRecord},
    twitter::snscrape::SnscrapeFeed,
    utils::logger,
};

mod client;
mod commons;
mod twitter;
mod utils;

/// Scrape tweets for a query and date window, store the run in MongoDB, optionally export it.
#[derive(Parser, Debug)]
#[command(name = "tweet-harvest", version)]
struct Cli {
    /// Search query
    #[arg(default_value = "Coimbatore")]
    query: String,

    /// First day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    since: Option<NaiveDate>,

    /// Day the window ends (YYYY-MM-DD), defaults to today
    #[arg(long)]
    until: Option<NaiveDate>,

    /// Maximum number of tweets to collect
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..=1000))]
    max_count: u16,

    /// Write a CSV export to this file or directory
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON export to this file or directory
    #[arg(long)]
    json: Option<PathBuf>,

    /// Keep the run in memory only
    #[arg(long)]
    no_persist: bool,

    /// Number of rows to preview on stdout
    #[arg(long, default_value_t = 10)]
    preview: usize,

    /// JSON settings file
    #[arg(long, env = "TWEET_HARVEST_SETTINGS")]
    settings: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.settings.as_deref())?;
    logger::init(&settings.log)?;
    info!("settings: {}", settings.summary());

    let today = Local::now().date_naive();
    let request = RunRequest {
        query: cli.query.clone(),
        start_date: cli.since.unwrap_or(today),
        end_date: cli.until.unwrap_or(today),
        max_count: NonZeroUsize::new(usize::from(cli.max_count)).unwrap_or(NonZeroUsize::MIN),
        persist: !cli.no_persist,
    };

    let pipeline = Pipeline::new(
        Collector::new(Box::new(SnscrapeFeed::new(&settings.snscrape))),
        RunRecorder::mongo(&settings.mongo),
    );
    let outcome = pipeline.run(&request).await?;
    let records: &Arc<[PostRecord]> = &outcome.run.scraped_data;
    info!("run for `{}` finished with {} posts", outcome.run.scraped_word, records.len());

    if cli.preview > 0 {
        print!("{}", Table::new(records).head(cli.preview));
    }

    let mut cache = ExportCache::default();
    let mut failed_export = None;
    for (target, format) in [(&cli.csv, ExportFormat::Csv), (&cli.json, ExportFormat::Json)] {
        if let Some(target) = target {
            if let Err(err) = export(&mut cache, records, &request, target, format).await {
                error!("{} export to {} failed: {}", format, target.display(), err);
                failed_export = Some(err);
            }
        }
    }

    if let Some(Err(err)) = outcome.persisted {
        error!("collected data was exported but not stored");
        return Err(err.into());
    }
    if let Some(err) = failed_export {
        return Err(err.into());
    }
    return Ok(());
}

async fn export(
    cache: &mut ExportCache,
    records: &Arc<[PostRecord]>,
    request: &RunRequest,
    target: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    info!("writing {} export ({})", format, format.mime());
    let payload = cache.render(records, format)?;
    let file_name = format.file_name(&request.query, request.start_date, request.end_date);
    return write_export(target, &file_name, &payload).await;
}
