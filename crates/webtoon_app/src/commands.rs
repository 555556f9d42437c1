use std::time::Duration;

use anyhow::Context;
use chrono::{SecondsFormat, Utc};

use crawler_logging::crawl_info;
use webtoon_core::{Episode, EpisodeSource, EpisodeTracker};
use webtoon_engine::{
    export_listing, render_index, save_thumbnails, write_index, EpisodeStore, FetchSettings,
    NaverClient, ThumbnailSource,
};

use crate::cli::{Cli, Command};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let store = EpisodeStore::new(&cli.data_dir);
    match &cli.command {
        Command::Sync { no_assets } => {
            let no_assets = *no_assets;
            let client = build_client(&cli)?;
            sync(&cli, &store, &client, no_assets)
        }
        Command::Bootstrap => {
            let client = build_client(&cli)?;
            bootstrap(&cli, &store, &client)
        }
        Command::Status => {
            let client = build_client(&cli)?;
            status(&cli, &store, &client)
        }
        Command::Render => render(&cli, &store),
        Command::Export => export(&cli, &store),
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<NaverClient> {
    let mut settings = FetchSettings::default();
    if let Some(secs) = cli.timeout {
        settings.request_timeout = Duration::from_secs(secs);
    }
    NaverClient::with_base_url(&cli.base_url, settings).context("constructing listing client")
}

fn generated_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn sync<S>(cli: &Cli, store: &EpisodeStore, client: &S, no_assets: bool) -> anyhow::Result<()>
where
    S: EpisodeSource + ThumbnailSource,
{
    let mut tracker = EpisodeTracker::resume(cli.series, store.load_or_empty(cli.series));
    crawl_info!(
        "Update episode list start (series {}, watermark {})",
        cli.series,
        tracker.watermark()
    );

    let added = tracker
        .update_episode_list(client)
        .context("updating episode list")?;
    store
        .save(cli.series, tracker.episodes())
        .context("saving episode state")?;
    println!(
        "series {}: {} new episodes ({} total)",
        cli.series,
        added,
        tracker.len()
    );

    if no_assets {
        return Ok(());
    }
    write_assets(cli, client, tracker.episodes())
}

fn bootstrap(cli: &Cli, store: &EpisodeStore, client: &impl EpisodeSource) -> anyhow::Result<()> {
    let mut tracker = EpisodeTracker::new(cli.series);
    let count = tracker
        .bootstrap_full_list(client)
        .context("fetching full listing")?;
    store
        .save(cli.series, tracker.episodes())
        .context("saving episode state")?;
    println!("series {}: bootstrapped {} episodes", cli.series, count);
    Ok(())
}

fn status(cli: &Cli, store: &EpisodeStore, client: &impl EpisodeSource) -> anyhow::Result<()> {
    let tracker = EpisodeTracker::resume(cli.series, store.load_or_empty(cli.series));
    let remote_total = tracker
        .remote_total_count(client)
        .context("fetching remote total")?;
    let state = if tracker.len() == remote_total as usize {
        "up to date"
    } else {
        "stale"
    };
    println!(
        "series {}: {} local, {} remote, {}",
        cli.series,
        tracker.len(),
        remote_total,
        state
    );
    Ok(())
}

fn render(cli: &Cli, store: &EpisodeStore) -> anyhow::Result<()> {
    let episodes = load_saved(cli, store)?;
    let html = render_index(cli.series, &episodes, &generated_timestamp());
    let path = write_index(&cli.out_dir, cli.series, &html).context("writing index page")?;
    println!("series {}: index written to {}", cli.series, path.display());
    Ok(())
}

fn export(cli: &Cli, store: &EpisodeStore) -> anyhow::Result<()> {
    let episodes = load_saved(cli, store)?;
    let summary = export_listing(&cli.out_dir, cli.series, &episodes, &generated_timestamp())
        .context("writing export")?;
    println!(
        "series {}: {} episodes exported to {}",
        cli.series,
        summary.episode_count,
        summary.output_path.display()
    );
    Ok(())
}

fn load_saved(cli: &Cli, store: &EpisodeStore) -> anyhow::Result<Vec<Episode>> {
    store
        .load(cli.series)
        .context("loading episode state")?
        .with_context(|| format!("no saved state for series {}; run sync first", cli.series))
}

fn write_assets<S: ThumbnailSource>(
    cli: &Cli,
    images: &S,
    episodes: &[Episode],
) -> anyhow::Result<()> {
    let summary = save_thumbnails(images, cli.series, episodes, &cli.out_dir)
        .context("downloading thumbnails")?;
    crawl_info!(
        "Thumbnails: {} saved, {} skipped",
        summary.saved,
        summary.skipped
    );

    let html = render_index(cli.series, episodes, &generated_timestamp());
    let path = write_index(&cli.out_dir, cli.series, &html).context("writing index page")?;
    crawl_info!("Index written to {}", path.display());
    Ok(())
}
