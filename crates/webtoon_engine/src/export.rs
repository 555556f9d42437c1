use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use webtoon_core::{Episode, SeriesId};

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub episode_count: usize,
    pub output_path: PathBuf,
    pub manifest_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("malformed listing line {line} in {path}")]
    MalformedLine { path: PathBuf, line: usize },
}

/// Write the pipe-delimited listing plus a JSON manifest for one series.
///
/// Line format is `no|thumbnail_url|rating|published_at|title`; the title
/// column comes last so titles containing the delimiter survive a
/// field-limited split on read.
pub fn export_listing(
    out_dir: &Path,
    series: SeriesId,
    episodes: &[Episode],
    generated_utc: &str,
) -> Result<ExportSummary, ExportError> {
    let newest = episodes.first().map(|episode| episode.no);
    let oldest = episodes.last().map(|episode| episode.no);
    let listing_filename = format!(
        "{series}_{}_{}.txt",
        newest.unwrap_or(0),
        oldest.unwrap_or(0)
    );

    let mut buffer = String::new();
    for episode in episodes {
        let _ = writeln!(
            buffer,
            "{}|{}|{}|{}|{}",
            episode.no, episode.thumbnail_url, episode.rating, episode.published_at, episode.title
        );
    }

    let writer = AtomicFileWriter::new(out_dir.to_path_buf());
    let output_path = writer.write(&listing_filename, &buffer)?;

    let manifest = json!({
        "series": series,
        "episode_count": episodes.len(),
        "newest_no": newest,
        "oldest_no": oldest,
        "listing_file": listing_filename,
        "generated_utc": generated_utc,
    });
    let manifest_path = writer.write(&format!("{series}_manifest.json"), &manifest.to_string())?;

    Ok(ExportSummary {
        episode_count: episodes.len(),
        output_path,
        manifest_path,
    })
}

/// Parse a listing file written by [`export_listing`] back into episodes.
pub fn read_export(path: &Path) -> Result<Vec<Episode>, ExportError> {
    let content = fs::read_to_string(path)?;
    let mut episodes = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let episode = parse_line(line).ok_or_else(|| ExportError::MalformedLine {
            path: path.to_path_buf(),
            line: index + 1,
        })?;
        episodes.push(episode);
    }
    Ok(episodes)
}

fn parse_line(line: &str) -> Option<Episode> {
    let mut parts = line.splitn(5, '|');
    let no = parts.next()?.parse().ok()?;
    let thumbnail_url = parts.next()?.to_string();
    let rating = parts.next()?.to_string();
    let published_at = parts.next()?.to_string();
    let title = parts.next()?.to_string();
    Some(Episode {
        no,
        thumbnail_url,
        title,
        rating,
        published_at,
    })
}
