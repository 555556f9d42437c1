use std::path::{Path, PathBuf};

use crawler_logging::crawl_debug;
use webtoon_core::{Episode, SeriesId};

use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::types::FetchError;

/// Supplier of raw thumbnail bytes for one image URL.
pub trait ThumbnailSource {
    fn thumbnail(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThumbnailSummary {
    pub saved: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("failed to fetch thumbnail {url}: {source}")]
    Fetch { url: String, source: FetchError },
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Download thumbnails into `{out_dir}/{series}_thumbnail/{no}.jpg`.
///
/// Files already on disk are never re-fetched, so repeated syncs only pay
/// for episodes added since the last run.
pub fn save_thumbnails(
    source: &dyn ThumbnailSource,
    series: SeriesId,
    episodes: &[Episode],
    out_dir: &Path,
) -> Result<ThumbnailSummary, ThumbnailError> {
    let dir = thumbnail_dir(out_dir, series);
    ensure_output_dir(&dir)?;
    let writer = AtomicFileWriter::new(dir.clone());

    let mut summary = ThumbnailSummary::default();
    for episode in episodes {
        let filename = format!("{}.jpg", episode.no);
        if dir.join(&filename).exists() {
            summary.skipped += 1;
            continue;
        }
        if episode.thumbnail_url.is_empty() {
            crawl_debug!("Episode {} has no thumbnail url, skipping", episode.no);
            summary.skipped += 1;
            continue;
        }
        let bytes = source
            .thumbnail(&episode.thumbnail_url)
            .map_err(|source| ThumbnailError::Fetch {
                url: episode.thumbnail_url.clone(),
                source,
            })?;
        writer.write_bytes(&filename, &bytes)?;
        summary.saved += 1;
    }

    Ok(summary)
}

pub fn thumbnail_dir(out_dir: &Path, series: SeriesId) -> PathBuf {
    out_dir.join(format!("{series}_thumbnail"))
}
