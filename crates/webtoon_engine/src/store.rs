use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crawler_logging::{crawl_info, crawl_warn};
use webtoon_core::{Episode, SeriesId};

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEpisode {
    no: u32,
    thumbnail_url: String,
    title: String,
    rating: String,
    published_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredSeries {
    episodes: Vec<StoredEpisode>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed state file {path}: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Episode snapshots on disk, one RON file per series under `dir`.
pub struct EpisodeStore {
    dir: PathBuf,
}

impl EpisodeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn state_path(&self, series: SeriesId) -> PathBuf {
        self.dir.join(format!("{series}.ron"))
    }

    /// Strict load: absent state is `Ok(None)`, unreadable state is an error.
    pub fn load(&self, series: SeriesId) -> Result<Option<Vec<Episode>>, StoreError> {
        let path = self.state_path(series);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(err) => return Err(StoreError::Io(err)),
        };

        let state: StoredSeries = ron::from_str(&content).map_err(|err| StoreError::Malformed {
            path: path.clone(),
            message: err.to_string(),
        })?;

        let episodes = state
            .episodes
            .into_iter()
            .map(|stored| Episode {
                no: stored.no,
                thumbnail_url: stored.thumbnail_url,
                title: stored.title,
                rating: stored.rating,
                published_at: stored.published_at,
            })
            .collect();

        Ok(Some(episodes))
    }

    /// Lenient load for the resume path: any failure logs and yields empty.
    pub fn load_or_empty(&self, series: SeriesId) -> Vec<Episode> {
        match self.load(series) {
            Ok(Some(episodes)) => {
                crawl_info!(
                    "Loaded {} episodes for series {} from {:?}",
                    episodes.len(),
                    series,
                    self.state_path(series)
                );
                episodes
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                crawl_warn!("Failed to load state for series {}: {}", series, err);
                Vec::new()
            }
        }
    }

    pub fn save(&self, series: SeriesId, episodes: &[Episode]) -> Result<PathBuf, StoreError> {
        let state = StoredSeries {
            episodes: episodes
                .iter()
                .map(|episode| StoredEpisode {
                    no: episode.no,
                    thumbnail_url: episode.thumbnail_url.clone(),
                    title: episode.title.clone(),
                    rating: episode.rating.clone(),
                    published_at: episode.published_at.clone(),
                })
                .collect(),
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content =
            ron::ser::to_string_pretty(&state, pretty).map_err(|err| StoreError::Malformed {
                path: self.state_path(series),
                message: err.to_string(),
            })?;

        let writer = AtomicFileWriter::new(self.dir.clone());
        let path = writer.write(&format!("{series}.ron"), &content)?;
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
