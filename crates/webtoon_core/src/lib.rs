//! Webtoon core: episode data model and the reconciliation engine.
mod episode;
mod source;
mod tracker;

pub use episode::{strictly_descending, Episode, PageNumber, SeriesId};
pub use source::{EpisodeSource, RemoteUnavailable};
pub use tracker::EpisodeTracker;
