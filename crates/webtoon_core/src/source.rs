use crate::{Episode, PageNumber, SeriesId};

/// Error returned when the remote listing cannot deliver episode data.
///
/// Transport failures, HTTP error statuses, and malformed or empty payloads
/// where records were expected all collapse into this one kind. It aborts
/// the operation that hit it; retrying is the caller's decision, never the
/// core's.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("remote source unavailable: {reason}")]
pub struct RemoteUnavailable {
    pub reason: String,
}

impl RemoteUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The remote episode listing, as the reconciliation engine consumes it.
///
/// Contract: `episode_page` returns the records of one fixed-size page
/// newest-first, with consecutive pages tiling the history without overlap
/// or gaps; a page number past the series' end yields an empty batch.
/// Repeated calls with the same arguments return equivalent data, modulo
/// the source's own updates.
pub trait EpisodeSource {
    /// Fetches one 1-based listing page.
    fn episode_page(
        &self,
        series: SeriesId,
        page: PageNumber,
    ) -> Result<Vec<Episode>, RemoteUnavailable>;

    /// Fetches the entire episode history in a single oversized request.
    fn full_listing(&self, series: SeriesId) -> Result<Vec<Episode>, RemoteUnavailable>;
}
