use crate::episode::strictly_descending;
use crate::{Episode, EpisodeSource, RemoteUnavailable, SeriesId};

/// Reconciliation engine for one series.
///
/// Owns the locally known episode sequence, ordered newest-first by `no`,
/// and reconciles it against the remote listing. The tracker is the sole
/// mutator of the sequence; the store and the presentation layer only ever
/// see `&[Episode]` snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeTracker {
    series: SeriesId,
    episodes: Vec<Episode>,
}

impl EpisodeTracker {
    /// Creates a tracker with no known episodes.
    pub fn new(series: SeriesId) -> Self {
        Self {
            series,
            episodes: Vec::new(),
        }
    }

    /// Adopts a previously persisted sequence.
    ///
    /// Missing persisted state is represented by an empty vector, so this
    /// construction path never fails.
    pub fn resume(series: SeriesId, episodes: Vec<Episode>) -> Self {
        debug_assert!(strictly_descending(&episodes));
        Self { series, episodes }
    }

    pub fn series(&self) -> SeriesId {
        self.series
    }

    /// Snapshot of the known episodes, newest first.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Highest episode number known locally, or 0 when nothing is known.
    pub fn watermark(&self) -> u32 {
        self.episodes.first().map_or(0, |episode| episode.no)
    }

    /// Reads the newest episode number from remote page 1.
    ///
    /// Costs one remote fetch per call and never caches the answer; the
    /// network side effect is part of this method's contract.
    pub fn remote_total_count(
        &self,
        source: &dyn EpisodeSource,
    ) -> Result<u32, RemoteUnavailable> {
        let first_page = source.episode_page(self.series, 1)?;
        let newest = first_page
            .first()
            .ok_or_else(|| RemoteUnavailable::new("listing page 1 returned no episodes"))?;
        Ok(newest.no)
    }

    /// Compares the local episode count against the remote total.
    ///
    /// Count equality is a coarse staleness proxy: exact right after a full
    /// sync, and drifting only if the source ever withdraws an interior
    /// episode. It reports staleness; it never adds episodes itself.
    pub fn is_up_to_date(&self, source: &dyn EpisodeSource) -> Result<bool, RemoteUnavailable> {
        let total = self.remote_total_count(source)?;
        Ok(self.episodes.len() == total as usize)
    }

    /// Walks remote pages newest-first and prepends every episode not yet
    /// known locally. Returns how many episodes were added.
    ///
    /// On an empty tracker this bootstraps the whole history: the walk only
    /// ends at episode 1 or past the last page. When nothing changed
    /// upstream it costs exactly one page fetch and returns 0. A fetch
    /// failure anywhere in the walk aborts it and leaves the sequence
    /// untouched.
    pub fn update_episode_list(
        &mut self,
        source: &dyn EpisodeSource,
    ) -> Result<usize, RemoteUnavailable> {
        let watermark = self.watermark();
        let mut newly_fetched: Vec<Episode> = Vec::new();
        let mut page = 1;

        'walk: loop {
            let batch = source.episode_page(self.series, page)?;
            // Pages tile the history without overlap, so an empty batch
            // means the walk ran past the oldest episode.
            if batch.is_empty() {
                break;
            }
            for episode in batch {
                if episode.no <= watermark {
                    // Everything from here on is already known locally.
                    break 'walk;
                }
                let reached_first = episode.no == 1;
                newly_fetched.push(episode);
                if reached_first {
                    break 'walk;
                }
            }
            // The whole page was new; newer history may span further pages.
            page += 1;
        }

        let added = newly_fetched.len();
        newly_fetched.append(&mut self.episodes);
        self.episodes = newly_fetched;
        debug_assert!(strictly_descending(&self.episodes));
        Ok(added)
    }

    /// Replaces the whole sequence with one oversized listing fetch.
    ///
    /// A full resync that trades the pagination walk for a single large
    /// request; callers pick it when they want the complete list regardless
    /// of existing state. Returns the new episode count. On failure the
    /// previous sequence stays in place.
    pub fn bootstrap_full_list(
        &mut self,
        source: &dyn EpisodeSource,
    ) -> Result<usize, RemoteUnavailable> {
        let full = source.full_listing(self.series)?;
        self.episodes = full;
        debug_assert!(strictly_descending(&self.episodes));
        Ok(self.episodes.len())
    }
}
