use webtoon_core::{
    strictly_descending, Episode, EpisodeSource, EpisodeTracker, PageNumber, RemoteUnavailable,
    SeriesId,
};

const SERIES: SeriesId = 119_874;

fn episode(no: u32) -> Episode {
    Episode {
        no,
        thumbnail_url: format!("https://img.test/{SERIES}/{no}.jpg"),
        title: format!("Episode {no}"),
        rating: "9.12".to_string(),
        published_at: "2015.06.30".to_string(),
    }
}

fn episodes(nos: &[u32]) -> Vec<Episode> {
    nos.iter().copied().map(episode).collect()
}

/// Remote that serves one fixed history through the full-listing endpoint.
struct FullListingRemote {
    history: Vec<Episode>,
    fail: bool,
}

impl FullListingRemote {
    fn new(history: Vec<Episode>) -> Self {
        Self {
            history,
            fail: false,
        }
    }

    fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl EpisodeSource for FullListingRemote {
    fn episode_page(
        &self,
        _series: SeriesId,
        page: PageNumber,
    ) -> Result<Vec<Episode>, RemoteUnavailable> {
        // Staleness probes only read the front of page 1.
        match page {
            1 => Ok(self.history.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn full_listing(&self, _series: SeriesId) -> Result<Vec<Episode>, RemoteUnavailable> {
        if self.fail {
            return Err(RemoteUnavailable::new("scripted transport failure"));
        }
        Ok(self.history.clone())
    }
}

#[test]
fn bootstrap_fills_an_empty_tracker() {
    let remote = FullListingRemote::new(episodes(&[8, 7, 6, 5, 4, 3, 2, 1]));
    let mut tracker = EpisodeTracker::new(SERIES);

    let count = tracker.bootstrap_full_list(&remote).unwrap();

    assert_eq!(count, 8);
    assert_eq!(tracker.len(), 8);
    assert_eq!(tracker.watermark(), 8);
    assert!(strictly_descending(tracker.episodes()));
}

#[test]
fn bootstrap_replaces_whatever_was_tracked_before() {
    let remote = FullListingRemote::new(episodes(&[8, 7, 6, 5, 4, 3, 2, 1]));
    let mut tracker = EpisodeTracker::resume(SERIES, episodes(&[3, 2, 1]));

    let count = tracker.bootstrap_full_list(&remote).unwrap();

    assert_eq!(count, 8);
    assert_eq!(tracker.episodes(), &episodes(&[8, 7, 6, 5, 4, 3, 2, 1])[..]);
}

#[test]
fn bootstrap_failure_keeps_the_previous_state() {
    let remote = FullListingRemote::new(episodes(&[8, 7, 6])).failing();
    let previous = episodes(&[3, 2, 1]);
    let mut tracker = EpisodeTracker::resume(SERIES, previous.clone());

    let err = tracker.bootstrap_full_list(&remote).unwrap_err();

    assert!(err.reason.contains("scripted transport failure"));
    assert_eq!(tracker.episodes(), &previous[..]);
}

#[test]
fn bootstrap_result_is_up_to_date() {
    let remote = FullListingRemote::new(episodes(&[5, 4, 3, 2, 1]));
    let mut tracker = EpisodeTracker::new(SERIES);

    tracker.bootstrap_full_list(&remote).unwrap();

    assert!(tracker.is_up_to_date(&remote).unwrap());
}
