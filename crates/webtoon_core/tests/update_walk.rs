use std::cell::RefCell;

use webtoon_core::{
    strictly_descending, Episode, EpisodeSource, EpisodeTracker, PageNumber, RemoteUnavailable,
    SeriesId,
};

const SERIES: SeriesId = 696_617;

fn episode(no: u32) -> Episode {
    Episode {
        no,
        thumbnail_url: format!("https://img.test/{SERIES}/{no}.jpg"),
        title: format!("Episode {no}"),
        rating: "9.87".to_string(),
        published_at: "2017.09.13".to_string(),
    }
}

fn episodes(nos: &[u32]) -> Vec<Episode> {
    nos.iter().copied().map(episode).collect()
}

fn numbers(episodes: &[Episode]) -> Vec<u32> {
    episodes.iter().map(|e| e.no).collect()
}

/// Remote listing scripted page by page; records every page it serves.
struct ScriptedSource {
    pages: Vec<Vec<Episode>>,
    fail_on_page: Option<PageNumber>,
    fetched: RefCell<Vec<PageNumber>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Vec<Episode>>) -> Self {
        Self {
            pages,
            fail_on_page: None,
            fetched: RefCell::new(Vec::new()),
        }
    }

    fn failing_on(mut self, page: PageNumber) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    fn fetched_pages(&self) -> Vec<PageNumber> {
        self.fetched.borrow().clone()
    }
}

impl EpisodeSource for ScriptedSource {
    fn episode_page(
        &self,
        series: SeriesId,
        page: PageNumber,
    ) -> Result<Vec<Episode>, RemoteUnavailable> {
        assert_eq!(series, SERIES, "tracker must pass its own series id");
        self.fetched.borrow_mut().push(page);
        if self.fail_on_page == Some(page) {
            return Err(RemoteUnavailable::new("scripted transport failure"));
        }
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    fn full_listing(&self, _series: SeriesId) -> Result<Vec<Episode>, RemoteUnavailable> {
        unreachable!("walk tests never take the full-listing path")
    }
}

fn three_page_remote() -> ScriptedSource {
    ScriptedSource::new(vec![
        episodes(&[6, 5]),
        episodes(&[4, 3]),
        episodes(&[2, 1]),
    ])
}

#[test]
fn bootstrap_walk_collects_full_history_from_empty() {
    crawler_logging::initialize_for_tests();
    let remote = three_page_remote();
    let mut tracker = EpisodeTracker::new(SERIES);

    let added = tracker.update_episode_list(&remote).unwrap();

    assert_eq!(added, 6);
    assert_eq!(numbers(tracker.episodes()), vec![6, 5, 4, 3, 2, 1]);
    assert!(strictly_descending(tracker.episodes()));
    assert_eq!(remote.fetched_pages(), vec![1, 2, 3]);
}

#[test]
fn resumed_watermark_fetches_only_new_pages() {
    let remote = three_page_remote();
    let mut tracker = EpisodeTracker::resume(SERIES, episodes(&[4, 3, 2, 1]));

    let added = tracker.update_episode_list(&remote).unwrap();

    assert_eq!(added, 2);
    assert_eq!(numbers(tracker.episodes()), vec![6, 5, 4, 3, 2, 1]);
    // Page 2 opens with episode 4, which is already known, so the walk
    // stops there and never requests page 3.
    assert_eq!(remote.fetched_pages(), vec![1, 2]);
}

#[test]
fn new_episodes_are_prepended_and_old_state_untouched() {
    let remote = three_page_remote();
    let previous = episodes(&[4, 3, 2, 1]);
    let mut tracker = EpisodeTracker::resume(SERIES, previous.clone());

    let added = tracker.update_episode_list(&remote).unwrap();

    assert_eq!(added, 2);
    assert_eq!(&tracker.episodes()[..2], &episodes(&[6, 5])[..]);
    assert_eq!(&tracker.episodes()[2..], &previous[..]);
}

#[test]
fn watermark_tie_on_page_boundary_adds_single_episode() {
    let remote = three_page_remote();
    let mut tracker = EpisodeTracker::resume(SERIES, episodes(&[5, 4, 3, 2, 1]));

    let added = tracker.update_episode_list(&remote).unwrap();

    assert_eq!(added, 1);
    assert_eq!(tracker.watermark(), 6);
    // Episode 5 sits on page 1 itself, so one fetch settles the walk.
    assert_eq!(remote.fetched_pages(), vec![1]);
}

#[test]
fn second_update_without_remote_change_returns_zero() {
    let remote = three_page_remote();
    let mut tracker = EpisodeTracker::new(SERIES);

    assert_eq!(tracker.update_episode_list(&remote).unwrap(), 6);
    let snapshot = tracker.episodes().to_vec();

    assert_eq!(tracker.update_episode_list(&remote).unwrap(), 0);
    assert_eq!(tracker.episodes(), &snapshot[..]);
    // The no-op update costs exactly one extra page fetch.
    assert_eq!(remote.fetched_pages(), vec![1, 2, 3, 1]);
}

#[test]
fn history_ending_on_page_boundary_stops_at_episode_one() {
    let remote = ScriptedSource::new(vec![episodes(&[4, 3]), episodes(&[2, 1])]);
    let mut tracker = EpisodeTracker::new(SERIES);

    let added = tracker.update_episode_list(&remote).unwrap();

    assert_eq!(added, 4);
    // Episode 1 terminates the walk; page 3 is never requested.
    assert_eq!(remote.fetched_pages(), vec![1, 2]);
}

#[test]
fn empty_series_listing_adds_nothing() {
    let remote = ScriptedSource::new(Vec::new());
    let mut tracker = EpisodeTracker::new(SERIES);

    let added = tracker.update_episode_list(&remote).unwrap();

    assert_eq!(added, 0);
    assert!(tracker.is_empty());
    assert_eq!(remote.fetched_pages(), vec![1]);
}

#[test]
fn fetch_failure_mid_walk_leaves_state_untouched() {
    let remote = three_page_remote().failing_on(2);
    let previous = episodes(&[2, 1]);
    let mut tracker = EpisodeTracker::resume(SERIES, previous.clone());

    let err = tracker.update_episode_list(&remote).unwrap_err();

    assert!(err.reason.contains("scripted transport failure"));
    assert_eq!(tracker.episodes(), &previous[..]);
}

#[test]
fn fetch_failure_on_first_page_keeps_empty_tracker_empty() {
    let remote = three_page_remote().failing_on(1);
    let mut tracker = EpisodeTracker::new(SERIES);

    assert!(tracker.update_episode_list(&remote).is_err());
    assert!(tracker.is_empty());
}
