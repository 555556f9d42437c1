/// Identifier the remote source assigns to one comic series.
pub type SeriesId = u32;

/// 1-based page number within the remote episode listing.
pub type PageNumber = u32;

/// One episode of a series, as shown on the remote listing page.
///
/// `no` is the series-unique sequence number assigned by the source:
/// numbering starts at 1 and grows with newer episodes, so the highest `no`
/// is always the newest episode. The remaining fields keep the source's
/// native textual representation and are only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub no: u32,
    pub thumbnail_url: String,
    pub title: String,
    pub rating: String,
    pub published_at: String,
}

/// Returns true when `episodes` is ordered strictly descending by `no`.
///
/// This is the invariant of every tracker-owned sequence: newest first and
/// no duplicate numbers. An empty or single-record sequence trivially holds.
pub fn strictly_descending(episodes: &[Episode]) -> bool {
    episodes.windows(2).all(|pair| pair[0].no > pair[1].no)
}
