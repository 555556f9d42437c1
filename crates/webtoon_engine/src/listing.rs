use scraper::{ElementRef, Html, Selector};
use url::Url;

use crawler_logging::crawl_debug;
use webtoon_core::Episode;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("episode listing table not found in document")]
    MissingListingTable,
}

struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    anchor: Selector,
    image: Selector,
    rating: Selector,
}

impl Selectors {
    fn new() -> Option<Self> {
        Some(Self {
            table: Selector::parse("table.viewList").ok()?,
            row: Selector::parse("tr").ok()?,
            cell: Selector::parse("td").ok()?,
            anchor: Selector::parse("a").ok()?,
            image: Selector::parse("img").ok()?,
            rating: Selector::parse("strong").ok()?,
        })
    }
}

/// Parse one listing document into episode records, newest first.
///
/// Relative link and image references are resolved against `base_url`.
/// Rows that do not carry a full episode (banners, headers, promos) are
/// skipped; a document without the listing table at all is an error.
pub fn parse_listing(html: &str, base_url: &Url) -> Result<Vec<Episode>, ListingError> {
    let selectors = Selectors::new().ok_or(ListingError::MissingListingTable)?;
    let doc = Html::parse_document(html);

    let table = doc
        .select(&selectors.table)
        .next()
        .ok_or(ListingError::MissingListingTable)?;

    let mut episodes = Vec::new();
    for row in table.select(&selectors.row) {
        let cells: Vec<ElementRef> = row.select(&selectors.cell).collect();
        // Banner and header rows carry fewer than four cells.
        if cells.len() < 4 {
            continue;
        }
        match parse_row(&cells, &selectors, base_url) {
            Some(episode) => episodes.push(episode),
            None => crawl_debug!("Skipping listing row without a complete episode"),
        }
    }

    Ok(episodes)
}

fn parse_row(cells: &[ElementRef], selectors: &Selectors, base_url: &Url) -> Option<Episode> {
    let link = cells[0].select(&selectors.anchor).next()?;
    let no = link
        .value()
        .attr("href")
        .and_then(|href| episode_no(href, base_url))?;
    let thumbnail_url: String = link
        .select(&selectors.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| resolve_url(src, base_url))?
        .into();

    let title = text_of(&cells[1]);
    if title.is_empty() {
        return None;
    }

    let rating = cells[2]
        .select(&selectors.rating)
        .next()
        .map(|strong| text_of(&strong))
        .unwrap_or_default();
    let published_at = text_of(&cells[3]);

    Some(Episode {
        no,
        thumbnail_url,
        title,
        rating,
        published_at,
    })
}

/// Episode number from the detail link's `no` query parameter.
fn episode_no(href: &str, base_url: &Url) -> Option<u32> {
    let url = resolve_url(href, base_url)?;
    url.query_pairs()
        .find(|(key, _)| key == "no")
        .and_then(|(_, value)| value.parse().ok())
}

fn resolve_url(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if trimmed.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.join(trimmed).ok()
}

fn text_of(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
