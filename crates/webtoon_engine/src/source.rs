use tokio::runtime::Runtime;
use url::Url;

use crawler_logging::crawl_debug;
use webtoon_core::{Episode, EpisodeSource, PageNumber, RemoteUnavailable, SeriesId};

use crate::decode::decode_html;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::listing::parse_listing;
use crate::thumbs::ThumbnailSource;
use crate::types::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://comic.naver.com";

const LISTING_PATH: &str = "/webtoon/list";
// Far beyond any real episode count, so one request covers the history.
const FULL_LIST_ROWS: u32 = 99_999;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Blocking client for the listing endpoint and thumbnail images.
///
/// Owns its own runtime so that callers stay synchronous; the tracker's
/// page walk is inherently sequential anyway.
pub struct NaverClient {
    runtime: Runtime,
    pages: ReqwestFetcher,
    images: ReqwestFetcher,
    base_url: Url,
}

impl NaverClient {
    pub fn new(settings: FetchSettings) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL, settings)
    }

    /// Client pointed at a different host serving the same listing markup.
    pub fn with_base_url(base_url: &str, settings: FetchSettings) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        let image_settings = FetchSettings {
            connect_timeout: settings.connect_timeout,
            request_timeout: settings.request_timeout,
            ..FetchSettings::for_images()
        };
        Ok(Self {
            runtime: Runtime::new()?,
            pages: ReqwestFetcher::new(settings),
            images: ReqwestFetcher::new(image_settings),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn listing_url(&self, series: SeriesId, page: PageNumber) -> Result<Url, RemoteUnavailable> {
        let mut url = self
            .base_url
            .join(LISTING_PATH)
            .map_err(|err| RemoteUnavailable::new(format!("invalid listing url: {err}")))?;
        url.query_pairs_mut()
            .append_pair("titleId", &series.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn full_listing_url(&self, series: SeriesId) -> Result<Url, RemoteUnavailable> {
        let mut url = self.listing_url(series, 1)?;
        url.query_pairs_mut()
            .append_pair("rows", &FULL_LIST_ROWS.to_string());
        Ok(url)
    }

    fn fetch_listing(&self, url: Url) -> Result<Vec<Episode>, RemoteUnavailable> {
        crawl_debug!("GET {}", url);
        let output = self
            .runtime
            .block_on(self.pages.fetch(url.as_str()))
            .map_err(|err| RemoteUnavailable::new(err.to_string()))?;
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())
            .map_err(|err| RemoteUnavailable::new(err.to_string()))?;
        let episodes = parse_listing(&decoded.html, &self.base_url)
            .map_err(|err| RemoteUnavailable::new(err.to_string()))?;
        crawl_debug!(
            "Parsed {} episode rows from {} ({} bytes, {})",
            episodes.len(),
            output.metadata.final_url,
            output.metadata.byte_len,
            decoded.encoding_label
        );
        Ok(episodes)
    }
}

impl EpisodeSource for NaverClient {
    fn episode_page(
        &self,
        series: SeriesId,
        page: PageNumber,
    ) -> Result<Vec<Episode>, RemoteUnavailable> {
        let url = self.listing_url(series, page)?;
        self.fetch_listing(url)
    }

    fn full_listing(&self, series: SeriesId) -> Result<Vec<Episode>, RemoteUnavailable> {
        let url = self.full_listing_url(series)?;
        self.fetch_listing(url)
    }
}

impl ThumbnailSource for NaverClient {
    fn thumbnail(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let output = self.runtime.block_on(self.images.fetch(url))?;
        Ok(output.bytes)
    }
}
