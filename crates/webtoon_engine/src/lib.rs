//! Webtoon engine: network IO, listing parse, and on-disk artifacts.
mod types;
mod fetch;
mod decode;
mod listing;
mod source;
mod persist;
mod store;
mod render;
mod thumbs;
mod export;

pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use export::{export_listing, read_export, ExportError, ExportSummary};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use listing::{parse_listing, ListingError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use render::{render_index, write_index};
pub use source::{ClientError, NaverClient, DEFAULT_BASE_URL};
pub use store::{EpisodeStore, StoreError};
pub use thumbs::{save_thumbnails, thumbnail_dir, ThumbnailError, ThumbnailSource, ThumbnailSummary};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
