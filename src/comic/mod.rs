//! Comic resolution
//!
//! This module contains the core lookup logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Field extraction from comic page markup
//! - Request resolution with latest-comic discovery and its fallback
//! - Rendering resolutions as reply text

mod extractor;
mod fetcher;
mod info;
mod reply;
mod request;
mod resolver;

pub use extractor::{extract_permalink, Extractor, FieldKind};
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher};
pub use info::{ComicInfo, LatestComicId, LatestSource};
pub use reply::{format_comic, Resolution};
pub use request::{ComicRequest, RequestError};
pub use resolver::Resolver;
