//! Comic request resolution
//!
//! Turns a [`ComicRequest`] into a [`Resolution`] by fetching one page at a
//! time and extracting its fields:
//!
//! | Request | Steps |
//! |---------|-------|
//! | `ById(n)` | latest number (if the guard is on), then comic `n` |
//! | `Latest` | latest number, then that comic |
//! | `Random` | the random endpoint |
//! | `Alias(name)` | alias table lookup, then as `ById` |
//!
//! The resolver holds no mutable state, so concurrent calls are independent.

use crate::comic::extractor::Extractor;
use crate::comic::fetcher::Fetcher;
use crate::comic::info::LatestComicId;
use crate::comic::reply::{format_comic, Resolution};
use crate::comic::request::ComicRequest;
use crate::config::{Config, ReplyConfig, ReplyFormat, SiteConfig};
use crate::state::ResolveState;
use std::collections::BTreeMap;

/// Resolves comic requests against one comic site
pub struct Resolver<F> {
    fetcher: F,
    extractor: Extractor,
    site: SiteConfig,
    replies: ReplyConfig,
    aliases: BTreeMap<String, u32>,
}

impl<F: Fetcher> Resolver<F> {
    /// Creates a resolver for the site, replies and aliases in `config`
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            extractor: Extractor::new(&config.site.comic_prefix, &config.site.image_host),
            site: config.site.clone(),
            replies: config.replies.clone(),
            aliases: config.alias_table(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Alias names and the comic numbers they stand for
    pub fn aliases(&self) -> &BTreeMap<String, u32> {
        &self.aliases
    }

    /// URL of comic number `id`
    pub fn comic_url(&self, id: u32) -> String {
        format!("{}{}", self.site.comic_prefix, id)
    }

    /// Resolves a request and renders the reply text
    pub async fn reply(&self, request: &ComicRequest) -> String {
        self.resolve(request).await.render(&self.replies)
    }

    /// Resolves a request
    ///
    /// Never fails: fetch failures become [`Resolution::Unavailable`] and
    /// missing markup becomes [`Resolution::NotFound`].
    pub async fn resolve(&self, request: &ComicRequest) -> Resolution {
        tracing::debug!("Resolving {}", request);
        let mut state = ResolveState::Start;

        let resolution = match request {
            ComicRequest::ById(id) => self.resolve_by_id(*id, &mut state).await,
            ComicRequest::Latest => {
                state.advance(ResolveState::ResolvingLatestId);
                let latest = self.latest_id().await;
                self.fetch_comic(&self.comic_url(latest.id), &mut state)
                    .await
            }
            ComicRequest::Random => self.fetch_comic(&self.site.random_url, &mut state).await,
            ComicRequest::Alias(name) => match self.aliases.get(name) {
                Some(id) => self.resolve_by_id(*id, &mut state).await,
                None => {
                    tracing::debug!("Unknown alias '{}'", name);
                    state.advance(ResolveState::Formatting);
                    Resolution::UnknownAlias(name.clone())
                }
            },
        };

        if !state.is_terminal() {
            state.advance(ResolveState::Done);
        }
        tracing::debug!("Resolved {} ({})", request, state);

        resolution
    }

    /// Learns the latest comic number from the front page
    ///
    /// Falls back to the configured constant when the front page cannot be
    /// fetched or carries no comic number. The fallback is logged, never
    /// surfaced as an error.
    pub async fn latest_id(&self) -> LatestComicId {
        let fallback = self.site.fallback_latest_id;

        match self.fetcher.fetch(&self.site.comic_prefix).await {
            Ok(page) => match self.extractor.extract_id(&page) {
                Some(id) => {
                    tracing::debug!("Latest comic is #{}", id);
                    LatestComicId::live(id)
                }
                None => {
                    tracing::warn!(
                        "No comic number on {}, using fallback latest #{}",
                        self.site.comic_prefix,
                        fallback
                    );
                    LatestComicId::fallback(fallback)
                }
            },
            Err(e) => {
                tracing::warn!("{}, using fallback latest #{}", e, fallback);
                LatestComicId::fallback(fallback)
            }
        }
    }

    async fn resolve_by_id(&self, id: u32, state: &mut ResolveState) -> Resolution {
        if self.site.check_latest {
            state.advance(ResolveState::ResolvingLatestId);
            let latest = self.latest_id().await;
            if id > latest.id {
                tracing::debug!("Comic #{} is past latest #{}", id, latest.id);
                state.advance(ResolveState::Formatting);
                return Resolution::NotYetWritten {
                    requested: id,
                    latest: latest.id,
                };
            }
        }

        self.fetch_comic(&self.comic_url(id), state).await
    }

    async fn fetch_comic(&self, url: &str, state: &mut ResolveState) -> Resolution {
        state.advance(ResolveState::Fetching);
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Comic fetch failed: {}", e);
                state.advance(ResolveState::Failed);
                return Resolution::Unavailable(e);
            }
        };

        state.advance(ResolveState::Extracting);
        let info = match self.replies.format {
            ReplyFormat::Permalink => self.extractor.extract_links(&page),
            ReplyFormat::TitleAndImage => self.extractor.extract(&page),
        };

        state.advance(ResolveState::Formatting);
        if format_comic(self.replies.format, &info).is_none() {
            tracing::warn!("No permalink found on {}", url);
            return Resolution::NotFound;
        }

        Resolution::Found(info)
    }
}
