//! Field extraction from comic pages
//!
//! Pulls a handful of known fields out of the comic site's markup:
//! - permalink (footer anchor)
//! - comic number (footer anchor on the front page)
//! - title (`<div id="ctitle">`)
//! - image URL (first URL on the image host)
//!
//! Matching is first-match and case-sensitive over the whole page. A field
//! whose pattern does not match is absent; extraction never fails.

use crate::comic::info::ComicInfo;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Footer anchor carrying the permalink of the displayed comic
static PERMALINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Permanent link to this comic: <a href="(.*?)">"#).expect("static regex compiles")
});

static SELECTOR_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#ctitle").expect("static selector parses"));

/// The fields the extractor knows how to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Permalink,
    Id,
    Title,
    ImageUrl,
}

/// Compiled patterns for one comic site
///
/// The comic-number and image patterns depend on the configured comic prefix
/// and image host, so they are built once here and shared read-only.
#[derive(Debug, Clone)]
pub struct Extractor {
    comic_id: Regex,
    image_url: Regex,
}

impl Extractor {
    /// Builds an extractor for comics under `comic_prefix` with images on
    /// `image_host`
    ///
    /// # Example
    ///
    /// ```
    /// use xkcd_bot::comic::Extractor;
    ///
    /// let extractor = Extractor::new("https://xkcd.com/", "imgs.xkcd.com");
    /// let page = r#"Permanent link to this comic: <a href="https://xkcd.com/927/">"#;
    /// assert_eq!(extractor.extract_id(page), Some(927));
    /// ```
    pub fn new(comic_prefix: &str, image_host: &str) -> Self {
        let comic_id = Regex::new(&format!(
            r#"Permanent link to this comic: <a href="{}([0-9]+)/?">"#,
            regex::escape(comic_prefix)
        ))
        .expect("escaped prefix forms a valid regex");

        let image_url = Regex::new(&format!(
            r#"https://{}/comics/[^"'\s<>]+?\.(?:png|jpg)"#,
            regex::escape(image_host)
        ))
        .expect("escaped host forms a valid regex");

        Self {
            comic_id,
            image_url,
        }
    }

    /// Extracts one field as text
    pub fn extract_field(&self, kind: FieldKind, page: &str) -> Option<String> {
        match kind {
            FieldKind::Permalink => extract_permalink(page),
            FieldKind::Id => self.extract_id(page).map(|id| id.to_string()),
            FieldKind::Title => extract_title(page),
            FieldKind::ImageUrl => self.extract_image_url(page),
        }
    }

    /// Extracts every known field from a page
    pub fn extract(&self, page: &str) -> ComicInfo {
        ComicInfo {
            title: extract_title(page),
            ..self.extract_links(page)
        }
    }

    /// Extracts the regex-backed fields only, leaving `title` absent
    ///
    /// Skips building a document tree, which only the title needs.
    pub fn extract_links(&self, page: &str) -> ComicInfo {
        ComicInfo {
            permalink: extract_permalink(page),
            id: self.extract_id(page),
            title: None,
            image_url: self.extract_image_url(page),
        }
    }

    /// Extracts the comic number from the footer anchor
    ///
    /// The anchor's href must start with the comic prefix; the rest (minus an
    /// optional trailing `/`) must be plain digits forming a number >= 1.
    pub fn extract_id(&self, page: &str) -> Option<u32> {
        self.comic_id
            .captures(page)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|&id| id >= 1)
    }

    /// Extracts the first image URL on the image host
    pub fn extract_image_url(&self, page: &str) -> Option<String> {
        self.image_url.find(page).map(|m| m.as_str().to_string())
    }
}

/// Extracts the permalink href from the footer anchor
pub fn extract_permalink(page: &str) -> Option<String> {
    PERMALINK
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts the text of the first title div
fn extract_title(page: &str) -> Option<String> {
    let document = Html::parse_document(page);

    document
        .select(&SELECTOR_TITLE)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
