/// Fields pulled out of one comic page
///
/// Every field is optional: a field whose pattern did not match is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComicInfo {
    /// Canonical comic URL from the page footer
    pub permalink: Option<String>,

    /// Comic number (only extracted from the front page)
    pub id: Option<u32>,

    /// Comic title
    pub title: Option<String>,

    /// First comic image URL on the page
    pub image_url: Option<String>,
}

impl ComicInfo {
    /// Returns true if no field was found
    pub fn is_empty(&self) -> bool {
        self.permalink.is_none()
            && self.id.is_none()
            && self.title.is_none()
            && self.image_url.is_none()
    }
}

/// Where a latest comic number came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestSource {
    /// Read off the front page
    Live,
    /// The configured fallback, live discovery failed
    Fallback,
}

/// The latest comic number, derived per request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestComicId {
    pub id: u32,
    pub source: LatestSource,
}

impl LatestComicId {
    pub fn live(id: u32) -> Self {
        Self {
            id,
            source: LatestSource::Live,
        }
    }

    pub fn fallback(id: u32) -> Self {
        Self {
            id,
            source: LatestSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == LatestSource::Fallback
    }
}
