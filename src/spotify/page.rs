//! Embedded-metadata extraction from fetched documents.
//!
//! Entity pages carry their metadata as Open-Graph and `music:*` elements in
//! the document head, e.g. `<meta property="og:title" content="...">` or
//! `<meta name="music:song" content="https://.../track/id">`. Queries match
//! any head element by attribute key/value; the value comes from the
//! element's `content` attribute when present, otherwise from its rendered
//! text, so callers never need to know which form a given field uses.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::domain::SpotifyError;

static HEAD_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head *").expect("Failed to parse head selector"));

/// A parsed entity page, queried for embedded-metadata fields.
pub struct MetaPage {
    html: Html,
}

impl MetaPage {
    /// Parse a fetched document.
    pub fn parse(document: &str) -> Self {
        Self {
            html: Html::parse_document(document),
        }
    }

    /// The first head element with `attr=value`, or `None`.
    pub fn first(&self, attr: &str, value: &str) -> Option<String> {
        self.matches(attr, value).next().map(content_of)
    }

    /// Every head element with `attr=value`, in document order.
    ///
    /// Repeated fields (album track list, playlist song list, musicians)
    /// rely on this order being exactly the source order.
    pub fn all(&self, attr: &str, value: &str) -> Vec<String> {
        self.matches(attr, value).map(content_of).collect()
    }

    /// Like [`first`](Self::first), but a missing element is an error.
    pub fn require(&self, attr: &str, value: &str) -> Result<String, SpotifyError> {
        self.first(attr, value)
            .ok_or_else(|| SpotifyError::MissingMetadata {
                attr: attr.to_string(),
                name: value.to_string(),
            })
    }

    fn matches<'a>(
        &'a self,
        attr: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html
            .select(&HEAD_ELEMENTS)
            .filter(move |el| el.value().attr(attr) == Some(value))
    }
}

/// `content` attribute when present, rendered text otherwise.
fn content_of(el: ElementRef<'_>) -> String {
    match el.value().attr("content") {
        Some(content) => content.to_string(),
        None => el.text().collect(),
    }
}
