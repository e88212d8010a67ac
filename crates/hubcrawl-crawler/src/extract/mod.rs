//! Result page layouts and the records they yield.
//!
//! Each [`Layout`] knows how to locate its result container in a search page
//! and how to turn every matched element into a [`Record`]. Parsing happens
//! once per page, records are then built one at a time as [`Records`] is
//! iterated.

use std::fmt;
use std::vec;

use select::document::Document;
use serde::{Deserialize, Serialize};

use crate::error::CrawlError;
use crate::record::Record;

mod repositories;
mod tracked;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Layout {
    /// Repository listing, one record per list item with owner and language
    Repositories,
    /// Wiki results, one record per tracked link
    Wikis,
    /// Issue results, one record per tracked link
    Issues,
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Layout {
    /// Layout used for any label that isn't recognized.
    pub const DEFAULT: Self = Self::Repositories;

    /// Maps a result type label to its layout, never fails.
    pub fn resolve(label: &str) -> Self {
        match label {
            "Repositories" => Self::Repositories,
            "Wikis" => Self::Wikis,
            "Issues" => Self::Issues,
            _ => Self::DEFAULT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Repositories => "Repositories",
            Self::Wikis => "Wikis",
            Self::Issues => "Issues",
        }
    }

    /// Parses `page` and locates its result items.
    ///
    /// Fails with [`CrawlError::MalformedPage`] when the result container is
    /// missing. Relative links are resolved against `base_url`.
    pub fn extract(self, page: &str, base_url: &str) -> Result<Records, CrawlError> {
        let document = Document::from(page);
        let items = match self {
            Self::Repositories => repositories::items(&document)?,
            Self::Wikis => tracked::items(&document, tracked::WIKI_RESULTS)?,
            Self::Issues => tracked::items(&document, tracked::ISSUE_RESULTS)?,
        };

        Ok(Records {
            layout: self,
            base_url: base_url.trim_end_matches('/').to_string(),
            document,
            items: items.into_iter(),
        })
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records of one parsed page, in document order.
pub struct Records {
    layout: Layout,
    base_url: String,
    document: Document,
    items: vec::IntoIter<usize>,
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        for index in self.items.by_ref() {
            let Some(node) = self.document.nth(index) else {
                continue;
            };
            let record = match self.layout {
                Layout::Repositories => repositories::record(node, &self.base_url),
                Layout::Wikis | Layout::Issues => tracked::record(node, &self.base_url),
            };
            if record.is_some() {
                return record;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.items.len()))
    }
}

impl fmt::Debug for Records {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records")
            .field("layout", &self.layout)
            .field("base_url", &self.base_url)
            .field("remaining", &self.items.len())
            .finish()
    }
}

fn is_absolute(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

fn resolve_href(base_url: &str, href: &str) -> String {
    if is_absolute(href) {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{base_url}{href}")
    } else {
        format!("{base_url}/{href}")
    }
}
