use reqwest::Url;
use select::document::Document;
use select::node::Node;
use select::predicate::{Attr, Class, Name, Predicate};

use super::{is_absolute, resolve_href};
use crate::error::CrawlError;
use crate::record::Record;

const CONTAINER: &str = "ul.repo-list";

pub(super) fn items(document: &Document) -> Result<Vec<usize>, CrawlError> {
    let list = document
        .find(Name("ul").and(Class("repo-list")))
        .next()
        .ok_or(CrawlError::MalformedPage {
            container: CONTAINER,
        })?;

    Ok(list
        .find(Name("li").and(Class("repo-list-item")))
        .map(|item| item.index())
        .collect())
}

/// Items without a primary link are skipped.
pub(super) fn record(item: Node, base_url: &str) -> Option<Record> {
    let href = item
        .find(Name("a").and(Class("v-align-middle")))
        .next()?
        .attr("href")?;

    let owner = owner(href);
    let language = item
        .find(Name("span").and(Attr("itemprop", ())))
        .next()
        .map(|span| span.text().trim().to_string())
        .unwrap_or_default();

    Some(Record::with_extra(
        resolve_href(base_url, href),
        [("owner", owner), ("language", language)],
    ))
}

/// Second path segment of the link target, `"/owner/repo"` gives `owner`.
fn owner(href: &str) -> String {
    if is_absolute(href) {
        if let Ok(url) = Url::parse(href) {
            return url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .unwrap_or_default()
                .to_string();
        }
    }
    href.split('/').nth(1).unwrap_or_default().to_string()
}
