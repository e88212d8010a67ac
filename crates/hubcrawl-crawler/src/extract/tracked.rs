//! Wiki and issue result pages share one shape: a container identified by id
//! holding links that carry a click tracking attribute.

use select::document::Document;
use select::node::Node;
use select::predicate::{Attr, Name, Predicate};

use super::resolve_href;
use crate::error::CrawlError;
use crate::record::Record;

pub(super) const WIKI_RESULTS: &str = "wiki_search_results";
pub(super) const ISSUE_RESULTS: &str = "issue_search_results";

const TRACKING_ATTR: &str = "data-hydro-click";

pub(super) fn items(
    document: &Document,
    container: &'static str,
) -> Result<Vec<usize>, CrawlError> {
    let results = document
        .find(Name("div").and(Attr("id", container)))
        .next()
        .ok_or(CrawlError::MalformedPage { container })?;

    Ok(results
        .find(Name("a").and(Attr(TRACKING_ATTR, ())))
        .map(|link| link.index())
        .collect())
}

pub(super) fn record(link: Node, base_url: &str) -> Option<Record> {
    let href = link.attr("href")?;
    Some(Record::new(resolve_href(base_url, href)))
}

#[cfg(test)]
mod tests {
    use crate::extract::Layout;
    use crate::record::Record;

    const BASE: &str = "https://github.com";

    #[test]
    fn wiki_links_in_document_order() {
        let page = r#"
            <div id="wiki_search_results">
              <div class="hx_hit-wiki">
                <a href="/openstack/nova/wiki/Home" data-hydro-click='{"event_type":"search_result.click"}'>Home</a>
                <a href="/openstack/nova">openstack/nova</a>
              </div>
              <div class="hx_hit-wiki">
                <a href="/openstack/nova/wiki/Setup" data-hydro-click='{"event_type":"search_result.click"}'>Setup</a>
              </div>
            </div>"#;

        let records = Layout::Wikis.extract(page, BASE).unwrap().collect::<Vec<_>>();
        assert_eq!(
            records,
            vec![
                Record::new("https://github.com/openstack/nova/wiki/Home"),
                Record::new("https://github.com/openstack/nova/wiki/Setup"),
            ]
        );
    }

    #[test]
    fn issue_links_skip_untracked_and_hrefless() {
        let page = r#"
            <a href="/outside/container" data-hydro-click="{}">outside</a>
            <div id="issue_search_results">
              <a href="/a/b/issues/1" data-hydro-click="{}">#1</a>
              <a data-hydro-click="{}">no href</a>
              <a href="/a/b/issues/2">untracked</a>
              <a href="/a/b/pull/3" data-hydro-click="{}">#3</a>
            </div>"#;

        let urls = Layout::Issues
            .extract(page, BASE)
            .unwrap()
            .map(|r| r.url)
            .collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://github.com/a/b/issues/1",
                "https://github.com/a/b/pull/3"
            ]
        );
    }

    #[test]
    fn container_ids_are_layout_specific() {
        let page = r#"<div id="wiki_search_results"><a href="/w" data-hydro-click="{}">w</a></div>"#;
        assert!(Layout::Issues.extract(page, BASE).is_err());
        assert_eq!(Layout::Wikis.extract(page, BASE).unwrap().count(), 1);
    }

    #[test]
    fn records_are_produced_lazily() {
        let page = r#"
            <div id="issue_search_results">
              <a href="/1" data-hydro-click="{}">1</a>
              <a href="/2" data-hydro-click="{}">2</a>
            </div>"#;

        let mut records = Layout::Issues.extract(page, BASE).unwrap();
        assert_eq!(records.size_hint(), (0, Some(2)));
        assert_eq!(records.next(), Some(Record::new("https://github.com/1")));
        assert_eq!(records.size_hint(), (0, Some(1)));
        assert_eq!(records.next(), Some(Record::new("https://github.com/2")));
        assert_eq!(records.next(), None);
    }
}
