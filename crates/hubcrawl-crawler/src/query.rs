use reqwest::header::USER_AGENT;
use reqwest::StatusCode;

use crate::config::{CrawlerConfig, QUERY_PLACEHOLDER, TYPE_PLACEHOLDER};
use crate::error::CrawlError;
use crate::extract::{Layout, Records};

/// One search for a keyword, sent through a single proxy.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    config: &'a CrawlerConfig,
    keyword: String,
    result_type: String,
    proxy: String,
    layout: Layout,
}

impl<'a> Query<'a> {
    pub fn new(
        config: &'a CrawlerConfig,
        keyword: impl Into<String>,
        result_type: impl Into<String>,
        proxy: impl Into<String>,
    ) -> Self {
        let result_type = result_type.into();
        let layout = Layout::resolve(&result_type);
        Self {
            config,
            keyword: keyword.into(),
            result_type,
            proxy: proxy.into(),
            layout,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The search URL, the raw result type label is sent as is.
    pub fn url(&self) -> String {
        let path = render(&self.config.url_template, &self.keyword, &self.result_type);
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetches the search page and hands it to the layout's extractor.
    ///
    /// Exactly one request is sent, anything but `200 OK` is a
    /// [`CrawlError::Fetch`].
    pub async fn execute(&self) -> Result<Records, CrawlError> {
        let url = self.url();
        let page = self.fetch(&url).await?;
        self.layout.extract(&page, &self.config.base_url)
    }

    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let transport = |source: reqwest::Error| CrawlError::Transport {
            url: url.to_string(),
            source,
        };

        // Only plain HTTP traffic goes through the proxy
        let proxy = if self.proxy.contains("://") {
            reqwest::Proxy::http(&self.proxy)
        } else {
            reqwest::Proxy::http(format!("http://{}", self.proxy))
        }
        .map_err(transport)?;

        let client = reqwest::ClientBuilder::new()
            .gzip(true)
            .deflate(true)
            .proxy(proxy)
            .build()
            .map_err(transport)?;

        log::debug!("Fetching {url} through proxy {}", self.proxy);
        let resp = client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(CrawlError::Fetch {
                url: url.to_string(),
                status,
            });
        }

        resp.text().await.map_err(transport)
    }
}

/// Substitutes `{query}` and `{type}` in a single pass, other braces are kept.
fn render(template: &str, query: &str, result_type: &str) -> String {
    let mut out = String::with_capacity(template.len() + query.len() + result_type.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if tail.starts_with(QUERY_PLACEHOLDER) {
            out.push_str(query);
            rest = &tail[QUERY_PLACEHOLDER.len()..];
        } else if tail.starts_with(TYPE_PLACEHOLDER) {
            out.push_str(result_type);
            rest = &tail[TYPE_PLACEHOLDER.len()..];
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);

    out
}
