use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CrawlError;

pub(crate) const QUERY_PLACEHOLDER: &str = "{query}";
pub(crate) const TYPE_PLACEHOLDER: &str = "{type}";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    /// Prefix of every search URL and of every relative result link
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search path, `{query}` and `{type}` are substituted per keyword
    #[serde(default = "default_url_template")]
    pub url_template: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// The delay in seconds before each search request
    #[serde(default = "default_delay")]
    pub delay: f32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            url_template: default_url_template(),
            user_agent: default_user_agent(),
            delay: default_delay(),
        }
    }
}

impl CrawlerConfig {
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.base_url.is_empty() {
            return Err(CrawlError::Config("`baseUrl` is empty".into()));
        }
        for placeholder in [QUERY_PLACEHOLDER, TYPE_PLACEHOLDER] {
            if !self.url_template.contains(placeholder) {
                return Err(CrawlError::Config(format!(
                    "`urlTemplate` {:?} lacks {placeholder}",
                    self.url_template
                )));
            }
        }
        if !self.delay.is_finite() || self.delay < 0. {
            return Err(CrawlError::Config(format!(
                "`delay` must be a non-negative number of seconds, got {}",
                self.delay
            )));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.delay).unwrap_or_else(|e| {
            log::warn!("Ignoring delay {} got: {e}", self.delay);
            Duration::ZERO
        })
    }
}

fn default_base_url() -> String {
    String::from("https://github.com")
}

fn default_url_template() -> String {
    String::from("/search?q={query}&type={type}")
}

fn default_user_agent() -> String {
    String::from("hubcrawl")
}

fn default_delay() -> f32 {
    3.
}
