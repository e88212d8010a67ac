use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::extract::Layout;

const FIELDS: [&str; 3] = ["keywords", "proxies", "type"];

/// Immutable description of one crawl job.
///
/// Built from exactly three fields, `keywords`, `proxies` and `type`: any
/// missing or extra field is rejected, nothing is defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlRequest {
    keywords: Vec<String>,
    proxies: Vec<String>,
    #[serde(rename = "type")]
    result_type: String,
}

impl CrawlRequest {
    pub fn new(
        keywords: Vec<String>,
        proxies: Vec<String>,
        result_type: impl Into<String>,
    ) -> Self {
        Self {
            keywords,
            proxies,
            result_type: result_type.into(),
        }
    }

    pub fn from_reader<R: io::Read>(rdr: R) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_reader(rdr).map_err(ValidationError::Malformed)?;
        Self::try_from(value)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    pub fn result_type(&self) -> &str {
        &self.result_type
    }

    pub fn layout(&self) -> Layout {
        Layout::resolve(&self.result_type)
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<String>, String) {
        (self.keywords, self.proxies, self.result_type)
    }
}

impl TryFrom<Value> for CrawlRequest {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = value.as_object().ok_or(ValidationError::NotAnObject)?;

        if let Some(unknown) = fields.keys().find(|k| !FIELDS.contains(&k.as_str())) {
            return Err(ValidationError::UnknownField(unknown.clone()));
        }
        if let Some(missing) = FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return Err(ValidationError::MissingField(*missing));
        }

        serde_json::from_value(value).map_err(ValidationError::Malformed)
    }
}
