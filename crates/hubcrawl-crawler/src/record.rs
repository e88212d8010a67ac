use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One search hit extracted from a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, String>>,
}

impl Record {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: None,
        }
    }

    pub fn with_extra<I, K, V>(url: impl Into<String>, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            url: url.into(),
            extra: Some(
                extra
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.as_ref()?.get(key).map(String::as_str)
    }
}
