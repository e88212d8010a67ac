mod config;
mod crawler;
mod error;
mod extract;
mod pacer;
mod query;
mod record;
mod request;

pub use config::CrawlerConfig;
pub use crawler::{Crawler, RecordStream};
pub use error::{CrawlError, ValidationError};
pub use extract::{Layout, Records};
pub use pacer::{Paced, PacedExt};
pub use query::Query;
pub use record::Record;
pub use request::CrawlRequest;
