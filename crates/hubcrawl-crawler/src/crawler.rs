use futures::stream::{self, LocalBoxStream};
use futures::{future, Stream, StreamExt, TryStreamExt};
use rand::seq::IndexedRandom;

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::pacer::PacedExt;
use crate::query::Query;
use crate::record::Record;
use crate::request::CrawlRequest;

/// Records of a whole crawl, in keyword order then document order.
///
/// Parsed pages are not `Send`, so the stream has to be polled on the thread
/// that created it.
pub type RecordStream<'a> = LocalBoxStream<'a, Result<Record, CrawlError>>;

#[derive(Debug, Clone)]
pub struct Crawler {
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Searches every keyword of `request` one after the other.
    ///
    /// Each keyword waits for the configured delay, then gets a proxy drawn
    /// at random and a single search query whose records are streamed as
    /// soon as its page is parsed. The next keyword isn't searched before all
    /// records of the current one have been pulled. The first error ends the
    /// stream: it is yielded and nothing else is searched.
    pub fn process(&self, request: CrawlRequest) -> RecordStream<'_> {
        let config = &self.config;
        let layout = request.layout();
        let (keywords, proxies, result_type) = request.into_parts();
        log::info!(
            "Crawling {} keywords as {result_type} ({layout} layout) with {} proxies",
            keywords.len(),
            proxies.len()
        );

        let pages = stream::iter(keywords)
            .paced(config.delay())
            .then(move |keyword| {
                let query = draw_proxy(&proxies)
                    .map(|proxy| Query::new(config, keyword, result_type.as_str(), proxy));
                async move {
                    let query = query?;
                    log::info!(
                        "Searching {:?} through proxy {}",
                        query.keyword(),
                        query.proxy()
                    );
                    query.execute().await
                }
            });

        until_err(pages)
            .flat_map(|page| match page {
                Ok(records) => stream::iter(records.map(Ok::<_, CrawlError>)).left_stream(),
                Err(e) => stream::once(future::ready(Err(e))).right_stream(),
            })
            .boxed_local()
    }

    /// Runs the whole crawl and gathers its records.
    pub async fn run(&self, request: CrawlRequest) -> Result<Vec<Record>, CrawlError> {
        let records = self.process(request).try_collect::<Vec<_>>().await?;
        log::info!("Crawl done with {} records", records.len());
        Ok(records)
    }
}

/// Yields items up to and including the first error, the inner stream isn't
/// polled anymore after it.
fn until_err<'a, T, E>(
    stream: impl Stream<Item = Result<T, E>> + 'a,
) -> impl Stream<Item = Result<T, E>> + 'a
where
    T: 'a,
    E: 'a,
{
    stream::unfold(Some(stream.boxed_local()), |state| async move {
        let mut stream = match state {
            Some(stream) => stream,
            None => return None,
        };
        match stream.next().await {
            Some(Ok(item)) => Some((Ok(item), Some(stream))),
            Some(Err(e)) => Some((Err(e), None)),
            None => None,
        }
    })
}

fn draw_proxy(proxies: &[String]) -> Result<String, CrawlError> {
    proxies
        .choose(&mut rand::rng())
        .cloned()
        .ok_or(CrawlError::EmptyPool)
}
