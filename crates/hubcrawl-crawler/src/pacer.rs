use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::{Fuse, FusedStream};
use futures::{ready, Future, Stream, StreamExt};
use pin_project_lite::pin_project;
use tokio::time::Sleep;

pin_project! {
    /// Holds every item of the inner stream back for a fixed delay.
    ///
    /// The delay starts once the item is available and applies to the first
    /// item too. No delay is spent once the inner stream is exhausted.
    pub struct Paced<St>
    where
        St: Stream,
    {
        #[pin]
        stream: Fuse<St>,
        #[pin]
        sleep: Option<Sleep>,
        delay: Duration,
        pending: Option<St::Item>,
    }
}

impl<St> fmt::Debug for Paced<St>
where
    St: Stream + fmt::Debug,
    St::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paced")
            .field("stream", &self.stream)
            .field("delay", &self.delay)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<St> Paced<St>
where
    St: Stream,
{
    pub fn new(stream: St, delay: Duration) -> Self {
        Self {
            stream: stream.fuse(),
            sleep: None,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<St> Stream for Paced<St>
where
    St: Stream,
{
    type Item = St::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if this.pending.is_none() {
            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(item) => {
                    *this.pending = Some(item);
                    this.sleep.set(Some(tokio::time::sleep(*this.delay)));
                }
                None => return Poll::Ready(None),
            }
        }

        if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
            ready!(sleep.poll(cx));
        }
        this.sleep.set(None);

        Poll::Ready(this.pending.take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let (lower, upper) = self.stream.size_hint();
        let lower = lower.saturating_add(pending);
        let upper = match upper {
            Some(x) => x.checked_add(pending),
            None => None,
        };
        (lower, upper)
    }
}

impl<St> FusedStream for Paced<St>
where
    St: Stream,
{
    fn is_terminated(&self) -> bool {
        self.pending.is_none() && self.stream.is_terminated()
    }
}

pub trait PacedExt: Stream {
    fn paced(self, delay: Duration) -> Paced<Self>
    where
        Self: Sized,
    {
        Paced::new(self, delay)
    }
}

impl<T: ?Sized> PacedExt for T where T: Stream {}
