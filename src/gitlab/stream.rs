//! Streaming enumeration over bounded channels
//!
//! A producer task walks pages and pushes items into a bounded item channel
//! as soon as each page arrives. Failure is reported on a separate error
//! channel. The consumer sees a [`PageStream`], which yields every buffered
//! item first and then either the producer's error or end-of-stream.
//!
//! [`fan_out`] expands each item of a parent stream into a nested page walk
//! and merges all nested walks into one output stream.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{Stream, StreamExt, TryStreamExt};
use log::debug;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use crate::config::stream as tuning;
use crate::error::{GitlabError, Result};
use crate::gitlab::pagination::{walk_pages, ListOptions, Page};

/// Create a connected producer/consumer pair
pub fn channel<T>() -> (PageSink<T>, PageStream<T>) {
    let (items_tx, items_rx) = mpsc::channel(tuning::ITEM_CHANNEL_CAPACITY);
    let (errors_tx, errors_rx) = mpsc::channel(tuning::ERROR_CHANNEL_CAPACITY);
    (
        PageSink {
            items: items_tx,
            errors: errors_tx,
        },
        PageStream {
            items: items_rx,
            errors: errors_rx,
            items_done: false,
        },
    )
}

/// Producer side of a page stream
///
/// Clones share the same channels; the stream ends once every clone is dropped.
pub struct PageSink<T> {
    items: mpsc::Sender<T>,
    errors: mpsc::Sender<GitlabError>,
}

impl<T> Clone for PageSink<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<T: Send + 'static> PageSink<T> {
    /// Send one item; `false` once the consumer has gone away
    pub async fn send(&self, item: T) -> bool {
        self.items.send(item).await.is_ok()
    }

    /// Resolves when the consumer has dropped its stream
    pub async fn closed(&self) {
        self.items.closed().await
    }

    /// Report the producer's error and close this handle
    ///
    /// Never blocks: the error channel holds one error and later reports
    /// are discarded.
    pub fn fail(self, err: GitlabError) {
        if self.errors.try_send(err).is_err() {
            debug!("Dropping enumeration error: consumer gone or error already reported");
        }
    }

    /// Walk all pages into this sink, stopping early if the consumer leaves
    pub async fn walk<F, Fut>(&self, opts: ListOptions, fetch: F) -> Result<()>
    where
        F: FnMut(ListOptions) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let items = self.items.clone();
        walk_pages(opts, fetch, move |page| {
            let items = items.clone();
            async move {
                for item in page {
                    if items.send(item).await.is_err() {
                        return false;
                    }
                }
                true
            }
        })
        .await
    }
}

/// Consumer side of a page stream
///
/// Yields `Ok(item)` for every produced item, then `Err` if the producer
/// failed, then `None`. Dropping the stream tells the producer to stop.
pub struct PageStream<T> {
    items: mpsc::Receiver<T>,
    errors: mpsc::Receiver<GitlabError>,
    items_done: bool,
}

impl<T> PageStream<T> {
    /// Split into the raw item and error channels
    pub fn into_channels(self) -> (mpsc::Receiver<T>, mpsc::Receiver<GitlabError>) {
        (self.items, self.errors)
    }

    /// Drain the whole stream, failing with the producer's error if any
    pub async fn try_collect(self) -> Result<Vec<T>> {
        TryStreamExt::try_collect(self).await
    }
}

impl<T> Stream for PageStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if !this.items_done {
            match this.items.poll_recv(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(Ok(item))),
                Poll::Ready(None) => this.items_done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
        this.errors.poll_recv(cx).map(|err| err.map(Err))
    }
}

/// Run a page walk on its own task and stream its items
pub fn spawn_pages<T, F, Fut>(opts: ListOptions, fetch: F) -> PageStream<T>
where
    T: Send + 'static,
    F: FnMut(ListOptions) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    let (sink, stream) = channel();
    tokio::spawn(async move {
        if let Err(e) = sink.walk(opts, fetch).await {
            sink.fail(e);
        }
    });
    stream
}

/// Expand every parent item into a nested producer and merge the results
///
/// Each nested producer runs on its own task and writes into the shared
/// output. The output ends only after every nested task has finished. The
/// first failure (from the parent stream or any nested producer) aborts the
/// remaining nested tasks and is reported once.
pub fn fan_out<P, T, F, Fut>(parents: PageStream<P>, expand: F) -> PageStream<T>
where
    P: Send + 'static,
    T: Send + 'static,
    F: Fn(P, PageSink<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let (sink, stream) = channel();
    tokio::spawn(async move {
        let mut parents = parents;
        let mut nested: JoinSet<Result<()>> = JoinSet::new();
        let mut failure: Option<GitlabError> = None;

        loop {
            tokio::select! {
                biased;
                _ = sink.closed() => {
                    debug!("Fan-out consumer gone, stopping {} nested producers", nested.len());
                    nested.abort_all();
                    return;
                }
                Some(joined) = nested.join_next(), if !nested.is_empty() => {
                    if let Some(e) = nested_failure(joined) {
                        failure = Some(e);
                        break;
                    }
                }
                next = parents.next() => match next {
                    Some(Ok(parent)) => {
                        nested.spawn(expand(parent, sink.clone()));
                    }
                    Some(Err(e)) => {
                        failure = Some(e);
                        break;
                    }
                    None => break,
                }
            }
        }

        if failure.is_none() {
            while let Some(joined) = nested.join_next().await {
                if let Some(e) = nested_failure(joined) {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            nested.abort_all();
            sink.fail(e);
        }
    });
    stream
}

fn nested_failure(joined: std::result::Result<Result<()>, JoinError>) -> Option<GitlabError> {
    match joined {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e),
        Err(e) if e.is_cancelled() => None,
        Err(e) => Some(GitlabError::Task(e.to_string())),
    }
}
