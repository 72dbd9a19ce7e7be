//! Photo list update stream.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::watch;

use crate::store::PhotoList;

/// Stream of photo lists published by a [`PhotoStore`](crate::PhotoStore).
///
/// Each item is the whole list after a mutation. A consumer that falls behind
/// skips straight to the newest list. The stream ends when the store is
/// dropped.
pub struct PhotoListStream {
    inner: Pin<Box<dyn Stream<Item = PhotoList> + Send>>,
}

impl PhotoListStream {
    pub(crate) fn new(mut rx: watch::Receiver<PhotoList>) -> Self {
        let stream = async_stream::stream! {
            while rx.changed().await.is_ok() {
                let list = rx.borrow_and_update().clone();
                yield list;
            }
        };

        Self {
            inner: Box::pin(stream),
        }
    }
}

impl Stream for PhotoListStream {
    type Item = PhotoList;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
