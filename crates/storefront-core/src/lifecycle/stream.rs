// ── Reactive slice streams ──
//
// Subscription types for consuming slice state changes.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to one slice's state.
///
/// Provides both point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct SliceStream<S: Clone + Send + Sync + 'static> {
    current: S,
    receiver: watch::Receiver<S>,
}

impl<S: Clone + Send + Sync + 'static> SliceStream<S> {
    pub(crate) fn new(receiver: watch::Receiver<S>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &S {
        &self.current
    }

    /// The latest state (may have changed since creation).
    pub fn latest(&self) -> S {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new state.
    /// Returns `None` once the owning slice has been dropped.
    pub async fn changed(&mut self) -> Option<S> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> SliceWatchStream<S> {
        SliceWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`. Yields the current state
/// first, then each new state as the slice changes.
pub struct SliceWatchStream<S: Clone + Send + Sync + 'static> {
    inner: WatchStream<S>,
}

impl<S: Clone + Send + Sync + 'static> Stream for SliceWatchStream<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
