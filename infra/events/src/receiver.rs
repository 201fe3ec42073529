use crate::bus::Event;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

/// Uniform, lag-tolerant receive for the channel kinds handed out by the bus.
///
/// Listeners (audit trails, mailers) usually care about "the next event or
/// shutdown" and not about why a broadcast receiver fell behind.
pub trait EventReceiverExt<T> {
    /// Receive the next event, returning `None` once the channel is closed.
    ///
    /// A lagging broadcast receiver skips the overwritten events and resumes
    /// from the oldest one still buffered.
    fn next_event(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Event> EventReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn next_event(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(event) => {
                    if skipped > 0 {
                        warn!(
                            event = std::any::type_name::<T>(),
                            skipped, "Event listener lagged; continuing from oldest buffered event"
                        );
                    }
                    return Some(event);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => skipped = skipped.saturating_add(n),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl<T: Event> EventReceiverExt<T> for mpsc::Receiver<Arc<T>> {
    async fn next_event(&mut self) -> Option<Arc<T>> {
        self.recv().await
    }
}
