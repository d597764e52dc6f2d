//! Single-writer state publication
//!
//! Every load cycle gets a generation number while its loading snapshot is
//! published. A finished cycle only publishes if it is still the latest
//! generation and the owner has not been disposed. Both checks run inside
//! the watch channel's write lock, so a check and its write are atomic.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

pub(crate) struct StatePublisher<S> {
    sender: watch::Sender<S>,
    generation: AtomicU64,
    disposed: AtomicBool,
    /// Latest spawned load and its generation
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
}

impl<S> StatePublisher<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            generation: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            in_flight: Mutex::new(None),
        }
    }

    pub(crate) fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Opens a load cycle by publishing `loading(current)`.
    ///
    /// Returns the cycle's generation, or `None` once disposed.
    pub(crate) fn begin(&self, loading: impl FnOnce(&S) -> S) -> Option<u64> {
        let mut generation = None;
        self.sender.send_if_modified(|state| {
            if self.disposed.load(Ordering::SeqCst) {
                return false;
            }
            generation = Some(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            *state = loading(state);
            true
        });
        generation
    }

    /// Publishes `next` if `generation` is still current. Returns whether it was applied.
    pub(crate) fn complete(&self, generation: u64, next: S) -> bool {
        self.sender.send_if_modified(|state| {
            if self.disposed.load(Ordering::SeqCst)
                || self.generation.load(Ordering::SeqCst) != generation
            {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Records the task running `generation`, aborting whichever of it and
    /// the previously tracked task is older.
    fn track(&self, generation: u64, handle: AbortHandle) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if self.is_disposed() {
            handle.abort();
            return;
        }

        match slot.as_ref() {
            Some((latest, _)) if *latest > generation => handle.abort(),
            _ => {
                if let Some((_, previous)) = slot.replace((generation, handle)) {
                    previous.abort();
                }
            }
        }
    }

    /// Starts a load cycle whose result is produced by `work` on a new task.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn launch<F>(self: &Arc<Self>, loading: impl FnOnce(&S) -> S, work: F) -> JoinHandle<()>
    where
        F: Future<Output = S> + Send + 'static,
    {
        let Some(generation) = self.begin(loading) else {
            debug!("load requested after dispose; ignoring");
            return tokio::spawn(async {});
        };

        let publisher = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let next = work.await;
            if !publisher.complete(generation, next) {
                debug!(generation, "dropping superseded load result");
            }
        });

        self.track(generation, handle.abort_handle());
        handle
    }

    /// Makes the publisher inert; later results and loads are dropped.
    pub(crate) fn dispose(&self) {
        self.sender.send_if_modified(|_| {
            self.disposed.store(true, Ordering::SeqCst);
            false
        });

        let in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some((_, handle)) = in_flight {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stale_generation_is_ignored() {
        let publisher = StatePublisher::new(0u32);

        let first = publisher.begin(|_| 1).unwrap();
        let second = publisher.begin(|_| 2).unwrap();

        assert!(!publisher.complete(first, 10));
        assert_eq!(publisher.snapshot(), 2);

        assert!(publisher.complete(second, 20));
        assert_eq!(publisher.snapshot(), 20);
    }

    #[test]
    fn test_disposed_publisher_is_inert() {
        let publisher = StatePublisher::new(0u32);
        let generation = publisher.begin(|_| 1).unwrap();

        publisher.dispose();

        assert!(!publisher.complete(generation, 5));
        assert!(publisher.begin(|_| 7).is_none());
        assert_eq!(publisher.snapshot(), 1);
        assert!(publisher.is_disposed());
    }

    #[tokio::test]
    async fn test_launch_aborts_superseded_task() {
        let publisher = Arc::new(StatePublisher::new(String::from("idle")));

        let slow = publisher.launch(
            |_| "loading".into(),
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                String::from("slow")
            },
        );
        let fast = publisher.launch(|_| "loading".into(), async { String::from("fast") });

        fast.await.unwrap();
        assert!(slow.await.unwrap_err().is_cancelled());
        assert_eq!(publisher.snapshot(), "fast");
    }

    #[tokio::test]
    async fn test_subscribers_see_loading_then_result() {
        let publisher = Arc::new(StatePublisher::new(0u32));
        let mut rx = publisher.subscribe();

        let handle = publisher.launch(|_| 1, async { 2 });
        handle.await.unwrap();

        let seen = *rx.wait_for(|v| *v == 2).await.unwrap();
        assert_eq!(seen, 2);
    }
}
