use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Cancellable handle to a scheduled tick loop.
///
/// The loop body receives the cancellation flag and must check it after every
/// await point that precedes a tick. Dropping the handle cancels the loop.
#[derive(Debug)]
pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl LoopHandle {
    pub fn spawn<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Arc<AtomicBool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(body(Arc::clone(&cancelled)));
        Self { cancelled, task }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_future_iterations() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = {
            let count = Arc::clone(&count);
            LoopHandle::spawn(move |cancelled| async move {
                loop {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    if cancelled.load(Ordering::SeqCst) {
                        break;
                    }
                    count.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        tokio::time::sleep(Duration::from_millis(55)).await;
        handle.cancel();
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen, 5);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }
}
