use std::sync::Mutex as StdMutex;
use tokio::sync::{mpsc, Notify};

/// Holds only the most recent rendered frame; older frames are dropped.
#[derive(Debug)]
pub struct LatestFrame {
    frame: StdMutex<Option<String>>,
    notify: Notify,
}

impl LatestFrame {
    pub(crate) fn new() -> Self {
        Self {
            frame: StdMutex::new(None),
            notify: Notify::new(),
        }
    }

    pub(crate) fn store(&self, payload: String) {
        *self.frame.lock().unwrap() = Some(payload);
        self.notify.notify_one();
    }

    pub(crate) fn take_latest(&self) -> Option<String> {
        self.frame.lock().unwrap().take()
    }

    pub(crate) async fn wait_for_update(&self) {
        self.notify.notified().await;
    }
}

/// Receiving halves handed to the connection's send task.
pub struct SessionIo {
    pub frames: std::sync::Arc<LatestFrame>,
    pub events_rx: mpsc::UnboundedReceiver<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_frame_keeps_only_newest_payload() {
        let frame = LatestFrame::new();
        frame.store("one".to_string());
        frame.store("two".to_string());
        assert_eq!(frame.take_latest().as_deref(), Some("two"));
        assert_eq!(frame.take_latest(), None);
    }

    #[tokio::test]
    async fn store_wakes_waiter() {
        let frame = std::sync::Arc::new(LatestFrame::new());
        let waiter = {
            let frame = std::sync::Arc::clone(&frame);
            tokio::spawn(async move {
                frame.wait_for_update().await;
                frame.take_latest()
            })
        };
        frame.store("tick".to_string());
        assert_eq!(waiter.await.unwrap().as_deref(), Some("tick"));
    }
}
