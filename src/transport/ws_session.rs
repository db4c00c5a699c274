use crate::game::session::{Session, SessionIo};
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

pub async fn handle_socket(socket: WebSocket, session: Arc<Session>, io: SessionIo) {
    let (mut sender, mut receiver) = socket.split();
    let SessionIo {
        frames,
        mut events_rx,
    } = io;

    let send_task = tokio::spawn(async move {
        use std::collections::VecDeque;

        let mut pending_events: VecDeque<String> = VecDeque::new();
        let mut pending_frame: Option<String> = None;

        loop {
            tokio::select! {
                event = events_rx.recv() => {
                    let Some(payload) = event else { return };
                    pending_events.push_back(payload);
                }
                _ = frames.wait_for_update() => {}
            }

            while let Ok(payload) = events_rx.try_recv() {
                pending_events.push_back(payload);
            }
            if let Some(payload) = frames.take_latest() {
                pending_frame = Some(payload);
            }

            // Frames first so a game-over event never precedes the final frame.
            if let Some(payload) = pending_frame.take() {
                if sender.send(Message::Text(payload)).await.is_err() {
                    return;
                }
            }

            while let Some(payload) = pending_events.pop_front() {
                if sender.send(Message::Text(payload)).await.is_err() {
                    return;
                }
            }
        }
    });

    while let Some(result) = receiver.next().await {
        let Ok(message) = result else { break };
        match message {
            Message::Text(text) => {
                if !session.handle_text_message(&text).await {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::debug!(session_id = %session.id(), "connection closed");
    session.stop().await;
    send_task.abort();
}
