//! Event bridge — drains one invocation into an ordered frame stream.
//!
//! Frames are delivered strictly in event order with exactly one
//! terminal frame, always last. The drain loop blocks on the event
//! channel (it wakes when the producer emits; there is no polling), and
//! the outbound frame channel is bounded so a slow client applies
//! backpressure to the drain loop without ever suspending the producer.
//! If the client goes away the invocation is aborted.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use agenthub_core::StreamFrame;

use crate::driver::ExecutionHandle;
use crate::session::StreamSession;

/// Outbound frame buffer depth.
const FRAME_BUFFER: usize = 64;

/// Run the bridge for one session.
///
/// Spawns the drain loop and returns the receiving end of the frame
/// stream. Dropping the receiver cancels the invocation.
pub fn run(mut session: StreamSession, mut handle: ExecutionHandle) -> mpsc::Receiver<StreamFrame> {
    let (tx, rx) = mpsc::channel(FRAME_BUFFER);

    tokio::spawn(async move {
        if tx.send(StreamFrame::Ping).await.is_err() {
            handle.abort();
            return;
        }

        while let Some(event) = handle.recv_event().await {
            if let Err(e) = session.observe(&event) {
                warn!(
                    conversation_id = session.conversation_id(),
                    agent = session.agent_name(),
                    error = %e,
                    "Malformed execution event; terminating session"
                );
                handle.abort();
                let _ = tx.send(StreamFrame::Error {
                    message: e.to_string(),
                })
                .await;
                return;
            }

            if tx.send(StreamFrame::Event(event)).await.is_err() {
                debug!(
                    conversation_id = session.conversation_id(),
                    "Client disconnected; aborting invocation"
                );
                handle.abort();
                return;
            }
        }

        match handle.await_result().await {
            Ok(output) => {
                if tx.send(StreamFrame::FinalResult).await.is_err() {
                    return;
                }
                debug!(
                    conversation_id = session.conversation_id(),
                    agent = session.agent_name(),
                    events = session.forwarded(),
                    "Session complete"
                );
                let _ = tx.send(StreamFrame::Done {
                    response: session.response_text(&output),
                })
                .await;
            }
            Err(e) => {
                warn!(
                    conversation_id = session.conversation_id(),
                    agent = session.agent_name(),
                    error = %e,
                    "Invocation failed"
                );
                let _ = tx.send(StreamFrame::Error {
                    message: e.to_string(),
                })
                .await;
            }
        }
    });

    rx
}
