//! Server-sent event stream of controller notifications.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};
use catpoint_domain::event::Event;

use crate::state::AppState;

/// `GET /api/events` — one `data:` frame per published [`Event`], as JSON.
///
/// Only events published after the request are streamed. A client that falls
/// behind skips the events it missed.
pub async fn stream<R, C, P>(
    State(state): State<AppState<R, C, P>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let receiver = state.event_bus.subscribe();
    let events = BroadcastStream::new(receiver).filter_map(|item| match item {
        Ok(event) => to_sse(&event).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "event stream client lagging, events dropped");
            None
        }
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse(event: &Event) -> Option<SseEvent> {
    SseEvent::default()
        .id(event.id.to_string())
        .json_data(event)
        .inspect_err(|err| tracing::warn!(error = %err, "failed to encode event"))
        .ok()
}
