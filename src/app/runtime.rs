//! Event loop driver.
//!
//! Feeds events to [`handle_event`], executes the resulting actions on a
//! [`Dispatcher`], and keeps feeding responses back in until nothing is in
//! flight.

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::worker::Dispatcher;

/// Executes actions in order.
pub fn execute_actions(dispatcher: &mut Dispatcher, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::PostToWorker(request) => dispatcher.submit(request),
        }
    }
}

/// Handles one event and dispatches its actions. Requests are started
/// inside the event's span.
fn dispatch_event(state: &mut AppState, dispatcher: &mut Dispatcher, event: &Event) -> Result<bool> {
    let _span = tracing::debug_span!("dispatch_event", event_type = event.name()).entered();
    let (render, actions) = handle_event(state, event)?;
    execute_actions(dispatcher, actions);
    Ok(render)
}

/// Runs `events`, then processes responses until the dispatcher is idle.
///
/// Returns whether any step changed visible state.
///
/// # Errors
///
/// Returns the first synchronous failure from [`handle_event`]. Requests
/// already started stay in the dispatcher and are processed by the next
/// call.
pub async fn drive<I>(state: &mut AppState, dispatcher: &mut Dispatcher, events: I) -> Result<bool>
where
    I: IntoIterator<Item = Event>,
{
    let mut rendered = false;

    for event in events {
        rendered |= dispatch_event(state, dispatcher, &event)?;
    }

    while let Some(response) = dispatcher.next_response().await {
        rendered |= dispatch_event(state, dispatcher, &Event::WorkerResponse(response))?;
    }

    tracing::debug!(rendered, "event loop idle");
    Ok(rendered)
}

/// Drives each batch in `steps` to quiescence before starting the next, so
/// a later batch sees the responses to earlier ones.
///
/// # Errors
///
/// Stops at the first failing batch; later batches are not run.
pub async fn drive_steps<S>(state: &mut AppState, dispatcher: &mut Dispatcher, steps: S) -> Result<bool>
where
    S: IntoIterator<Item = Vec<Event>>,
{
    let mut rendered = false;
    for (index, events) in steps.into_iter().enumerate() {
        tracing::trace!(step = index, events = events.len(), "driving step");
        rendered |= drive(state, dispatcher, events).await?;
    }
    Ok(rendered)
}
