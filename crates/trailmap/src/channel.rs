//! Progress-event channel pump.
//!
//! The generation pipeline pushes `{step, progress, error}` messages over a
//! best-effort channel. The pump drains any `futures::Stream` of events into
//! the session under the token captured at subscription time, in arrival
//! order. Cancellation is implicit: a newer session token makes these events
//! stale, and dropping the pump future is the unsubscribe.

use std::time::Instant;

use futures::{Stream, StreamExt, pin_mut};

use trailmap_core::{ProgressEvent, SessionToken};

use crate::session::RoadmapSession;

/// Drains the event stream into the session. The clock is injected like every
/// other time-dependent path; pass `Instant::now` outside of tests.
pub async fn pump_progress<S, C>(
    session: &mut RoadmapSession,
    token: SessionToken,
    events: S,
    mut clock: C,
) where
    S: Stream<Item = ProgressEvent>,
    C: FnMut() -> Instant,
{
    pin_mut!(events);
    while let Some(event) = events.next().await {
        session.apply_progress(token, &event, clock());
    }
}
