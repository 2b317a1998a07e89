//! Structured operation events
//!
//! Each manager operation emits exactly one `info!` event on the
//! `minichess::ops` target. Formatting and shipping the events is left to
//! whichever subscriber the host installs.

use crate::error::SessionResult;
use uuid::Uuid;
use web_time::Instant;

pub const OPS_TARGET: &str = "minichess::ops";

/// Emit the event for a finished operation with an explicit outcome.
pub fn record_outcome(op: &'static str, session: Option<Uuid>, outcome: &str, started: Instant) {
    let session = session.map(|id| id.to_string()).unwrap_or_default();
    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        target: OPS_TARGET,
        op,
        session = %session,
        outcome,
        duration_ms,
        "operation finished"
    );
}

/// Emit the event for a finished operation; the outcome is `ok` or the
/// error's code.
pub fn record<T>(op: &'static str, session: Option<Uuid>, result: &SessionResult<T>, started: Instant) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) => err.code(),
    };
    record_outcome(op, session, outcome, started);
}
