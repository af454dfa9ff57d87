use crate::types::internal::ChangeEvent;

/// Seam for the push-notification collaborator. Stay and cleaning mutations
/// hand a ChangeEvent to this sink; the transport that fans it out to
/// listeners lives outside this crate.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ChangeEvent);
}

/// Default sink: logs the event descriptor. Deployments wire a real
/// transport in its place.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: ChangeEvent) {
        tracing::debug!(
            event_type = event.event_type,
            action = ?event.action,
            scope_id = %event.scope_id,
            "change event"
        );
    }
}
