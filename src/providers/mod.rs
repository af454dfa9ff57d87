// Providers layer - collaborator seams
pub mod event_sink;

pub use event_sink::{EventSink, TracingEventSink};
