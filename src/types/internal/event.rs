use serde::Serialize;

/// What happened to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventAction {
    Create,
    Update,
    Delete,
}

/// Descriptor handed to the push-notification collaborator whenever a stay
/// or cleaning notification changes. The transport (fan-out to listeners)
/// lives outside this crate; we only describe the change.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    /// Event family, e.g. "CLEANING_UPDATE" or "STAY_UPDATE"
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub action: EventAction,
    pub payload: serde_json::Value,
    /// Property the change is scoped to; listeners filter on this
    pub scope_id: String,
}

impl ChangeEvent {
    pub fn new(
        event_type: &'static str,
        action: EventAction,
        payload: serde_json::Value,
        scope_id: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            action,
            payload,
            scope_id: scope_id.into(),
        }
    }
}
