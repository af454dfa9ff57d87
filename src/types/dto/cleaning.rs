use poem_openapi::Object;

use crate::types::db::cleaning_notification;

#[derive(Object, Debug)]
pub struct CleaningRequest {
    pub property_id: String,
    pub assigned_to: String,
    pub stay_id: Option<String>,

    /// Calendar date, YYYY-MM-DD
    pub scheduled_date: String,

    pub notes: Option<String>,
}

#[derive(Object, Debug)]
pub struct CleaningUpdateRequest {
    pub assigned_to: Option<String>,
    pub stay_id: Option<String>,

    /// Calendar date, YYYY-MM-DD
    pub scheduled_date: Option<String>,

    pub notes: Option<String>,

    /// One of pending, in_progress, completed, cancelled
    pub status: Option<String>,
}

#[derive(Object, Debug)]
pub struct CleaningResponse {
    pub id: String,
    pub property_id: String,
    pub assigned_to: String,
    pub stay_id: Option<String>,
    pub status: String,
    pub scheduled_date: String,
    pub completed_date: Option<i64>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<cleaning_notification::Model> for CleaningResponse {
    fn from(n: cleaning_notification::Model) -> Self {
        Self {
            id: n.id,
            property_id: n.property_id,
            assigned_to: n.assigned_to,
            stay_id: n.stay_id,
            status: n.status,
            scheduled_date: n.scheduled_date.format("%Y-%m-%d").to_string(),
            completed_date: n.completed_date,
            notes: n.notes,
            created_by: n.created_by,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}
