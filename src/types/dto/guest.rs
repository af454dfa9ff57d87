use poem_openapi::Object;

use crate::types::db::guest;

#[derive(Object, Debug)]
pub struct GuestRequest {
    #[oai(validator(min_length = 1, max_length = 255))]
    pub first_name: String,

    #[oai(validator(min_length = 1, max_length = 255))]
    pub last_name: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,

    /// Calendar date, YYYY-MM-DD
    pub date_of_birth: Option<String>,

    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Object, Debug)]
pub struct GuestResponse {
    pub guest_id: String,
    pub group_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub created_by: String,
}

impl From<guest::Model> for GuestResponse {
    fn from(g: guest::Model) -> Self {
        Self {
            guest_id: g.guest_id,
            group_id: g.group_id,
            first_name: g.first_name,
            last_name: g.last_name,
            email: g.email,
            phone: g.phone,
            nationality: g.nationality,
            date_of_birth: g.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            id_number: g.id_number,
            id_type: g.id_type,
            notes: g.notes,
            created_at: g.created_at,
            created_by: g.created_by,
        }
    }
}
