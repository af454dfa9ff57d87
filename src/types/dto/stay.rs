use poem_openapi::Object;

use crate::types::db::stay;

#[derive(Object, Debug)]
pub struct StayRequest {
    pub property_id: String,
    pub guest_id: String,

    /// Calendar date, YYYY-MM-DD
    pub check_in_date: String,

    /// Calendar date, YYYY-MM-DD
    pub check_out_date: String,

    #[oai(validator(minimum(value = "0")))]
    pub total_price: i32,

    #[oai(validator(minimum(value = "1")))]
    pub number_of_guests: i32,

    pub special_requests: Option<String>,

    /// One of upcoming, active, completed, cancelled (updates only)
    pub status: Option<String>,

    /// One of pending, partial, paid (updates only)
    pub payment_status: Option<String>,
}

#[derive(Object, Debug)]
pub struct StayResponse {
    pub stay_id: String,
    pub property_id: String,
    pub guest_id: String,
    pub check_in: String,
    pub check_out: String,
    pub total_price: i32,
    pub status: String,
    pub payment_status: String,
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<stay::Model> for StayResponse {
    fn from(s: stay::Model) -> Self {
        Self {
            stay_id: s.stay_id,
            property_id: s.property_id,
            guest_id: s.guest_id,
            check_in: s.check_in.format("%Y-%m-%d").to_string(),
            check_out: s.check_out.format("%Y-%m-%d").to_string(),
            total_price: s.total_price,
            status: s.status,
            payment_status: s.payment_status,
            number_of_guests: s.number_of_guests,
            special_requests: s.special_requests,
            created_by: s.created_by,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
