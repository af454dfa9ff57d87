use poem_openapi::Object;

use crate::types::db::property;

/// A property as shown on the public marketplace. Listings are a projection
/// of the properties table; they have no storage of their own.
#[derive(Object, Debug)]
pub struct ListingResponse {
    pub id: String,
    pub title: String,
    pub price: i32,
    pub address: String,
    /// "active" while the property is free, "inactive" while rented
    pub status: String,
    pub owner_id: String,
    pub size: i32,
    pub rooms: i32,
    pub is_rented: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<property::Model> for ListingResponse {
    fn from(p: property::Model) -> Self {
        Self {
            id: p.property_id,
            title: p.name,
            price: p.price_per_day,
            address: p.address,
            status: if p.is_rented { "inactive" } else { "active" }.to_string(),
            owner_id: p.created_by,
            size: p.size,
            rooms: p.rooms,
            is_rented: p.is_rented,
            created_at: p.date_created,
            updated_at: p.last_date_rented,
        }
    }
}
