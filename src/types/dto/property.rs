use poem_openapi::Object;

use crate::services::property_service::PropertyView;
use crate::stores::property_store::{NewProperty, PropertyUpdate};
use crate::types::db::property;

#[derive(Object, Debug)]
pub struct PropertyRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub name: String,

    #[oai(validator(min_length = 3, max_length = 255))]
    pub address: String,

    #[oai(validator(minimum(value = "1")))]
    pub price_per_day: i32,

    #[oai(validator(minimum(value = "0")))]
    pub size: Option<i32>,

    #[oai(validator(minimum(value = "1"), maximum(value = "10")))]
    pub rooms: Option<i32>,

    #[oai(validator(minimum(value = "0")))]
    pub loan: Option<i32>,

    #[oai(validator(minimum(value = "0")))]
    pub property_buy_price: Option<i32>,

    #[oai(validator(minimum(value = "0")))]
    pub property_sell_price_now: Option<i32>,
}

impl From<PropertyRequest> for NewProperty {
    fn from(req: PropertyRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            price_per_day: req.price_per_day,
            size: req.size.unwrap_or(0),
            rooms: req.rooms.unwrap_or(1),
            loan: req.loan.unwrap_or(0),
            property_buy_price: req.property_buy_price.unwrap_or(0),
            property_sell_price_now: req.property_sell_price_now.unwrap_or(0),
        }
    }
}

impl From<PropertyRequest> for PropertyUpdate {
    fn from(req: PropertyRequest) -> Self {
        Self {
            name: Some(req.name),
            address: Some(req.address),
            price_per_day: Some(req.price_per_day),
            size: req.size,
            rooms: req.rooms,
            loan: req.loan,
            property_buy_price: req.property_buy_price,
            property_sell_price_now: req.property_sell_price_now,
        }
    }
}

#[derive(Object, Debug)]
pub struct PropertyResponse {
    pub property_id: String,
    pub group_id: String,
    pub created_by: String,
    pub name: String,
    pub address: String,
    pub is_rented: bool,
    pub price_per_day: i32,
    pub size: i32,
    pub rooms: i32,
    pub loan: i32,
    pub property_buy_price: i32,
    pub property_sell_price_now: i32,
    pub date_created: i64,
    pub last_date_rented: i64,
    pub last_day_cleaned: i64,
}

impl From<property::Model> for PropertyResponse {
    fn from(p: property::Model) -> Self {
        Self {
            property_id: p.property_id,
            group_id: p.group_id,
            created_by: p.created_by,
            name: p.name,
            address: p.address,
            is_rented: p.is_rented,
            price_per_day: p.price_per_day,
            size: p.size,
            rooms: p.rooms,
            loan: p.loan,
            property_buy_price: p.property_buy_price,
            property_sell_price_now: p.property_sell_price_now,
            date_created: p.date_created,
            last_date_rented: p.last_date_rented,
            last_day_cleaned: p.last_day_cleaned,
        }
    }
}

/// A property with the caller's role in its group attached
#[derive(Object, Debug)]
pub struct PropertyWithRoleResponse {
    #[oai(flatten)]
    pub property: PropertyResponse,
    pub is_owner: bool,
    pub role: String,
}

impl From<PropertyView> for PropertyWithRoleResponse {
    fn from(view: PropertyView) -> Self {
        Self {
            property: view.property.into(),
            is_owner: view.is_owner,
            role: view.role.to_string(),
        }
    }
}
