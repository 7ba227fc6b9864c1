use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::models::{Money, normalize_time};

/// The JSON envelope every endpoint answers with
///
/// Success responses carry `{"success": true, "data": ...}` (or just
/// `{"success": true}` for deletes); errors carry
/// `{"success": false, "error": "..."}` and are produced by `ApiError`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// A bare `{"success": true}` response, used by deletes
    pub fn ok_empty() -> Self {
        Self { success: true, data: None, error: None }
    }
}

/// Create/update payload for a menu item (POST and PUT share it)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MenuItemInput {
    pub name: String,
    /// Either `description` or the legacy `ingredients` key is accepted;
    /// both feed the same stored column.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub price: Money,
    pub category: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub gluten: bool,
    #[serde(default)]
    pub seafood: bool,
    #[serde(default)]
    pub dairy: bool,
    #[serde(default)]
    pub vegan: bool,
}

impl MenuItemInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation("category must not be empty".to_string()));
        }
        if self.price.0.is_sign_negative() {
            return Err(ApiError::Validation("price must not be negative".to_string()));
        }
        if self.stock < 0 {
            return Err(ApiError::Validation("stock must not be negative".to_string()));
        }
        Ok(())
    }
}

/// Payload for the inline stock PATCH
#[derive(Serialize, Deserialize, Debug)]
pub struct StockUpdate {
    pub stock: i32,
}

/// One requested order line
///
/// Only the menu item id and the quantity matter; `name` and `price` are
/// accepted for compatibility with older clients but ignored, because the
/// server snapshots both from the stored menu row.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderLineInput {
    pub id: i32,
    pub quantity: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
}

/// Create payload for an order
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateOrderDto {
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub items: Vec<OrderLineInput>,
    /// Client-computed total; ignored, the server recomputes from stored prices
    #[serde(default)]
    pub total: Option<Money>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateOrderDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.customer_name.trim().is_empty() {
            return Err(ApiError::Validation("customer_name must not be empty".to_string()));
        }
        if self.items.is_empty() {
            return Err(ApiError::Validation("an order needs at least one line item".to_string()));
        }
        for line in &self.items {
            if line.quantity < 1 {
                return Err(ApiError::Validation(format!(
                    "quantity for menu item {} must be at least 1",
                    line.id
                )));
            }
        }
        Ok(())
    }
}

/// Payload for the status PATCH endpoints (orders and reservations)
#[derive(Serialize, Deserialize, Debug)]
pub struct StatusUpdate {
    pub status: String,
}

/// Create payload for a reservation
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateReservationDto {
    pub customer_name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    #[serde(default)]
    pub table_number: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateReservationDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.customer_name.trim().is_empty() {
            return Err(ApiError::Validation("customer_name must not be empty".to_string()));
        }
        if self.phone.trim().is_empty() {
            return Err(ApiError::Validation("phone must not be empty".to_string()));
        }
        if self.guests < 1 {
            return Err(ApiError::Validation("guests must be at least 1".to_string()));
        }
        if normalize_time(&self.time).is_none() {
            return Err(ApiError::Validation(format!("'{}' is not a valid time", self.time)));
        }
        Ok(())
    }
}

/// Query parameters for listing reservations
#[derive(Deserialize, Debug, Default)]
pub struct ReservationListQuery {
    /// When present, only reservations on this date are returned
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for the availability check
#[derive(Deserialize, Debug)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

/// Response body of the availability check
#[derive(Serialize, Deserialize, Debug)]
pub struct Availability {
    pub date: NaiveDate,
    pub confirmed: i64,
    pub capacity: i64,
    pub available: bool,
}
