use chrono::NaiveDate;
use comanda::dto::{
    ApiResponse, Availability, CreateOrderDto, CreateReservationDto, MenuItemInput, StatusUpdate,
    StockUpdate,
};
use comanda::models::{MenuItem, Order, Reservation};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for CLI client operations
#[derive(Debug)]
pub enum ClientError {
    /// Server returned an error status with a message body
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    Request(reqwest::Error),
    /// Server answered 200 but with `success: false` or no data
    Envelope(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status.as_u16(), message)
            }
            ClientError::Request(err) => write!(f, "{}", err),
            ClientError::Envelope(message) => write!(f, "Server error: {}", message),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(err) => Some(err),
            ClientError::Server { .. } | ClientError::Envelope(_) => None,
        }
    }
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// Unwraps the `{"success": ..., "data": ...}` envelope around a response body
async fn unwrap_data<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let envelope: ApiResponse<T> = response.json().await.map_err(ClientError::Request)?;
    if !envelope.success {
        return Err(ClientError::Envelope(
            envelope.error.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::Envelope("response had no data".to_string()))
}

/// Consumes a response that carries no data, only the success flag
async fn unwrap_empty(response: reqwest::Response) -> Result<(), ClientError> {
    let envelope: ApiResponse<serde_json::Value> =
        response.json().await.map_err(ClientError::Request)?;
    if !envelope.success {
        return Err(ClientError::Envelope(
            envelope.error.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }
    Ok(())
}

/// HTTP client wrapper for communicating with the Comanda server
pub struct ComandaClient {
    /// The base URL of the server (e.g. "http://localhost:3001")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl ComandaClient {
    /// Creates a new ComandaClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the Comanda server
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    // ── Menu endpoints ───────────────────────────────────────────────

    /// Lists all menu items
    pub async fn list_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
        let url = format!("{}/api/menu", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Creates a new menu item
    pub async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem, ClientError> {
        let url = format!("{}/api/menu", self.base_url);
        let response = self.client.post(&url).json(input).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Replaces a menu item
    pub async fn update_menu_item(
        &self,
        id: i32,
        input: &MenuItemInput,
    ) -> Result<MenuItem, ClientError> {
        let url = format!("{}/api/menu/{}", self.base_url, id);
        let response = self.client.put(&url).json(input).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Deletes a menu item
    pub async fn delete_menu_item(&self, id: i32) -> Result<(), ClientError> {
        let url = format!("{}/api/menu/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_empty(response).await
    }

    /// Sets a menu item's stock level
    pub async fn set_stock(&self, id: i32, stock: i32) -> Result<MenuItem, ClientError> {
        let url = format!("{}/api/menu/{}/stock", self.base_url, id);
        let dto = StockUpdate { stock };
        let response = self.client.patch(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    // ── Order endpoints ──────────────────────────────────────────────

    /// Lists all orders, newest first
    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let url = format!("{}/api/orders", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Creates a new order
    pub async fn create_order(&self, dto: &CreateOrderDto) -> Result<Order, ClientError> {
        let url = format!("{}/api/orders", self.base_url);
        let response = self.client.post(&url).json(dto).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Moves an order to a new status
    pub async fn update_order_status(&self, id: i32, status: &str) -> Result<Order, ClientError> {
        let url = format!("{}/api/orders/{}/status", self.base_url, id);
        let dto = StatusUpdate { status: status.to_string() };
        let response = self.client.patch(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    // ── Reservation endpoints ────────────────────────────────────────

    /// Lists reservations, optionally filtered to a single date
    pub async fn list_reservations(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>, ClientError> {
        let url = format!("{}/api/reservations", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(date) = date {
            request = request.query(&[("date", date.to_string())]);
        }
        let response = request.send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Creates a new reservation
    pub async fn create_reservation(
        &self,
        dto: &CreateReservationDto,
    ) -> Result<Reservation, ClientError> {
        let url = format!("{}/api/reservations", self.base_url);
        let response = self.client.post(&url).json(dto).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Moves a reservation to a new status
    pub async fn update_reservation_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Reservation, ClientError> {
        let url = format!("{}/api/reservations/{}/status", self.base_url, id);
        let dto = StatusUpdate { status: status.to_string() };
        let response = self.client.patch(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_data(response).await
    }

    /// Deletes a reservation
    pub async fn delete_reservation(&self, id: i32) -> Result<(), ClientError> {
        let url = format!("{}/api/reservations/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await.map_err(ClientError::Request)?.check().await?;
        unwrap_empty(response).await
    }

    /// Checks remaining reservation capacity for a date
    pub async fn availability(&self, date: NaiveDate) -> Result<Availability, ClientError> {
        let url = format!("{}/api/reservations/availability", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("date", date.to_string())])
            .send()
            .await
            .map_err(ClientError::Request)?
            .check()
            .await?;
        unwrap_data(response).await
    }
}
