use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a status string is not part of its enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus {
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status '{}' (expected one of: {})", self.value, self.expected)
    }
}

impl std::error::Error for InvalidStatus {}

/// Lifecycle status of an order
///
/// The back office offers pending → preparing → ready → delivered, with
/// cancelled reachable from anywhere. No transition graph is enforced; any
/// member of the enum may be set at any time, but nothing outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the order still needs kitchen attention
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(InvalidStatus {
                value: other.to_string(),
                expected: "pending, preparing, ready, delivered, cancelled",
            }),
        }
    }
}

impl FromSql<Text, Sqlite> for OrderStatus {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let status = OrderStatus::from_str(&text)?;
        Ok(status)
    }
}

impl ToSql<Text, Sqlite> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}

/// Lifecycle status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            other => Err(InvalidStatus {
                value: other.to_string(),
                expected: "pending, confirmed, cancelled, completed",
            }),
        }
    }
}

impl FromSql<Text, Sqlite> for ReservationStatus {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let status = ReservationStatus::from_str(&text)?;
        Ok(status)
    }
}

impl ToSql<Text, Sqlite> for ReservationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_round_trip() {
        for raw in ["pending", "preparing", "ready", "delivered", "cancelled"] {
            assert_eq!(OrderStatus::from_str(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        let err = OrderStatus::from_str("shipped").unwrap_err();
        assert_eq!(err.value, "shipped");
    }

    #[test]
    fn test_reservation_status_round_trip() {
        for raw in ["pending", "confirmed", "cancelled", "completed"] {
            assert_eq!(ReservationStatus::from_str(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Preparing).unwrap(), r#""preparing""#);
        let parsed: ReservationStatus = serde_json::from_str(r#""confirmed""#).unwrap();
        assert_eq!(parsed, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_is_active() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Delivered.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }
}
