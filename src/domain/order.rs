use crate::error::{PosError, Result};
use chrono::{Local, NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wall-clock format used for order timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local creation time of an order, truncated to whole seconds.
///
/// Serialized as `YYYY-MM-DD HH:MM:SS` so the persisted document stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(Local::now().naive_local().trunc_subsecs(0))
    }

    pub fn parse(value: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|e| PosError::ValidationError(format!("Invalid timestamp {value:?}: {e}")))
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Orders are only ever recorded once the buyer has paid.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Paid ✔️")]
    Paid,
}

/// One line of an order (name, quantity, price...).
///
/// The shape is owned by the till front-end; the store only requires a JSON object.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(transparent)]
pub struct LineItem(pub serde_json::Value);

impl LineItem {
    pub fn is_structured(&self) -> bool {
        self.0.is_object()
    }
}

impl From<serde_json::Value> for LineItem {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// An order submission as received from the till, before a number is assigned.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct NewOrder {
    pub items: Vec<LineItem>,
    pub total: Decimal,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: String,
}

impl NewOrder {
    pub fn new(items: Vec<LineItem>, total: Decimal, payment_method: impl Into<String>) -> Self {
        Self {
            items,
            total,
            payment_method: payment_method.into(),
        }
    }

    /// Rejects submissions that must never reach the store.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(PosError::ValidationError(
                "Order must contain at least one item".to_string(),
            ));
        }
        if let Some(position) = self.items.iter().position(|item| !item.is_structured()) {
            return Err(PosError::ValidationError(format!(
                "Item {position} is not a structured value"
            )));
        }
        if self.total < Decimal::ZERO {
            return Err(PosError::ValidationError(
                "Order total must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A recorded, paid sale.
///
/// `total` is written as a JSON number for the till front-end; loading also
/// accepts the quoted form.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub order_number: u64,
    pub items: Vec<LineItem>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: String,
    pub status: OrderStatus,
    pub timestamp: Timestamp,
}

impl Order {
    pub fn paid(order_number: u64, new_order: NewOrder, timestamp: Timestamp) -> Self {
        Self {
            order_number,
            items: new_order.items,
            total: new_order.total,
            payment_method: new_order.payment_method,
            status: OrderStatus::Paid,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn burger() -> LineItem {
        json!({"name": "Veg Burger", "quantity": 2, "price": 80}).into()
    }

    #[test]
    fn test_new_order_validation() {
        assert!(NewOrder::new(vec![burger()], dec!(160.00), "UPI").validate().is_ok());
        assert!(NewOrder::new(vec![burger()], dec!(0), "").validate().is_ok());
        assert!(matches!(
            NewOrder::new(vec![], dec!(10.0), "Cash").validate(),
            Err(PosError::ValidationError(_))
        ));
        assert!(matches!(
            NewOrder::new(vec![burger()], dec!(-1.0), "Cash").validate(),
            Err(PosError::ValidationError(_))
        ));
        assert!(matches!(
            NewOrder::new(vec![json!("fries").into()], dec!(1.0), "Cash").validate(),
            Err(PosError::ValidationError(_))
        ));
    }

    #[test]
    fn test_new_order_payment_method_defaults_to_empty() {
        let new_order: NewOrder =
            serde_json::from_str(r#"{"items": [{"name": "Tea"}], "total": 20}"#).unwrap();
        assert_eq!(new_order.payment_method, "");
        assert_eq!(new_order.total, dec!(20));
    }

    #[test]
    fn test_order_serialization_keys() {
        let timestamp = Timestamp::parse("2025-01-31 18:05:09").unwrap();
        let order = Order::paid(
            1001,
            NewOrder::new(vec![burger()], dec!(160.00), "UPI"),
            timestamp,
        );

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["order_number"], 1001);
        assert_eq!(value["paymentMethod"], "UPI");
        assert_eq!(value["status"], "Paid ✔️");
        assert_eq!(value["timestamp"], "2025-01-31 18:05:09");
        assert_eq!(value["items"][0]["name"], "Veg Burger");
        assert!(value["total"].is_number());
        assert_eq!(value["total"].as_f64(), Some(160.0));
    }

    #[test]
    fn test_order_total_round_trips_as_number() {
        let order = Order::paid(
            1001,
            NewOrder::new(vec![burger()], dec!(250.50), "UPI"),
            Timestamp::now(),
        );

        let raw = serde_json::to_string(&order).unwrap();
        assert!(raw.contains("\"total\":250.5"));
        let reloaded: Order = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded.total, dec!(250.50));
        assert_eq!(reloaded, order);
    }

    #[test]
    fn test_order_accepts_quoted_total() {
        let raw = r#"{
            "order_number": 1001,
            "items": [{"name": "Tea"}],
            "total": "250.00",
            "paymentMethod": "UPI",
            "status": "Paid ✔️",
            "timestamp": "2025-01-31 18:05:09"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.total, dec!(250.00));
    }

    #[test]
    fn test_order_accepts_numeric_total() {
        let raw = r#"{
            "order_number": 1001,
            "items": [{"name": "Tea", "quantity": 1, "price": 20}],
            "total": 20,
            "paymentMethod": "Cash",
            "status": "Paid ✔️",
            "timestamp": "2025-01-31 18:05:09"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.total, dec!(20));
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn test_timestamp_is_whole_seconds() {
        let now = Timestamp::now();
        assert_eq!(now.value().nanosecond(), 0);
        assert_eq!(Timestamp::parse(&now.to_string()).unwrap(), now);
    }

    #[test]
    fn test_timestamp_rejects_other_formats() {
        assert!(Timestamp::parse("31/01/2025 18:05").is_err());
    }
}
