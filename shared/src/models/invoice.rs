//! Invoice Model

use super::order_item::OrderItem;
use crate::patch::Patch;
use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub payment_due_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create invoice payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    /// Defaults to one day after creation
    pub payment_due_date: Option<i64>,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub payment_method: Patch<PaymentMethod>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub payment_status: Patch<PaymentStatus>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub payment_due_date: Patch<i64>,
}

/// Invoice with the amount due and the order it bills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub order_id: String,
    pub table_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: i64,
    /// Sum of quantity × unit_price, 2 decimal places
    pub payment_due: f64,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending() {
        let json = r#"{"invoice_id":"i","order_id":"o","payment_method":null,
            "payment_due_date":0,"created_at":0,"updated_at":0}"#;
        let inv: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(inv.payment_status, PaymentStatus::Pending);
        assert_eq!(inv.payment_method, None);
    }

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"CARD\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"PAID\"");
    }
}
