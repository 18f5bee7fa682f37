//! Order Model

use super::CartItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order type, selected once per session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Table service
    #[default]
    Local,
    Delivery,
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "Pedido en Local",
            Self::Delivery => "Pedido Delivery",
        }
    }

    /// Estimated preparation/delivery window shown after sending
    pub fn estimated_time(&self) -> &'static str {
        match self {
            Self::Local => "15-20 min",
            Self::Delivery => "30-45 min",
        }
    }
}

/// Payment method chosen on the order form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on receipt
    #[default]
    Efectivo,
    /// Visa, Mastercard
    Tarjeta,
    /// Instant digital payment
    Yape,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Efectivo, Self::Tarjeta, Self::Yape];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Efectivo => "Efectivo",
            Self::Tarjeta => "Tarjeta",
            Self::Yape => "Yape",
        }
    }

    /// Label used in the outgoing message
    pub fn label(&self) -> &'static str {
        match self {
            Self::Efectivo => "💵 Efectivo",
            Self::Tarjeta => "💳 Tarjeta",
            Self::Yape => "📱 Yape",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Efectivo => "Pago en efectivo al recibir",
            Self::Tarjeta => "Visa, Mastercard",
            Self::Yape => "Pago digital instantáneo",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Efectivo => Self::Tarjeta,
            Self::Tarjeta => Self::Yape,
            Self::Yape => Self::Efectivo,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Efectivo => Self::Yape,
            Self::Tarjeta => Self::Efectivo,
            Self::Yape => Self::Tarjeta,
        }
    }
}

/// Order status as recorded in history
///
/// Records are written as `Pending`; nothing in the kiosk advances them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmado",
            Self::Preparing => "Preparando",
            Self::Ready => "Listo",
            Self::Delivered => "Entregado",
        }
    }
}

/// Delivery customer block of the order form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub district: String,
    #[serde(default)]
    pub reference: String,
}

/// Historical snapshot of a sent order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub items: Vec<CartItem>,
    pub order_type: OrderType,
    /// Local orders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    /// Delivery orders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_data: Option<CustomerData>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub order_number: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderRecord {
    /// Sum of quantities across all entries
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
