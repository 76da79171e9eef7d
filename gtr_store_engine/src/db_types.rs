use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use gtr_common::Paise;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::helpers::new_order_id;

//--------------------------------------     OrderId       ---------------------------------------------------------

/// The public identifier of an order, e.g. `ORD-1718102453120-9F3A`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new<T: Display>(id: T) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------   Status enums    ---------------------------------------------------------

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion from string: {0}")]
pub struct ConversionError(pub String);

/// The lifecycle state of an order. The only transition is `Processing` to `Confirmed`, made when a payment
/// signature has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum OrderStatus {
    Processing,
    Confirmed,
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. Defaulting to Processing");
            Self::Processing
        })
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Confirmed" => Ok(Self::Confirmed),
            _ => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "Processing"),
            Self::Confirmed => write!(f, "Confirmed"),
        }
    }
}

/// Where the money is at. `Failed` is representable in storage but nothing in the engine writes it; a failed
/// signature check leaves the order exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. Defaulting to Pending");
            Self::Pending
        })
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            _ => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

//--------------------------------------      Product      ---------------------------------------------------------

/// A catalog product as stored. Prices are integer paise; the HTTP layer converts to rupee floats at the edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Paise,
    pub brand: String,
    pub manufacturer: Option<String>,
    pub category: String,
    pub image_url: String,
    pub image_hint: String,
    pub rating: f64,
    pub review_count: i64,
    pub discount: Option<i64>,
}

/// The client-supplied fields of a product. The id is assigned by the catalog on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Paise,
    pub brand: String,
    pub manufacturer: Option<String>,
    pub category: String,
    pub image_url: String,
    pub image_hint: String,
    pub rating: f64,
    pub review_count: i64,
    pub discount: Option<i64>,
}

//--------------------------------------       Brand       ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub logo_hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewBrand {
    pub name: String,
    pub logo_url: String,
    pub logo_hint: String,
}

//--------------------------------------   Manufacturer    ---------------------------------------------------------

/// A vehicle manufacturer. `models` is stored as a comma-separated column but always surfaces as a vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub image_base64: Option<String>,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewManufacturer {
    pub name: String,
    pub image_base64: Option<String>,
    pub models: Vec<String>,
}

//--------------------------------------       Order       ---------------------------------------------------------

/// An order row. Payment and shipping columns stay `NULL` until a verified payment fills them in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_price: Paise,
    pub payment_status: PaymentStatus,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_zip: Option<String>,
}

/// The seed of a new order. The total is not part of this struct; it is computed from catalog prices inside the
/// same transaction that persists the order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Creates a new order seed with a freshly generated id, timestamped now.
    pub fn new() -> Self {
        Self { order_id: new_order_id(), created_at: Utc::now() }
    }
}

impl Default for NewOrder {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------     CartLine      ---------------------------------------------------------

/// One requested line of a cart: a product reference and how many of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

impl CartLine {
    pub fn new<S: Into<String>>(product_id: S, quantity: i64) -> Self {
        Self { product_id: product_id.into(), quantity }
    }
}

//-------------------------------------- Payment confirmation ------------------------------------------------------

/// Customer and shipping details captured at payment time. All fields required; the whole block is optional on
/// the verification request instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Everything a verified payment contributes to an order row.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub shipping: Option<ShippingDetails>,
}
