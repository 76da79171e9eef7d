use gtr_common::{Paise, INR_CURRENCY_CODE};
use serde::{Deserialize, Serialize};

/// Request body for creating an order at the gateway. Amounts are in minor units (paise for INR).
#[derive(Debug, Clone, Serialize)]
pub struct NewRazorpayOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub payment_capture: u8,
}

impl NewRazorpayOrder {
    /// An auto-capture order in the given currency. `payment_capture: 1` tells the gateway to capture the
    /// payment as soon as it is authorized.
    pub fn auto_capture(amount: Paise, currency: &str, receipt: String) -> Self {
        Self { amount: amount.value(), currency: currency.to_string(), receipt, payment_capture: 1 }
    }
}

/// An order as returned by the gateway's `/orders` endpoint. Fields the store does not use are ignored on
/// deserialization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RazorpayOrder {
    pub id: String,
    #[serde(default = "entity_order")]
    pub entity: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// A payment entity as returned by the gateway's `/payments/{id}` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RazorpayPayment {
    pub id: String,
    #[serde(default = "entity_payment")]
    pub entity: String,
    pub amount: i64,
    #[serde(default = "inr")]
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

fn entity_order() -> String {
    "order".into()
}

fn entity_payment() -> String {
    "payment".into()
}

fn inr() -> String {
    INR_CURRENCY_CODE.into()
}
