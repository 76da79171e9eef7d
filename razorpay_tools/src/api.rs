use std::{sync::Arc, time::Duration};

use chrono::Utc;
use gtr_common::Paise;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::RazorpayConfig,
    data_objects::{NewRazorpayOrder, RazorpayOrder, RazorpayPayment},
    RazorpayApiError,
};

/// Outbound REST requests must not hang a worker indefinitely when the gateway stalls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct RazorpayApi {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayApi {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// The public half of the API key pair. Checkout clients need it to open the payment widget.
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    pub fn key_secret(&self) -> &str {
        self.config.key_secret.reveal()
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, RazorpayApiError> {
        if !self.config.has_credentials() {
            return Err(RazorpayApiError::MissingCredentials);
        }
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self
            .client
            .request(method, url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.reveal()));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| RazorpayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
            Err(RazorpayApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    /// Creates an auto-capture order at the gateway. `amount` is the value the customer will be charged,
    /// in minor units. The gateway refuses amounts under ₹1, so non-positive values are rejected before the
    /// request goes out.
    pub async fn create_order(
        &self,
        amount: Paise,
        currency: &str,
        receipt: Option<String>,
    ) -> Result<RazorpayOrder, RazorpayApiError> {
        if amount.value() <= 0 {
            return Err(RazorpayApiError::InvalidCurrencyAmount(format!("{amount} is not a payable amount")));
        }
        let receipt = receipt.unwrap_or_else(new_receipt_id);
        let body = NewRazorpayOrder::auto_capture(amount, currency, receipt);
        debug!("💳️ Creating gateway order for {amount}");
        let order = self.rest_query::<RazorpayOrder, _>(Method::POST, "/orders", Some(body)).await?;
        info!("💳️ Created gateway order {} for {amount}", order.id);
        Ok(order)
    }

    /// Fetches a payment entity from the gateway.
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<RazorpayPayment, RazorpayApiError> {
        let path = format!("/payments/{payment_id}");
        debug!("💳️ Fetching payment {payment_id}");
        let payment = self.rest_query::<RazorpayPayment, ()>(Method::GET, &path, None).await?;
        info!("💳️ Fetched payment {payment_id} with status {}", payment.status);
        Ok(payment)
    }
}

fn new_receipt_id() -> String {
    format!("rcpt_{}_{:04x}", Utc::now().timestamp_millis(), rand::random::<u16>())
}
