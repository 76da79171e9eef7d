//! The payment gateway seam.
//!
//! Route handlers talk to [`PaymentGateway`] rather than to the Razorpay client directly, so that endpoint
//! tests can stand in a mock and exercise the payment flow without credentials or a network.

use gtr_common::Paise;
use razorpay_tools::{signature, RazorpayApi, RazorpayApiError, RazorpayConfig, RazorpayOrder};

/// What the payment routes need from a gateway: a public key id for the checkout widget, order creation, and
/// signature verification.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway: Clone {
    /// The public half of the API key pair.
    fn key_id(&self) -> &str;

    /// Creates a gateway order for the given amount, to be settled by the storefront checkout widget.
    async fn create_order(
        &self,
        amount: Paise,
        currency: &str,
        receipt: Option<String>,
    ) -> Result<RazorpayOrder, RazorpayApiError>;

    /// Checks a checkout signature against the gateway order and payment ids it claims to bind.
    fn verify_signature(&self, razorpay_order_id: &str, razorpay_payment_id: &str, signature: &str) -> bool;
}

#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let api = RazorpayApi::new(config)?;
        Ok(Self { api })
    }
}

impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        self.api.key_id()
    }

    async fn create_order(
        &self,
        amount: Paise,
        currency: &str,
        receipt: Option<String>,
    ) -> Result<RazorpayOrder, RazorpayApiError> {
        self.api.create_order(amount, currency, receipt).await
    }

    fn verify_signature(&self, razorpay_order_id: &str, razorpay_payment_id: &str, sig: &str) -> bool {
        signature::verify_payment_signature(self.api.key_secret(), razorpay_order_id, razorpay_payment_id, sig)
    }
}
