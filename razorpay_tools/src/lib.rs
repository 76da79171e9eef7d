mod api;
mod config;
mod error;
pub mod signature;

mod data_objects;

pub use api::RazorpayApi;
pub use config::{RazorpayConfig, DEFAULT_RAZORPAY_API_URL};
pub use data_objects::{NewRazorpayOrder, RazorpayOrder, RazorpayPayment};
pub use error::RazorpayApiError;
