use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use gtr_store_engine::traits::{CatalogError, OrderFlowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("Invalid payment signature")]
    InvalidPaymentSignature,
    #[error("Failed to create Razorpay order: {0}")]
    PaymentGatewayError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPaymentSignature => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentGatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

/// The general mapping from catalog errors to HTTP errors: missing records are 404s, violated uniqueness and
/// referential guards are 400s. The product create and update handlers override the `BrandNotFound` case,
/// because there a missing brand is a fault in the request body, not in the path.
impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match &e {
            CatalogError::DatabaseError(msg) => Self::BackendError(msg.clone()),
            CatalogError::ProductNotFound(_) | CatalogError::BrandNotFound(_) | CatalogError::ManufacturerNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            _ => Self::ValidationError(e.to_string()),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::DatabaseError(msg) => Self::BackendError(msg),
            OrderFlowError::OrderNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderFlowError::UnknownProduct(_)
            | OrderFlowError::InvalidQuantity { .. }
            | OrderFlowError::DuplicateCartLine(_) => Self::ValidationError(e.to_string()),
            OrderFlowError::CatalogError(inner) => Self::from(inner),
        }
    }
}
