use thiserror::Error;

use crate::{
    db_types::{CartLine, NewOrder, OrderId, PaymentConfirmation},
    store_api::OrderWithItems,
    traits::{CatalogError, CatalogManagement},
};

/// This trait defines the behaviour backends must expose to run the order ledger.
///
/// This behaviour includes:
/// * Assembling a new order from cart lines, pricing it from the catalog, and persisting it atomically
/// * Fetching orders together with their line items
/// * The one and only mutation an existing order supports: the guarded transition to `Confirmed`/`paid`
///
/// [`CatalogManagement`] is a supertrait because order assembly resolves and prices products inside the same
/// transaction that writes the order.
#[allow(async_fn_in_trait)]
pub trait ShopOrderManagement: Clone + CatalogManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Takes a new order seed and its cart lines, and in a single atomic transaction:
    /// * resolves every `product_id` against the catalog, rejecting the whole order on the first unknown id,
    /// * computes the total from the stored catalog prices and quantities,
    /// * stores the order row with status `Processing` and payment status `pending`,
    /// * stores one line item row per cart line.
    ///
    /// Nothing is persisted if any step fails. Returns the assembled order with its priced line items.
    async fn insert_order(&self, order: NewOrder, lines: &[CartLine]) -> Result<OrderWithItems, OrderFlowError>;

    /// Fetches the order with the given id and its line items, or `None`.
    async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<OrderWithItems>, OrderFlowError>;

    /// Fetches every order with its line items, oldest first.
    async fn fetch_orders(&self) -> Result<Vec<OrderWithItems>, OrderFlowError>;

    /// Records a verified payment against the order, in a single conditional update:
    /// * only an order in `Processing`/`pending` state is modified,
    /// * the transition sets status `Confirmed`, payment status `paid`, stores the gateway order, payment and
    ///   signature fields, and the shipping details when supplied,
    /// * an order already past that state is left untouched.
    ///
    /// This call is idempotent.
    /// Returns the stored order and `true` if this call performed the transition, or `false` if the order had
    /// already been confirmed.
    async fn confirm_payment(
        &self,
        order_id: &OrderId,
        confirmation: &PaymentConfirmation,
    ) -> Result<(OrderWithItems, bool), OrderFlowError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), OrderFlowError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Could not complete the order database operation: {0}")]
    DatabaseError(String),
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Invalid quantity ({quantity}) for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: i64 },
    #[error("Product {0} appears more than once in the cart")]
    DuplicateCartLine(String),
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("{0}")]
    CatalogError(#[from] CatalogError),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}
