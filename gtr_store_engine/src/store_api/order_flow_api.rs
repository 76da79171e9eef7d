use std::{collections::HashSet, fmt::Debug};

use log::*;

use crate::{
    db_types::{CartLine, NewOrder, OrderId, PaymentConfirmation},
    helpers::canonical_product_id,
    store_api::order_objects::OrderWithItems,
    traits::{OrderFlowError, ShopOrderManagement},
};

/// `OrderFlowApi` is the primary API for turning carts into priced orders and recording verified payments
/// against them.
///
/// It owns the rules that sit above storage: cart lines must carry positive quantities, a product may appear at
/// most once per order, and legacy product slugs are aliased to their canonical catalog ids before the ledger
/// ever sees them. Everything transactional (resolution, pricing, persistence) is delegated to the backend.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: ShopOrderManagement
{
    /// Assembles and persists a new order from the given cart lines.
    ///
    /// Every line is validated (positive quantity, no product twice), legacy slugs are remapped, and the backend
    /// then resolves, prices and stores the whole order atomically. If any product id is unknown, the error
    /// carries the id exactly as the client sent it, and nothing is persisted.
    pub async fn place_order(&self, lines: &[CartLine]) -> Result<OrderWithItems, OrderFlowError> {
        let mut seen = HashSet::with_capacity(lines.len());
        let mut canonical_lines = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity < 1 {
                return Err(OrderFlowError::InvalidQuantity {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                });
            }
            let canonical = canonical_product_id(&line.product_id);
            if !seen.insert(canonical.to_string()) {
                return Err(OrderFlowError::DuplicateCartLine(canonical.to_string()));
            }
            canonical_lines.push(CartLine::new(canonical, line.quantity));
        }
        let order = NewOrder::new();
        trace!("🛒️📦️ Assembling order [{}] from {} cart lines", order.order_id, lines.len());
        let order = self.db.insert_order(order, &canonical_lines).await.map_err(|e| match e {
            OrderFlowError::UnknownProduct(canonical) => {
                let requested = lines
                    .iter()
                    .find(|l| canonical_product_id(&l.product_id) == canonical)
                    .map(|l| l.product_id.clone())
                    .unwrap_or(canonical);
                OrderFlowError::UnknownProduct(requested)
            },
            other => other,
        })?;
        info!(
            "🛒️📦️ Order [{}] created with {} line items, totalling {}",
            order.order.id,
            order.items.len(),
            order.order.total_price
        );
        Ok(order)
    }

    /// Fetches a single order with its line items.
    pub async fn order(&self, order_id: &OrderId) -> Result<Option<OrderWithItems>, OrderFlowError> {
        self.db.fetch_order(order_id).await
    }

    /// Fetches every order in the ledger, oldest first.
    pub async fn orders(&self) -> Result<Vec<OrderWithItems>, OrderFlowError> {
        self.db.fetch_orders().await
    }

    /// Records a verified payment against the order.
    ///
    /// The caller is responsible for signature verification; this method only performs the ledger transition.
    /// Confirming an order that is already confirmed returns the stored record unchanged, so retried webhooks
    /// and double-submitted verification forms are harmless.
    pub async fn confirm_payment(
        &self,
        order_id: &OrderId,
        confirmation: PaymentConfirmation,
    ) -> Result<OrderWithItems, OrderFlowError> {
        let (order, transitioned) = self.db.confirm_payment(order_id, &confirmation).await?;
        if transitioned {
            info!(
                "🛒️✅️ Order [{order_id}] confirmed as paid against gateway payment [{}]",
                confirmation.razorpay_payment_id
            );
        } else {
            info!("🛒️✅️ Order [{order_id}] was already confirmed. Recording this verification as a no-op");
        }
        Ok(order)
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
