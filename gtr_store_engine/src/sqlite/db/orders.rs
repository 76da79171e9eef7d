use chrono::Utc;
use gtr_common::Paise;
use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, OrderId, PaymentConfirmation, Product},
    store_api::LineItem,
    traits::OrderFlowError,
};

/// Inserts a new order row. This is not atomic on its own. Embed this call inside a transaction together with
/// the line-item inserts, and pass `&mut *tx` as the connection argument.
///
/// Status columns are left to their schema defaults: `Processing` and `pending`.
pub async fn insert_order(
    order: &NewOrder,
    total_price: Paise,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderFlowError> {
    let order = sqlx::query_as(
        r#"
            INSERT INTO orders (id, created_at, updated_at, total_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(order.order_id.as_str())
    .bind(order.created_at)
    .bind(order.created_at)
    .bind(total_price.value())
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn insert_order_item(
    order_id: &OrderId,
    product_id: &str,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<(), OrderFlowError> {
    sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
        .bind(order_id.as_str())
        .bind(product_id)
        .bind(quantity)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_order_by_id(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Fetches every order, oldest first. Rowid breaks ties between orders created in the same instant.
pub async fn fetch_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY created_at ASC, rowid ASC").fetch_all(conn).await?;
    Ok(orders)
}

#[derive(FromRow)]
struct LineItemRow {
    #[sqlx(flatten)]
    product: Product,
    quantity: i64,
}

/// Fetches the line items of an order, with their product snapshots resolved from the catalog.
pub async fn fetch_order_items(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Vec<LineItem>, sqlx::Error> {
    let rows: Vec<LineItemRow> = sqlx::query_as(
        r#"
            SELECT p.*, oi.quantity
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY p.rowid ASC;
        "#,
    )
    .bind(order_id.as_str())
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(|row| LineItem { product: row.product, quantity: row.quantity }).collect())
}

/// Applies a verified payment to the order in a single conditional update.
///
/// Only an order still in `Processing`/`pending` state is modified; the update sets status `Confirmed`,
/// payment status `paid`, the gateway payment fields, and the shipping details when supplied. Returns `None`
/// when no row matched, which means the order either does not exist or has already been confirmed; the caller
/// distinguishes the two.
pub async fn confirm_payment(
    order_id: &OrderId,
    confirmation: &PaymentConfirmation,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderFlowError> {
    let shipping = confirmation.shipping.as_ref();
    let order: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET
                status = 'Confirmed',
                payment_status = 'paid',
                razorpay_order_id = $2,
                razorpay_payment_id = $3,
                razorpay_signature = $4,
                customer_name = COALESCE($5, customer_name),
                customer_email = COALESCE($6, customer_email),
                customer_phone = COALESCE($7, customer_phone),
                shipping_address = COALESCE($8, shipping_address),
                shipping_city = COALESCE($9, shipping_city),
                shipping_state = COALESCE($10, shipping_state),
                shipping_zip = COALESCE($11, shipping_zip),
                updated_at = $12
            WHERE id = $1 AND status = 'Processing' AND payment_status = 'pending'
            RETURNING *;
        "#,
    )
    .bind(order_id.as_str())
    .bind(&confirmation.razorpay_order_id)
    .bind(&confirmation.razorpay_payment_id)
    .bind(&confirmation.razorpay_signature)
    .bind(shipping.map(|s| s.name.as_str()))
    .bind(shipping.map(|s| s.email.as_str()))
    .bind(shipping.map(|s| s.phone.as_str()))
    .bind(shipping.map(|s| s.address.as_str()))
    .bind(shipping.map(|s| s.city.as_str()))
    .bind(shipping.map(|s| s.state.as_str()))
    .bind(shipping.map(|s| s.zip.as_str()))
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;
    if let Some(order) = &order {
        debug!("📝️ Order [{}] transitioned to {}/{}", order.id, order.status, order.payment_status);
    }
    Ok(order)
}
