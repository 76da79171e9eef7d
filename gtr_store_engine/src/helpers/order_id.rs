use chrono::Utc;

use crate::db_types::OrderId;

/// Generates a new order id of the form `ORD-{unix millis}-{4 hex chars}`.
///
/// The random suffix keeps ids unique when two orders land in the same millisecond. The ledger's primary key
/// still backstops the (very unlikely) remaining collision.
pub fn new_order_id() -> OrderId {
    let millis = Utc::now().timestamp_millis();
    let suffix = rand::random::<u16>();
    OrderId(format!("ORD-{millis}-{suffix:04X}"))
}
