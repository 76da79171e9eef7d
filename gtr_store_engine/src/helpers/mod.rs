mod order_id;
mod product_id_map;

pub use order_id::new_order_id;
pub use product_id_map::canonical_product_id;
