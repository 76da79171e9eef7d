//! `SqliteDatabase` is a concrete implementation of a GTR Motors store backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
use std::fmt::Debug;

use gtr_common::Paise;
use log::*;
use sqlx::SqlitePool;

use super::db::{brands, db_url, manufacturers, new_pool, orders, products, seed};
use crate::{
    db_types::{
        Brand,
        CartLine,
        Manufacturer,
        NewBrand,
        NewManufacturer,
        NewOrder,
        NewProduct,
        Order,
        OrderId,
        PaymentConfirmation,
        Product,
    },
    store_api::{LineItem, OrderWithItems, ProductQueryFilter},
    traits::{CatalogError, CatalogManagement, OrderFlowError, ShopOrderManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product_by_id(product_id, &mut conn).await?;
        Ok(product)
    }

    async fn search_products(&self, filter: &ProductQueryFilter) -> Result<Vec<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::search_products(filter, &mut conn).await?;
        Ok(products)
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let product = products::insert_product(product, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn update_product(&self, product_id: &str, product: NewProduct) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let product = products::update_product(product_id, product, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await?;
        products::delete_product(product_id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let categories = products::fetch_categories(&mut conn).await?;
        Ok(categories)
    }

    async fn fetch_brand(&self, brand_id: &str) -> Result<Option<Brand>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let brand = brands::fetch_brand_by_id(brand_id, &mut conn).await?;
        Ok(brand)
    }

    async fn fetch_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let brands = brands::fetch_brands(&mut conn).await?;
        Ok(brands)
    }

    async fn insert_brand(&self, brand: NewBrand) -> Result<Brand, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let brand = brands::insert_brand(brand, &mut tx).await?;
        tx.commit().await?;
        Ok(brand)
    }

    async fn update_brand(&self, brand_id: &str, brand: NewBrand) -> Result<Brand, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let brand = brands::update_brand(brand_id, brand, &mut tx).await?;
        tx.commit().await?;
        Ok(brand)
    }

    async fn delete_brand(&self, brand_id: &str) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await?;
        brands::delete_brand(brand_id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn fetch_manufacturer(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let manufacturer = manufacturers::fetch_manufacturer_by_id(manufacturer_id, &mut conn).await?;
        Ok(manufacturer)
    }

    async fn fetch_manufacturers(&self) -> Result<Vec<Manufacturer>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let manufacturers = manufacturers::fetch_manufacturers(&mut conn).await?;
        Ok(manufacturers)
    }

    async fn insert_manufacturer(&self, manufacturer: NewManufacturer) -> Result<Manufacturer, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let manufacturer = manufacturers::insert_manufacturer(manufacturer, &mut tx).await?;
        tx.commit().await?;
        Ok(manufacturer)
    }

    async fn update_manufacturer(
        &self,
        manufacturer_id: &str,
        manufacturer: NewManufacturer,
    ) -> Result<Manufacturer, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let manufacturer = manufacturers::update_manufacturer(manufacturer_id, manufacturer, &mut tx).await?;
        tx.commit().await?;
        Ok(manufacturer)
    }

    async fn delete_manufacturer(&self, manufacturer_id: &str) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await?;
        manufacturers::delete_manufacturer(manufacturer_id, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn seed_catalog(&self) -> Result<bool, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let seeded = seed::seed_initial_catalog(&mut tx).await?;
        tx.commit().await?;
        Ok(seeded)
    }
}

impl ShopOrderManagement for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder, lines: &[CartLine]) -> Result<OrderWithItems, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = products::fetch_product_by_id(&line.product_id, &mut tx)
                .await?
                .ok_or_else(|| OrderFlowError::UnknownProduct(line.product_id.clone()))?;
            items.push(LineItem { product, quantity: line.quantity });
        }
        let total = items.iter().map(|item| item.product.price * item.quantity).sum::<Paise>();
        let order = orders::insert_order(&order, total, &mut tx).await?;
        for item in &items {
            orders::insert_order_item(&order.id, &item.product.id, item.quantity, &mut tx).await?;
        }
        tx.commit().await?;
        debug!("🗃️ Order [{}] saved with {} line items. Total: {total}", order.id, items.len());
        Ok(OrderWithItems::new(order, items))
    }

    async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<OrderWithItems>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let order = match orders::fetch_order_by_id(order_id, &mut conn).await? {
            Some(order) => order,
            None => return Ok(None),
        };
        let items = orders::fetch_order_items(order_id, &mut conn).await?;
        Ok(Some(OrderWithItems::new(order, items)))
    }

    async fn fetch_orders(&self) -> Result<Vec<OrderWithItems>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders(&mut conn).await?;
        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = orders::fetch_order_items(&order.id, &mut conn).await?;
            result.push(OrderWithItems::new(order, items));
        }
        Ok(result)
    }

    async fn confirm_payment(
        &self,
        order_id: &OrderId,
        confirmation: &PaymentConfirmation,
    ) -> Result<(OrderWithItems, bool), OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let (order, transitioned) = match orders::confirm_payment(order_id, confirmation, &mut tx).await? {
            Some(order) => (order, true),
            None => {
                let order = orders::fetch_order_by_id(order_id, &mut tx)
                    .await?
                    .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))?;
                (order, false)
            },
        };
        let items = orders::fetch_order_items(order_id, &mut tx).await?;
        tx.commit().await?;
        Ok((OrderWithItems::new(order, items), transitioned))
    }

    async fn close(&mut self) -> Result<(), OrderFlowError> {
        self.pool.close().await;
        Ok(())
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the database schema up to date. Already-applied migrations are skipped.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        debug!("📝️ Database migrations are up to date");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
