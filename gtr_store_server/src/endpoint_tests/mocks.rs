use gtr_common::Paise;
use gtr_store_engine::{
    db_types::{
        Brand,
        CartLine,
        Manufacturer,
        NewBrand,
        NewManufacturer,
        NewOrder,
        NewProduct,
        OrderId,
        PaymentConfirmation,
        Product,
    },
    store_api::{OrderWithItems, ProductQueryFilter},
    traits::{CatalogError, CatalogManagement, OrderFlowError, ShopOrderManagement},
};
use mockall::mock;
use razorpay_tools::{RazorpayApiError, RazorpayOrder};

use crate::integrations::PaymentGateway;

mock! {
    pub ShopDb {}
    impl Clone for ShopDb {
        fn clone(&self) -> Self;
    }
    impl CatalogManagement for ShopDb {
        async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, CatalogError>;
        async fn search_products(&self, filter: &ProductQueryFilter) -> Result<Vec<Product>, CatalogError>;
        async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError>;
        async fn update_product(&self, product_id: &str, product: NewProduct) -> Result<Product, CatalogError>;
        async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError>;
        async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError>;
        async fn fetch_brand(&self, brand_id: &str) -> Result<Option<Brand>, CatalogError>;
        async fn fetch_brands(&self) -> Result<Vec<Brand>, CatalogError>;
        async fn insert_brand(&self, brand: NewBrand) -> Result<Brand, CatalogError>;
        async fn update_brand(&self, brand_id: &str, brand: NewBrand) -> Result<Brand, CatalogError>;
        async fn delete_brand(&self, brand_id: &str) -> Result<(), CatalogError>;
        async fn fetch_manufacturer(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, CatalogError>;
        async fn fetch_manufacturers(&self) -> Result<Vec<Manufacturer>, CatalogError>;
        async fn insert_manufacturer(&self, manufacturer: NewManufacturer) -> Result<Manufacturer, CatalogError>;
        async fn update_manufacturer(&self, manufacturer_id: &str, manufacturer: NewManufacturer) -> Result<Manufacturer, CatalogError>;
        async fn delete_manufacturer(&self, manufacturer_id: &str) -> Result<(), CatalogError>;
        async fn seed_catalog(&self) -> Result<bool, CatalogError>;
    }
    impl ShopOrderManagement for ShopDb {
        fn url(&self) -> &str;
        async fn insert_order(&self, order: NewOrder, lines: &[CartLine]) -> Result<OrderWithItems, OrderFlowError>;
        async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<OrderWithItems>, OrderFlowError>;
        async fn fetch_orders(&self) -> Result<Vec<OrderWithItems>, OrderFlowError>;
        async fn confirm_payment(&self, order_id: &OrderId, confirmation: &PaymentConfirmation) -> Result<(OrderWithItems, bool), OrderFlowError>;
        async fn close(&mut self) -> Result<(), OrderFlowError>;
    }
}

mock! {
    pub Gateway {}
    impl Clone for Gateway {
        fn clone(&self) -> Self;
    }
    impl PaymentGateway for Gateway {
        fn key_id(&self) -> &str;
        async fn create_order(&self, amount: Paise, currency: &str, receipt: Option<String>) -> Result<RazorpayOrder, RazorpayApiError>;
        fn verify_signature(&self, razorpay_order_id: &str, razorpay_payment_id: &str, signature: &str) -> bool;
    }
}
