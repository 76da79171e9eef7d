use thiserror::Error;

use crate::{
    db_types::{Brand, Manufacturer, NewBrand, NewManufacturer, NewProduct, Product},
    store_api::ProductQueryFilter,
};

/// This trait defines the behaviour backends must expose to serve and administer the product catalog.
///
/// This behaviour includes:
/// * Product lookups and filtered search
/// * Brand, manufacturer and product CRUD, with the uniqueness and referential guards the storefront relies on
/// * Loading the built-in seed catalog into an empty store
///
/// Renaming a brand or manufacturer cascades to the products that reference it by name, in the same transaction.
/// Deleting one that products still reference is refused.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Fetches the product with the given id, or `None`.
    async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, CatalogError>;

    /// Returns every product matching the filter. An empty filter returns the whole catalog.
    async fn search_products(&self, filter: &ProductQueryFilter) -> Result<Vec<Product>, CatalogError>;

    /// Inserts a new product with a freshly assigned id. The brand must already exist by name.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError>;

    /// Replaces every client-supplied field of the product. The brand must already exist by name.
    async fn update_product(&self, product_id: &str, product: NewProduct) -> Result<Product, CatalogError>;

    /// Deletes a product. Refused while any order line item references it.
    async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError>;

    /// The sorted set of distinct, non-empty product categories.
    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError>;

    async fn fetch_brand(&self, brand_id: &str) -> Result<Option<Brand>, CatalogError>;

    async fn fetch_brands(&self) -> Result<Vec<Brand>, CatalogError>;

    /// Inserts a new brand with a freshly assigned id. Brand names are unique.
    async fn insert_brand(&self, brand: NewBrand) -> Result<Brand, CatalogError>;

    /// Updates a brand. If the name changes, products referencing the old name are moved to the new one.
    async fn update_brand(&self, brand_id: &str, brand: NewBrand) -> Result<Brand, CatalogError>;

    /// Deletes a brand. Refused while any product references it by name.
    async fn delete_brand(&self, brand_id: &str) -> Result<(), CatalogError>;

    async fn fetch_manufacturer(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, CatalogError>;

    async fn fetch_manufacturers(&self) -> Result<Vec<Manufacturer>, CatalogError>;

    /// Inserts a new manufacturer with a freshly assigned id. Manufacturer names are unique.
    async fn insert_manufacturer(&self, manufacturer: NewManufacturer) -> Result<Manufacturer, CatalogError>;

    /// Updates a manufacturer. If the name changes, products referencing the old name are moved to the new one.
    async fn update_manufacturer(
        &self,
        manufacturer_id: &str,
        manufacturer: NewManufacturer,
    ) -> Result<Manufacturer, CatalogError>;

    /// Deletes a manufacturer. Refused while any product references it by name.
    async fn delete_manufacturer(&self, manufacturer_id: &str) -> Result<(), CatalogError>;

    /// Loads the built-in catalog into an empty store. Returns `true` if the seed ran, and `false` if the store
    /// already held products.
    async fn seed_catalog(&self) -> Result<bool, CatalogError>;
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Could not complete the catalog database operation: {0}")]
    DatabaseError(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Cannot delete product {0} because orders reference it")]
    ProductInUse(String),
    #[error("Brand not found: {0}")]
    BrandNotFound(String),
    #[error("A brand named {0} already exists")]
    BrandAlreadyExists(String),
    #[error("Cannot delete brand {0} because products reference it")]
    BrandInUse(String),
    #[error("Manufacturer not found: {0}")]
    ManufacturerNotFound(String),
    #[error("A manufacturer named {0} already exists")]
    ManufacturerAlreadyExists(String),
    #[error("Cannot delete manufacturer {0} because products reference it")]
    ManufacturerInUse(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::DatabaseError(e.to_string())
    }
}
