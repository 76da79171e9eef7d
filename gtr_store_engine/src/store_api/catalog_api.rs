use std::{cmp::Ordering, fmt::Debug};

use log::*;

use crate::{
    db_types::{Brand, Manufacturer, NewBrand, NewManufacturer, NewProduct, Product},
    store_api::order_objects::{ProductQueryFilter, SortOrder},
    traits::{CatalogError, CatalogManagement},
};

/// `CatalogApi` serves and administers the product catalog: lookups and filtered search for the storefront, and
/// the guarded CRUD operations for the admin screens.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub async fn product(&self, product_id: &str) -> Result<Option<Product>, CatalogError> {
        self.db.fetch_product(product_id).await
    }

    /// Runs the filter against the catalog, then applies the requested in-memory sort. Ties keep their stored
    /// order, since the sorts are stable.
    pub async fn search_products(
        &self,
        filter: &ProductQueryFilter,
        sort: Option<SortOrder>,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.db.search_products(filter).await?;
        trace!("🗃️ Product search ({filter}) matched {} products", products.len());
        match sort {
            Some(SortOrder::PriceAsc) => products.sort_by_key(|p| p.price),
            Some(SortOrder::PriceDesc) => products.sort_by_key(|p| std::cmp::Reverse(p.price)),
            Some(SortOrder::RatingDesc) => {
                products.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
            },
            None => {},
        }
        Ok(products)
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        let product = self.db.insert_product(product).await?;
        info!("🗃️ Product [{}] ({}) added to the catalog", product.id, product.name);
        Ok(product)
    }

    pub async fn update_product(&self, product_id: &str, product: NewProduct) -> Result<Product, CatalogError> {
        let product = self.db.update_product(product_id, product).await?;
        info!("🗃️ Product [{}] updated", product.id);
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError> {
        self.db.delete_product(product_id).await?;
        info!("🗃️ Product [{product_id}] deleted from the catalog");
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        self.db.fetch_categories().await
    }

    pub async fn brand(&self, brand_id: &str) -> Result<Option<Brand>, CatalogError> {
        self.db.fetch_brand(brand_id).await
    }

    pub async fn brands(&self) -> Result<Vec<Brand>, CatalogError> {
        self.db.fetch_brands().await
    }

    pub async fn create_brand(&self, brand: NewBrand) -> Result<Brand, CatalogError> {
        let brand = self.db.insert_brand(brand).await?;
        info!("🗃️ Brand [{}] ({}) added to the catalog", brand.id, brand.name);
        Ok(brand)
    }

    pub async fn update_brand(&self, brand_id: &str, brand: NewBrand) -> Result<Brand, CatalogError> {
        let brand = self.db.update_brand(brand_id, brand).await?;
        info!("🗃️ Brand [{}] updated", brand.id);
        Ok(brand)
    }

    pub async fn delete_brand(&self, brand_id: &str) -> Result<(), CatalogError> {
        self.db.delete_brand(brand_id).await?;
        info!("🗃️ Brand [{brand_id}] deleted from the catalog");
        Ok(())
    }

    pub async fn manufacturer(&self, manufacturer_id: &str) -> Result<Option<Manufacturer>, CatalogError> {
        self.db.fetch_manufacturer(manufacturer_id).await
    }

    pub async fn manufacturers(&self) -> Result<Vec<Manufacturer>, CatalogError> {
        self.db.fetch_manufacturers().await
    }

    pub async fn create_manufacturer(&self, manufacturer: NewManufacturer) -> Result<Manufacturer, CatalogError> {
        let manufacturer = self.db.insert_manufacturer(manufacturer).await?;
        info!("🗃️ Manufacturer [{}] ({}) added to the catalog", manufacturer.id, manufacturer.name);
        Ok(manufacturer)
    }

    pub async fn update_manufacturer(
        &self,
        manufacturer_id: &str,
        manufacturer: NewManufacturer,
    ) -> Result<Manufacturer, CatalogError> {
        let manufacturer = self.db.update_manufacturer(manufacturer_id, manufacturer).await?;
        info!("🗃️ Manufacturer [{}] updated", manufacturer.id);
        Ok(manufacturer)
    }

    pub async fn delete_manufacturer(&self, manufacturer_id: &str) -> Result<(), CatalogError> {
        self.db.delete_manufacturer(manufacturer_id).await?;
        info!("🗃️ Manufacturer [{manufacturer_id}] deleted from the catalog");
        Ok(())
    }

    /// Loads the built-in catalog into an empty store. Safe to call on every startup.
    pub async fn seed_catalog(&self) -> Result<bool, CatalogError> {
        let seeded = self.db.seed_catalog().await?;
        if seeded {
            info!("🗃️ Seed catalog loaded into the empty store");
        } else {
            debug!("🗃️ Store already holds products. Seed skipped");
        }
        Ok(seeded)
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
