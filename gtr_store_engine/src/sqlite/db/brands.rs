use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Brand, NewBrand},
    traits::CatalogError,
};

pub async fn fetch_brand_by_id(id: &str, conn: &mut SqliteConnection) -> Result<Option<Brand>, sqlx::Error> {
    let brand = sqlx::query_as("SELECT * FROM brands WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(brand)
}

pub async fn fetch_brands(conn: &mut SqliteConnection) -> Result<Vec<Brand>, sqlx::Error> {
    let brands = sqlx::query_as("SELECT * FROM brands ORDER BY rowid ASC").fetch_all(conn).await?;
    Ok(brands)
}

/// Checks that a brand with the given name exists. Products reference brands by name, so this is the
/// referential guard for product writes.
pub async fn brand_name_exists(name: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM brands WHERE name = $1").bind(name).fetch_one(conn).await?;
    Ok(count > 0)
}

/// Inserts a new brand. Brand names are unique; ids are assigned as `brand_{count + 1}`.
pub async fn insert_brand(brand: NewBrand, conn: &mut SqliteConnection) -> Result<Brand, CatalogError> {
    if brand_name_exists(&brand.name, &mut *conn).await? {
        return Err(CatalogError::BrandAlreadyExists(brand.name));
    }
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands").fetch_one(&mut *conn).await?;
    let id = format!("brand_{}", count + 1);
    let brand = sqlx::query_as(
        r#"
            INSERT INTO brands (id, name, logo_url, logo_hint)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(&id)
    .bind(brand.name)
    .bind(brand.logo_url)
    .bind(brand.logo_hint)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Brand [{id}] inserted");
    Ok(brand)
}

/// Updates a brand. If the name changes, every product referencing the old name is moved to the new one; run
/// this inside a transaction so the rename and the cascade land together.
pub async fn update_brand(brand_id: &str, brand: NewBrand, conn: &mut SqliteConnection) -> Result<Brand, CatalogError> {
    let existing = fetch_brand_by_id(brand_id, &mut *conn)
        .await?
        .ok_or_else(|| CatalogError::BrandNotFound(brand_id.to_string()))?;
    let collision: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands WHERE name = $1 AND id != $2")
        .bind(&brand.name)
        .bind(brand_id)
        .fetch_one(&mut *conn)
        .await?;
    if collision > 0 {
        return Err(CatalogError::BrandAlreadyExists(brand.name));
    }
    let updated: Brand = sqlx::query_as(
        r#"
            UPDATE brands SET name = $1, logo_url = $2, logo_hint = $3
            WHERE id = $4
            RETURNING *;
        "#,
    )
    .bind(&brand.name)
    .bind(&brand.logo_url)
    .bind(&brand.logo_hint)
    .bind(brand_id)
    .fetch_one(&mut *conn)
    .await?;
    if existing.name != updated.name {
        let moved = sqlx::query("UPDATE products SET brand = $1 WHERE brand = $2")
            .bind(&updated.name)
            .bind(&existing.name)
            .execute(conn)
            .await?;
        debug!(
            "🗃️ Brand [{brand_id}] renamed from {} to {}. {} products moved along",
            existing.name,
            updated.name,
            moved.rows_affected()
        );
    }
    Ok(updated)
}

/// Deletes a brand. Refused while products still reference it by name.
pub async fn delete_brand(brand_id: &str, conn: &mut SqliteConnection) -> Result<(), CatalogError> {
    let brand = fetch_brand_by_id(brand_id, &mut *conn)
        .await?
        .ok_or_else(|| CatalogError::BrandNotFound(brand_id.to_string()))?;
    let linked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE brand = $1")
        .bind(&brand.name)
        .fetch_one(&mut *conn)
        .await?;
    if linked > 0 {
        return Err(CatalogError::BrandInUse(brand_id.to_string()));
    }
    sqlx::query("DELETE FROM brands WHERE id = $1").bind(brand_id).execute(conn).await?;
    debug!("🗃️ Brand [{brand_id}] deleted");
    Ok(())
}
