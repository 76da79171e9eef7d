use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewProduct, Product},
    sqlite::db::brands::brand_name_exists,
    store_api::ProductQueryFilter,
    traits::CatalogError,
};

pub async fn fetch_product_by_id(id: &str, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let product = sqlx::query_as("SELECT * FROM products WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(product)
}

/// Fetches products according to the predicates in the `ProductQueryFilter`.
///
/// Substring predicates use `LIKE`, which is case-insensitive for ASCII in SQLite. Results keep their
/// insertion order; the caller applies any requested sort in memory.
pub async fn search_products(
    filter: &ProductQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    let mut builder = QueryBuilder::new(
        r#"
    SELECT * FROM products
    "#,
    );
    if !filter.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(query) = &filter.query {
        let term = format!("%{query}%");
        where_clause.push("(name LIKE ");
        where_clause.push_bind_unseparated(term.clone());
        where_clause.push_unseparated(" OR description LIKE ");
        where_clause.push_bind_unseparated(term.clone());
        where_clause.push_unseparated(" OR brand LIKE ");
        where_clause.push_bind_unseparated(term);
        where_clause.push_unseparated(")");
    }
    if let Some(brand) = &filter.brand {
        where_clause.push("brand LIKE ");
        where_clause.push_bind_unseparated(format!("%{brand}%"));
    }
    if let Some(manufacturer) = &filter.manufacturer {
        where_clause.push("manufacturer LIKE ");
        where_clause.push_bind_unseparated(format!("%{manufacturer}%"));
    }
    if let Some(category) = &filter.category {
        where_clause.push("category LIKE ");
        where_clause.push_bind_unseparated(format!("%{category}%"));
    }
    if let Some(min_price) = filter.min_price {
        where_clause.push("price >= ");
        where_clause.push_bind_unseparated(min_price.value());
    }
    if let Some(max_price) = filter.max_price {
        where_clause.push("price <= ");
        where_clause.push_bind_unseparated(max_price.value());
    }
    builder.push(" ORDER BY rowid ASC");

    trace!("🗃️ Executing query: {}", builder.sql());
    let query = builder.build_query_as::<Product>();
    let products = query.fetch_all(conn).await?;
    trace!("🗃️ Product search matched {} products", products.len());
    Ok(products)
}

/// Inserts a new product. The brand must exist by name; ids are assigned as `prod_{count + 1}`.
pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, CatalogError> {
    if !brand_name_exists(&product.brand, &mut *conn).await? {
        return Err(CatalogError::BrandNotFound(product.brand));
    }
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(&mut *conn).await?;
    let id = format!("prod_{}", count + 1);
    let product = sqlx::query_as(
        r#"
            INSERT INTO products (
                id,
                name,
                description,
                price,
                brand,
                manufacturer,
                category,
                image_url,
                image_hint,
                rating,
                review_count,
                discount
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *;
        "#,
    )
    .bind(&id)
    .bind(product.name)
    .bind(product.description)
    .bind(product.price.value())
    .bind(product.brand)
    .bind(product.manufacturer)
    .bind(product.category)
    .bind(product.image_url)
    .bind(product.image_hint)
    .bind(product.rating)
    .bind(product.review_count)
    .bind(product.discount)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Product [{id}] inserted");
    Ok(product)
}

/// Replaces every client-supplied field of the product. The brand must exist by name.
pub async fn update_product(
    product_id: &str,
    product: NewProduct,
    conn: &mut SqliteConnection,
) -> Result<Product, CatalogError> {
    if fetch_product_by_id(product_id, &mut *conn).await?.is_none() {
        return Err(CatalogError::ProductNotFound(product_id.to_string()));
    }
    if !brand_name_exists(&product.brand, &mut *conn).await? {
        return Err(CatalogError::BrandNotFound(product.brand));
    }
    let product = sqlx::query_as(
        r#"
            UPDATE products SET
                name = $1,
                description = $2,
                price = $3,
                brand = $4,
                manufacturer = $5,
                category = $6,
                image_url = $7,
                image_hint = $8,
                rating = $9,
                review_count = $10,
                discount = $11
            WHERE id = $12
            RETURNING *;
        "#,
    )
    .bind(product.name)
    .bind(product.description)
    .bind(product.price.value())
    .bind(product.brand)
    .bind(product.manufacturer)
    .bind(product.category)
    .bind(product.image_url)
    .bind(product.image_hint)
    .bind(product.rating)
    .bind(product.review_count)
    .bind(product.discount)
    .bind(product_id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Product [{product_id}] updated");
    Ok(product)
}

/// Deletes a product. Refused while order line items still reference it.
pub async fn delete_product(product_id: &str, conn: &mut SqliteConnection) -> Result<(), CatalogError> {
    if fetch_product_by_id(product_id, &mut *conn).await?.is_none() {
        return Err(CatalogError::ProductNotFound(product_id.to_string()));
    }
    let ordered: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE product_id = $1")
        .bind(product_id)
        .fetch_one(&mut *conn)
        .await?;
    if ordered > 0 {
        return Err(CatalogError::ProductInUse(product_id.to_string()));
    }
    sqlx::query("DELETE FROM products WHERE id = $1").bind(product_id).execute(conn).await?;
    debug!("🗃️ Product [{product_id}] deleted");
    Ok(())
}

/// The sorted set of distinct, non-empty categories across the catalog.
pub async fn fetch_categories(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    let categories: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT category FROM products WHERE category IS NOT NULL AND category != '' ORDER BY category ASC",
    )
    .fetch_all(conn)
    .await?;
    Ok(categories)
}
