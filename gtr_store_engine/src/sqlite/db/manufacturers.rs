use log::debug;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{Manufacturer, NewManufacturer},
    traits::CatalogError,
};

/// The raw manufacturers row. `models` is a comma-separated column; [`Manufacturer`] carries it as a vector.
#[derive(Debug, Clone, FromRow)]
struct ManufacturerRow {
    id: String,
    name: String,
    image_base64: Option<String>,
    models: Option<String>,
}

impl From<ManufacturerRow> for Manufacturer {
    fn from(row: ManufacturerRow) -> Self {
        let models = row
            .models
            .map(|models| models.split(',').map(String::from).collect::<Vec<String>>())
            .unwrap_or_default();
        Self { id: row.id, name: row.name, image_base64: row.image_base64, models }
    }
}

fn models_column(models: &[String]) -> Option<String> {
    if models.is_empty() {
        None
    } else {
        Some(models.join(","))
    }
}

pub async fn fetch_manufacturer_by_id(
    id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Manufacturer>, sqlx::Error> {
    let row: Option<ManufacturerRow> =
        sqlx::query_as("SELECT * FROM manufacturers WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(row.map(Manufacturer::from))
}

pub async fn fetch_manufacturers(conn: &mut SqliteConnection) -> Result<Vec<Manufacturer>, sqlx::Error> {
    let rows: Vec<ManufacturerRow> =
        sqlx::query_as("SELECT * FROM manufacturers ORDER BY rowid ASC").fetch_all(conn).await?;
    Ok(rows.into_iter().map(Manufacturer::from).collect())
}

/// Inserts a new manufacturer. Names are unique; ids are assigned as `manu_{count + 1}`.
pub async fn insert_manufacturer(
    manufacturer: NewManufacturer,
    conn: &mut SqliteConnection,
) -> Result<Manufacturer, CatalogError> {
    let collision: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers WHERE name = $1")
        .bind(&manufacturer.name)
        .fetch_one(&mut *conn)
        .await?;
    if collision > 0 {
        return Err(CatalogError::ManufacturerAlreadyExists(manufacturer.name));
    }
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers").fetch_one(&mut *conn).await?;
    let id = format!("manu_{}", count + 1);
    let row: ManufacturerRow = sqlx::query_as(
        r#"
            INSERT INTO manufacturers (id, name, image_base64, models)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(&id)
    .bind(manufacturer.name)
    .bind(manufacturer.image_base64)
    .bind(models_column(&manufacturer.models))
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Manufacturer [{id}] inserted");
    Ok(row.into())
}

/// Updates a manufacturer. If the name changes, products referencing the old name move to the new one; run
/// this inside a transaction so the rename and the cascade land together.
pub async fn update_manufacturer(
    manufacturer_id: &str,
    manufacturer: NewManufacturer,
    conn: &mut SqliteConnection,
) -> Result<Manufacturer, CatalogError> {
    let existing = fetch_manufacturer_by_id(manufacturer_id, &mut *conn)
        .await?
        .ok_or_else(|| CatalogError::ManufacturerNotFound(manufacturer_id.to_string()))?;
    let collision: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers WHERE name = $1 AND id != $2")
        .bind(&manufacturer.name)
        .bind(manufacturer_id)
        .fetch_one(&mut *conn)
        .await?;
    if collision > 0 {
        return Err(CatalogError::ManufacturerAlreadyExists(manufacturer.name));
    }
    let row: ManufacturerRow = sqlx::query_as(
        r#"
            UPDATE manufacturers SET name = $1, image_base64 = $2, models = $3
            WHERE id = $4
            RETURNING *;
        "#,
    )
    .bind(&manufacturer.name)
    .bind(&manufacturer.image_base64)
    .bind(models_column(&manufacturer.models))
    .bind(manufacturer_id)
    .fetch_one(&mut *conn)
    .await?;
    let updated = Manufacturer::from(row);
    if existing.name != updated.name {
        let moved = sqlx::query("UPDATE products SET manufacturer = $1 WHERE manufacturer = $2")
            .bind(&updated.name)
            .bind(&existing.name)
            .execute(conn)
            .await?;
        debug!(
            "🗃️ Manufacturer [{manufacturer_id}] renamed from {} to {}. {} products moved along",
            existing.name,
            updated.name,
            moved.rows_affected()
        );
    }
    Ok(updated)
}

/// Deletes a manufacturer. Refused while products still reference it by name.
pub async fn delete_manufacturer(manufacturer_id: &str, conn: &mut SqliteConnection) -> Result<(), CatalogError> {
    let manufacturer = fetch_manufacturer_by_id(manufacturer_id, &mut *conn)
        .await?
        .ok_or_else(|| CatalogError::ManufacturerNotFound(manufacturer_id.to_string()))?;
    let linked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE manufacturer = $1")
        .bind(&manufacturer.name)
        .fetch_one(&mut *conn)
        .await?;
    if linked > 0 {
        return Err(CatalogError::ManufacturerInUse(manufacturer_id.to_string()));
    }
    sqlx::query("DELETE FROM manufacturers WHERE id = $1").bind(manufacturer_id).execute(conn).await?;
    debug!("🗃️ Manufacturer [{manufacturer_id}] deleted");
    Ok(())
}
