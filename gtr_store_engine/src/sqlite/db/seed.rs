use gtr_common::Paise;
use log::info;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Brand, Product},
    traits::CatalogError,
};

/// Loads the built-in catalog into the store if, and only if, the products table is empty.
///
/// Seed rows carry fixed ids (`prod_1..prod_8`, `brand_1..brand_4`) so the legacy slug aliases keep pointing at
/// the right products. Returns `true` if the seed ran.
pub async fn seed_initial_catalog(conn: &mut SqliteConnection) -> Result<bool, CatalogError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(&mut *conn).await?;
    if count > 0 {
        return Ok(false);
    }
    for product in initial_products() {
        sqlx::query(
            r#"
                INSERT INTO products (
                    id, name, description, price, brand, manufacturer, category,
                    image_url, image_hint, rating, review_count, discount
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12);
            "#,
        )
        .bind(product.id)
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
        .execute(&mut *conn)
        .await?;
    }
    for brand in initial_brands() {
        sqlx::query("INSERT INTO brands (id, name, logo_url, logo_hint) VALUES ($1, $2, $3, $4)")
            .bind(brand.id)
            .bind(brand.name)
            .bind(brand.logo_url)
            .bind(brand.logo_hint)
            .execute(&mut *conn)
            .await?;
    }
    info!("🗃️ Seeded the catalog with 8 products and 4 brands");
    Ok(true)
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    brand: &str,
    category: &str,
    image_url: &str,
    image_hint: &str,
    rating: f64,
    review_count: i64,
    discount: i64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Paise::from(price),
        brand: brand.to_string(),
        manufacturer: None,
        category: category.to_string(),
        image_url: image_url.to_string(),
        image_hint: image_hint.to_string(),
        rating,
        review_count,
        discount: Some(discount),
    }
}

fn initial_products() -> Vec<Product> {
    vec![
        product(
            "prod_1",
            "V8 Turbocharger Kit",
            "High-performance turbocharger kit for enhanced engine power and acceleration",
            199_999,
            "Apex Performance",
            "Engine",
            "https://images.unsplash.com/photo-1494976866556-6b0ee5d2cfae?w=400&h=300&fit=crop",
            "High-performance turbocharger kit",
            4.8,
            156,
            10,
        ),
        product(
            "prod_2",
            "Racing Suspension Kit",
            "Complete lowering suspension system for improved handling and appearance",
            129_999,
            "StanceCo",
            "Suspension",
            "https://images.unsplash.com/photo-1552820728-8ac41f1ce891?w=400&h=300&fit=crop",
            "Racing suspension kit",
            4.6,
            98,
            15,
        ),
        product(
            "prod_3",
            "Premium Air Filter Kit",
            "Reusable high-flow air filter for better engine breathing and performance",
            29_999,
            "FilterMax",
            "Engine",
            "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=300&fit=crop",
            "Premium air filter kit",
            4.4,
            267,
            5,
        ),
        product(
            "prod_4",
            "Ceramic Brake Pads",
            "Low dust ceramic brake pads for smooth braking and reduced brake fade",
            14_999,
            "BrakeMax",
            "Braking",
            "https://images.unsplash.com/photo-1489824904134-891ab64532f1?w=400&h=300&fit=crop",
            "Ceramic brake pads",
            4.7,
            445,
            8,
        ),
        product(
            "prod_5",
            "Stainless Steel Exhaust System",
            "Performance exhaust system with enhanced sound and improved airflow",
            79_999,
            "ExhaustElite",
            "Exhaust",
            "https://images.unsplash.com/photo-1609708536965-8128bbb20e13?w=400&h=300&fit=crop",
            "Stainless steel exhaust system",
            4.5,
            189,
            12,
        ),
        product(
            "prod_6",
            "LED Headlight Conversion Kit",
            "Modern LED headlight conversion for enhanced visibility and style",
            49_999,
            "LightGear",
            "Lighting",
            "https://images.unsplash.com/photo-1552820728-8ac41f1ce891?w=400&h=300&fit=crop",
            "LED headlight conversion kit",
            4.9,
            312,
            0,
        ),
        product(
            "prod_7",
            "Carbon Fiber Body Kit",
            "Lightweight carbon fiber exterior parts for weight reduction and style",
            249_999,
            "CarbonMax",
            "Exterior",
            "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=300&fit=crop",
            "Carbon fiber body kit",
            4.3,
            67,
            20,
        ),
        product(
            "prod_8",
            "Performance Cooling System",
            "Advanced radiator and cooling fan system for optimal engine temperature",
            89_999,
            "CoolTech",
            "Cooling",
            "https://images.unsplash.com/photo-1494976866556-6b0ee5d2cfae?w=400&h=300&fit=crop",
            "Performance cooling system",
            4.6,
            134,
            10,
        ),
    ]
}

fn initial_brands() -> Vec<Brand> {
    let brand = |id: &str, name: &str, logo_url: &str, logo_hint: &str| Brand {
        id: id.to_string(),
        name: name.to_string(),
        logo_url: logo_url.to_string(),
        logo_hint: logo_hint.to_string(),
    };
    vec![
        brand("brand_1", "Apex Performance", "https://via.placeholder.com/200x100?text=Apex", "Apex Performance Logo"),
        brand("brand_2", "StanceCo", "https://via.placeholder.com/200x100?text=StanceCo", "StanceCo Logo"),
        brand("brand_3", "FilterMax", "https://via.placeholder.com/200x100?text=FilterMax", "FilterMax Logo"),
        brand(
            "brand_4",
            "ExhaustElite",
            "https://via.placeholder.com/200x100?text=ExhaustElite",
            "ExhaustElite Logo",
        ),
    ]
}
