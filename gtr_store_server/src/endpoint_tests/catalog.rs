use actix_web::{http::StatusCode, web, web::ServiceConfig};
use gtr_common::Paise;
use gtr_store_engine::{
    db_types::{Brand, Manufacturer, NewProduct, Product},
    store_api::CatalogApi,
    traits::CatalogError,
};
use serde_json::Value;

use super::{
    helpers::{delete_request, get_request, post_request, put_request},
    mocks::MockShopDb,
};
use crate::routes::{
    health,
    BrandCreateRoute,
    BrandDeleteRoute,
    BrandListRoute,
    BrandRoute,
    CategoryListRoute,
    ManufacturerCreateRoute,
    ManufacturerListRoute,
    ManufacturerRoute,
    ProductCreateRoute,
    ProductDeleteRoute,
    ProductListRoute,
    ProductRoute,
    ProductUpdateRoute,
    StartTime,
};

#[actix_web::test]
async fn health_reports_uptime() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/health", health_only).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).expect("Health response was not JSON");
    assert_eq!(json["status"], "ok");
    assert!(json["uptimeSeconds"].is_u64());
}

#[actix_web::test]
async fn product_listing_returns_the_catalog() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/products", two_product_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PRODUCTS_JSON);
}

#[actix_web::test]
async fn product_listing_sorts_by_price() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request("/products?sort=price-asc", two_product_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["items"][0]["id"], "prod_4");
    assert_eq!(json["items"][1]["id"], "prod_1");
}

#[actix_web::test]
async fn unsupported_sort_values_are_ignored() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/products?sort=newest", two_product_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["items"][0]["id"], "prod_1");
}

#[actix_web::test]
async fn price_filters_reach_the_backend_in_paise() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request("/products?minPrice=150&category=Engine", engine_parts_over_150).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], "prod_1");
}

#[actix_web::test]
async fn negative_price_bounds_are_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/products?minPrice=-1", no_searches).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"minPrice must be greater than or equal to 0"}"#);
}

#[actix_web::test]
async fn product_lookup_returns_the_product() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/products/prod_1", two_product_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TURBO_KIT_JSON);
}

#[actix_web::test]
async fn missing_products_are_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/products/prod_404", two_product_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Product not found"}"#);
}

#[actix_web::test]
async fn products_can_be_created() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"name":"Titanium Exhaust System","description":"Full titanium cat-back system","price":2499.99,"brand":"GTR Performance","category":"Exhaust","imageUrl":"https://cdn.gtrmotors.example/parts/prod_9.jpg","imageHint":"titanium exhaust","rating":4.9,"reviewCount":12}"#;
    let (status, body) = post_request("/product", req, product_admin).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["id"], "prod_9");
    assert_eq!(json["price"], 2499.99);
    assert_eq!(json["manufacturer"], Value::Null);
}

#[actix_web::test]
async fn creating_a_product_with_an_unknown_brand_is_rejected() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"name":"Big Wing","description":"Carbon rear wing","price":500,"brand":"NoSuchCo","category":"Aero","imageUrl":"https://cdn.gtrmotors.example/parts/wing.jpg","imageHint":"rear wing","rating":4.0,"reviewCount":1}"#;
    let (status, body) = post_request("/product", req, unknown_brand).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Brand not found: NoSuchCo"}"#);
}

#[actix_web::test]
async fn product_validation_rejects_bad_payloads() {
    let _ = env_logger::try_init().ok();
    let zero_price = r#"{"name":"Free Part","description":"d","price":0,"brand":"Brembo","category":"Brakes","imageUrl":"u","imageHint":"h"}"#;
    let (status, body) = post_request("/product", zero_price, no_product_writes).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"price must be greater than 0"}"#);

    let empty_name = r#"{"name":"","description":"d","price":10,"brand":"Brembo","category":"Brakes","imageUrl":"u","imageHint":"h"}"#;
    let (status, body) = post_request("/product", empty_name, no_product_writes).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"name must not be empty"}"#);

    let silly_rating = r#"{"name":"Part","description":"d","price":10,"brand":"Brembo","category":"Brakes","imageUrl":"u","imageHint":"h","rating":7.5}"#;
    let (status, body) = post_request("/product", silly_rating, no_product_writes).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"rating must be between 0 and 5"}"#);
}

#[actix_web::test]
async fn products_can_be_updated() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"name":"Stage 3 Turbocharger Kit","description":"Ball-bearing turbocharger with cast manifold and braided oil lines","price":1899.99,"brand":"GTR Performance","manufacturer":"Nissan","category":"Engine","imageUrl":"https://cdn.gtrmotors.example/parts/prod_1.jpg","imageHint":"turbocharger kit","rating":4.8,"reviewCount":156,"discount":15}"#;
    let (status, body) = put_request("/product/prod_1", req, product_admin).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["id"], "prod_1");
    assert_eq!(json["price"], 1899.99);
    assert_eq!(json["discount"], 15);
}

#[actix_web::test]
async fn product_delete_returns_no_content() {
    let _ = env_logger::try_init().ok();
    let (status, body) = delete_request("/product/prod_9", product_admin).await.expect("Request failed");
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, "");
}

#[actix_web::test]
async fn products_referenced_by_orders_cannot_be_deleted() {
    let _ = env_logger::try_init().ok();
    let (status, body) = delete_request("/product/prod_4", brake_pads_in_an_order).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Cannot delete product prod_4 because orders reference it"}"#);
}

#[actix_web::test]
async fn brand_listing_returns_all_brands() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/brands", brand_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, BRANDS_JSON);
}

#[actix_web::test]
async fn missing_brands_are_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/brands/brand_404", brand_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Brand not found"}"#);
}

#[actix_web::test]
async fn brands_can_be_created() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"name":"HKS","logoUrl":"https://cdn.gtrmotors.example/brands/hks.svg","logoHint":"hks logo"}"#;
    let (status, body) = post_request("/brand", req, brand_admin).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        r#"{"id":"brand_9","name":"HKS","logoUrl":"https://cdn.gtrmotors.example/brands/hks.svg","logoHint":"hks logo"}"#
    );
}

#[actix_web::test]
async fn duplicate_brand_names_are_rejected() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"name":"Brembo","logoUrl":"https://cdn.gtrmotors.example/brands/brembo.svg","logoHint":"brembo wordmark"}"#;
    let (status, body) = post_request("/brand", req, duplicate_brand).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"A brand named Brembo already exists"}"#);
}

#[actix_web::test]
async fn brands_with_products_cannot_be_deleted() {
    let _ = env_logger::try_init().ok();
    let (status, body) = delete_request("/brand/brand_1", brand_admin).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Cannot delete brand brand_1 because products reference it"}"#);
}

#[actix_web::test]
async fn manufacturer_listing_includes_empty_model_lists() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/manufacturers", manufacturer_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, MANUFACTURERS_JSON);
}

#[actix_web::test]
async fn missing_manufacturers_are_a_404() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/manufacturers/manu_404", manufacturer_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Manufacturer not found"}"#);
}

#[actix_web::test]
async fn manufacturers_can_be_created_with_defaults() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/manufacturers", r#"{"name":"Toyota"}"#, manufacturer_admin).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"id":"manu_9","name":"Toyota","imageBase64":null,"models":[]}"#);
}

#[actix_web::test]
async fn categories_are_a_bare_array() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/categories", category_catalog).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"["Brakes","Engine","Exhaust"]"#);
}

//-------------------------------------- Test app configurations ----------------------------------------------------

fn health_only(cfg: &mut ServiceConfig) {
    cfg.service(health).app_data(web::Data::new(StartTime::now()));
}

fn two_product_catalog(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_search_products().returning(|_| Ok(vec![turbo_kit(), brake_pads()]));
    db.expect_fetch_product().returning(|id| match id {
        "prod_1" => Ok(Some(turbo_kit())),
        _ => Ok(None),
    });
    register_catalog(cfg, db);
}

fn engine_parts_over_150(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_search_products()
        .withf(|f| {
            f.min_price == Some(Paise::from(15_000)) &&
                f.max_price.is_none() &&
                f.category.as_deref() == Some("Engine") &&
                f.query.is_none()
        })
        .returning(|_| Ok(vec![turbo_kit()]));
    register_catalog(cfg, db);
}

fn no_searches(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_search_products().never();
    register_catalog(cfg, db);
}

fn product_admin(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_product()
        .withf(|p| p.name == "Titanium Exhaust System" && p.price == Paise::from(249_999) && p.manufacturer.is_none())
        .returning(|p| Ok(product_with_id(p, "prod_9")));
    db.expect_update_product()
        .withf(|id, p| id == "prod_1" && p.price == Paise::from(189_999))
        .returning(|id, p| Ok(product_with_id(p, id)));
    db.expect_delete_product().returning(|_| Ok(()));
    register_catalog(cfg, db);
}

fn no_product_writes(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_product().never();
    register_catalog(cfg, db);
}

fn unknown_brand(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_product().returning(|_| Err(CatalogError::BrandNotFound("NoSuchCo".to_string())));
    register_catalog(cfg, db);
}

fn brake_pads_in_an_order(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_delete_product().returning(|id| Err(CatalogError::ProductInUse(id.to_string())));
    register_catalog(cfg, db);
}

fn brand_catalog(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_fetch_brands().returning(|| Ok(vec![gtr_performance(), brembo()]));
    db.expect_fetch_brand().returning(|id| match id {
        "brand_1" => Ok(Some(gtr_performance())),
        _ => Ok(None),
    });
    register_catalog(cfg, db);
}

fn brand_admin(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_brand().withf(|b| b.name == "HKS").returning(|b| {
        Ok(Brand { id: "brand_9".to_string(), name: b.name, logo_url: b.logo_url, logo_hint: b.logo_hint })
    });
    db.expect_delete_brand().returning(|id| Err(CatalogError::BrandInUse(id.to_string())));
    register_catalog(cfg, db);
}

fn duplicate_brand(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_brand().returning(|b| Err(CatalogError::BrandAlreadyExists(b.name)));
    register_catalog(cfg, db);
}

fn manufacturer_catalog(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_fetch_manufacturers().returning(|| Ok(vec![nissan(), tuner_works()]));
    db.expect_fetch_manufacturer().returning(|id| match id {
        "manu_1" => Ok(Some(nissan())),
        _ => Ok(None),
    });
    register_catalog(cfg, db);
}

fn manufacturer_admin(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_manufacturer().withf(|m| m.name == "Toyota" && m.models.is_empty()).returning(|m| {
        Ok(Manufacturer { id: "manu_9".to_string(), name: m.name, image_base64: m.image_base64, models: m.models })
    });
    register_catalog(cfg, db);
}

fn category_catalog(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_fetch_categories()
        .returning(|| Ok(vec!["Brakes".to_string(), "Engine".to_string(), "Exhaust".to_string()]));
    register_catalog(cfg, db);
}

fn register_catalog(cfg: &mut ServiceConfig, db: MockShopDb) {
    let api = CatalogApi::new(db);
    cfg.service(ProductListRoute::<MockShopDb>::new())
        .service(ProductRoute::<MockShopDb>::new())
        .service(ProductCreateRoute::<MockShopDb>::new())
        .service(ProductUpdateRoute::<MockShopDb>::new())
        .service(ProductDeleteRoute::<MockShopDb>::new())
        .service(CategoryListRoute::<MockShopDb>::new())
        .service(BrandListRoute::<MockShopDb>::new())
        .service(BrandRoute::<MockShopDb>::new())
        .service(BrandCreateRoute::<MockShopDb>::new())
        .service(BrandDeleteRoute::<MockShopDb>::new())
        .service(ManufacturerListRoute::<MockShopDb>::new())
        .service(ManufacturerRoute::<MockShopDb>::new())
        .service(ManufacturerCreateRoute::<MockShopDb>::new())
        .app_data(web::Data::new(api));
}

//--------------------------------------       Fixtures        ------------------------------------------------------

fn turbo_kit() -> Product {
    Product {
        id: "prod_1".to_string(),
        name: "Stage 3 Turbocharger Kit".to_string(),
        description: "Ball-bearing turbocharger with cast manifold and braided oil lines".to_string(),
        price: Paise::from(199_999),
        brand: "GTR Performance".to_string(),
        manufacturer: Some("Nissan".to_string()),
        category: "Engine".to_string(),
        image_url: "https://cdn.gtrmotors.example/parts/prod_1.jpg".to_string(),
        image_hint: "turbocharger kit".to_string(),
        rating: 4.8,
        review_count: 156,
        discount: Some(10),
    }
}

fn brake_pads() -> Product {
    Product {
        id: "prod_4".to_string(),
        name: "Carbon Ceramic Brake Pads".to_string(),
        description: "Track-rated carbon ceramic pads with steel shims".to_string(),
        price: Paise::from(14_999),
        brand: "Brembo".to_string(),
        manufacturer: None,
        category: "Brakes".to_string(),
        image_url: "https://cdn.gtrmotors.example/parts/prod_4.jpg".to_string(),
        image_hint: "brake pads".to_string(),
        rating: 4.7,
        review_count: 445,
        discount: Some(8),
    }
}

fn product_with_id(p: NewProduct, id: &str) -> Product {
    Product {
        id: id.to_string(),
        name: p.name,
        description: p.description,
        price: p.price,
        brand: p.brand,
        manufacturer: p.manufacturer,
        category: p.category,
        image_url: p.image_url,
        image_hint: p.image_hint,
        rating: p.rating,
        review_count: p.review_count,
        discount: p.discount,
    }
}

fn gtr_performance() -> Brand {
    Brand {
        id: "brand_1".to_string(),
        name: "GTR Performance".to_string(),
        logo_url: "https://cdn.gtrmotors.example/brands/gtr.svg".to_string(),
        logo_hint: "gtr wordmark".to_string(),
    }
}

fn brembo() -> Brand {
    Brand {
        id: "brand_2".to_string(),
        name: "Brembo".to_string(),
        logo_url: "https://cdn.gtrmotors.example/brands/brembo.svg".to_string(),
        logo_hint: "brembo wordmark".to_string(),
    }
}

fn nissan() -> Manufacturer {
    Manufacturer {
        id: "manu_1".to_string(),
        name: "Nissan".to_string(),
        image_base64: None,
        models: vec!["Skyline GT-R R34".to_string(), "GT-R R35".to_string()],
    }
}

fn tuner_works() -> Manufacturer {
    Manufacturer { id: "manu_2".to_string(), name: "Tuner Works".to_string(), image_base64: None, models: vec![] }
}

const TURBO_KIT_JSON: &str = r#"{"id":"prod_1","name":"Stage 3 Turbocharger Kit","description":"Ball-bearing turbocharger with cast manifold and braided oil lines","price":1999.99,"brand":"GTR Performance","manufacturer":"Nissan","category":"Engine","imageUrl":"https://cdn.gtrmotors.example/parts/prod_1.jpg","imageHint":"turbocharger kit","rating":4.8,"reviewCount":156,"discount":10}"#;

const PRODUCTS_JSON: &str = r#"{"items":[{"id":"prod_1","name":"Stage 3 Turbocharger Kit","description":"Ball-bearing turbocharger with cast manifold and braided oil lines","price":1999.99,"brand":"GTR Performance","manufacturer":"Nissan","category":"Engine","imageUrl":"https://cdn.gtrmotors.example/parts/prod_1.jpg","imageHint":"turbocharger kit","rating":4.8,"reviewCount":156,"discount":10},{"id":"prod_4","name":"Carbon Ceramic Brake Pads","description":"Track-rated carbon ceramic pads with steel shims","price":149.99,"brand":"Brembo","manufacturer":null,"category":"Brakes","imageUrl":"https://cdn.gtrmotors.example/parts/prod_4.jpg","imageHint":"brake pads","rating":4.7,"reviewCount":445,"discount":8}],"total":2}"#;

const BRANDS_JSON: &str = r#"[{"id":"brand_1","name":"GTR Performance","logoUrl":"https://cdn.gtrmotors.example/brands/gtr.svg","logoHint":"gtr wordmark"},{"id":"brand_2","name":"Brembo","logoUrl":"https://cdn.gtrmotors.example/brands/brembo.svg","logoHint":"brembo wordmark"}]"#;

const MANUFACTURERS_JSON: &str = r#"[{"id":"manu_1","name":"Nissan","imageBase64":null,"models":["Skyline GT-R R34","GT-R R35"]},{"id":"manu_2","name":"Tuner Works","imageBase64":null,"models":[]}]"#;
