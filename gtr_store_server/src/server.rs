use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use gtr_store_engine::{create_database_if_missing, CatalogApi, OrderFlowApi, SqliteDatabase};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::RazorpayGateway,
    routes::{
        health,
        BrandCreateRoute,
        BrandDeleteRoute,
        BrandListRoute,
        BrandRoute,
        BrandUpdateRoute,
        CategoryListRoute,
        ManufacturerCreateRoute,
        ManufacturerDeleteRoute,
        ManufacturerListRoute,
        ManufacturerRoute,
        ManufacturerUpdateRoute,
        OrderCreateRoute,
        OrderListRoute,
        PaymentOrderCreateRoute,
        PaymentVerifyRoute,
        ProductCreateRoute,
        ProductDeleteRoute,
        ProductListRoute,
        ProductRoute,
        ProductUpdateRoute,
        StartTime,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = prepare_database(&config).await?;
    let gateway =
        RazorpayGateway::new(config.razorpay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db, gateway)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Creates the database file if needed, brings the schema up to date and, unless disabled, loads the seed
/// catalog into an empty store.
pub async fn prepare_database(config: &ServerConfig) -> Result<SqliteDatabase, ServerError> {
    create_database_if_missing(&config.database_url)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.seed_on_startup {
        let catalog = CatalogApi::new(db.clone());
        catalog.seed_catalog().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    info!("🚀️ Database is ready at {}", config.database_url);
    Ok(db)
}

/// Malformed JSON bodies must come back through the standard error envelope rather than actix's default
/// plain-text response.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into())
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: RazorpayGateway,
) -> Result<Server, ServerError> {
    let start_time = StartTime::now();
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let orders_api = OrderFlowApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("gtr::access_log"))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(start_time))
            .app_data(json_config())
            .app_data(query_config())
            .service(health)
            .service(ProductListRoute::<SqliteDatabase>::new())
            .service(ProductRoute::<SqliteDatabase>::new())
            .service(ProductCreateRoute::<SqliteDatabase>::new())
            .service(ProductUpdateRoute::<SqliteDatabase>::new())
            .service(ProductDeleteRoute::<SqliteDatabase>::new())
            .service(CategoryListRoute::<SqliteDatabase>::new())
            .service(BrandListRoute::<SqliteDatabase>::new())
            .service(BrandRoute::<SqliteDatabase>::new())
            .service(BrandCreateRoute::<SqliteDatabase>::new())
            .service(BrandUpdateRoute::<SqliteDatabase>::new())
            .service(BrandDeleteRoute::<SqliteDatabase>::new())
            .service(ManufacturerListRoute::<SqliteDatabase>::new())
            .service(ManufacturerRoute::<SqliteDatabase>::new())
            .service(ManufacturerCreateRoute::<SqliteDatabase>::new())
            .service(ManufacturerUpdateRoute::<SqliteDatabase>::new())
            .service(ManufacturerDeleteRoute::<SqliteDatabase>::new())
            .service(OrderListRoute::<SqliteDatabase>::new())
            .service(OrderCreateRoute::<SqliteDatabase>::new())
            .service(PaymentOrderCreateRoute::<RazorpayGateway>::new())
            .service(PaymentVerifyRoute::<SqliteDatabase, RazorpayGateway>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
