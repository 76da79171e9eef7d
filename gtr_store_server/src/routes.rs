//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a dozen lines or so MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause
//! the current worker to stop processing new requests. For this reason, anything that waits on I/O (the database,
//! the payment gateway) must be expressed as a future and awaited, so that the worker can interleave other requests
//! behind it.

use std::time::Instant;

use actix_web::{get, web, HttpResponse, Responder};
use gtr_common::Paise;
use gtr_store_engine::{
    db_types::{NewBrand, NewManufacturer, NewProduct, OrderId, PaymentConfirmation},
    store_api::{CatalogApi, OrderFlowApi},
    traits::{CatalogError, CatalogManagement, ShopOrderManagement},
};
use log::*;
use serde_json::json;

use crate::{
    data_objects::{
        BrandCreateRequest,
        BrandResult,
        ManufacturerCreateRequest,
        ManufacturerResult,
        OrderCreateRequest,
        OrderCreateResponse,
        OrderResult,
        PaymentOrderRequest,
        PaymentOrderResult,
        PaymentVerificationRequest,
        PaymentVerifiedResponse,
        ProductCreateRequest,
        ProductResult,
        ProductSearchQuery,
        ProductsResponse,
    },
    errors::ServerError,
    integrations::PaymentGateway,
};

// Web-actix cannot handle generics in handlers, so routes over the storage and gateway traits are declared
// manually using the `route!` macro.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------

/// The moment the server came up. Injected as app data so the health endpoint can report uptime.
#[derive(Debug, Clone, Copy)]
pub struct StartTime {
    started: Instant,
}

impl StartTime {
    pub fn now() -> Self {
        Self { started: Instant::now() }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

#[get("/health")]
pub async fn health(start: web::Data<StartTime>) -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(json!({"status": "ok", "uptimeSeconds": start.elapsed_secs()}))
}

//----------------------------------------------   Products  ----------------------------------------------------

route!(product_list => Get "/products" impl CatalogManagement);
/// Route handler for the product listing.
///
/// All query parameters are optional. Text search (`q`), `brand`, `manufacturer`, `category` and the price
/// bounds combine conjunctively; `sort` reorders the matches and unknown sort values are ignored. Prices in
/// the query string and the response are in rupees.
pub async fn product_list<B: CatalogManagement>(
    query: web::Query<ProductSearchQuery>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET product list");
    let filter = query.filter()?;
    let products = api.search_products(&filter, query.sort_order()).await?;
    Ok(HttpResponse::Ok().json(ProductsResponse::from(products)))
}

route!(product => Get "/products/{id}" impl CatalogManagement);
pub async fn product<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET product {id}");
    let product = api
        .product(&id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Product not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ProductResult::from(product)))
}

route!(product_create => Post "/product" impl CatalogManagement);
pub async fn product_create<B: CatalogManagement>(
    body: web::Json<ProductCreateRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST new product");
    let new_product = NewProduct::try_from(body.into_inner())?;
    let product = api.create_product(new_product).await.map_err(unknown_brand_as_validation)?;
    Ok(HttpResponse::Created().json(ProductResult::from(product)))
}

route!(product_update => Put "/product/{id}" impl CatalogManagement);
pub async fn product_update<B: CatalogManagement>(
    path: web::Path<String>,
    body: web::Json<ProductCreateRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT product {id}");
    let new_product = NewProduct::try_from(body.into_inner())?;
    let product = api.update_product(&id, new_product).await.map_err(unknown_brand_as_validation)?;
    Ok(HttpResponse::Ok().json(ProductResult::from(product)))
}

route!(product_delete => Delete "/product/{id}" impl CatalogManagement);
pub async fn product_delete<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE product {id}");
    api.delete_product(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// On the product endpoints a missing brand is a bad payload rather than a missing record, so the generic
/// `BrandNotFound` mapping (404) does not apply.
fn unknown_brand_as_validation(e: CatalogError) -> ServerError {
    match &e {
        CatalogError::BrandNotFound(_) => ServerError::ValidationError(e.to_string()),
        _ => ServerError::from(e),
    }
}

//----------------------------------------------   Categories  ----------------------------------------------------

route!(category_list => Get "/categories" impl CatalogManagement);
pub async fn category_list<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET category list");
    let categories = api.categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

//----------------------------------------------   Brands  ----------------------------------------------------

route!(brand_list => Get "/brands" impl CatalogManagement);
pub async fn brand_list<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET brand list");
    let brands = api.brands().await?.into_iter().map(BrandResult::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(brands))
}

route!(brand => Get "/brands/{id}" impl CatalogManagement);
pub async fn brand<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET brand {id}");
    let brand =
        api.brand(&id).await?.ok_or_else(|| ServerError::NoRecordFound("Brand not found".to_string()))?;
    Ok(HttpResponse::Ok().json(BrandResult::from(brand)))
}

route!(brand_create => Post "/brand" impl CatalogManagement);
pub async fn brand_create<B: CatalogManagement>(
    body: web::Json<BrandCreateRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST new brand");
    let new_brand = NewBrand::try_from(body.into_inner())?;
    let brand = api.create_brand(new_brand).await?;
    Ok(HttpResponse::Created().json(BrandResult::from(brand)))
}

route!(brand_update => Put "/brand/{id}" impl CatalogManagement);
pub async fn brand_update<B: CatalogManagement>(
    path: web::Path<String>,
    body: web::Json<BrandCreateRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT brand {id}");
    let new_brand = NewBrand::try_from(body.into_inner())?;
    let brand = api.update_brand(&id, new_brand).await?;
    Ok(HttpResponse::Ok().json(BrandResult::from(brand)))
}

route!(brand_delete => Delete "/brand/{id}" impl CatalogManagement);
pub async fn brand_delete<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE brand {id}");
    api.delete_brand(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

//----------------------------------------------   Manufacturers  ----------------------------------------------------

route!(manufacturer_list => Get "/manufacturers" impl CatalogManagement);
pub async fn manufacturer_list<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET manufacturer list");
    let manufacturers = api.manufacturers().await?.into_iter().map(ManufacturerResult::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(manufacturers))
}

route!(manufacturer => Get "/manufacturers/{id}" impl CatalogManagement);
pub async fn manufacturer<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET manufacturer {id}");
    let manufacturer = api
        .manufacturer(&id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Manufacturer not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ManufacturerResult::from(manufacturer)))
}

route!(manufacturer_create => Post "/manufacturers" impl CatalogManagement);
pub async fn manufacturer_create<B: CatalogManagement>(
    body: web::Json<ManufacturerCreateRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST new manufacturer");
    let new_manufacturer = NewManufacturer::try_from(body.into_inner())?;
    let manufacturer = api.create_manufacturer(new_manufacturer).await?;
    Ok(HttpResponse::Created().json(ManufacturerResult::from(manufacturer)))
}

route!(manufacturer_update => Put "/manufacturers/{id}" impl CatalogManagement);
pub async fn manufacturer_update<B: CatalogManagement>(
    path: web::Path<String>,
    body: web::Json<ManufacturerCreateRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ PUT manufacturer {id}");
    let new_manufacturer = NewManufacturer::try_from(body.into_inner())?;
    let manufacturer = api.update_manufacturer(&id, new_manufacturer).await?;
    Ok(HttpResponse::Ok().json(ManufacturerResult::from(manufacturer)))
}

route!(manufacturer_delete => Delete "/manufacturers/{id}" impl CatalogManagement);
pub async fn manufacturer_delete<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE manufacturer {id}");
    api.delete_manufacturer(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

//----------------------------------------------   Orders  ----------------------------------------------------

route!(order_list => Get "/orders" impl ShopOrderManagement);
pub async fn order_list<B: ShopOrderManagement>(
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET order list");
    let orders = api.orders().await?.into_iter().map(OrderResult::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_create => Post "/orders" impl ShopOrderManagement);
/// Route handler for checkout.
///
/// The cart lines are validated and priced against the catalog inside a single transaction, so a response is
/// either a fully persisted order or an error with nothing written. The order starts out `Processing` with
/// payment `pending`; payment is a separate step against the `/payments` endpoints.
pub async fn order_create<B: ShopOrderManagement>(
    body: web::Json<OrderCreateRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST new order");
    let lines = body.cart_lines()?;
    let order = api.place_order(&lines).await?;
    Ok(HttpResponse::Created().json(OrderCreateResponse { order: OrderResult::from(order) }))
}

//----------------------------------------------   Payments  ----------------------------------------------------

route!(payment_order_create => Post "/payments/create-order" impl PaymentGateway);
/// Route handler for opening a payment at the gateway.
///
/// The gateway order id and the public key id in the response are everything the storefront needs to launch
/// the checkout widget. The amount is taken in rupees and forwarded to the gateway in paise.
pub async fn payment_order_create<G: PaymentGateway>(
    body: web::Json<PaymentOrderRequest>,
    gateway: web::Data<G>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST create payment order");
    let req = body.into_inner();
    let amount =
        Paise::from_rupees_f64(req.amount).map_err(|e| ServerError::PaymentGatewayError(e.to_string()))?;
    let order = gateway.create_order(amount, &req.currency, req.receipt).await.map_err(|e| {
        warn!("🚨️ Could not create a gateway order for {amount}. {e}");
        ServerError::PaymentGatewayError(e.to_string())
    })?;
    let result = PaymentOrderResult {
        id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: gateway.key_id().to_string(),
    };
    Ok(HttpResponse::Ok().json(result))
}

route!(payment_verify => Post "/payments/verify" impl ShopOrderManagement, PaymentGateway);
/// Route handler for the payment verification callback.
///
/// The signature is checked before the ledger is touched. On a mismatch the order is left exactly as it was
/// and the response reveals nothing about the expected value; the order id alone is logged for the audit
/// trail. On a match the order is marked paid and any shipping details are recorded against it.
pub async fn payment_verify<B, G>(
    body: web::Json<PaymentVerificationRequest>,
    api: web::Data<OrderFlowApi<B>>,
    gateway: web::Data<G>,
) -> Result<HttpResponse, ServerError>
where
    B: ShopOrderManagement,
    G: PaymentGateway,
{
    let v = body.into_inner();
    let order_id = OrderId::from(v.order_id);
    debug!("💻️ POST payment verification for order {order_id}");
    if !gateway.verify_signature(&v.razorpay_order_id, &v.razorpay_payment_id, &v.razorpay_signature) {
        warn!("🚨️ Rejected payment verification for order {order_id}. The signature does not match.");
        return Err(ServerError::InvalidPaymentSignature);
    }
    let confirmation = PaymentConfirmation {
        razorpay_order_id: v.razorpay_order_id,
        razorpay_payment_id: v.razorpay_payment_id,
        razorpay_signature: v.razorpay_signature,
        shipping: v.shipping_details,
    };
    let order = api.confirm_payment(&order_id, confirmation).await?;
    Ok(HttpResponse::Ok().json(PaymentVerifiedResponse::verified(&order.order)))
}
