//! The wire shapes of the REST API.
//!
//! The storefront speaks camelCase JSON with rupee floats; the engine speaks snake_case structs with integer
//! paise. Every conversion between the two worlds lives here, next to the request validation, so that the
//! route handlers only deal in domain types.

use gtr_common::Paise;
use gtr_store_engine::{
    db_types::{
        Brand,
        CartLine,
        Manufacturer,
        NewBrand,
        NewManufacturer,
        NewProduct,
        Order,
        OrderId,
        OrderStatus,
        PaymentStatus,
        Product,
        ShippingDetails,
    },
    store_api::{OrderWithItems, ProductQueryFilter, SortOrder},
};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

//--------------------------------------      Catalog results      --------------------------------------------------

/// A catalog product as the storefront sees it, with the price as a rupee float.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub brand: String,
    pub manufacturer: Option<String>,
    pub category: String,
    pub image_url: String,
    pub image_hint: String,
    pub rating: f64,
    pub review_count: i64,
    pub discount: Option<i64>,
}

impl From<Product> for ProductResult {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price.to_rupees_f64(),
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
}

/// The `/products` listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub items: Vec<ProductResult>,
    pub total: usize,
}

impl From<Vec<Product>> for ProductsResponse {
    fn from(products: Vec<Product>) -> Self {
        let items = products.into_iter().map(ProductResult::from).collect::<Vec<_>>();
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandResult {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub logo_hint: String,
}

impl From<Brand> for BrandResult {
    fn from(b: Brand) -> Self {
        Self { id: b.id, name: b.name, logo_url: b.logo_url, logo_hint: b.logo_hint }
    }
}

/// A manufacturer as the storefront sees it. An empty model list serializes as `[]`, never `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerResult {
    pub id: String,
    pub name: String,
    pub image_base64: Option<String>,
    pub models: Vec<String>,
}

impl From<Manufacturer> for ManufacturerResult {
    fn from(m: Manufacturer) -> Self {
        Self { id: m.id, name: m.name, image_base64: m.image_base64, models: m.models }
    }
}

//--------------------------------------      Catalog queries      --------------------------------------------------

/// The query string of the `/products` listing. All predicates are optional and combine conjunctively.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchQuery {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
}

impl ProductSearchQuery {
    /// Converts the rupee-float price bounds into the engine's paise filter. Negative or non-finite bounds
    /// are rejected.
    pub fn filter(&self) -> Result<ProductQueryFilter, ServerError> {
        let mut filter = ProductQueryFilter::default();
        if let Some(q) = &self.q {
            filter = filter.with_query(q.clone());
        }
        if let Some(brand) = &self.brand {
            filter = filter.with_brand(brand.clone());
        }
        if let Some(manufacturer) = &self.manufacturer {
            filter = filter.with_manufacturer(manufacturer.clone());
        }
        if let Some(category) = &self.category {
            filter = filter.with_category(category.clone());
        }
        if let Some(min) = self.min_price {
            filter = filter.with_min_price(price_bound("minPrice", min)?);
        }
        if let Some(max) = self.max_price {
            filter = filter.with_max_price(price_bound("maxPrice", max)?);
        }
        Ok(filter)
    }

    /// The requested sort order. Unsupported values are ignored, so that an outdated storefront can never
    /// break the listing.
    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort.as_deref().and_then(|s| s.parse().ok())
    }
}

fn price_bound(name: &str, value: f64) -> Result<Paise, ServerError> {
    if value < 0.0 {
        return Err(ServerError::ValidationError(format!("{name} must be greater than or equal to 0")));
    }
    Paise::from_rupees_f64(value).map_err(|e| ServerError::ValidationError(format!("{name} is invalid. {e}")))
}

//--------------------------------------      Catalog admin        --------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub brand: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    pub category: String,
    pub image_url: String,
    pub image_hint: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub discount: Option<i64>,
}

impl TryFrom<ProductCreateRequest> for NewProduct {
    type Error = ServerError;

    fn try_from(value: ProductCreateRequest) -> Result<Self, Self::Error> {
        require_non_empty("name", &value.name)?;
        require_non_empty("description", &value.description)?;
        require_non_empty("brand", &value.brand)?;
        require_non_empty("category", &value.category)?;
        require_non_empty("imageUrl", &value.image_url)?;
        require_non_empty("imageHint", &value.image_hint)?;
        if value.price <= 0.0 {
            return Err(ServerError::ValidationError("price must be greater than 0".to_string()));
        }
        let price = Paise::from_rupees_f64(value.price)
            .map_err(|e| ServerError::ValidationError(format!("price is invalid. {e}")))?;
        if !(0.0..=5.0).contains(&value.rating) {
            return Err(ServerError::ValidationError("rating must be between 0 and 5".to_string()));
        }
        if value.review_count < 0 {
            return Err(ServerError::ValidationError("reviewCount must be greater than or equal to 0".to_string()));
        }
        if let Some(discount) = value.discount {
            if !(0..=100).contains(&discount) {
                return Err(ServerError::ValidationError("discount must be between 0 and 100".to_string()));
            }
        }
        Ok(NewProduct {
            name: value.name,
            description: value.description,
            price,
            brand: value.brand,
            manufacturer: value.manufacturer,
            category: value.category,
            image_url: value.image_url,
            image_hint: value.image_hint,
            rating: value.rating,
            review_count: value.review_count,
            discount: value.discount,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandCreateRequest {
    pub name: String,
    pub logo_url: String,
    pub logo_hint: String,
}

impl TryFrom<BrandCreateRequest> for NewBrand {
    type Error = ServerError;

    fn try_from(value: BrandCreateRequest) -> Result<Self, Self::Error> {
        require_non_empty("name", &value.name)?;
        require_non_empty("logoUrl", &value.logo_url)?;
        require_non_empty("logoHint", &value.logo_hint)?;
        Ok(NewBrand { name: value.name, logo_url: value.logo_url, logo_hint: value.logo_hint })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerCreateRequest {
    pub name: String,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub models: Option<Vec<String>>,
}

impl TryFrom<ManufacturerCreateRequest> for NewManufacturer {
    type Error = ServerError;

    fn try_from(value: ManufacturerCreateRequest) -> Result<Self, Self::Error> {
        require_non_empty("name", &value.name)?;
        Ok(NewManufacturer {
            name: value.name,
            image_base64: value.image_base64,
            models: value.models.unwrap_or_default(),
        })
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ServerError> {
    if value.is_empty() {
        return Err(ServerError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

//--------------------------------------         Orders            --------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i64,
}

/// A checkout address. Accepted for compatibility with the storefront checkout form, but not stored: shipping
/// details are only persisted once a payment has been verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressInput {
    pub line1: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddressInput>,
}

impl OrderCreateRequest {
    /// The cart lines of the request. Quantity and duplicate checks are left to the order flow API, which
    /// produces the canonical error messages for them.
    pub fn cart_lines(&self) -> Result<Vec<CartLine>, ServerError> {
        self.items
            .iter()
            .map(|item| {
                if item.product_id.is_empty() {
                    return Err(ServerError::ValidationError("productId must not be empty".to_string()));
                }
                Ok(CartLine::new(item.product_id.as_str(), item.quantity))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResult {
    pub product: ProductResult,
    pub quantity: i64,
}

/// An order as the storefront sees it. The date is the day the order was placed and the total is a rupee
/// float; the payment fields keep their gateway-facing snake_case names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: OrderId,
    pub date: String,
    pub status: OrderStatus,
    pub total: f64,
    pub items: Vec<OrderItemResult>,
    pub payment_status: PaymentStatus,
    pub razorpay_order_id: Option<String>,
}

impl From<OrderWithItems> for OrderResult {
    fn from(o: OrderWithItems) -> Self {
        let items = o
            .items
            .into_iter()
            .map(|item| OrderItemResult { product: item.product.into(), quantity: item.quantity })
            .collect();
        Self {
            id: o.order.id,
            date: o.order.created_at.format("%Y-%m-%d").to_string(),
            status: o.order.status,
            total: o.order.total_price.to_rupees_f64(),
            items,
            payment_status: o.order.payment_status,
            razorpay_order_id: o.order.razorpay_order_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateResponse {
    pub order: OrderResult,
}

//--------------------------------------        Payments           --------------------------------------------------

/// Request body of `/payments/create-order`. The amount is in rupees; the gateway is handed paise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrderRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
}

fn default_currency() -> String {
    gtr_common::INR_CURRENCY_CODE.to_string()
}

/// Everything the storefront needs to open the Razorpay checkout widget. The amount is echoed back in paise,
/// as the gateway reported it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrderResult {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// The verification callback the storefront posts after a completed checkout. The field names are the
/// gateway's own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerificationRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub order_id: String,
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerifiedResponse {
    pub success: bool,
    pub message: String,
    pub order_id: OrderId,
    pub payment_status: PaymentStatus,
}

impl PaymentVerifiedResponse {
    pub fn verified(order: &Order) -> Self {
        Self {
            success: true,
            message: "Payment verified successfully".to_string(),
            order_id: order.id.clone(),
            payment_status: order.payment_status,
        }
    }
}
