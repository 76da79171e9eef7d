use std::{fmt::Display, str::FromStr};

use gtr_common::Paise;
use serde::{Deserialize, Serialize};

use crate::db_types::{ConversionError, Order, Product};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: i64,
}

/// An order together with its resolved line items, as handed back to callers of the order flow API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<LineItem>,
}

impl OrderWithItems {
    pub fn new(order: Order, items: Vec<LineItem>) -> Self {
        Self { order, items }
    }
}

/// The product search predicates the storefront can combine. `query` matches name, description or brand;
/// `brand`, `manufacturer` and `category` are substring matches; the price bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductQueryFilter {
    pub query: Option<String>,
    pub brand: Option<String>,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Paise>,
    pub max_price: Option<Paise>,
}

impl ProductQueryFilter {
    pub fn with_query(mut self, query: String) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_brand(mut self, brand: String) -> Self {
        self.brand = Some(brand);
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: String) -> Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_min_price(mut self, min_price: Paise) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn with_max_price(mut self, max_price: Paise) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() &&
            self.brand.is_none() &&
            self.manufacturer.is_none() &&
            self.category.is_none() &&
            self.min_price.is_none() &&
            self.max_price.is_none()
    }
}

impl Display for ProductQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "No filters.")?;
            return Ok(());
        }
        if let Some(query) = &self.query {
            write!(f, "query: {query}. ")?;
        }
        if let Some(brand) = &self.brand {
            write!(f, "brand: {brand}. ")?;
        }
        if let Some(manufacturer) = &self.manufacturer {
            write!(f, "manufacturer: {manufacturer}. ")?;
        }
        if let Some(category) = &self.category {
            write!(f, "category: {category}. ")?;
        }
        if let Some(min_price) = &self.min_price {
            write!(f, "min price: {min_price}. ")?;
        }
        if let Some(max_price) = &self.max_price {
            write!(f, "max price: {max_price}. ")?;
        }
        Ok(())
    }
}

/// The sort orders the product listing offers. Sorting happens in memory, after the filter has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl FromStr for SortOrder {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating-desc" => Ok(Self::RatingDesc),
            _ => Err(ConversionError(format!("Invalid sort order: {s}"))),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PriceAsc => write!(f, "price-asc"),
            Self::PriceDesc => write!(f, "price-desc"),
            Self::RatingDesc => write!(f, "rating-desc"),
        }
    }
}
