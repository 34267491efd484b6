//! Wire types for the catalog search endpoint.
//!
//! ## Observed shape
//!
//! The endpoint answers `GET <url>?search=..&page=..&limit=..` with a bare
//! JSON array of products:
//!
//! ```json
//! [{"id": 1, "title": "Shirt", "image": {"src": "https://cdn/x.png"},
//!   "variants": [{"id": 11, "title": "S", "available": 4, "price": "12.00"}]}]
//! ```
//!
//! ### `image`
//! Either absent, `null`, or an object whose `src` may itself be missing.
//!
//! ### `available`
//! An inventory count. Absent on variants whose stock is not tracked.
//!
//! ### `price`
//! Normally a decimal string (`"12.00"`). Some backends emit a bare JSON
//! number instead; both are accepted and kept as text.

use serde::Deserialize;

/// A single product element of the search response array.
#[derive(Debug, Deserialize)]
pub struct WireProduct {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub image: Option<WireImage>,

    /// Missing `variants` is treated as a variant-less product.
    #[serde(default)]
    pub variants: Vec<WireVariant>,
}

#[derive(Debug, Deserialize)]
pub struct WireImage {
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireVariant {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub available: Option<i64>,

    pub price: WirePrice,
}

/// A price as it appears on the wire: decimal string or JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Text(String),
    Number(serde_json::Number),
}

impl WirePrice {
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            WirePrice::Text(text) => text,
            WirePrice::Number(number) => number.to_string(),
        }
    }
}
