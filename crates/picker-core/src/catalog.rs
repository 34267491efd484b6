use serde::{Deserialize, Serialize};

/// A product returned by the catalog search endpoint.
///
/// Catalog values are read-only snapshots: the paginator creates them when a
/// page arrives and nothing mutates them afterwards. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub title: String,
    /// Primary image URL, flattened from the wire `image.src` field.
    pub image_url: Option<String>,
    /// Variants in the order the backend returned them.
    pub variants: Vec<CatalogVariant>,
}

impl CatalogProduct {
    /// Returns the total number of variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Looks up one of this product's variants by id.
    #[must_use]
    pub fn variant(&self, variant_id: i64) -> Option<&CatalogVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    pub fn variant_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.variants.iter().map(|v| v.id)
    }
}

/// A single purchasable variant of a [`CatalogProduct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVariant {
    pub id: i64,
    /// Display title, e.g. `"S"` or `"Default Title"`.
    pub title: String,
    /// Inventory count. Absent when the backend does not track stock.
    pub available: Option<i64>,
    /// Price as a decimal string, exactly as the backend returns it, e.g. `"12.99"`.
    pub price: String,
}

impl CatalogVariant {
    /// `true` when the backend reports a positive inventory count.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.is_some_and(|count| count > 0)
    }
}
