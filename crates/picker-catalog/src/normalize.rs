//! Conversion from wire types to [`picker_core::CatalogProduct`].

use picker_core::{CatalogProduct, CatalogVariant};

use crate::types::{WireProduct, WireVariant};

/// Normalizes a raw [`WireProduct`] into a [`CatalogProduct`].
///
/// An image object without a usable `src` becomes `None`. Variant order is
/// preserved exactly.
#[must_use]
pub fn normalize_product(product: WireProduct) -> CatalogProduct {
    let image_url = product
        .image
        .and_then(|image| image.src)
        .filter(|src| !src.trim().is_empty());

    CatalogProduct {
        id: product.id,
        title: product.title,
        image_url,
        variants: product.variants.into_iter().map(normalize_variant).collect(),
    }
}

fn normalize_variant(variant: WireVariant) -> CatalogVariant {
    CatalogVariant {
        id: variant.id,
        title: variant.title,
        available: variant.available,
        price: variant.price.into_text(),
    }
}
