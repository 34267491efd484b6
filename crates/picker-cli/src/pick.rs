use anyhow::{bail, Context};
use clap::Args;
use picker_catalog::{CatalogFeed, CatalogSource};
use picker_core::{DiscountKind, PickerConfig};
use picker_state::{DiscountScope, ProductPicker};
use rust_decimal::Decimal;

use crate::feed::load_pages;

#[derive(Debug, Args)]
pub struct PickArgs {
    /// Search text; omit to search the whole catalog.
    query: Option<String>,
    /// Number of pages to load before selecting.
    #[arg(long, default_value_t = 1)]
    pages: u32,
    /// Select a whole product (repeatable).
    #[arg(long = "product", value_name = "PRODUCT_ID")]
    products: Vec<i64>,
    /// Select a single variant (repeatable).
    #[arg(long = "variant", value_name = "PRODUCT_ID:VARIANT_ID", value_parser = parse_variant_ref)]
    variants: Vec<(i64, i64)>,
    /// Attach a product-level discount of this value to every committed entry.
    #[arg(long)]
    discount: Option<Decimal>,
    /// Discount type used with `--discount`.
    #[arg(long, value_parser = parse_discount_kind)]
    discount_type: Option<DiscountKind>,
}

pub async fn run<S>(
    config: &PickerConfig,
    feed: &mut CatalogFeed<S>,
    args: &PickArgs,
) -> anyhow::Result<()>
where
    S: CatalogSource + 'static,
{
    if args.products.is_empty() && args.variants.is_empty() {
        bail!("nothing to pick: pass at least one --product or --variant");
    }

    load_pages(feed, args.query.as_deref().unwrap_or_default(), args.pages).await;
    let catalog = feed.catalog();

    let mut picker = ProductPicker::from_config(config);
    let selection = picker.open_new();
    for &product_id in &args.products {
        if !selection.toggle_product(catalog, product_id) {
            tracing::warn!(product_id, "product not in loaded catalog; skipped");
        }
    }
    for &(product_id, variant_id) in &args.variants {
        if !selection.toggle_variant(catalog, product_id, variant_id) {
            tracing::warn!(product_id, variant_id, "variant not in loaded catalog; skipped");
        }
    }
    picker.commit(catalog);

    if args.discount.is_some() || args.discount_type.is_some() {
        for index in 0..picker.list().len() {
            let scope = DiscountScope::Product(index);
            if let Some(value) = args.discount {
                picker.set_discount_value(scope, value)?;
            }
            if let Some(kind) = args.discount_type {
                picker.set_discount_kind(scope, kind)?;
            }
        }
    }

    let rendered =
        serde_json::to_string_pretty(picker.list()).context("failed to render committed list")?;
    println!("{rendered}");
    Ok(())
}

fn parse_variant_ref(raw: &str) -> Result<(i64, i64), String> {
    let (product, variant) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:VARIANT_ID, got \"{raw}\""))?;
    let product = product
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid product id \"{product}\": {e}"))?;
    let variant = variant
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid variant id \"{variant}\": {e}"))?;
    Ok((product, variant))
}

fn parse_discount_kind(raw: &str) -> Result<DiscountKind, String> {
    raw.parse::<DiscountKind>().map_err(|e| e.to_string())
}
