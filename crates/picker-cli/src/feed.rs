use picker_catalog::{CatalogFeed, CatalogSource, PageOutcome};
use picker_core::CatalogProduct;

/// Loads up to `pages` pages for `query`, stopping early at the end of the
/// results or on the first failed page.
pub async fn load_pages<S>(feed: &mut CatalogFeed<S>, query: &str, pages: u32)
where
    S: CatalogSource + 'static,
{
    feed.search(query);
    let mut loaded = 0u32;

    loop {
        for outcome in feed.settle().await {
            match outcome {
                PageOutcome::Appended { page, appended }
                | PageOutcome::Exhausted { page, appended } => {
                    tracing::info!(query, page, appended, "catalog page loaded");
                    loaded += 1;
                }
                PageOutcome::Failed { page, error } => {
                    tracing::warn!(query, page, error = %error, "stopping after failed page");
                    return;
                }
                PageOutcome::Stale { .. } => {}
            }
        }

        if loaded >= pages || !feed.load_more() {
            return;
        }
    }
}

pub fn print_catalog(catalog: &[CatalogProduct]) {
    if catalog.is_empty() {
        println!("No products found");
        return;
    }

    for product in catalog {
        println!("{:>12}  {}", product.id, product.title);
        for variant in &product.variants {
            let stock = match variant.available {
                Some(count) if count > 0 => format!("{count} available"),
                _ => "-".to_string(),
            };
            println!(
                "{:>12}    {:<32} {:>14}  ${}",
                variant.id, variant.title, stock, variant.price
            );
        }
    }
}
