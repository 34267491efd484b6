//! Tri-state selection between catalog products and their variants.
//!
//! One [`SelectionEntry`] exists per product that has been touched; an absent
//! entry means "nothing selected". After every operation each entry satisfies,
//! for a product with `n` variants and `k` selected:
//!
//! - `parent_indeterminate` iff `0 < k < n`
//! - `parent_selected` iff `k == n` when `n > 0`, or the explicit parent
//!   flag when `n == 0`

use std::collections::{BTreeSet, HashMap, HashSet};

use picker_core::{CatalogProduct, CatalogVariant, EmptyProductPolicy};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionEntry {
    pub parent_selected: bool,
    pub variants_selected: BTreeSet<i64>,
    pub parent_indeterminate: bool,
}

impl SelectionEntry {
    #[must_use]
    pub fn is_variant_selected(&self, variant_id: i64) -> bool {
        self.variants_selected.contains(&variant_id)
    }

    fn recompute(&mut self, variant_count: usize) {
        let selected = self.variants_selected.len();
        if variant_count > 0 {
            self.parent_selected = selected == variant_count;
        }
        self.parent_indeterminate = selected > 0 && selected < variant_count;
    }
}

/// A product with the variants chosen for it, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProduct {
    pub product_id: i64,
    pub title: String,
    /// Chosen variants in catalog order.
    pub selected_variants: Vec<CatalogVariant>,
}

/// Selection state for one picker session.
///
/// Operations take the catalog they act on (normally the paginator's
/// accumulated results) so the state never holds catalog data of its own.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    entries: HashMap<i64, SelectionEntry>,
    empty_product_policy: EmptyProductPolicy,
}

impl SelectionState {
    #[must_use]
    pub fn new(empty_product_policy: EmptyProductPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            empty_product_policy,
        }
    }

    /// The entry for `product_id`, or the all-off default if never touched.
    #[must_use]
    pub fn entry(&self, product_id: i64) -> SelectionEntry {
        self.entries.get(&product_id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries
            .values()
            .all(|e| !e.parent_selected && e.variants_selected.is_empty())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flips the product checkbox. Turning it on selects every variant;
    /// turning it off clears them. Returns `false` if the product is not in
    /// `catalog`.
    pub fn toggle_product(&mut self, catalog: &[CatalogProduct], product_id: i64) -> bool {
        let Some(product) = find_product(catalog, product_id) else {
            tracing::debug!(product_id, "toggle_product: product not in catalog");
            return false;
        };

        let entry = self.entries.entry(product_id).or_default();
        let turning_on = !entry.parent_selected;
        entry.parent_selected = turning_on;
        entry.variants_selected = if turning_on {
            product.variant_ids().collect()
        } else {
            BTreeSet::new()
        };
        entry.parent_indeterminate = false;
        true
    }

    /// Flips one variant checkbox and recomputes the parent's tri-state.
    /// Returns `false` if the product or variant is not in `catalog`.
    pub fn toggle_variant(
        &mut self,
        catalog: &[CatalogProduct],
        product_id: i64,
        variant_id: i64,
    ) -> bool {
        let Some(product) = find_product(catalog, product_id) else {
            tracing::debug!(product_id, "toggle_variant: product not in catalog");
            return false;
        };
        if product.variant(variant_id).is_none() {
            tracing::debug!(product_id, variant_id, "toggle_variant: unknown variant");
            return false;
        }

        let entry = self.entries.entry(product_id).or_default();
        if !entry.variants_selected.remove(&variant_id) {
            entry.variants_selected.insert(variant_id);
        }
        entry.recompute(product.variant_count());
        true
    }

    /// Projects the selection onto `catalog`, in catalog order.
    ///
    /// Products with no selected variant are omitted. A selected variant-less
    /// product is emitted with an empty variant list only under
    /// [`EmptyProductPolicy::Include`].
    #[must_use]
    pub fn materialize(&self, catalog: &[CatalogProduct]) -> Vec<SelectedProduct> {
        let mut seen = HashSet::new();
        catalog
            .iter()
            .filter(|product| seen.insert(product.id))
            .filter_map(|product| {
                let entry = self.entries.get(&product.id)?;
                if entry.variants_selected.is_empty() {
                    let include_empty = self.empty_product_policy == EmptyProductPolicy::Include
                        && !product.has_variants()
                        && entry.parent_selected;
                    if !include_empty {
                        return None;
                    }
                }

                Some(SelectedProduct {
                    product_id: product.id,
                    title: product.title.clone(),
                    selected_variants: product
                        .variants
                        .iter()
                        .filter(|v| entry.is_variant_selected(v.id))
                        .cloned()
                        .collect(),
                })
            })
            .collect()
    }

    /// Number of products [`materialize`](Self::materialize) would emit.
    #[must_use]
    pub fn selected_count(&self, catalog: &[CatalogProduct]) -> usize {
        self.materialize(catalog).len()
    }
}

fn find_product(catalog: &[CatalogProduct], product_id: i64) -> Option<&CatalogProduct> {
    catalog.iter().find(|p| p.id == product_id)
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
