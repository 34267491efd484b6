//! The committed, merchant-ordered product list.
//!
//! Order is purely positional: an entry's order is its index, so removals
//! and moves never renumber stored fields. Every operation that receives an
//! out-of-range index, or a cross-product variant move, leaves the list
//! untouched and returns `false`.

use picker_core::{CatalogVariant, DiscountOverride};
use serde::Serialize;

use crate::selection::SelectedProduct;

/// Title shown for an entry that has not been filled from the catalog yet.
pub const PLACEHOLDER_TITLE: &str = "Select Product";

/// Snapshot of a chosen variant, decoupled from the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedVariant {
    pub variant_id: i64,
    pub title: String,
    pub available: Option<i64>,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountOverride>,
}

impl From<CatalogVariant> for CommittedVariant {
    fn from(variant: CatalogVariant) -> Self {
        Self {
            variant_id: variant.id,
            title: variant.title,
            available: variant.available,
            price: variant.price,
            discount: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedListEntry {
    /// `None` for a placeholder row.
    pub product_id: Option<i64>,
    pub title: String,
    pub selected_variants: Vec<CommittedVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountOverride>,
    /// Whether the variant panel is open.
    pub expanded: bool,
}

impl CommittedListEntry {
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            product_id: None,
            title: PLACEHOLDER_TITLE.to_owned(),
            selected_variants: Vec::new(),
            discount: None,
            expanded: false,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.product_id.is_none()
    }
}

impl From<SelectedProduct> for CommittedListEntry {
    fn from(selected: SelectedProduct) -> Self {
        Self {
            product_id: Some(selected.product_id),
            title: selected.title,
            selected_variants: selected
                .selected_variants
                .into_iter()
                .map(CommittedVariant::from)
                .collect(),
            discount: None,
            expanded: false,
        }
    }
}

/// Position of a variant within the committed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSlot {
    pub product: usize,
    pub variant: usize,
}

/// Reducer actions accepted by [`CommittedList::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Commit {
        entries: Vec<SelectedProduct>,
        insertion_point: Option<usize>,
    },
    MoveProduct {
        from: usize,
        to: usize,
    },
    MoveVariant {
        from: VariantSlot,
        to: VariantSlot,
    },
    RemoveProduct(usize),
    RemoveVariant(VariantSlot),
    AddPlaceholder,
    ToggleExpanded(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommittedList {
    entries: Vec<CommittedListEntry>,
}

impl CommittedList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[CommittedListEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CommittedListEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispatches a reducer action. Returns `true` if the list changed.
    pub fn apply(&mut self, action: ListAction) -> bool {
        match action {
            ListAction::Commit {
                entries,
                insertion_point,
            } => self.commit_selection(entries, insertion_point),
            ListAction::MoveProduct { from, to } => self.move_product(from, to),
            ListAction::MoveVariant { from, to } => self.move_variant_between(from, to),
            ListAction::RemoveProduct(index) => self.remove_product(index),
            ListAction::RemoveVariant(slot) => self.remove_variant(slot.product, slot.variant),
            ListAction::AddPlaceholder => self.add_placeholder().is_some(),
            ListAction::ToggleExpanded(index) => self.toggle_expanded(index),
        }
    }

    /// Adds materialized selections to the list.
    ///
    /// With no insertion point the entries are appended. With an insertion
    /// point the entry at that index is replaced by all of `entries` (splice:
    /// one entry may become many, or none). An insertion point past the end
    /// is rejected.
    pub fn commit_selection(
        &mut self,
        entries: Vec<SelectedProduct>,
        insertion_point: Option<usize>,
    ) -> bool {
        let new_entries = entries.into_iter().map(CommittedListEntry::from);
        match insertion_point {
            None => {
                let before = self.entries.len();
                self.entries.extend(new_entries);
                self.entries.len() != before
            }
            Some(index) if index < self.entries.len() => {
                self.entries.splice(index..=index, new_entries);
                true
            }
            Some(index) => {
                tracing::debug!(
                    index,
                    len = self.entries.len(),
                    "commit: insertion point out of range"
                );
                false
            }
        }
    }

    /// Moves the entry at `from` so that it ends up at `to`.
    pub fn move_product(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from == to || from >= len || to >= len {
            tracing::debug!(from, to, len, "move_product rejected");
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    /// Moves a variant within the variants of the entry at `product`.
    pub fn move_variant(&mut self, product: usize, from: usize, to: usize) -> bool {
        let Some(entry) = self.entries.get_mut(product) else {
            tracing::debug!(product, "move_variant: no entry at index");
            return false;
        };
        let len = entry.selected_variants.len();
        if from == to || from >= len || to >= len {
            tracing::debug!(product, from, to, len, "move_variant rejected");
            return false;
        }
        let variant = entry.selected_variants.remove(from);
        entry.selected_variants.insert(to, variant);
        true
    }

    /// Drag-and-drop form of [`move_variant`](Self::move_variant): source and
    /// target must lie in the same entry.
    pub fn move_variant_between(&mut self, from: VariantSlot, to: VariantSlot) -> bool {
        if from.product != to.product {
            tracing::debug!(?from, ?to, "rejecting cross-product variant move");
            return false;
        }
        self.move_variant(from.product, from.variant, to.variant)
    }

    pub fn remove_product(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    pub fn remove_variant(&mut self, product: usize, variant: usize) -> bool {
        match self.entries.get_mut(product) {
            Some(entry) if variant < entry.selected_variants.len() => {
                entry.selected_variants.remove(variant);
                true
            }
            _ => false,
        }
    }

    /// Appends an empty placeholder entry, returning its index.
    ///
    /// While the list is empty this does nothing: an empty list already
    /// offers a single implicit slot that an append-commit fills.
    pub fn add_placeholder(&mut self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.push(CommittedListEntry::placeholder());
        Some(self.entries.len() - 1)
    }

    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.expanded = !entry.expanded;
                true
            }
            None => false,
        }
    }

    pub(crate) fn product_discount_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut Option<DiscountOverride>> {
        self.entries.get_mut(index).map(|entry| &mut entry.discount)
    }

    pub(crate) fn variant_discount_mut(
        &mut self,
        slot: VariantSlot,
    ) -> Option<&mut Option<DiscountOverride>> {
        self.entries
            .get_mut(slot.product)?
            .selected_variants
            .get_mut(slot.variant)
            .map(|variant| &mut variant.discount)
    }
}

#[cfg(test)]
#[path = "committed_test.rs"]
mod tests;
