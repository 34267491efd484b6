//! The picker as the merchant drives it: a committed list plus, while the
//! product dialog is open, one selection session.

use picker_core::{
    CatalogProduct, DiscountDefaults, DiscountKind, DiscountOverride, EmptyProductPolicy,
    PickerConfig,
};
use rust_decimal::Decimal;

use crate::committed::{CommittedList, ListAction};
use crate::discount::{DiscountError, DiscountOverlay, DiscountScope};
use crate::selection::SelectionState;

#[derive(Debug, Clone)]
struct SelectionSession {
    selection: SelectionState,
    /// Entry being edited; `None` appends on commit.
    insertion_point: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPicker {
    list: CommittedList,
    overlay: DiscountOverlay,
    empty_product_policy: EmptyProductPolicy,
    session: Option<SelectionSession>,
}

impl ProductPicker {
    #[must_use]
    pub fn new(discount_defaults: DiscountDefaults, empty_product_policy: EmptyProductPolicy) -> Self {
        Self {
            list: CommittedList::new(),
            overlay: DiscountOverlay::new(discount_defaults),
            empty_product_policy,
            session: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(config.discount_defaults, config.empty_product_policy)
    }

    #[must_use]
    pub fn list(&self) -> &CommittedList {
        &self.list
    }

    /// Applies a list action. Returns `true` if the list changed.
    ///
    /// While a session is open, actions that add, remove or reorder entries
    /// are refused so the session's insertion point keeps naming the entry
    /// it was opened on.
    pub fn dispatch(&mut self, action: ListAction) -> bool {
        if self.session.is_some() && renumbers_entries(&action) {
            tracing::debug!(?action, "list action refused while a selection session is open");
            return false;
        }
        self.list.apply(action)
    }

    /// Opens a selection session whose commit appends to the list.
    /// Any session already open is discarded.
    pub fn open_new(&mut self) -> &mut SelectionState {
        self.open(None)
    }

    /// Opens a selection session whose commit replaces the entry at `index`.
    /// Returns `None` (and opens nothing) if `index` is out of range.
    pub fn open_edit(&mut self, index: usize) -> Option<&mut SelectionState> {
        if index >= self.list.len() {
            tracing::debug!(index, len = self.list.len(), "open_edit: no entry at index");
            return None;
        }
        Some(self.open(Some(index)))
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        self.session.as_ref().map(|s| &s.selection)
    }

    pub fn selection_mut(&mut self) -> Option<&mut SelectionState> {
        self.session.as_mut().map(|s| &mut s.selection)
    }

    /// Closes the session without touching the list. Returns `false` if no
    /// session was open.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Materializes the open selection against `catalog`, commits it and
    /// closes the session. Returns `true` if the list changed.
    pub fn commit(&mut self, catalog: &[CatalogProduct]) -> bool {
        let Some(session) = self.session.take() else {
            tracing::debug!("commit without an open selection session");
            return false;
        };
        let entries = session.selection.materialize(catalog);
        tracing::debug!(
            products = entries.len(),
            insertion_point = ?session.insertion_point,
            "committing selection"
        );
        self.list.commit_selection(entries, session.insertion_point)
    }

    /// Creates the default override for `scope` if it has none.
    ///
    /// # Errors
    ///
    /// See [`DiscountOverlay::ensure`].
    pub fn add_discount(&mut self, scope: DiscountScope) -> Result<DiscountOverride, DiscountError> {
        self.overlay.ensure(&mut self.list, scope)
    }

    /// # Errors
    ///
    /// See [`DiscountOverlay::set_value`].
    pub fn set_discount_value(
        &mut self,
        scope: DiscountScope,
        value: Decimal,
    ) -> Result<DiscountOverride, DiscountError> {
        self.overlay.set_value(&mut self.list, scope, value)
    }

    /// # Errors
    ///
    /// See [`DiscountOverlay::set_kind`].
    pub fn set_discount_kind(
        &mut self,
        scope: DiscountScope,
        kind: DiscountKind,
    ) -> Result<DiscountOverride, DiscountError> {
        self.overlay.set_kind(&mut self.list, scope, kind)
    }

    /// # Errors
    ///
    /// See [`DiscountOverlay::clear`].
    pub fn clear_discount(
        &mut self,
        scope: DiscountScope,
    ) -> Result<Option<DiscountOverride>, DiscountError> {
        DiscountOverlay::clear(&mut self.list, scope)
    }

    #[must_use]
    pub fn discount(&self, scope: DiscountScope) -> Option<DiscountOverride> {
        DiscountOverlay::get(&self.list, scope)
    }

    fn open(&mut self, insertion_point: Option<usize>) -> &mut SelectionState {
        let session = self.session.insert(SelectionSession {
            selection: SelectionState::new(self.empty_product_policy),
            insertion_point,
        });
        &mut session.selection
    }
}

fn renumbers_entries(action: &ListAction) -> bool {
    matches!(
        action,
        ListAction::Commit { .. } | ListAction::MoveProduct { .. } | ListAction::RemoveProduct(_)
    )
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
