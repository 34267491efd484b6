//! Per-entry and per-variant discount overrides on the committed list.
//!
//! A scope has no override until one is created. Creating one (explicitly,
//! or implicitly by setting a single field) starts from the configured
//! [`DiscountDefaults`]; later edits touch only the field being set.

use picker_core::{DiscountDefaults, DiscountKind, DiscountOverride};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::committed::{CommittedList, VariantSlot};

/// Which committed entry, or which variant of it, an override belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountScope {
    Product(usize),
    Variant(VariantSlot),
}

#[derive(Debug, Error)]
pub enum DiscountError {
    #[error("discount value must not be negative, got {0}")]
    NegativeValue(Decimal),

    #[error("invalid discount value \"{0}\"")]
    InvalidValue(String),

    #[error("no committed entry for {0:?}")]
    ScopeNotFound(DiscountScope),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountOverlay {
    defaults: DiscountDefaults,
}

impl DiscountOverlay {
    #[must_use]
    pub fn new(defaults: DiscountDefaults) -> Self {
        Self { defaults }
    }

    #[must_use]
    pub fn defaults(&self) -> DiscountDefaults {
        self.defaults
    }

    /// The override for `scope`, if one exists.
    #[must_use]
    pub fn get(list: &CommittedList, scope: DiscountScope) -> Option<DiscountOverride> {
        match scope {
            DiscountScope::Product(index) => list.get(index)?.discount,
            DiscountScope::Variant(slot) => {
                list.get(slot.product)?
                    .selected_variants
                    .get(slot.variant)?
                    .discount
            }
        }
    }

    /// Returns the override for `scope`, creating it from the defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::ScopeNotFound`] if `scope` does not name a
    /// committed entry or variant.
    pub fn ensure(
        &self,
        list: &mut CommittedList,
        scope: DiscountScope,
    ) -> Result<DiscountOverride, DiscountError> {
        let slot = slot_mut(list, scope)?;
        Ok(*slot.get_or_insert_with(|| self.defaults.create()))
    }

    /// Sets the override value, creating the override if needed.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::NegativeValue`]: `value` is below zero; nothing changes.
    /// - [`DiscountError::ScopeNotFound`]: `scope` does not exist.
    pub fn set_value(
        &self,
        list: &mut CommittedList,
        scope: DiscountScope,
        value: Decimal,
    ) -> Result<DiscountOverride, DiscountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DiscountError::NegativeValue(value));
        }
        let slot = slot_mut(list, scope)?;
        let discount = slot.get_or_insert_with(|| self.defaults.create());
        discount.value = value.normalize();
        Ok(*discount)
    }

    /// Parses `raw` as a decimal and sets it as the override value.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidValue`] if `raw` is not a decimal
    /// number, otherwise as [`set_value`](Self::set_value).
    pub fn set_value_str(
        &self,
        list: &mut CommittedList,
        scope: DiscountScope,
        raw: &str,
    ) -> Result<DiscountOverride, DiscountError> {
        let value = raw
            .trim()
            .parse::<Decimal>()
            .map_err(|_| DiscountError::InvalidValue(raw.to_owned()))?;
        self.set_value(list, scope, value)
    }

    /// Sets the override type, creating the override if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::ScopeNotFound`] if `scope` does not exist.
    pub fn set_kind(
        &self,
        list: &mut CommittedList,
        scope: DiscountScope,
        kind: DiscountKind,
    ) -> Result<DiscountOverride, DiscountError> {
        let slot = slot_mut(list, scope)?;
        let discount = slot.get_or_insert_with(|| self.defaults.create());
        discount.kind = kind;
        Ok(*discount)
    }

    /// Removes the override for `scope`, returning what was there.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::ScopeNotFound`] if `scope` does not exist.
    pub fn clear(
        list: &mut CommittedList,
        scope: DiscountScope,
    ) -> Result<Option<DiscountOverride>, DiscountError> {
        Ok(slot_mut(list, scope)?.take())
    }
}

fn slot_mut(
    list: &mut CommittedList,
    scope: DiscountScope,
) -> Result<&mut Option<DiscountOverride>, DiscountError> {
    let slot = match scope {
        DiscountScope::Product(index) => list.product_discount_mut(index),
        DiscountScope::Variant(slot) => list.variant_discount_mut(slot),
    };
    slot.ok_or(DiscountError::ScopeNotFound(scope))
}

#[cfg(test)]
mod tests {
    use picker_core::CatalogVariant;

    use super::*;
    use crate::selection::SelectedProduct;

    const FIRST_VARIANT: DiscountScope = DiscountScope::Variant(VariantSlot {
        product: 0,
        variant: 0,
    });
    const SECOND_VARIANT: DiscountScope = DiscountScope::Variant(VariantSlot {
        product: 0,
        variant: 1,
    });

    fn list() -> CommittedList {
        let variants = [11, 12]
            .into_iter()
            .map(|id| CatalogVariant {
                id,
                title: format!("Variant {id}"),
                available: Some(1),
                price: "30.00".to_owned(),
            })
            .collect();
        let mut list = CommittedList::new();
        list.commit_selection(
            vec![
                SelectedProduct {
                    product_id: 1,
                    title: "Shirt".to_owned(),
                    selected_variants: variants,
                },
                SelectedProduct {
                    product_id: 2,
                    title: "Hat".to_owned(),
                    selected_variants: vec![],
                },
            ],
            None,
        );
        list
    }

    fn twenty_percent() -> DiscountOverride {
        DiscountOverride {
            kind: DiscountKind::Percentage,
            value: Decimal::from(20),
        }
    }

    #[test]
    fn no_override_until_created() {
        let list = list();
        assert!(DiscountOverlay::get(&list, DiscountScope::Product(0)).is_none());
        assert!(DiscountOverlay::get(&list, FIRST_VARIANT).is_none());
    }

    #[test]
    fn ensure_creates_default_override() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let created = overlay.ensure(&mut list, DiscountScope::Product(0)).unwrap();
        assert_eq!(created, twenty_percent());
        assert_eq!(
            DiscountOverlay::get(&list, DiscountScope::Product(0)),
            Some(twenty_percent())
        );
    }

    #[test]
    fn ensure_keeps_existing_override() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        overlay
            .set_value(&mut list, DiscountScope::Product(0), Decimal::from(5))
            .unwrap();
        let current = overlay.ensure(&mut list, DiscountScope::Product(0)).unwrap();
        assert_eq!(current.value, Decimal::from(5));
    }

    #[test]
    fn set_value_on_absent_scope_uses_default_kind() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let discount = overlay
            .set_value(&mut list, FIRST_VARIANT, Decimal::from(7))
            .unwrap();
        assert_eq!(discount.kind, DiscountKind::Percentage);
        assert_eq!(discount.value, Decimal::from(7));
    }

    #[test]
    fn set_kind_on_absent_scope_uses_default_value() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let discount = overlay
            .set_kind(&mut list, FIRST_VARIANT, DiscountKind::Flat)
            .unwrap();
        assert_eq!(discount.kind, DiscountKind::Flat);
        assert_eq!(discount.value, Decimal::from(20));
    }

    #[test]
    fn setters_touch_only_their_field() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        overlay
            .set_kind(&mut list, DiscountScope::Product(0), DiscountKind::Flat)
            .unwrap();
        let discount = overlay
            .set_value(&mut list, DiscountScope::Product(0), Decimal::new(45, 1))
            .unwrap();
        assert_eq!(discount.kind, DiscountKind::Flat);
        assert_eq!(discount.value, Decimal::new(45, 1));

        let discount = overlay
            .set_kind(&mut list, DiscountScope::Product(0), DiscountKind::Percentage)
            .unwrap();
        assert_eq!(discount.value, Decimal::new(45, 1));
    }

    #[test]
    fn scopes_are_independent() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        overlay
            .set_value(&mut list, SECOND_VARIANT, Decimal::from(3))
            .unwrap();
        assert!(DiscountOverlay::get(&list, DiscountScope::Product(0)).is_none());
        assert!(DiscountOverlay::get(&list, FIRST_VARIANT).is_none());
        assert!(DiscountOverlay::get(&list, DiscountScope::Product(1)).is_none());
    }

    #[test]
    fn negative_value_is_rejected_without_creating_override() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let result = overlay.set_value(&mut list, DiscountScope::Product(0), Decimal::from(-1));
        assert!(
            matches!(result, Err(DiscountError::NegativeValue(_))),
            "expected NegativeValue, got: {result:?}"
        );
        assert!(DiscountOverlay::get(&list, DiscountScope::Product(0)).is_none());
    }

    #[test]
    fn zero_value_is_accepted() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let discount = overlay
            .set_value_str(&mut list, DiscountScope::Product(0), "0")
            .unwrap();
        assert!(discount.value.is_zero());
    }

    #[test]
    fn set_value_str_parses_decimal_input() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let discount = overlay
            .set_value_str(&mut list, DiscountScope::Product(0), " 12.50 ")
            .unwrap();
        assert_eq!(discount.value, Decimal::new(125, 1));
    }

    #[test]
    fn set_value_str_rejects_garbage() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let result = overlay.set_value_str(&mut list, DiscountScope::Product(0), "ten");
        assert!(
            matches!(result, Err(DiscountError::InvalidValue(ref raw)) if raw == "ten"),
            "expected InvalidValue, got: {result:?}"
        );
    }

    #[test]
    fn unknown_scope_is_reported() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        let missing_variant = DiscountScope::Variant(VariantSlot {
            product: 1,
            variant: 0,
        });
        for scope in [DiscountScope::Product(9), missing_variant] {
            let result = overlay.ensure(&mut list, scope);
            assert!(
                matches!(result, Err(DiscountError::ScopeNotFound(s)) if s == scope),
                "expected ScopeNotFound, got: {result:?}"
            );
        }
    }

    #[test]
    fn clear_returns_scope_to_no_override() {
        let overlay = DiscountOverlay::default();
        let mut list = list();
        overlay.ensure(&mut list, FIRST_VARIANT).unwrap();
        let removed = DiscountOverlay::clear(&mut list, FIRST_VARIANT).unwrap();
        assert_eq!(removed, Some(twenty_percent()));
        assert!(DiscountOverlay::get(&list, FIRST_VARIANT).is_none());
    }

    #[test]
    fn configured_defaults_are_used() {
        let overlay = DiscountOverlay::new(DiscountDefaults {
            kind: DiscountKind::Flat,
            value: Decimal::from(5),
        });
        let mut list = list();
        let created = overlay.ensure(&mut list, DiscountScope::Product(0)).unwrap();
        assert_eq!(created.kind, DiscountKind::Flat);
        assert_eq!(created.value, Decimal::from(5));
    }
}
