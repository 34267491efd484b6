use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Value given to a discount override when it is first created.
pub const DEFAULT_DISCOUNT_VALUE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Value is a percentage off the price.
    #[default]
    Percentage,
    /// Value is a fixed amount off the price.
    Flat,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for DiscountKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" => Ok(DiscountKind::Percentage),
            "flat" => Ok(DiscountKind::Flat),
            other => Err(CoreError::InvalidDiscountKind(other.to_string())),
        }
    }
}

/// A discount attached to a committed product or to one of its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOverride {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// The `{type, value}` pair a new override starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountDefaults {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl Default for DiscountDefaults {
    fn default() -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value: DEFAULT_DISCOUNT_VALUE,
        }
    }
}

impl DiscountDefaults {
    #[must_use]
    pub fn create(&self) -> DiscountOverride {
        DiscountOverride {
            kind: self.kind,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_override_is_twenty_percent() {
        let created = DiscountDefaults::default().create();
        assert_eq!(created.kind, DiscountKind::Percentage);
        assert_eq!(created.value, Decimal::from(20));
    }

    #[test]
    fn discount_kind_parses_case_insensitively() {
        assert_eq!("Flat".parse::<DiscountKind>().unwrap(), DiscountKind::Flat);
        assert_eq!(
            " percentage ".parse::<DiscountKind>().unwrap(),
            DiscountKind::Percentage
        );
    }

    #[test]
    fn discount_kind_rejects_unknown_value() {
        let err = "bogo".parse::<DiscountKind>().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidDiscountKind(ref v) if v == "bogo"),
            "expected InvalidDiscountKind, got: {err:?}"
        );
    }

    #[test]
    fn override_serializes_kind_as_type_field() {
        let json = serde_json::to_value(DiscountDefaults::default().create()).unwrap();
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["value"], 20.0);
    }

    #[test]
    fn override_value_round_trips_as_json_number() {
        let parsed: DiscountOverride =
            serde_json::from_str(r#"{"type": "flat", "value": 12.5}"#).unwrap();
        assert_eq!(parsed.kind, DiscountKind::Flat);
        assert_eq!(parsed.value, Decimal::new(125, 1));

        let json = serde_json::to_value(parsed).unwrap();
        assert!(json["value"].is_number());
    }
}
