pub mod app_config;
pub mod catalog;
pub mod config;
pub mod discount;

pub use app_config::{EmptyProductPolicy, PickerConfig};
pub use catalog::{CatalogProduct, CatalogVariant};
pub use config::{build_picker_config, load_picker_config, load_picker_config_from_env};
pub use discount::{DiscountDefaults, DiscountKind, DiscountOverride, DEFAULT_DISCOUNT_VALUE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid discount type: {0} (expected \"percentage\" or \"flat\")")]
    InvalidDiscountKind(String),
}
