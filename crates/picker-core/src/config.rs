use rust_decimal::Decimal;

use crate::app_config::{EmptyProductPolicy, PickerConfig};
use crate::discount::{DiscountDefaults, DiscountKind};
use crate::ConfigError;

/// Load picker configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_picker_config() -> Result<PickerConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_picker_config_from_env()
}

/// Load picker configuration from environment variables already in the process.
///
/// Unlike [`load_picker_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_picker_config_from_env() -> Result<PickerConfig, ConfigError> {
    build_picker_config(|key| std::env::var(key))
}

/// Build picker configuration using the provided env-var lookup function.
///
/// The parsing and validation logic lives here, decoupled from the process
/// environment so tests can drive it with a plain `HashMap`.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn build_picker_config<F>(lookup: F) -> Result<PickerConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let api_url = require("PICKER_API_URL")?;
    let api_key = require("PICKER_API_KEY")?;

    let page_size = parse_u32("PICKER_PAGE_SIZE", "5")?;
    if page_size == 0 {
        return Err(invalid("PICKER_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let scroll_debounce_ms = parse_u64("PICKER_SCROLL_DEBOUNCE_MS", "300")?;
    let fetch_timeout_secs = parse_u64("PICKER_FETCH_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("PICKER_USER_AGENT", "picker/0.1 (product-picker)");
    let log_level = or_default("PICKER_LOG_LEVEL", "info");

    let discount_value = parse_discount_value(&or_default("PICKER_DEFAULT_DISCOUNT_VALUE", "20"))
        .map_err(|reason| invalid("PICKER_DEFAULT_DISCOUNT_VALUE", reason))?;
    let empty_product_policy =
        parse_empty_product_policy(&or_default("PICKER_EMPTY_PRODUCT_POLICY", "drop"))
            .map_err(|reason| invalid("PICKER_EMPTY_PRODUCT_POLICY", reason))?;

    Ok(PickerConfig {
        api_url,
        api_key,
        page_size,
        scroll_debounce_ms,
        fetch_timeout_secs,
        user_agent,
        discount_defaults: DiscountDefaults {
            kind: DiscountKind::Percentage,
            value: discount_value,
        },
        empty_product_policy,
        log_level,
    })
}

fn parse_discount_value(raw: &str) -> Result<Decimal, String> {
    let value = raw.trim().parse::<Decimal>().map_err(|e| e.to_string())?;
    if value.is_sign_negative() {
        return Err(format!("discount value must not be negative, got {value}"));
    }
    Ok(value)
}

fn parse_empty_product_policy(raw: &str) -> Result<EmptyProductPolicy, String> {
    match raw.trim() {
        "drop" => Ok(EmptyProductPolicy::Drop),
        "include" => Ok(EmptyProductPolicy::Include),
        other => Err(format!("expected \"drop\" or \"include\", got \"{other}\"")),
    }
}
