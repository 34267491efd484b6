use std::time::Duration;

use crate::discount::DiscountDefaults;

/// What `materialize` does with a variant-less product whose parent
/// checkbox is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyProductPolicy {
    /// Omit it: only products with at least one selected variant are emitted.
    #[default]
    Drop,
    /// Emit it with an empty variant list.
    Include,
}

impl std::fmt::Display for EmptyProductPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyProductPolicy::Drop => write!(f, "drop"),
            EmptyProductPolicy::Include => write!(f, "include"),
        }
    }
}

#[derive(Clone)]
pub struct PickerConfig {
    pub api_url: String,
    pub api_key: String,
    pub page_size: u32,
    pub scroll_debounce_ms: u64,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub discount_defaults: DiscountDefaults,
    pub empty_product_policy: EmptyProductPolicy,
    pub log_level: String,
}

impl PickerConfig {
    #[must_use]
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl std::fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[redacted]")
            .field("page_size", &self.page_size)
            .field("scroll_debounce_ms", &self.scroll_debounce_ms)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("discount_defaults", &self.discount_defaults)
            .field("empty_product_policy", &self.empty_product_policy)
            .field("log_level", &self.log_level)
            .finish()
    }
}
