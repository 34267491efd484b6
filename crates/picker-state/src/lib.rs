pub mod committed;
pub mod discount;
pub mod selection;
pub mod session;

pub use committed::{
    CommittedList, CommittedListEntry, CommittedVariant, ListAction, VariantSlot,
    PLACEHOLDER_TITLE,
};
pub use discount::{DiscountError, DiscountOverlay, DiscountScope};
pub use selection::{SelectedProduct, SelectionEntry, SelectionState};
pub use session::ProductPicker;
