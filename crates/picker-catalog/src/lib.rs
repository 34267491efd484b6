pub mod client;
pub mod debounce;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod paginator;
pub mod source;
pub mod types;

pub use client::CatalogClient;
pub use debounce::Debouncer;
pub use error::CatalogError;
pub use feed::CatalogFeed;
pub use normalize::normalize_product;
pub use paginator::{
    CursorStatus, FetchedPage, PageOutcome, PageRequest, PaginationCursor, RequestTag, SearchPaginator,
};
pub use source::CatalogSource;
pub use types::{WireImage, WireProduct, WireVariant};
