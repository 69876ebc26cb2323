pub mod use_catalog_options;
pub mod use_fetch;
pub mod use_title;

pub use use_catalog_options::{
    CatalogOptions, use_catalog_options, use_wineries,
};
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_title::use_title;

/// Distinguishes "not loaded yet" from "loaded and empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchState::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            FetchState::NotFetched => None,
            FetchState::Fetched(data) => Some(data),
        }
    }
}
