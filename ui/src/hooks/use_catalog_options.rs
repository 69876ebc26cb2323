use payloads::{Vintage, Winery};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

/// Choices offered by the filter selects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogOptions {
    pub varieties: Vec<String>,
    pub vintages: Vec<Vintage>,
    pub wineries: Vec<Winery>,
}

#[hook]
pub fn use_catalog_options() -> FetchHookReturn<CatalogOptions> {
    use_fetch((), || async {
        let client = get_api_client();
        let (varieties, vintages, wineries) = futures::join!(
            client.list_varieties(),
            client.list_vintages(),
            client.list_wineries(),
        );
        Ok(CatalogOptions {
            varieties: varieties?.names(),
            vintages: vintages?.years(),
            wineries: wineries?.wineries,
        })
    })
}

/// Active wineries sorted by name.
#[hook]
pub fn use_wineries() -> FetchHookReturn<Vec<Winery>> {
    use_fetch((), || async {
        Ok(get_api_client().list_wineries().await?.wineries)
    })
}
