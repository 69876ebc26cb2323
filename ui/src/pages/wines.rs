use payloads::ClientError;
use payloads::filters::WineFilters;
use payloads::pagination::{Pagination, ShowingRange};
use payloads::responses::WineList;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{PaginationControls, WineCard, WineFilterPanel};
use crate::hooks::{use_catalog_options, use_fetch, use_title};
use crate::{BrowseState, get_api_client};

/// A fetched list together with the cursor that requested it.
///
/// While the next page loads, the previous one stays on screen, and its
/// controls must describe the rows actually shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedPage {
    pub pagination: Pagination,
    pub list: WineList,
}

impl ListedPage {
    pub fn showing(&self) -> ShowingRange {
        self.pagination.window(self.list.total)
    }
}

/// Public wine list. Criteria and page travel to the server as query
/// parameters and the list is fetched again on every change.
#[function_component]
pub fn WinesPage() -> Html {
    use_title("Wines");
    let (state, dispatch) = use_store::<BrowseState>();
    let options = use_catalog_options();

    let query = state.query();
    let wines = {
        let query = query.clone();
        let pagination = *state.pagination();
        use_fetch(query.clone(), move || {
            let query = query.clone();
            async move {
                let list = get_api_client().list_wines(&query).await?;
                Ok::<_, ClientError>(ListedPage { pagination, list })
            }
        })
    };

    // A stale offset past the end of a shrunken result set would show an
    // empty page; pull it back to the last page.
    {
        let dispatch = dispatch.clone();
        let total = wines.data.as_ref().map(|page| page.list.total);
        use_effect_with(total, move |total| {
            if let Some(total) = *total {
                dispatch.reduce_mut(|s| {
                    s.update_pagination(|p| {
                        p.clamp_to(total);
                    })
                });
            }
        });
    }

    let on_filters = dispatch.reduce_mut_callback_with(
        |s, filters: WineFilters| s.update_filters(|f| *f = filters),
    );
    let on_page = dispatch.reduce_mut_callback_with(
        |s, pagination: Pagination| s.update_pagination(|p| *p = pagination),
    );

    let is_loading = wines.is_loading;

    html! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-stone-900">{"Wines"}</h1>

            <WineFilterPanel
                filters={state.filters().clone()}
                options={options.data.as_ref().cloned().unwrap_or_default()}
                on_change={on_filters}
            />

            {wines.render("wines", move |page: &ListedPage, _, error| {
                let list = &page.list;
                html! {
                <>
                    if let Some(error) = error {
                        <p class="text-sm text-red-700">{error}</p>
                    }
                    if list.wines.is_empty() {
                        <p class="text-stone-600 py-8 text-center">
                            {"No wines match these filters."}
                        </p>
                    } else {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {for list.wines.iter().map(|wine| html! {
                                <WineCard key={wine.id.0} wine={wine.clone()} />
                            })}
                        </div>
                    }
                    <PaginationControls
                        pagination={page.pagination}
                        total={list.total}
                        on_change={on_page.clone()}
                        is_loading={is_loading}
                    />
                </>
                }
            })}
        </div>
    }
}
