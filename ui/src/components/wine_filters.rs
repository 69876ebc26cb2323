use payloads::filters::{
    WineFilters, parse_price, parse_vintage, parse_winery_id,
};
use rust_decimal::Decimal;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::CatalogOptions;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub filters: WineFilters,
    pub options: CatalogOptions,
    /// Receives the complete new criteria after every edit.
    pub on_change: Callback<WineFilters>,
    /// Search, winery and variety only.
    #[prop_or(false)]
    pub compact: bool,
}

const FIELD: &str = "w-full px-3 py-2 border border-stone-300 rounded-md \
                     text-sm bg-white focus:outline-none focus:ring-2 \
                     focus:ring-rose-700";
const LABEL: &str = "block text-xs font-medium text-stone-600 mb-1";

#[function_component]
pub fn WineFilterPanel(props: &Props) -> Html {
    let filters = &props.filters;

    // One callback per field, each producing a full copy of the criteria.
    let edit = |apply: fn(&mut WineFilters, String)| {
        let filters = filters.clone();
        let on_change = props.on_change.clone();
        move |value: String| {
            let mut next = filters.clone();
            apply(&mut next, value);
            on_change.emit(next);
        }
    };

    let on_search = {
        let edit = edit(|f, v| f.search = v);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };
    let select = |apply: fn(&mut WineFilters, String)| {
        let edit = edit(apply);
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit(select.value());
        })
    };
    let price = |apply: fn(&mut WineFilters, String)| {
        let edit = edit(apply);
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };

    let on_variety =
        select(|f, v| f.variety = Some(v).filter(|v| !v.is_empty()));
    let on_vintage = select(|f, v| f.vintage = parse_vintage(&v));
    let on_winery = select(|f, v| f.winery_id = parse_winery_id(&v));
    let on_min_price = price(|f, v| f.min_price = parse_price(&v));
    let on_max_price = price(|f, v| f.max_price = parse_price(&v));

    let on_clear = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_change.emit(WineFilters::default())
        })
    };

    let active = filters.active_count();
    let price_text =
        |price: Option<Decimal>| price.map(|p| p.to_string()).unwrap_or_default();
    let selected_variety = filters.variety.clone().unwrap_or_default();

    html! {
        <div class="bg-white rounded-lg border border-stone-200 p-4 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-sm font-semibold text-stone-800">
                    {"Filters"}
                    if active > 0 {
                        <span class="ml-2 px-2 py-0.5 rounded-full text-xs \
                                     bg-rose-100 text-rose-900">
                            {active}
                        </span>
                    }
                </h2>
                if active > 0 {
                    <button
                        onclick={on_clear}
                        class="text-sm text-rose-800 hover:underline"
                    >
                        {"Clear filters"}
                    </button>
                }
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                <div>
                    <label for="filter-search" class={LABEL}>{"Search"}</label>
                    <input
                        id="filter-search"
                        type="search"
                        placeholder="Wine name"
                        value={filters.search.clone()}
                        oninput={on_search}
                        class={FIELD}
                    />
                </div>

                <div>
                    <label for="filter-winery" class={LABEL}>{"Winery"}</label>
                    <select id="filter-winery" onchange={on_winery} class={FIELD}>
                        <option value="" selected={filters.winery_id.is_none()}>
                            {"All wineries"}
                        </option>
                        {for props.options.wineries.iter().map(|winery| html! {
                            <option
                                value={winery.id.to_string()}
                                selected={filters.winery_id == Some(winery.id)}
                            >
                                {&winery.name}
                            </option>
                        })}
                    </select>
                </div>

                <div>
                    <label for="filter-variety" class={LABEL}>{"Variety"}</label>
                    <select id="filter-variety" onchange={on_variety} class={FIELD}>
                        <option value="" selected={selected_variety.is_empty()}>
                            {"All varieties"}
                        </option>
                        {for props.options.varieties.iter().map(|variety| html! {
                            <option
                                value={variety.clone()}
                                selected={*variety == selected_variety}
                            >
                                {variety}
                            </option>
                        })}
                    </select>
                </div>

                if !props.compact {
                    <div>
                        <label for="filter-vintage" class={LABEL}>{"Vintage"}</label>
                        <select id="filter-vintage" onchange={on_vintage} class={FIELD}>
                            <option value="" selected={filters.vintage.is_none()}>
                                {"Any vintage"}
                            </option>
                            {for props.options.vintages.iter().map(|vintage| html! {
                                <option
                                    value={vintage.to_string()}
                                    selected={filters.vintage.as_ref() == Some(vintage)}
                                >
                                    {vintage.to_string()}
                                </option>
                            })}
                        </select>
                    </div>

                    <div>
                        <label for="filter-min-price" class={LABEL}>
                            {"Min price ($)"}
                        </label>
                        <input
                            id="filter-min-price"
                            type="number"
                            min="0"
                            step="0.01"
                            value={price_text(filters.min_price)}
                            onchange={on_min_price}
                            class={FIELD}
                        />
                    </div>

                    <div>
                        <label for="filter-max-price" class={LABEL}>
                            {"Max price ($)"}
                        </label>
                        <input
                            id="filter-max-price"
                            type="number"
                            min="0"
                            step="0.01"
                            value={price_text(filters.max_price)}
                            onchange={on_max_price}
                            class={FIELD}
                        />
                    </div>
                }
            </div>
        </div>
    }
}
