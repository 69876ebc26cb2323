use payloads::pagination::{PAGE_SIZE_OPTIONS, Pagination};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub pagination: Pagination,
    /// Number of rows matching the current criteria.
    pub total: u64,
    pub on_change: Callback<Pagination>,
    #[prop_or(false)]
    pub is_loading: bool,
}

#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let Props {
        pagination,
        total,
        is_loading,
        ..
    } = *props;

    if total == 0 {
        return html! {};
    }

    let emit = |change: fn(&mut Pagination, u64)| {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = pagination;
            change(&mut next, total);
            on_change.emit(next);
        })
    };
    let on_previous = emit(|p, _| {
        p.previous();
    });
    let on_next = emit(|p, total| {
        p.next(total);
    });
    let on_show_all = emit(|p, _| p.enable_show_all());
    let on_paged = emit(|p, _| p.reset());

    let on_page_size = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(limit) = select.value().parse() {
                let mut next = pagination;
                next.set_limit(limit);
                on_change.emit(next);
            }
        })
    };

    let prev_disabled = !pagination.has_previous() || is_loading;
    let next_disabled = !pagination.has_next(total) || is_loading;

    let button_class = |disabled: bool| {
        if disabled {
            "px-4 py-2 border border-stone-300 rounded-md text-sm \
             font-medium text-stone-400 bg-stone-100 cursor-not-allowed"
        } else {
            "px-4 py-2 border border-stone-300 rounded-md text-sm \
             font-medium text-stone-700 bg-white hover:bg-stone-50 \
             transition-colors duration-200"
        }
    };

    html! {
        <div class="flex flex-wrap items-center justify-between gap-4 mt-6 \
                    pt-4 border-t border-stone-200">
            <span class="text-sm text-stone-600">
                {pagination.window(total).to_string()}
            </span>

            if pagination.is_show_all() {
                <button onclick={on_paged} class={button_class(false)}>
                    {"Show pages"}
                </button>
            } else {
                <div class="flex items-center gap-2">
                    <button
                        onclick={on_previous}
                        disabled={prev_disabled}
                        class={button_class(prev_disabled)}
                    >
                        {"Previous"}
                    </button>
                    <span class="text-sm text-stone-600">
                        {format!(
                            "Page {} of {}",
                            pagination.current_page(),
                            pagination.total_pages(total)
                        )}
                    </span>
                    <button
                        onclick={on_next}
                        disabled={next_disabled}
                        class={button_class(next_disabled)}
                    >
                        {"Next"}
                    </button>
                </div>
                <div class="flex items-center gap-2">
                    <label class="text-sm text-stone-600" for="page-size">
                        {"Per page"}
                    </label>
                    <select
                        id="page-size"
                        onchange={on_page_size}
                        class="border border-stone-300 rounded-md text-sm px-2 py-1"
                    >
                        {for PAGE_SIZE_OPTIONS.iter().map(|size| html! {
                            <option
                                value={size.to_string()}
                                selected={*size == pagination.limit()}
                            >
                                {size}
                            </option>
                        })}
                    </select>
                    <button onclick={on_show_all} class={button_class(false)}>
                        {"Show all"}
                    </button>
                </div>
            }
        </div>
    }
}
