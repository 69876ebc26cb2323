use payloads::filters::WineFilters;
use payloads::pagination::{Pagination, SHOW_ALL_PAGE_SIZE};
use payloads::requests::AdminWineQuery;
use payloads::{Decision, Transition, Wine, WineId, WineStatus};
use std::collections::BTreeSet;
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::AdminRoute;
use crate::components::{LoadError, PaginationControls, WineFilterPanel};
use crate::contexts::{use_session, use_toast};
use crate::hooks::{CatalogOptions, use_title, use_wineries};
use crate::moderation::confirmation_prompt;
use crate::processing::{TaskKind, TaskRegistry};
use crate::state::AdminStats;
use crate::utils::{alert, confirm, describe_error, report_failure};

/// Every wine the admin can see, filtered in the browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WineTable {
    pub wines: Vec<Wine>,
    /// Status the backend filtered the list by, if any.
    pub status: Option<WineStatus>,
    pub filters: WineFilters,
    pub pagination: Pagination,
}

pub enum TableAction {
    Loaded(Vec<Wine>, Option<WineStatus>),
    Filter(WineFilters),
    Page(Pagination),
    Decided(WineId, Transition),
    Deleted(WineId),
}

impl Reducible for WineTable {
    type Action = TableAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut table = (*self).clone();
        match action {
            TableAction::Loaded(wines, status) => {
                table.wines = wines;
                table.status = status;
                table.pagination.reset();
            }
            TableAction::Filter(filters) => {
                table.filters = filters;
                table.pagination.reset();
            }
            TableAction::Page(pagination) => table.pagination = pagination,
            TableAction::Decided(id, Transition::To(status))
                if table.status.is_some_and(|shown| shown != status) =>
            {
                table.wines.retain(|wine| wine.id != id);
            }
            TableAction::Decided(id, Transition::To(status)) => {
                if let Some(wine) = table.wines.iter_mut().find(|w| w.id == id)
                {
                    wine.status = status;
                }
            }
            TableAction::Decided(id, Transition::Removed)
            | TableAction::Deleted(id) => {
                table.wines.retain(|wine| wine.id != id);
            }
        }
        Rc::new(table)
    }
}

impl WineTable {
    pub fn visible(&self) -> Vec<&Wine> {
        self.filters.apply(&self.wines)
    }

    /// Distinct varieties across the loaded wines, for the filter select.
    pub fn varieties(&self) -> Vec<String> {
        self.wines
            .iter()
            .filter_map(|wine| wine.variety.clone())
            .filter(|variety| !variety.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[function_component]
pub fn AdminWinesPage() -> Html {
    use_title("Manage wines");
    let session = use_session();
    let toasts = use_toast();
    let wineries = use_wineries();
    let table = use_reducer(WineTable::default);
    let (_, stats) = use_store::<AdminStats>();
    let status_filter = use_state(|| None::<WineStatus>);
    let load_error = use_state(|| None::<String>);
    let is_loading = use_state(|| true);
    let redraw = use_force_update();
    let tasks = use_memo((), move |_| {
        TaskRegistry::<WineId>::with_on_change(move || redraw.force_update())
    });

    let load = {
        let table = table.clone();
        let load_error = load_error.clone();
        let is_loading = is_loading.clone();
        let session = session.clone();
        use_callback(*status_filter, move |_, status| {
            let Some(client) = session.client() else {
                return;
            };
            let query = AdminWineQuery {
                status: *status,
                limit: Some(SHOW_ALL_PAGE_SIZE),
                ..Default::default()
            };
            let table = table.clone();
            let load_error = load_error.clone();
            let is_loading = is_loading.clone();
            let status = *status;
            yew::platform::spawn_local(async move {
                is_loading.set(true);
                load_error.set(None);
                match client.list_all_wines_admin(&query).await {
                    Ok(list) => {
                        table.dispatch(TableAction::Loaded(list.wines, status))
                    }
                    Err(e) => {
                        tracing::error!("Loading wines failed: {e}");
                        load_error.set(Some(describe_error(&e)));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    {
        let load = load.clone();
        use_effect_with(*status_filter, move |_| load.emit(()));
    }

    let on_status_filter = {
        let status_filter = status_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            status_filter.set(select.value().parse().ok());
        })
    };
    let on_filters = {
        let table = table.clone();
        Callback::from(move |filters| table.dispatch(TableAction::Filter(filters)))
    };
    let on_page = {
        let table = table.clone();
        Callback::from(move |page| table.dispatch(TableAction::Page(page)))
    };

    let on_decide = {
        let table = table.clone();
        let tasks = tasks.clone();
        let session = session.clone();
        let toasts = toasts.clone();
        let stats = stats.clone();
        Callback::from(move |(wine, decision): (Wine, Decision)| {
            let transition = match wine.status.apply(decision) {
                Ok(transition) => transition,
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };
            if let Some(prompt) = confirmation_prompt(decision, &wine.name)
                && !confirm(&prompt)
            {
                return;
            }
            let Some(client) = session.client() else {
                return;
            };
            let Ok(guard) = tasks.try_begin(wine.id, TaskKind::Updating) else {
                return;
            };
            let table = table.clone();
            let toasts = toasts.clone();
            let stats = stats.clone();
            yew::platform::spawn_local(async move {
                let _guard = guard;
                match client.moderate(wine.id, decision).await {
                    Ok(outcome) => {
                        table.dispatch(TableAction::Decided(wine.id, transition));
                        stats.reduce_mut(|s| s.record(wine.status, transition));
                        toasts.success(outcome.message);
                    }
                    Err(e) => report_failure(decision.label(), &e),
                }
            });
        })
    };

    let on_delete = {
        let table = table.clone();
        let tasks = tasks.clone();
        let session = session.clone();
        let toasts = toasts.clone();
        let stats = stats.clone();
        Callback::from(move |wine: Wine| {
            let prompt = format!(
                "Delete \"{}\"? This cannot be undone.",
                wine.name
            );
            if !confirm(&prompt) {
                return;
            }
            let Some(client) = session.client() else {
                return;
            };
            let Ok(guard) = tasks.try_begin(wine.id, TaskKind::Deleting) else {
                return;
            };
            let table = table.clone();
            let toasts = toasts.clone();
            let stats = stats.clone();
            yew::platform::spawn_local(async move {
                let _guard = guard;
                match client.delete_wine(wine.id).await {
                    Ok(response) => {
                        table.dispatch(TableAction::Deleted(wine.id));
                        stats.reduce_mut(|s| {
                            s.record(wine.status, Transition::Removed)
                        });
                        toasts.success(response.message);
                    }
                    Err(e) => report_failure("Deleting", &e),
                }
            });
        })
    };

    let visible = table.visible();
    let total = visible.len() as u64;
    let rows = table.pagination.slice(&visible);
    let options = CatalogOptions {
        varieties: table.varieties(),
        vintages: Vec::new(),
        wineries: wineries.data.as_ref().cloned().unwrap_or_default(),
    };

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-2xl font-bold text-stone-900">{"Wines"}</h1>
                <div class="flex items-center gap-3">
                    <label for="status-filter" class="text-sm text-stone-600">
                        {"Status"}
                    </label>
                    <select
                        id="status-filter"
                        onchange={on_status_filter}
                        class="border border-stone-300 rounded-md text-sm px-2 py-1"
                    >
                        <option value="" selected={status_filter.is_none()}>
                            {"All"}
                        </option>
                        {for WineStatus::ALL.iter().map(|status| html! {
                            <option
                                value={status.to_string()}
                                selected={*status_filter == Some(*status)}
                            >
                                {status.label()}
                            </option>
                        })}
                    </select>
                    <Link<AdminRoute>
                        to={AdminRoute::NewWine}
                        classes="px-4 py-2 rounded-md text-sm font-medium text-white bg-rose-900 hover:bg-rose-800"
                    >
                        {"Add wine"}
                    </Link<AdminRoute>>
                </div>
            </div>

            <WineFilterPanel
                filters={table.filters.clone()}
                options={options}
                on_change={on_filters}
                compact={true}
            />

            if let Some(error) = &*load_error {
                <LoadError
                    message={format!("Error loading wines: {error}")}
                    on_retry={load.clone()}
                />
            } else if *is_loading && table.wines.is_empty() {
                <p class="text-center py-12 text-stone-600">{"Loading wines..."}</p>
            } else if rows.is_empty() {
                <p class="text-center py-12 text-stone-600">
                    {"No wines match these filters."}
                </p>
            } else {
                <div class="bg-white rounded-lg border border-stone-200 overflow-x-auto">
                    <table class="min-w-full divide-y divide-stone-200 text-sm">
                        <thead class="bg-stone-50 text-left text-stone-600">
                            <tr>
                                <th class="px-4 py-3">{"Wine"}</th>
                                <th class="px-4 py-3">{"Winery"}</th>
                                <th class="px-4 py-3">{"Price"}</th>
                                <th class="px-4 py-3">{"Status"}</th>
                                <th class="px-4 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-stone-100">
                            {for rows.iter().map(|wine| html! {
                                <WineRow
                                    key={wine.id.0}
                                    wine={(*wine).clone()}
                                    busy={tasks.kind(&wine.id)}
                                    on_decide={on_decide.clone()}
                                    on_delete={on_delete.clone()}
                                />
                            })}
                        </tbody>
                    </table>
                </div>
            }

            <PaginationControls
                pagination={table.pagination}
                total={total}
                on_change={on_page}
                is_loading={*is_loading}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct WineRowProps {
    wine: Wine,
    busy: Option<TaskKind>,
    on_decide: Callback<(Wine, Decision)>,
    on_delete: Callback<Wine>,
}

#[function_component]
fn WineRow(props: &WineRowProps) -> Html {
    let wine = &props.wine;

    let status_badge = match wine.status {
        WineStatus::Pending => "bg-amber-100 text-amber-800",
        WineStatus::Live => "bg-emerald-100 text-emerald-800",
        WineStatus::Archived => "bg-stone-200 text-stone-700",
    };

    let on_delete = {
        let on_delete = props.on_delete.clone();
        let wine = wine.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(wine.clone()))
    };

    html! {
        <tr>
            <td class="px-4 py-3">
                <p class="font-medium text-stone-900">{&wine.name}</p>
                <p class="text-xs text-stone-500">
                    {[wine.variety.clone(), wine.vintage.as_ref().map(ToString::to_string)]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" · ")}
                </p>
            </td>
            <td class="px-4 py-3">{&wine.winery.name}</td>
            <td class="px-4 py-3">{wine.price_label().unwrap_or_default()}</td>
            <td class="px-4 py-3">
                <span class={classes!("px-2", "py-0.5", "rounded-full", "text-xs", status_badge)}>
                    {wine.status.label()}
                </span>
            </td>
            <td class="px-4 py-3 whitespace-nowrap space-x-2 text-right">
                if let Some(kind) = props.busy {
                    <span class="text-xs text-stone-500">{kind.label()}</span>
                } else {
                    {for wine.status.available_decisions().into_iter().map(|decision| {
                        let on_decide = props.on_decide.clone();
                        let wine = wine.clone();
                        html! {
                            <button
                                onclick={Callback::from(move |_: MouseEvent| {
                                    on_decide.emit((wine.clone(), decision))
                                })}
                                class="text-xs font-medium text-rose-800 hover:underline"
                            >
                                {decision.label()}
                            </button>
                        }
                    })}
                    <Link<AdminRoute>
                        to={AdminRoute::EditWine { id: wine.id.0 }}
                        classes="text-xs font-medium text-stone-700 hover:underline"
                    >
                        {"Edit"}
                    </Link<AdminRoute>>
                    <button
                        onclick={on_delete}
                        class="text-xs font-medium text-red-700 hover:underline"
                    >
                        {"Delete"}
                    </button>
                }
            </td>
        </tr>
    }
}
