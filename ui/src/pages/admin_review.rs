use payloads::pagination::SHOW_ALL_PAGE_SIZE;
use payloads::requests::PendingQuery;
use payloads::{Decision, Wine, WineId};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{LoadError, StatsTiles};
use crate::contexts::{use_session, use_toast};
use crate::hooks::use_title;
use crate::moderation::{
    BoardAction, ModerationBoard, WineDraft, confirmation_prompt,
};
use crate::processing::{TaskKind, TaskRegistry};
use crate::state::AdminStats;
use crate::utils::time::format_optional_date;
use crate::utils::{alert, confirm, describe_error, report_failure};

#[derive(Clone, PartialEq)]
enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[function_component]
pub fn AdminReviewPage() -> Html {
    use_title("Review");
    let session = use_session();
    let toasts = use_toast();
    let board = use_reducer(ModerationBoard::default);
    let status = use_state(|| LoadStatus::Loading);
    let (_, stats_dispatch) = use_store::<AdminStats>();
    let redraw = use_force_update();
    let tasks = use_memo((), move |_| {
        TaskRegistry::<WineId>::with_on_change(move || redraw.force_update())
    });

    // Pending list and counts load together; the table appears only once
    // both have arrived.
    let load = {
        let board = board.clone();
        let status = status.clone();
        let session = session.clone();
        use_callback((), move |_, _| {
            let Some(client) = session.client() else {
                return;
            };
            let board = board.clone();
            let status = status.clone();
            yew::platform::spawn_local(async move {
                status.set(LoadStatus::Loading);
                let query = PendingQuery {
                    limit: Some(SHOW_ALL_PAGE_SIZE),
                    ..Default::default()
                };
                let (pending, stats) = futures::join!(
                    client.list_pending(&query),
                    client.get_stats()
                );
                match (pending, stats) {
                    (Ok(pending), Ok(stats)) => {
                        board.dispatch(BoardAction::Loaded {
                            pending: pending.wines,
                            stats: stats.counts(),
                        });
                        status.set(LoadStatus::Ready);
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::error!("Loading review queue failed: {e}");
                        status.set(LoadStatus::Failed(describe_error(&e)));
                    }
                }
            });
        })
    };

    {
        let load = load.clone();
        use_effect_with((), move |_| load.emit(()));
    }

    // Keep the tab badge in step with the board.
    {
        let ready = *status == LoadStatus::Ready;
        use_effect_with((ready, board.stats), move |(ready, stats)| {
            if *ready {
                let stats = *stats;
                stats_dispatch.reduce_mut(|s| s.counts = Some(stats));
            }
        });
    }

    let on_decide = {
        let board = board.clone();
        let tasks = tasks.clone();
        let session = session.clone();
        let toasts = toasts.clone();
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
            let kind = match decision {
                Decision::Approve => TaskKind::Approving,
                Decision::Reject => TaskKind::Rejecting,
                Decision::Archive | Decision::Requeue => TaskKind::Updating,
            };
            let guard = match tasks.try_begin(wine.id, kind) {
                Ok(guard) => guard,
                Err(busy) => {
                    toasts.error(busy.to_string());
                    return;
                }
            };

            let board = board.clone();
            let toasts = toasts.clone();
            yew::platform::spawn_local(async move {
                let _guard = guard;
                match client.moderate(wine.id, decision).await {
                    Ok(outcome) => {
                        board.dispatch(BoardAction::Decided(
                            wine.id, transition,
                        ));
                        toasts.success(outcome.message);
                    }
                    Err(e) => report_failure(decision.label(), &e),
                }
            });
        })
    };

    let on_save = {
        let board = board.clone();
        let tasks = tasks.clone();
        let session = session.clone();
        let toasts = toasts.clone();
        Callback::from(move |draft: WineDraft| {
            let update = match draft.to_update() {
                Ok(update) => update,
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };
            let Some(client) = session.client() else {
                return;
            };
            let guard = match tasks.try_begin(draft.wine_id, TaskKind::Saving)
            {
                Ok(guard) => guard,
                Err(busy) => {
                    toasts.error(busy.to_string());
                    return;
                }
            };

            let board = board.clone();
            let toasts = toasts.clone();
            yew::platform::spawn_local(async move {
                let _guard = guard;
                match client.update_wine(draft.wine_id, &update).await {
                    Ok(response) => {
                        board.dispatch(BoardAction::Saved(
                            draft.wine_id,
                            update,
                        ));
                        toasts.success(response.message);
                    }
                    Err(e) => report_failure("Saving", &e),
                }
            });
        })
    };

    let on_edit = {
        let board = board.clone();
        Callback::from(move |wine: Wine| {
            board.dispatch(BoardAction::BeginEdit(wine))
        })
    };
    let on_draft = {
        let board = board.clone();
        Callback::from(move |draft: WineDraft| {
            board.dispatch(BoardAction::EditDraft(draft))
        })
    };
    let on_cancel = {
        let board = board.clone();
        Callback::from(move |_: ()| board.dispatch(BoardAction::CancelEdit))
    };

    let content = match &*status {
        LoadStatus::Failed(message) => html! {
            <LoadError
                message={format!("Error loading review queue: {message}")}
                on_retry={load.clone()}
            />
        },
        LoadStatus::Loading => html! {
            <p class="text-center py-12 text-stone-600">
                {"Loading review queue..."}
            </p>
        },
        LoadStatus::Ready if board.pending.is_empty() => html! {
            <>
                <StatsTiles counts={board.stats} />
                <p class="text-center py-12 text-stone-600">
                    {"Nothing waiting for review."}
                </p>
            </>
        },
        LoadStatus::Ready => html! {
            <>
                <StatsTiles counts={board.stats} />
                <div class="bg-white rounded-lg border border-stone-200 overflow-x-auto">
                    <table class="min-w-full divide-y divide-stone-200 text-sm">
                        <thead class="bg-stone-50 text-left text-stone-600">
                            <tr>
                                <th class="px-4 py-3">{"Wine"}</th>
                                <th class="px-4 py-3">{"Winery"}</th>
                                <th class="px-4 py-3">{"Variety"}</th>
                                <th class="px-4 py-3">{"Vintage"}</th>
                                <th class="px-4 py-3">{"Price"}</th>
                                <th class="px-4 py-3">{"Submitted"}</th>
                                <th class="px-4 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-stone-100">
                            {for board.pending.iter().map(|wine| {
                                let draft = board
                                    .editing
                                    .clone()
                                    .filter(|d| d.wine_id == wine.id);
                                html! {
                                    <PendingRow
                                        key={wine.id.0}
                                        wine={wine.clone()}
                                        draft={draft}
                                        busy={tasks.kind(&wine.id)}
                                        on_decide={on_decide.clone()}
                                        on_edit={on_edit.clone()}
                                        on_draft={on_draft.clone()}
                                        on_save={on_save.clone()}
                                        on_cancel={on_cancel.clone()}
                                    />
                                }
                            })}
                        </tbody>
                    </table>
                </div>
            </>
        },
    };

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-stone-900">{"Review queue"}</h1>
                <button
                    onclick={Callback::from(move |_: MouseEvent| load.emit(()))}
                    class="text-sm text-rose-800 hover:underline"
                >
                    {"Refresh"}
                </button>
            </div>
            {content}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PendingRowProps {
    wine: Wine,
    /// Present while this row is being edited inline.
    draft: Option<WineDraft>,
    busy: Option<TaskKind>,
    on_decide: Callback<(Wine, Decision)>,
    on_edit: Callback<Wine>,
    on_draft: Callback<WineDraft>,
    on_save: Callback<WineDraft>,
    on_cancel: Callback<()>,
}

const CELL: &str = "px-4 py-3 align-top";
const EDIT_INPUT: &str =
    "w-full px-2 py-1 border border-stone-300 rounded text-sm";

#[function_component]
fn PendingRow(props: &PendingRowProps) -> Html {
    let wine = &props.wine;
    let busy = props.busy.is_some();

    let button = |label: &'static str, onclick: Callback<MouseEvent>, color| {
        html! {
            <button
                {onclick}
                disabled={busy}
                class={classes!(
                    "px-3", "py-1", "rounded-md", "text-xs", "font-medium",
                    "disabled:opacity-50", "disabled:cursor-not-allowed",
                    color
                )}
            >
                {label}
            </button>
        }
    };
    let decide = |decision: Decision| {
        let on_decide = props.on_decide.clone();
        let wine = wine.clone();
        Callback::from(move |_: MouseEvent| {
            on_decide.emit((wine.clone(), decision))
        })
    };

    let Some(draft) = &props.draft else {
        let on_edit = {
            let on_edit = props.on_edit.clone();
            let wine = wine.clone();
            Callback::from(move |_: MouseEvent| on_edit.emit(wine.clone()))
        };
        return html! {
            <tr>
                <td class={CELL}>
                    <p class="font-medium text-stone-900">{&wine.name}</p>
                    if let Some(description) = &wine.description {
                        <p class="text-xs text-stone-500 line-clamp-2">
                            {description}
                        </p>
                    }
                </td>
                <td class={CELL}>{&wine.winery.name}</td>
                <td class={CELL}>{wine.variety.clone().unwrap_or_default()}</td>
                <td class={CELL}>
                    {wine.vintage.as_ref().map(ToString::to_string).unwrap_or_default()}
                </td>
                <td class={CELL}>{wine.price_label().unwrap_or_default()}</td>
                <td class={CELL}>
                    {format_optional_date(wine.created_at.as_ref())}
                </td>
                <td class={classes!(CELL, "whitespace-nowrap", "space-x-2")}>
                    if let Some(kind) = props.busy {
                        <span class="text-xs text-stone-500">{kind.label()}</span>
                    } else {
                        {button("Approve", decide(Decision::Approve),
                            "bg-emerald-700 text-white hover:bg-emerald-600")}
                        {button("Reject", decide(Decision::Reject),
                            "bg-red-700 text-white hover:bg-red-600")}
                        {button("Edit", on_edit,
                            "border border-stone-300 text-stone-700 hover:bg-stone-50")}
                    }
                </td>
            </tr>
        };
    };

    let field = |apply: fn(&mut WineDraft, String)| {
        let on_draft = props.on_draft.clone();
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = draft.clone();
            apply(&mut next, input.value());
            on_draft.emit(next);
        })
    };
    let on_description = {
        let on_draft = props.on_draft.clone();
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_draft.emit(WineDraft {
                description: input.value(),
                ..draft.clone()
            });
        })
    };
    let on_save = {
        let on_save = props.on_save.clone();
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(draft.clone()))
    };
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <tr class="bg-amber-50">
            <td class={CELL}>
                <input
                    value={draft.name.clone()}
                    oninput={field(|d, v| d.name = v)}
                    class={EDIT_INPUT}
                    aria-label="Name"
                />
                <textarea
                    value={draft.description.clone()}
                    oninput={on_description}
                    rows="2"
                    class={classes!(EDIT_INPUT, "mt-2")}
                    aria-label="Description"
                />
            </td>
            <td class={CELL}>{&wine.winery.name}</td>
            <td class={CELL}>
                <input
                    value={draft.variety.clone()}
                    oninput={field(|d, v| d.variety = v)}
                    class={EDIT_INPUT}
                    aria-label="Variety"
                />
            </td>
            <td class={CELL}>
                <input
                    value={draft.vintage.clone()}
                    oninput={field(|d, v| d.vintage = v)}
                    placeholder="2021 or NV"
                    class={EDIT_INPUT}
                    aria-label="Vintage"
                />
            </td>
            <td class={CELL}>
                <input
                    value={draft.price.clone()}
                    oninput={field(|d, v| d.price = v)}
                    class={EDIT_INPUT}
                    aria-label="Price"
                />
            </td>
            <td class={CELL}>
                {format_optional_date(wine.created_at.as_ref())}
            </td>
            <td class={classes!(CELL, "whitespace-nowrap", "space-x-2")}>
                if let Some(kind) = props.busy {
                    <span class="text-xs text-stone-500">{kind.label()}</span>
                } else {
                    {button("Save", on_save,
                        "bg-rose-900 text-white hover:bg-rose-800")}
                    {button("Cancel", on_cancel,
                        "border border-stone-300 text-stone-700 hover:bg-stone-50")}
                }
            </td>
        </tr>
    }
}
