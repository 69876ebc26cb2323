use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::AdminRoute;
use crate::contexts::use_session;
use crate::state::AdminStats;

const ACTIVE: &str = "border-rose-800 text-rose-900";
const INACTIVE: &str =
    "border-transparent text-stone-500 hover:text-stone-700 hover:border-stone-300";

#[function_component]
pub fn AdminTabs() -> Html {
    let route = use_route::<AdminRoute>();
    let (stats, dispatch) = use_store::<AdminStats>();
    let session = use_session();

    // The review page keeps the counts current; other pages load them once.
    {
        let needs_load = stats.counts.is_none();
        use_effect_with(needs_load, move |needs_load| {
            if let (true, Some(client)) = (*needs_load, session.client()) {
                yew::platform::spawn_local(async move {
                    match client.get_stats().await {
                        Ok(stats) => dispatch.reduce_mut(|s| {
                            s.counts = Some(stats.counts());
                        }),
                        Err(e) => {
                            tracing::error!("Loading review badge failed: {e}")
                        }
                    }
                });
            }
        });
    }

    let tab = |target: AdminRoute, label: Html| {
        let is_active = match (&route, &target) {
            (Some(AdminRoute::EditWine { .. }), AdminRoute::Wines) => true,
            (Some(current), target) => current == target,
            (None, _) => false,
        };
        html! {
            <Link<AdminRoute>
                to={target}
                classes={classes!(
                    "py-2", "px-1", "border-b-2", "font-medium", "text-sm",
                    if is_active { ACTIVE } else { INACTIVE }
                )}
            >
                {label}
            </Link<AdminRoute>>
        }
    };

    let pending = stats.counts.map(|counts| counts.pending).unwrap_or(0);
    let review_label = html! {
        <>
            {"Review"}
            if pending > 0 {
                <span class="ml-2 px-2 py-0.5 rounded-full text-xs bg-amber-100 text-amber-800">
                    {pending}
                </span>
            }
        </>
    };

    html! {
        <div class="border-b border-stone-200">
            <nav class="-mb-px flex space-x-8">
                {tab(AdminRoute::Review, review_label)}
                {tab(AdminRoute::Wines, html! { {"Wines"} })}
                {tab(AdminRoute::NewWine, html! { {"Add wine"} })}
            </nav>
        </div>
    }
}
