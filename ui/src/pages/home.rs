use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::WineryCard;
use crate::hooks::{use_title, use_wineries};

#[function_component]
pub fn HomePage() -> Html {
    use_title("Home");
    let wineries = use_wineries();

    html! {
        <div class="space-y-10">
            <section class="text-center py-10 space-y-4">
                <h1 class="text-4xl font-bold text-rose-950">
                    {"Wines from our local cellar doors"}
                </h1>
                <p class="text-lg text-stone-600">
                    {"Browse every wine our member wineries sell online, \
                      then buy straight from the winery."}
                </p>
                <div class="flex justify-center gap-4">
                    <Link<Route>
                        to={Route::Wines}
                        classes="px-5 py-2 rounded-md bg-rose-900 text-white hover:bg-rose-800"
                    >
                        {"Browse wines"}
                    </Link<Route>>
                    <Link<Route>
                        to={Route::Wineries}
                        classes="px-5 py-2 rounded-md border border-rose-900 text-rose-900 hover:bg-rose-50"
                    >
                        {"Meet the wineries"}
                    </Link<Route>>
                </div>
            </section>

            <section class="space-y-4">
                <h2 class="text-2xl font-semibold text-stone-900">{"Wineries"}</h2>
                {wineries.render("wineries", |wineries, _, _| html! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {for wineries.iter().map(|winery| html! {
                            <WineryCard key={winery.id.0} winery={winery.clone()} />
                        })}
                    </div>
                })}
            </section>
        </div>
    }
}
