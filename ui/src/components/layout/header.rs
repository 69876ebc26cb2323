use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

const NAV_LINK: &str = "text-sm font-medium text-stone-600 hover:text-rose-900";

#[function_component]
pub fn Header() -> Html {
    html! {
        <header class="bg-white border-b border-stone-200">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home} classes="text-xl font-semibold text-rose-900">
                        {"Wine Directory"}
                    </Link<Route>>
                    <nav class="flex items-center space-x-6">
                        <Link<Route> to={Route::Wines} classes={NAV_LINK}>
                            {"Wines"}
                        </Link<Route>>
                        <Link<Route> to={Route::Wineries} classes={NAV_LINK}>
                            {"Wineries"}
                        </Link<Route>>
                    </nav>
                </div>
            </div>
        </header>
    }
}
