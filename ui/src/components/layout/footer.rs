use yew::prelude::*;
use yew_router::prelude::*;

use crate::AdminRoute;

#[function_component]
pub fn Footer() -> Html {
    html! {
        <footer class="bg-white border-t border-stone-200 mt-auto">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-4 flex justify-between">
                <p class="text-sm text-stone-500">
                    {"Prices and availability are set by each winery."}
                </p>
                <Link<AdminRoute> to={AdminRoute::Review} classes="text-sm text-stone-500 hover:text-stone-900">
                    {"Admin"}
                </Link<AdminRoute>>
            </div>
        </footer>
    }
}
