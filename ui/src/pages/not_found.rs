use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::use_title;

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("Not found");

    html! {
        <div class="text-center py-16 space-y-4">
            <h1 class="text-4xl font-bold text-stone-900">{"404"}</h1>
            <p class="text-stone-600">{"Page not found"}</p>
            <Link<Route> to={Route::Wines} classes="text-rose-800 hover:underline">
                {"Browse wines"}
            </Link<Route>>
        </div>
    }
}
