use yew::prelude::*;

use crate::components::WineryCard;
use crate::hooks::{use_title, use_wineries};

#[function_component]
pub fn WineriesPage() -> Html {
    use_title("Wineries");
    let wineries = use_wineries();

    html! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-stone-900">{"Wineries"}</h1>
            {wineries.render("wineries", |wineries, _, _| {
                if wineries.is_empty() {
                    return html! {
                        <p class="text-stone-600">{"No wineries listed yet."}</p>
                    };
                }
                html! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {for wineries.iter().map(|winery| html! {
                            <WineryCard key={winery.id.0} winery={winery.clone()} />
                        })}
                    </div>
                }
            })}
        </div>
    }
}
