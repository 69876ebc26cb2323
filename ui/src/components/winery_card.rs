use payloads::Winery;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub winery: Winery,
}

#[function_component]
pub fn WineryCard(props: &Props) -> Html {
    let winery = &props.winery;

    html! {
        <div class="bg-white rounded-lg border border-stone-200 p-5 space-y-2">
            <Link<Route>
                to={Route::WineryDetail { slug: winery.slug.clone() }}
                classes="text-lg font-semibold text-stone-900 hover:text-rose-900"
            >
                {&winery.name}
            </Link<Route>>
            if let Some(description) = &winery.description {
                <p class="text-sm text-stone-600">{description}</p>
            }
            <dl class="text-sm text-stone-500 space-y-1">
                if let Some(address) = &winery.address {
                    <dd>{address}</dd>
                }
                if let Some(phone) = &winery.phone {
                    <dd>{phone}</dd>
                }
            </dl>
            <a
                href={winery.shop_url.clone()}
                target="_blank"
                rel="noopener noreferrer"
                class="inline-block text-sm font-medium text-rose-800 hover:underline"
            >
                {"Online shop"}
            </a>
        </div>
    }
}
