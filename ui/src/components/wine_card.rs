use payloads::Wine;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub wine: Wine,
    /// Hide the winery line on a winery's own page.
    #[prop_or(true)]
    pub show_winery: bool,
}

#[function_component]
pub fn WineCard(props: &Props) -> Html {
    let wine = &props.wine;

    let details: Vec<&str> = [
        wine.variety.as_deref(),
        wine.bottle_size.as_deref(),
        wine.alcohol_content.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    html! {
        <div class="bg-white rounded-lg border border-stone-200 shadow-sm \
                    overflow-hidden flex flex-col">
            if let Some(image_url) = &wine.image_url {
                <img
                    src={image_url.clone()}
                    alt={wine.name.clone()}
                    class="h-48 w-full object-contain bg-stone-50"
                />
            }
            <div class="p-4 flex flex-col flex-1 gap-2">
                <div class="flex items-start justify-between gap-2">
                    <h3 class="font-semibold text-stone-900">{&wine.name}</h3>
                    if let Some(vintage) = &wine.vintage {
                        <span class="px-2 py-0.5 rounded text-xs font-medium \
                                     bg-rose-100 text-rose-900">
                            {vintage.to_string()}
                        </span>
                    }
                </div>
                if props.show_winery {
                    <Link<Route>
                        to={Route::WineryDetail { slug: wine.winery.slug.clone() }}
                        classes="text-sm text-rose-800 hover:underline"
                    >
                        {&wine.winery.name}
                    </Link<Route>>
                }
                if !details.is_empty() {
                    <p class="text-xs text-stone-500">{details.join(" · ")}</p>
                }
                if let Some(description) = &wine.description {
                    <p class="text-sm text-stone-600 line-clamp-3">
                        {description}
                    </p>
                }
                <div class="mt-auto pt-2 flex items-center justify-between">
                    <span class="text-lg font-semibold text-stone-900">
                        {wine.price_label().unwrap_or_else(|| "Price on request".into())}
                    </span>
                    if let Some(url) = &wine.product_url {
                        <a
                            href={url.clone()}
                            target="_blank"
                            rel="noopener noreferrer"
                            class="text-sm font-medium text-rose-800 hover:underline"
                        >
                            {"Visit shop"}
                        </a>
                    }
                </div>
            </div>
        </div>
    }
}
