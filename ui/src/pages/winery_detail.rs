use payloads::pagination::SHOW_ALL_PAGE_SIZE;
use payloads::requests::WineQuery;
use payloads::{ClientError, Wine, Winery};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::WineCard;
use crate::hooks::{use_fetch, use_title};
use crate::{Route, get_api_client};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub slug: String,
}

#[derive(Clone, PartialEq)]
struct WineryPage {
    winery: Winery,
    wines: Vec<Wine>,
}

async fn load(slug: &str) -> Result<Option<WineryPage>, ClientError> {
    let client = get_api_client();
    let winery = match client.get_winery_by_slug(slug).await {
        Ok(winery) => winery,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => return Err(e),
    };
    let query = WineQuery {
        winery_id: Some(winery.id),
        limit: Some(SHOW_ALL_PAGE_SIZE),
        ..Default::default()
    };
    let wines = client.list_wines(&query).await?.wines;
    Ok(Some(WineryPage { winery, wines }))
}

#[function_component]
pub fn WineryDetailPage(props: &Props) -> Html {
    let page = {
        let slug = props.slug.clone();
        use_fetch(props.slug.clone(), move || {
            let slug = slug.clone();
            async move { load(&slug).await }
        })
    };
    let title = page
        .data
        .as_ref()
        .and_then(|page| page.as_ref())
        .map(|page| page.winery.name.clone())
        .unwrap_or_else(|| "Winery".into());
    use_title(&title);

    page.render("winery", |page, _, _| match page {
        None => html! {
            <div class="text-center py-16 space-y-4">
                <p class="text-stone-600">{"We couldn't find that winery."}</p>
                <Link<Route> to={Route::Wineries} classes="text-rose-800 hover:underline">
                    {"All wineries"}
                </Link<Route>>
            </div>
        },
        Some(WineryPage { winery, wines }) => html! {
            <div class="space-y-8">
                <div class="space-y-2">
                    <h1 class="text-3xl font-bold text-stone-900">{&winery.name}</h1>
                    if let Some(description) = &winery.description {
                        <p class="text-stone-600">{description}</p>
                    }
                    <div class="flex flex-wrap gap-x-6 gap-y-1 text-sm text-stone-500">
                        if let Some(address) = &winery.address {
                            <span>{address}</span>
                        }
                        if let Some(phone) = &winery.phone {
                            <span>{phone}</span>
                        }
                        if let Some(email) = &winery.email {
                            <a href={format!("mailto:{email}")} class="hover:underline">
                                {email}
                            </a>
                        }
                        if let Some(website) = &winery.website_url {
                            <a href={website.clone()} target="_blank"
                               rel="noopener noreferrer" class="hover:underline">
                                {"Website"}
                            </a>
                        }
                        <a href={winery.shop_url.clone()} target="_blank"
                           rel="noopener noreferrer"
                           class="font-medium text-rose-800 hover:underline">
                            {"Online shop"}
                        </a>
                    </div>
                </div>

                <section class="space-y-4">
                    <h2 class="text-xl font-semibold text-stone-900">
                        {format!("Wines ({})", wines.len())}
                    </h2>
                    if wines.is_empty() {
                        <p class="text-stone-600">
                            {"This winery has no wines listed right now."}
                        </p>
                    } else {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {for wines.iter().map(|wine| html! {
                                <WineCard
                                    key={wine.id.0}
                                    wine={wine.clone()}
                                    show_winery={false}
                                />
                            })}
                        </div>
                    }
                </section>
            </div>
        },
    })
}
