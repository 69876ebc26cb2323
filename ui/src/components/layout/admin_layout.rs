use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{AdminTabs, RequireAdmin};
use crate::contexts::use_session;
use crate::{AdminRoute, Route};

#[derive(Properties, PartialEq)]
pub struct AdminLayoutProps {
    pub children: Children,
}

/// Frame for every signed-in admin page.
#[function_component]
pub fn AdminLayout(props: &AdminLayoutProps) -> Html {
    html! {
        <RequireAdmin>
            <div class="min-h-screen bg-stone-100 text-stone-900">
                <AdminHeader />
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6 space-y-6">
                    <AdminTabs />
                    {for props.children.iter()}
                </div>
            </div>
        </RequireAdmin>
    }
}

#[function_component]
fn AdminHeader() -> Html {
    let session = use_session();
    let navigator = use_navigator().unwrap();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            session.logout();
            navigator.push(&AdminRoute::Login);
        })
    };

    let username = session
        .credentials()
        .map(|credentials| credentials.username)
        .unwrap_or_default();

    html! {
        <header class="bg-rose-950 text-white">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 h-14 flex items-center justify-between">
                <div class="flex items-center gap-4">
                    <span class="font-semibold">{"Wine Directory Admin"}</span>
                    <Link<Route> to={Route::Home} classes="text-sm text-rose-200 hover:text-white">
                        {"View site"}
                    </Link<Route>>
                </div>
                <div class="flex items-center gap-4 text-sm">
                    <span class="text-rose-200">{username}</span>
                    <button onclick={on_logout} class="hover:underline">
                        {"Sign out"}
                    </button>
                </div>
            </div>
        </header>
    }
}
