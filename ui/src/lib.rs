use payloads::{APIClient, AdminCredentials, WineId};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
pub mod moderation;
mod pages;
pub mod processing;
pub mod session;
pub mod state;
mod utils;

pub use state::BrowseState;

use components::ToastContainer;
use components::layout::{AdminLayout, MainLayout};
use contexts::{SessionProvider, ToastProvider};

const FALLBACK_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Backend address, set at build time with `BACKEND_URL`.
pub fn backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or(FALLBACK_BACKEND_URL)
}

/// Anonymous client for the public catalog.
pub fn get_api_client() -> APIClient {
    APIClient::new(backend_url())
}

/// Client that sends the admin's Basic credentials with every request.
pub fn get_admin_api_client(credentials: &AdminCredentials) -> APIClient {
    get_api_client().with_credentials(credentials.clone())
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());

    html! {
        <ToastProvider>
            <SessionProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                    <ToastContainer />
                </BrowserRouter>
            </SessionProvider>
        </ToastProvider>
    }
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/wines")]
    Wines,
    #[at("/wineries")]
    Wineries,
    #[at("/wineries/:slug")]
    WineryDetail { slug: String },
    #[at("/admin")]
    AdminRoot,
    #[at("/admin/*")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum AdminRoute {
    #[at("/admin/login")]
    Login,
    #[at("/admin/wines")]
    Wines,
    #[at("/admin/wines/new")]
    NewWine,
    #[at("/admin/wines/:id/edit")]
    EditWine { id: i64 },
    #[at("/admin/review")]
    Review,
    #[not_found]
    #[at("/admin/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! {
            <MainLayout><pages::HomePage /></MainLayout>
        },
        Route::Wines => html! {
            <MainLayout><pages::WinesPage /></MainLayout>
        },
        Route::Wineries => html! {
            <MainLayout><pages::WineriesPage /></MainLayout>
        },
        Route::WineryDetail { slug } => html! {
            <MainLayout><pages::WineryDetailPage slug={slug} /></MainLayout>
        },
        Route::AdminRoot => html! {
            <Redirect<AdminRoute> to={AdminRoute::Review} />
        },
        Route::Admin => html! {
            <Switch<AdminRoute> render={switch_admin} />
        },
        Route::NotFound => html! {
            <MainLayout><pages::NotFoundPage /></MainLayout>
        },
    }
}

fn switch_admin(route: AdminRoute) -> Html {
    match route {
        AdminRoute::Login => html! { <pages::AdminLoginPage /> },
        AdminRoute::Wines => html! {
            <AdminLayout><pages::AdminWinesPage /></AdminLayout>
        },
        AdminRoute::NewWine => html! {
            <AdminLayout><pages::WineFormPage /></AdminLayout>
        },
        AdminRoute::EditWine { id } => html! {
            <AdminLayout>
                <pages::WineFormPage wine_id={Some(WineId(id))} />
            </AdminLayout>
        },
        AdminRoute::Review => html! {
            <AdminLayout><pages::AdminReviewPage /></AdminLayout>
        },
        AdminRoute::NotFound => html! {
            <Redirect<Route> to={Route::NotFound} />
        },
    }
}
