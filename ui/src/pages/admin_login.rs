use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::AdminRoute;
use crate::contexts::use_session;
use crate::hooks::use_title;

const INPUT: &str = "w-full px-3 py-2 border border-stone-300 rounded-md \
                     shadow-sm bg-white text-stone-900 focus:outline-none \
                     focus:ring-2 focus:ring-rose-700";

/// Stores the admin pair for this tab. Nothing is sent to the backend
/// until the first admin request.
#[function_component]
pub fn AdminLoginPage() -> Html {
    use_title("Admin sign in");
    let session = use_session();
    let navigator = use_navigator().unwrap();

    let username_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);

    if session.is_authenticated() {
        return html! { <Redirect<AdminRoute> to={AdminRoute::Review} /> };
    }

    let on_submit = {
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let error_message = error_message.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(username), Some(password)) = (
                username_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let username = username.value().trim().to_string();
            let password = password.value();

            if username.is_empty() || password.is_empty() {
                error_message.set(Some(
                    "Please enter both username and password".to_string(),
                ));
                return;
            }

            match session.login(&username, &password) {
                Ok(()) => navigator.push(&AdminRoute::Review),
                Err(e) => {
                    tracing::error!("Saving admin session failed: {e}");
                    error_message.set(Some(e.to_string()));
                }
            }
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-stone-100 px-4">
            <div class="max-w-md w-full bg-white p-8 rounded-lg shadow-md">
                <div class="mb-8 text-center">
                    <h1 class="text-2xl font-bold text-stone-900 mb-2">
                        {"Admin sign in"}
                    </h1>
                    <p class="text-stone-600">
                        {"Manage wines and review new listings"}
                    </p>
                </div>

                <form onsubmit={on_submit} class="space-y-6">
                    if let Some(error) = &*error_message {
                        <div class="p-4 rounded-md bg-red-50 border border-red-200">
                            <p class="text-sm text-red-700">{error}</p>
                        </div>
                    }

                    <div>
                        <label for="username" class="block text-sm font-medium text-stone-700 mb-2">
                            {"Username"}
                        </label>
                        <input
                            ref={username_ref}
                            type="text"
                            id="username"
                            name="username"
                            autocomplete="username"
                            required={true}
                            class={INPUT}
                        />
                    </div>

                    <div>
                        <label for="password" class="block text-sm font-medium text-stone-700 mb-2">
                            {"Password"}
                        </label>
                        <input
                            ref={password_ref}
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required={true}
                            class={INPUT}
                        />
                    </div>

                    <button
                        type="submit"
                        class="w-full py-2 px-4 rounded-md text-sm font-medium \
                               text-white bg-rose-900 hover:bg-rose-800"
                    >
                        {"Sign in"}
                    </button>
                </form>
            </div>
        </div>
    }
}
