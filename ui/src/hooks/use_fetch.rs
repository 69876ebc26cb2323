use payloads::ClientError;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::FetchState;
use crate::components::LoadError;
use crate::utils::describe_error;

pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T> FetchHookReturn<T> {
    /// Render `render_fn` once data is available.
    ///
    /// Before the first successful load this shows a loading line, or an
    /// error banner with a Retry button. After that, a failed refetch keeps
    /// the previous data on screen and passes the error along.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match (self.data.as_ref(), &self.error) {
            (Some(data), error) => {
                render_fn(data, self.is_loading, error.as_ref())
            }
            (None, Some(error)) => html! {
                <LoadError
                    message={format!("Error loading {context}: {error}")}
                    on_retry={self.refetch.clone()}
                />
            },
            (None, None) => html! {
                <div class="text-center py-12">
                    <p class="text-stone-600">
                        {format!("Loading {context}...")}
                    </p>
                </div>
            },
        }
    }
}

/// Fetch on mount and whenever `deps` change, with a manual refetch.
///
/// The fetch closure captures what it needs; `deps` only drives when it
/// runs. Failures are logged and turned into a display message.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let refetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, _| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let fetch_fn = fetch_fn.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error.set(None);

                match fetch_fn().await {
                    Ok(result) => data.set(FetchState::Fetched(result)),
                    Err(e) => {
                        tracing::error!("Fetch failed: {e}");
                        error.set(Some(describe_error(&e)));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| refetch.emit(()));
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}
