use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub message: AttrValue,
    pub on_retry: Callback<()>,
}

/// Page-level banner for a failed load.
#[function_component]
pub fn LoadError(props: &Props) -> Html {
    let on_click = {
        let on_retry = props.on_retry.clone();
        Callback::from(move |_: MouseEvent| on_retry.emit(()))
    };

    html! {
        <div class="p-4 rounded-md bg-red-50 border border-red-200 \
                    flex items-center justify-between gap-4">
            <p class="text-sm text-red-700">{&props.message}</p>
            <button
                onclick={on_click}
                class="px-3 py-1 text-sm font-medium text-red-700 \
                       border border-red-300 rounded-md hover:bg-red-100"
            >
                {"Retry"}
            </button>
        </div>
    }
}
