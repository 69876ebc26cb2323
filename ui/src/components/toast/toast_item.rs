use yew::prelude::*;

use crate::contexts::toast::{Toast, ToastLevel, use_toast};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &Props) -> Html {
    let toasts = use_toast();
    let toast = &props.toast;

    let (colors, icon) = match toast.level {
        ToastLevel::Success => {
            ("bg-emerald-50 border-emerald-200 text-emerald-800", "✓")
        }
        ToastLevel::Error => ("bg-red-50 border-red-200 text-red-700", "✕"),
    };

    let on_close = {
        let id = toast.id;
        Callback::from(move |_: MouseEvent| toasts.dismiss(id))
    };

    html! {
        <div class={classes!("p-4", "rounded-lg", "border", "shadow-lg", colors)}>
            <div class="flex items-start gap-3">
                <span class="text-sm font-medium">{icon}</span>
                <p class="flex-1 text-sm font-medium">{&toast.message}</p>
                <button
                    onclick={on_close}
                    title="Dismiss"
                    class="text-stone-400 hover:text-stone-600"
                >
                    {"×"}
                </button>
            </div>
        </div>
    }
}
