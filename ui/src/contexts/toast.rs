use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

const DISMISS_AFTER_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub level: ToastLevel,
}

/// Toasts in the order they were raised.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Show(Toast),
    Dismiss(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Show(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastState { toasts })
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

/// Non-blocking notices for completed admin actions.
#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    fn show(&self, message: String, level: ToastLevel) {
        let id = Uuid::new_v4();
        self.context.dispatch(ToastAction::Show(Toast { id, message, level }));

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
            context.dispatch(ToastAction::Dismiss(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), ToastLevel::Error);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Dismiss(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}
