use payloads::{APIClient, AdminCredentials};
use std::rc::Rc;
use yew::prelude::*;

use crate::session::{SharedSession, SharedStore, StoreError};

/// The admin session owned by the provider. Dispatching `SessionChanged`
/// after a login or logout re-renders every consumer.
pub type SessionContext = UseReducerHandle<SharedSession>;

pub struct SessionChanged;

impl Reducible for SharedSession {
    type Action = SessionChanged;

    fn reduce(self: Rc<Self>, _: SessionChanged) -> Rc<Self> {
        Rc::new(self.bumped())
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    /// Where the credential pair is kept. Read once, when the provider
    /// mounts.
    #[prop_or_default]
    pub store: SharedStore,
    pub children: Children,
}

#[function_component]
pub fn SessionProvider(props: &SessionProviderProps) -> Html {
    let session = {
        let store = props.store.clone();
        use_reducer(move || SharedSession::load(store))
    };

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    context: SessionContext,
}

impl SessionHandle {
    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        self.context.login(username, password)?;
        tracing::info!(username, "Admin signed in");
        self.context.dispatch(SessionChanged);
        Ok(())
    }

    pub fn logout(&self) {
        self.context.logout();
        tracing::info!("Admin signed out");
        self.context.dispatch(SessionChanged);
    }

    pub fn is_authenticated(&self) -> bool {
        self.context.is_authenticated()
    }

    pub fn auth_header(&self) -> Option<String> {
        self.context.auth_header()
    }

    pub fn credentials(&self) -> Option<AdminCredentials> {
        self.context.credentials()
    }

    /// API client carrying the stored pair, if signed in.
    pub fn client(&self) -> Option<APIClient> {
        self.credentials().as_ref().map(crate::get_admin_api_client)
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    let context = use_context::<SessionContext>()
        .expect("use_session must be used within a SessionProvider");
    SessionHandle { context }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, SESSION_KEY, SessionStore};

    #[test]
    fn change_keeps_the_session_and_triggers_a_render() {
        let store = MemoryStore::default();
        let state = Rc::new(SharedSession::load(SharedStore::new(
            store.clone(),
        )));
        state.login("admin", "admin123").unwrap();

        let next = Rc::clone(&state).reduce(SessionChanged);
        assert!(*next != *state);
        assert!(next.is_authenticated());
        assert!(store.read(SESSION_KEY).unwrap().is_some());
    }

    #[test]
    fn provider_reads_the_injected_store() {
        let store = MemoryStore::default();
        let shared = SharedStore::new(store.clone());
        SharedSession::load(shared.clone())
            .login("cellar", "s3cret")
            .unwrap();

        let remounted = SharedSession::load(shared);
        assert_eq!(
            remounted.credentials(),
            Some(AdminCredentials::new("cellar", "s3cret"))
        );
    }
}
