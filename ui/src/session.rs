//! Admin session: the credential pair kept for the lifetime of the tab.
//!
//! There is no login endpoint. Signing in only stores the pair; the backend
//! checks it on the first admin request that carries it.

use payloads::AdminCredentials;
use payloads::credentials::StoredCredentials;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// Storage key holding the JSON credential pair.
pub const SESSION_KEY: &str = "adminAuth";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Session storage is not available in this browser")]
    Unavailable,
    #[error("Session storage refused the write: {0}")]
    Refused(String),
}

/// Key/value storage scoped to the browser session.
pub trait SessionStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// `window.sessionStorage`. Cleared by the browser when the tab closes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .session_storage()
            .map_err(refused)?
            .ok_or(StoreError::Unavailable)
    }
}

fn refused(e: JsValue) -> StoreError {
    StoreError::Refused(format!("{e:?}"))
}

impl SessionStore for BrowserSessionStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(key).map_err(refused)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(key, value).map_err(refused)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?.remove_item(key).map_err(refused)
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// A store that can be passed around as a component property. Two
/// handles are equal when they point at the same store.
#[derive(Clone)]
pub struct SharedStore(Rc<dyn SessionStore>);

impl SharedStore {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self(Rc::new(store))
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new(BrowserSessionStore)
    }
}

impl PartialEq for SharedStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl SessionStore for SharedStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.0.remove(key)
    }
}

pub struct AdminSession<S> {
    store: S,
    credentials: Option<AdminCredentials>,
}

impl<S: SessionStore> AdminSession<S> {
    /// Restore the session from `store`.
    ///
    /// An entry that does not parse is removed and the session starts
    /// signed out.
    pub fn load(store: S) -> Self {
        let credentials = match store.read(SESSION_KEY) {
            Ok(Some(raw)) => {
                match serde_json::from_str::<StoredCredentials>(&raw) {
                    Ok(stored) => Some(AdminCredentials::from(stored)),
                    Err(e) => {
                        tracing::error!("Discarding stored admin session: {e}");
                        if let Err(e) = store.remove(SESSION_KEY) {
                            tracing::error!("{e}");
                        }
                        None
                    }
                }
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Could not read admin session: {e}");
                None
            }
        };
        Self { store, credentials }
    }

    /// Store the pair. The session stays signed out if it can't be saved.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        let credentials = AdminCredentials::new(username, password);
        let raw = serde_json::to_string(&credentials.to_stored())
            .map_err(|e| StoreError::Refused(e.to_string()))?;
        self.store.write(SESSION_KEY, &raw)?;
        self.credentials = Some(credentials);
        Ok(())
    }

    pub fn logout(&mut self) {
        self.credentials = None;
        if let Err(e) = self.store.remove(SESSION_KEY) {
            tracing::error!("Could not clear admin session: {e}");
        }
    }

    /// `Basic ...` header value, or `None` when signed out.
    pub fn auth_header(&self) -> Option<String> {
        self.credentials
            .as_ref()
            .map(AdminCredentials::basic_auth_header)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&AdminCredentials> {
        self.credentials.as_ref()
    }
}

/// One admin session shared by every clone.
///
/// `version` moves on each login and logout, so two snapshots taken on
/// either side of a change compare unequal.
#[derive(Clone)]
pub struct SharedSession {
    session: Rc<RefCell<AdminSession<SharedStore>>>,
    version: u32,
}

impl SharedSession {
    pub fn load(store: SharedStore) -> Self {
        Self {
            session: Rc::new(RefCell::new(AdminSession::load(store))),
            version: 0,
        }
    }

    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        self.session.borrow_mut().login(username, password)
    }

    pub fn logout(&self) {
        self.session.borrow_mut().logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn auth_header(&self) -> Option<String> {
        self.session.borrow().auth_header()
    }

    pub fn credentials(&self) -> Option<AdminCredentials> {
        self.session.borrow().credentials().cloned()
    }

    /// The same session, marked as changed.
    pub fn bumped(&self) -> Self {
        Self {
            session: Rc::clone(&self.session),
            version: self.version.wrapping_add(1),
        }
    }
}

impl PartialEq for SharedSession {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
            && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_starts_signed_out() {
        let session = AdminSession::load(MemoryStore::default());
        assert!(!session.is_authenticated());
        assert_eq!(session.auth_header(), None);
        assert!(session.credentials().is_none());
    }

    #[test]
    fn login_persists_pair_as_json() {
        let store = MemoryStore::default();
        let mut session = AdminSession::load(store.clone());
        session.login("admin", "admin123").unwrap();

        assert!(session.is_authenticated());
        assert_eq!(
            session.auth_header().as_deref(),
            Some("Basic YWRtaW46YWRtaW4xMjM=")
        );
        let raw = store.read(SESSION_KEY).unwrap().unwrap();
        let stored: StoredCredentials = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.username, "admin");
        assert_eq!(stored.password, "admin123");
    }

    #[test]
    fn reload_restores_the_stored_pair() {
        let store = MemoryStore::default();
        AdminSession::load(store.clone())
            .login("cellar", "s3cret")
            .unwrap();

        let restored = AdminSession::load(store);
        assert_eq!(
            restored.credentials(),
            Some(&AdminCredentials::new("cellar", "s3cret"))
        );
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let store = MemoryStore::default();
        let mut session = AdminSession::load(store.clone());
        session.login("admin", "admin123").unwrap();
        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.auth_header(), None);
        assert_eq!(store.read(SESSION_KEY).unwrap(), None);
        assert!(!AdminSession::load(store).is_authenticated());
    }

    #[test]
    fn corrupt_entry_is_removed_on_load() {
        let store = MemoryStore::default();
        store.write(SESSION_KEY, "{not json").unwrap();

        let session = AdminSession::load(store.clone());
        assert!(!session.is_authenticated());
        assert_eq!(store.read(SESSION_KEY).unwrap(), None);
    }

    struct ReadOnlyStore;

    impl SessionStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Refused("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn shared_session_is_seen_by_every_clone() {
        let store = MemoryStore::default();
        let session = SharedSession::load(SharedStore::new(store.clone()));
        let other = session.clone();

        session.login("admin", "admin123").unwrap();
        assert!(other.is_authenticated());
        assert_eq!(
            other.auth_header().as_deref(),
            Some("Basic YWRtaW46YWRtaW4xMjM=")
        );
        assert!(store.read(SESSION_KEY).unwrap().is_some());

        other.logout();
        assert_eq!(session.credentials(), None);
        assert_eq!(store.read(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn bumped_session_compares_unequal_but_shares_state() {
        let session = SharedSession::load(SharedStore::new(
            MemoryStore::default(),
        ));
        let next = session.bumped();
        assert!(session != next);
        assert!(session == session.clone());

        next.login("cellar", "s3cret").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn shared_store_equality_is_by_identity() {
        let store = SharedStore::new(MemoryStore::default());
        assert!(store == store.clone());
        assert!(store != SharedStore::new(MemoryStore::default()));
    }

    #[test]
    fn failed_write_leaves_session_signed_out() {
        let mut session = AdminSession::load(ReadOnlyStore);
        let result = session.login("admin", "admin123");
        assert!(matches!(result, Err(StoreError::Refused(_))));
        assert!(!session.is_authenticated());
    }
}
