use leptos::logging::warn;
use std::sync::Mutex;

pub(crate) const TOKEN_KEY: &str = "access_token";

/// Persistence for the bearer token.
///
/// Any stored string counts as a token until the server rejects it;
/// only the empty string is treated as absent.
pub(crate) trait TokenStore {
    fn save(&self, token: &str);
    fn get(&self) -> Option<String>;
    fn clear(&self);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// `window.localStorage`, keyed by [`TOKEN_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalTokenStore;

impl LocalTokenStore {
    pub fn is_available() -> bool {
        local_storage().is_some()
    }
}

impl TokenStore for LocalTokenStore {
    fn save(&self, token: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.set_item(TOKEN_KEY, token) {
                warn!("[storage] could not save token: {:?}", e);
            }
        }
    }

    fn get(&self) -> Option<String> {
        local_storage()
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
            .filter(|t| !t.is_empty())
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(TOKEN_KEY) {
                warn!("[storage] could not remove token: {:?}", e);
            }
        }
    }
}

/// Page-lifetime store for browsers with storage disabled.
#[derive(Debug, Default)]
pub(crate) struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .filter(|t| !t.is_empty())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::default();
        assert!(store.get().is_none());

        store.save("t1");
        assert_eq!(store.get().as_deref(), Some("t1"));

        store.save("t2");
        assert_eq!(store.get().as_deref(), Some("t2"));

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_memory_store_treats_empty_token_as_absent() {
        let store = MemoryTokenStore::with_token("");
        assert!(store.get().is_none());
    }
}
