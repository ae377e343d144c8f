//! Page-lifetime token cache

use std::cell::RefCell;
use std::rc::Rc;

/// Explicitly owned cache for the token issued by the server.
///
/// Clones share the same slot. The browser is single-threaded, so the slot
/// lives behind `Rc<RefCell<_>>` and borrows never cross an await.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    cache: Rc<RefCell<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token remembered from the issuing endpoint
    pub fn cached(&self) -> Option<String> {
        self.cache.borrow().clone()
    }

    /// Remember a freshly issued token. Later writes replace earlier ones.
    pub fn remember(&self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() {
            *self.cache.borrow_mut() = Some(token);
        }
    }
}
