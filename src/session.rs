//! Session Manager
//!
//! Tracks whether a signed-in identity (owner id) is present. Remote
//! operations are gated on it; local mutations never are.

use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct Session {
    owner: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner id, or `None` when signed out
    pub fn current_owner(&self) -> Option<String> {
        self.owner.read().unwrap().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.owner.read().unwrap().is_some()
    }

    /// Record the identity after a completed login
    pub fn set_owner(&self, owner: String) {
        *self.owner.write().unwrap() = Some(owner);
    }

    /// Clear the identity on logout; cached local state is untouched
    pub fn clear(&self) {
        *self.owner.write().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let session = Session::new();
        assert!(!session.is_signed_in());
        assert!(session.current_owner().is_none());

        session.set_owner("owner-1".to_string());
        assert!(session.is_signed_in());
        assert_eq!(session.current_owner().as_deref(), Some("owner-1"));

        session.clear();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_clones_share_identity() {
        let session = Session::new();
        let other = session.clone();
        session.set_owner("owner-1".to_string());
        assert_eq!(other.current_owner().as_deref(), Some("owner-1"));
    }
}
