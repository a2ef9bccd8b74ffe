// Author: Dustin Pilgrim
// License: MIT

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{AuthError, AuthProvider, User};

/// Process-local auth provider.
///
/// Backs the console binary and the tests: the user, server-side
/// revocation and transport failures are all switchable at runtime.
#[derive(Debug, Default)]
pub struct InMemoryAuth {
    user: Mutex<Option<User>>,
    revoked: AtomicBool,
    fail_checks: AtomicBool,
    fail_sign_out: AtomicBool,
    sign_outs: AtomicUsize,
    checks: AtomicUsize,
}

impl InMemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        let auth = Self::default();
        auth.set_user(Some(user));
        auth
    }

    pub fn set_user(&self, user: Option<User>) {
        let mut guard = self.user.lock().unwrap_or_else(|e| e.into_inner());
        *guard = user;
        self.revoked.store(false, Ordering::SeqCst);
    }

    /// Revoke the session "elsewhere"; later validity checks answer false.
    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }

    pub fn set_check_failure(&self, fail: bool) {
        self.fail_checks.store(fail, Ordering::SeqCst);
    }

    pub fn set_sign_out_failure(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    pub fn validity_checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuth {
    async fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);

        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::Transport("sign-out endpoint unreachable".to_string()));
        }

        let mut guard = self.user.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }

    async fn is_session_valid(&self) -> Result<bool, AuthError> {
        self.checks.fetch_add(1, Ordering::SeqCst);

        if self.fail_checks.load(Ordering::SeqCst) {
            return Err(AuthError::Transport("validity endpoint unreachable".to_string()));
        }

        let has_user = self.user.lock().unwrap_or_else(|e| e.into_inner()).is_some();
        Ok(has_user && !self.revoked.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revocation_and_sign_out() {
        let auth = InMemoryAuth::signed_in(User::new("ana"));
        assert_eq!(auth.is_session_valid().await, Ok(true));

        auth.revoke();
        assert_eq!(auth.is_session_valid().await, Ok(false));

        assert_eq!(auth.sign_out().await, Ok(()));
        assert_eq!(auth.current_user().await, None);
        assert_eq!(auth.sign_out_calls(), 1);
        assert_eq!(auth.validity_checks(), 2);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_transport_errors() {
        let auth = InMemoryAuth::signed_in(User::new("ana"));
        auth.set_check_failure(true);
        auth.set_sign_out_failure(true);

        assert!(matches!(auth.is_session_valid().await, Err(AuthError::Transport(_))));
        assert!(matches!(auth.sign_out().await, Err(AuthError::Transport(_))));
        // Failed sign-out leaves the backend session in place.
        assert_eq!(auth.current_user().await, Some(User::new("ana")));
    }
}
