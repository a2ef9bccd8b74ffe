// Author: Dustin Pilgrim
// License: MIT

pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

/// The authenticated principal the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.id, email),
            None => f.write_str(&self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The backend could not be reached or answered garbage.
    Transport(String),
    /// The backend answered and refused the request.
    Rejected(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Transport(msg) => write!(f, "auth transport error: {msg}"),
            AuthError::Rejected(msg) => write!(f, "auth request rejected: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Hosted auth backend the monitor signs out through.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, if any. Gates whether tracking runs at all.
    async fn current_user(&self) -> Option<User>;

    /// Invalidate the session server-side.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// `Ok(false)` means the backend explicitly says the session is gone.
    async fn is_session_valid(&self) -> Result<bool, AuthError>;
}
