//! Account authentication and sessions.
//!
//! ## Features
//!
//! - Password validation (minimum 6 characters)
//! - Argon2 password hashing
//! - Session tokens bound to a user id and role, with a sliding 60-minute timeout
//!
//! Sessions only prove who is calling. Whether that account is banned is
//! checked against the stored record on every request, so a ban takes effect
//! while the session is still live.
//!
//! ## Usage
//!
//! ```
//! use muslimnet_core::auth::{AuthManager, Role};
//!
//! let auth = AuthManager::new();
//! let hash = auth.hash_password("secret123").unwrap();
//! assert!(auth.verify_password("secret123", &hash).unwrap());
//!
//! let token = auth.create_session(7, Role::Moderator);
//! let session = auth.validate_session(&token).unwrap();
//! assert_eq!(session.user_id, 7);
//! assert!(session.role.can_moderate());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length requirement.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Session timeout duration (60 minutes).
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is empty.
    #[error("password cannot be empty")]
    PasswordEmpty,

    /// Password hashing failed.
    #[error("failed to hash password: {0}")]
    HashingFailed(String),

    /// Password verification failed (invalid hash format).
    #[error("failed to verify password: {0}")]
    VerificationFailed(String),
}

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// What an account is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular member.
    #[default]
    User,
    /// May review flagged content and ban users.
    Moderator,
    /// Full administrator.
    Admin,
}

impl Role {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Parse from database string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns true if this role may act on the moderation queue.
    pub fn can_moderate(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }
}

/// An opaque session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a new random session token.
    pub fn new() -> Self {
        let salt = SaltString::generate(&mut OsRng);
        Self(salt.to_string())
    }

    /// Create a session token from an existing string.
    ///
    /// Used for reconstructing tokens from request headers.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the token as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

/// The identity behind a valid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
}

#[derive(Debug, Clone)]
struct SessionData {
    session: Session,
    last_used: Instant,
}

impl SessionData {
    fn new(session: Session) -> Self {
        Self {
            session,
            last_used: Instant::now(),
        }
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_used.elapsed() > timeout
    }

    fn touch(&mut self) {
        self.last_used = Instant::now();
    }
}

/// Manages active sessions with automatic expiry.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionData>>>,
    timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new() -> Self {
        Self::with_timeout(SESSION_TIMEOUT)
    }

    /// Create a session manager with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            timeout,
        }
    }

    /// Create a new session and return its token.
    pub fn create_session(&self, user_id: i64, role: Role) -> SessionToken {
        let token = SessionToken::new();
        let timeout = self.timeout;

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(token.clone(), SessionData::new(Session { user_id, role }));

        // Clean up expired sessions while we have the lock
        sessions.retain(|_, data| !data.is_expired(timeout));

        token
    }

    /// Validate a token and refresh its expiry if valid.
    pub fn validate_session(&self, token: &SessionToken) -> Option<Session> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let data = sessions.get_mut(token)?;
        if data.is_expired(self.timeout) {
            sessions.remove(token);
            return None;
        }
        data.touch();
        Some(data.session)
    }

    /// Invalidate (logout) a session.
    pub fn invalidate_session(&self, token: &SessionToken) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(token);
    }

    /// Invalidate every session belonging to a user.
    pub fn invalidate_user(&self, user_id: i64) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, data| data.session.user_id != user_id);
    }
}

/// Main authentication manager.
#[derive(Debug, Clone, Default)]
pub struct AuthManager {
    sessions: SessionManager,
}

impl AuthManager {
    /// Create a new authentication manager.
    pub fn new() -> Self {
        Self {
            sessions: SessionManager::new(),
        }
    }

    /// Create an authentication manager whose sessions expire after `timeout` idle.
    pub fn with_session_timeout(timeout: Duration) -> Self {
        Self {
            sessions: SessionManager::with_timeout(timeout),
        }
    }

    /// Validate a password meets requirements.
    pub fn validate_password(password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(AuthError::PasswordEmpty);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }

        Ok(())
    }

    /// Hash a password using Argon2.
    ///
    /// Returns the hashed password as a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        Self::validate_password(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingFailed(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::VerificationFailed(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::VerificationFailed(e.to_string())),
        }
    }

    /// Create a session after a successful login.
    pub fn create_session(&self, user_id: i64, role: Role) -> SessionToken {
        self.sessions.create_session(user_id, role)
    }

    /// Validate a session token and refresh its expiry.
    pub fn validate_session(&self, token: &SessionToken) -> Option<Session> {
        self.sessions.validate_session(token)
    }

    /// Logout a session.
    pub fn logout(&self, token: &SessionToken) {
        self.sessions.invalidate_session(token);
    }

    /// Drop every session of a user.
    pub fn logout_user(&self, user_id: i64) {
        self.sessions.invalidate_user(user_id);
    }
}
