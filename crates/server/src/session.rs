//! Login state kept in the per-browser session

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key under which the logged-in identity is stored
pub const SESSION_IDENTITY_KEY: &str = "identity";

/// The two recognized roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    /// Path of this role's dashboard
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Doctor => "/doctor",
            Role::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Who is logged in on this session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub username: String,
    pub role: Role,
}

/// Identity of the caller, injected into request extensions by the role
/// gate once it has checked the session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionState);

/// Read the identity stored on the session, if any
pub async fn load(
    session: &Session,
) -> Result<Option<SessionState>, tower_sessions::session::Error> {
    session.get::<SessionState>(SESSION_IDENTITY_KEY).await
}

/// Record a fresh login. The session id is rotated first.
pub async fn store(
    session: &Session,
    state: &SessionState,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_IDENTITY_KEY, state).await
}

/// Drop everything on the session
pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
