//! Session State
//!
//! Local view of the remote authentication state.

use serde::{Deserialize, Serialize};

/// User record delivered by the auth provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserInfo {
    pub fn new(uid: impl Into<String>, display_name: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.map(str::to_string),
            email: None,
        }
    }
}

/// Whether someone is signed in, and who
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub display_name: Option<String>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Rebuild the session from an auth notification
    pub fn from_user(user: Option<&UserInfo>) -> Self {
        match user {
            Some(user) => Self {
                authenticated: true,
                display_name: user.display_name.clone(),
            },
            None => Self::signed_out(),
        }
    }
}
