//! Session Tracker
//!
//! Mirrors remote auth notifications into the local [`Session`].

use crate::domain::{Session, UserInfo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTracker {
    session: Session,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Rebuild the session from an auth-change notification.
    /// Returns whether the session changed.
    pub fn on_auth_change(&mut self, user: Option<&UserInfo>) -> bool {
        let next = Session::from_user(user);
        if next.authenticated != self.session.authenticated {
            tracing::info!(authenticated = next.authenticated, "auth state changed");
        }
        let changed = next != self.session;
        self.session = next;
        changed
    }

    /// Optimistic update after an interactive sign-in resolved
    pub fn signed_in(&mut self, user: &UserInfo) {
        self.on_auth_change(Some(user));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_sign_in_and_out() {
        let mut tracker = SessionTracker::new();
        assert!(!tracker.session().authenticated);

        let user = UserInfo::new("u1", Some("Ada"));
        assert!(tracker.on_auth_change(Some(&user)));
        assert_eq!(tracker.session().display_name.as_deref(), Some("Ada"));

        assert!(!tracker.on_auth_change(Some(&user)));

        assert!(tracker.on_auth_change(None));
        assert_eq!(tracker.session(), &Session::signed_out());
    }

    #[test]
    fn test_user_without_display_name() {
        let mut tracker = SessionTracker::new();
        tracker.signed_in(&UserInfo::new("u1", None));
        assert!(tracker.session().authenticated);
        assert_eq!(tracker.session().display_name, None);
    }
}
