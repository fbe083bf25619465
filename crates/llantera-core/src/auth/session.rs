//! Session state

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::UserIdentity;

/// Verification status of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Unchecked,
    Checking,
    Valid,
    Invalid,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Unchecked => "unchecked",
            SessionStatus::Checking => "checking",
            SessionStatus::Valid => "valid",
            SessionStatus::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// What a protected view should do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Verification pending, show a loading indicator
    Wait,
    Render,
    Redirect,
}

impl From<SessionStatus> for RouteDecision {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Unchecked | SessionStatus::Checking => RouteDecision::Wait,
            SessionStatus::Valid => RouteDecision::Render,
            SessionStatus::Invalid => RouteDecision::Redirect,
        }
    }
}

/// Result of an on-demand check before a sensitive action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardCheck {
    pub valid: bool,
    pub should_redirect: bool,
}

impl GuardCheck {
    pub fn valid() -> Self {
        Self {
            valid: true,
            should_redirect: false,
        }
    }

    pub fn redirect() -> Self {
        Self {
            valid: false,
            should_redirect: true,
        }
    }
}

/// The client's belief about the current authentication
///
/// `Valid` implies both `user` and `token`; `Invalid` implies no `token`.
/// Only the guard mutates it, through the transition methods below.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    #[serde(skip_serializing)]
    pub(crate) token: Option<String>,
    pub user: Option<UserIdentity>,
    pub status: SessionStatus,
    pub last_error: Option<String>,
    pub checked_at: Option<DateTime<Utc>>,
    /// Bumped by every `begin_check`; a result for an older check is stale
    #[serde(skip_serializing)]
    pub(crate) check_generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Valid
    }

    pub fn decision(&self) -> RouteDecision {
        self.status.into()
    }

    pub(crate) fn begin_check(&mut self, token: String) -> u64 {
        self.token = Some(token);
        self.status = SessionStatus::Checking;
        self.check_generation += 1;
        self.check_generation
    }

    /// Whether a result for check `generation` may still be applied
    pub(crate) fn is_current_check(&self, generation: u64) -> bool {
        self.status == SessionStatus::Checking && self.check_generation == generation
    }

    pub(crate) fn validate(&mut self, token: String, user: UserIdentity) {
        self.token = Some(token);
        self.user = Some(user);
        self.status = SessionStatus::Valid;
        self.last_error = None;
        self.checked_at = Some(Utc::now());
    }

    pub(crate) fn invalidate(&mut self, error: Option<String>) {
        self.token = None;
        self.user = None;
        self.status = SessionStatus::Invalid;
        self.last_error = error;
        self.checked_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserIdentity {
        UserIdentity {
            id: Some(1),
            username: "admin".to_string(),
            email: None,
            roles: vec![],
        }
    }

    #[test]
    fn test_new_session_is_unchecked() {
        let session = Session::new();
        assert_eq!(session.status, SessionStatus::Unchecked);
        assert_eq!(session.decision(), RouteDecision::Wait);
        assert!(!session.has_token());
    }

    #[test]
    fn test_validate_sets_user_and_token() {
        let mut session = Session::new();
        session.begin_check("tok".to_string());
        assert_eq!(session.decision(), RouteDecision::Wait);

        session.validate("tok".to_string(), user());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert!(session.user.is_some());
        assert_eq!(session.decision(), RouteDecision::Render);
    }

    #[test]
    fn test_invalidate_clears_token() {
        let mut session = Session::new();
        session.validate("tok".to_string(), user());
        session.invalidate(Some("expired".to_string()));

        assert_eq!(session.status, SessionStatus::Invalid);
        assert!(session.token().is_none());
        assert!(session.user.is_none());
        assert_eq!(session.last_error.as_deref(), Some("expired"));
        assert_eq!(session.decision(), RouteDecision::Redirect);
    }

    #[test]
    fn test_newer_check_supersedes_older() {
        let mut session = Session::new();
        let first = session.begin_check("old".to_string());
        let second = session.begin_check("new".to_string());

        assert!(!session.is_current_check(first));
        assert!(session.is_current_check(second));

        session.invalidate(None);
        assert!(!session.is_current_check(second));
    }

    #[test]
    fn test_session_serialization_hides_token() {
        let mut session = Session::new();
        session.validate("super-secret".to_string(), user());

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("\"status\":\"valid\""));
    }
}
