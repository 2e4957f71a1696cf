//! Session table and per-request session context

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::time::Instant;

use crate::auth::Profile;

const TOKEN_LENGTH: usize = 32;

/// Identity of the current request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    token: Option<String>,
    user: Option<Profile>,
}

impl SessionContext {
    /// Context of a request without a valid session
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(token: String, user: Profile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&Profile> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
struct Session {
    profile: Profile,
    expires_at: Instant,
}

/// Table of session tokens, bounded in lifetime and size
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Start a session and return its token
    ///
    /// Expired sessions are pruned first; at capacity the session closest
    /// to expiry is evicted.
    pub fn sign_in(&self, profile: Profile) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let now = Instant::now();
        match self.sessions.write() {
            Ok(mut sessions) => {
                sessions.retain(|_, session| session.expires_at > now);
                while sessions.len() >= self.max_sessions {
                    let oldest = sessions
                        .iter()
                        .min_by_key(|(_, session)| session.expires_at)
                        .map(|(token, _)| token.clone());
                    match oldest {
                        Some(oldest) => {
                            log::debug!("Session limit of {} reached, evicting oldest", self.max_sessions);
                            sessions.remove(&oldest);
                        }
                        None => break,
                    }
                }
                sessions.insert(
                    token.clone(),
                    Session {
                        profile,
                        expires_at: now + self.ttl,
                    },
                );
            }
            Err(e) => log::error!("Session table poisoned, session not stored: {}", e),
        }
        token
    }

    /// Resolve a token into a session context; expired tokens are anonymous
    pub fn resolve(&self, token: Option<&str>) -> SessionContext {
        let Some(token) = token else {
            return SessionContext::anonymous();
        };
        let now = Instant::now();
        let user = self.sessions.read().ok().and_then(|sessions| {
            sessions
                .get(token)
                .filter(|session| session.expires_at > now)
                .map(|session| session.profile.clone())
        });
        match user {
            Some(user) => SessionContext::signed_in(token.to_string(), user),
            None => SessionContext::anonymous(),
        }
    }

    /// Drop a session; returns whether it existed
    pub fn sign_out(&self, token: &str) -> bool {
        self.sessions
            .write()
            .map(|mut sessions| sessions.remove(token).is_some())
            .unwrap_or(false)
    }

    /// Number of sessions that have not expired
    pub fn active_sessions(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .map(|s| s.values().filter(|session| session.expires_at > now).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_anonymous_context() {
        let context = SessionContext::anonymous();
        assert!(!context.is_signed_in());
        assert!(context.current_user().is_none());
        assert!(context.token().is_none());
    }

    #[test]
    fn test_sign_in_and_resolve() {
        let store = SessionStore::default();
        let token = store.sign_in(profile());
        assert_eq!(token.len(), TOKEN_LENGTH);

        let context = store.resolve(Some(&token));
        assert!(context.is_signed_in());
        assert_eq!(context.current_user().unwrap().name, "John Doe");
        assert_eq!(context.token(), Some(token.as_str()));
    }

    #[test]
    fn test_unknown_token_is_anonymous() {
        let store = SessionStore::default();
        store.sign_in(profile());
        assert!(!store.resolve(Some("not-a-token")).is_signed_in());
        assert!(!store.resolve(None).is_signed_in());
    }

    #[test]
    fn test_sign_out_invalidates_token() {
        let store = SessionStore::default();
        let token = store.sign_in(profile());
        assert_eq!(store.active_sessions(), 1);

        assert!(store.sign_out(&token));
        assert!(!store.resolve(Some(&token)).is_signed_in());
        assert!(!store.sign_out(&token));
        assert_eq!(store.active_sessions(), 0);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::default();
        let a = store.sign_in(profile());
        let b = store.sign_in(profile());
        assert_ne!(a, b);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires_after_ttl() {
        let store = SessionStore::new(Duration::from_secs(60), 10);
        let token = store.sign_in(profile());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.resolve(Some(&token)).is_signed_in());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!store.resolve(Some(&token)).is_signed_in());
        assert_eq!(store.active_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_sessions_are_pruned_on_sign_in() {
        let store = SessionStore::new(Duration::from_secs(60), 10);
        store.sign_in(profile());
        store.sign_in(profile());

        tokio::time::advance(Duration::from_secs(61)).await;
        store.sign_in(profile());
        assert_eq!(store.sessions.read().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oldest_session_evicted_at_capacity() {
        let store = SessionStore::new(Duration::from_secs(3600), 2);
        let first = store.sign_in(profile());
        tokio::time::advance(Duration::from_secs(1)).await;
        let second = store.sign_in(profile());
        tokio::time::advance(Duration::from_secs(1)).await;
        let third = store.sign_in(profile());

        assert_eq!(store.active_sessions(), 2);
        assert!(!store.resolve(Some(&first)).is_signed_in());
        assert!(store.resolve(Some(&second)).is_signed_in());
        assert!(store.resolve(Some(&third)).is_signed_in());
    }
}
