//! Visitor contexts: one `Session` per signed-in browser visitor.
//!
//! ARCHITECTURE
//! ============
//! A visitor is identified by a random token in an HttpOnly cookie without
//! max-age, so it lives as long as the browser session and is shared by the
//! browser's tabs. Each stored `Session` sits behind its own mutex: a render
//! cycle holds it for its whole duration (remote calls included), which
//! serializes one visitor's actions without blocking anyone else. The map
//! lock is only held for lookups, inserts and removals.
//!
//! Only signed-in sessions are stored. A visitor without a stored context
//! renders from a throwaway logged-out `Session`, and a context is admitted
//! (and the cookie issued) only when a sign-in completes. Signing out drops
//! the context. The map is also capped: idle entries are pruned on admission
//! and the least recently seen entry is evicted when the cap is reached.
//! Contexts are never persisted.

use std::collections::HashMap;
use std::fmt::Write;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::Session;

pub const VISITOR_COOKIE: &str = "guru_visitor";
pub const MAX_VISITOR_CONTEXTS: usize = 10_000;

/// Shared handle to one visitor's session.
pub type SessionContext = Arc<Mutex<Session>>;

struct Entry {
    session: SessionContext,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    contexts: Arc<RwLock<HashMap<String, Entry>>>,
    idle_ttl: Duration,
    max_contexts: usize,
    cookie_secure: bool,
}

/// The session a render cycle works on.
pub enum Visit {
    /// A stored context, locked for the rest of the cycle.
    Known { id: String, session: OwnedMutexGuard<Session> },
    /// No stored context: a fresh logged-out session nobody else sees.
    Anonymous(Session),
}

impl Deref for Visit {
    type Target = Session;

    fn deref(&self) -> &Session {
        match self {
            Self::Known { session, .. } => &**session,
            Self::Anonymous(session) => session,
        }
    }
}

impl DerefMut for Visit {
    fn deref_mut(&mut self) -> &mut Session {
        match self {
            Self::Known { session, .. } => &mut **session,
            Self::Anonymous(session) => session,
        }
    }
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex visitor id.
#[must_use]
pub fn generate_visitor_id() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_ttl: Duration, cookie_secure: bool) -> Self {
        Self {
            contexts: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
            max_contexts: MAX_VISITOR_CONTEXTS,
            cookie_secure,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_max_contexts(mut self, max_contexts: usize) -> Self {
        self.max_contexts = max_contexts.max(1);
        self
    }

    /// Start a render cycle for the visitor named by the request cookie.
    /// Never stores anything.
    pub async fn visit(&self, jar: &CookieJar) -> Visit {
        let Some(id) = jar.get(VISITOR_COOKIE).map(|c| c.value().to_owned()) else {
            return Visit::Anonymous(Session::new());
        };

        let context = {
            let mut contexts = self.contexts.write().await;
            let now = Instant::now();
            match contexts.get_mut(&id) {
                Some(entry) if now.duration_since(entry.last_seen) < self.idle_ttl => {
                    entry.last_seen = now;
                    Some(Arc::clone(&entry.session))
                }
                Some(_) => {
                    contexts.remove(&id);
                    None
                }
                None => None,
            }
        };

        match context {
            Some(context) => Visit::Known { id, session: context.lock_owned().await },
            None => Visit::Anonymous(Session::new()),
        }
    }

    /// Finish a render cycle: admit a newly signed-in anonymous session
    /// (issuing its cookie) or drop a stored one that signed out.
    pub async fn keep(&self, jar: CookieJar, visit: Visit) -> CookieJar {
        match visit {
            Visit::Known { id, session } => {
                if !session.is_logged_in() {
                    drop(session);
                    self.contexts.write().await.remove(&id);
                    tracing::debug!("visitor context dropped");
                }
                jar
            }
            Visit::Anonymous(session) if session.is_logged_in() => {
                let id = self.admit(session).await;
                let cookie = Cookie::build((VISITOR_COOKIE, id))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .secure(self.cookie_secure);
                jar.add(cookie)
            }
            Visit::Anonymous(_) => jar,
        }
    }

    async fn admit(&self, session: Session) -> String {
        let id = generate_visitor_id();
        let now = Instant::now();
        let mut contexts = self.contexts.write().await;

        let idle_ttl = self.idle_ttl;
        contexts.retain(|_, entry| now.duration_since(entry.last_seen) < idle_ttl);
        while contexts.len() >= self.max_contexts {
            let oldest = contexts
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(key, _)| key.clone());
            let Some(oldest) = oldest else { break };
            contexts.remove(&oldest);
            tracing::warn!(max = self.max_contexts, "visitor context cap reached, evicted least recent");
        }

        contexts.insert(id.clone(), Entry { session: Arc::new(Mutex::new(session)), last_seen: now });
        tracing::debug!(visitors = contexts.len(), "visitor context admitted");
        id
    }

    /// Number of stored visitor contexts.
    #[cfg(test)]
    pub async fn visitor_count(&self) -> usize {
        self.contexts.read().await.len()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
