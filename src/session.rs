use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::completion::AVAILABLE_MODELS;
use crate::models::{FormState, Generation};

pub const SESSION_COOKIE: &str = "caption_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

/// Everything the page remembers for one browser session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub form: FormState,
    pub model: String,
    pub generation: Option<Generation>,
    pub copied_caption: Option<String>,
}

impl SessionState {
    pub fn new(model: &str) -> Self {
        Self {
            form: FormState::default(),
            model: model.to_string(),
            generation: None,
            copied_caption: None,
        }
    }
}

/// Sessions idle longer than this are dropped
pub const DEFAULT_IDLE_TTL_MINUTES: i64 = 60;
/// Upper bound on live sessions; the least recently seen is evicted beyond it
pub const MAX_SESSIONS: usize = 10_000;

struct Entry {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

impl Entry {
    fn new(model: &str) -> Self {
        Self {
            state: SessionState::new(model),
            last_seen: Utc::now(),
        }
    }
}

/// In-memory, per-process session store with idle expiry
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    default_model: String,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(default_model: Option<&str>, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_model: default_model.unwrap_or(AVAILABLE_MODELS[0]).to_string(),
            idle_ttl,
            max_sessions: MAX_SESSIONS,
        }
    }

    /// Return the given session if it is still live, without opening a new one
    pub async fn lookup(&self, candidate: Option<SessionId>) -> Option<SessionId> {
        let id = candidate?;
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let live = match sessions.get_mut(&id) {
            Some(entry) if now - entry.last_seen <= self.idle_ttl => {
                entry.last_seen = now;
                true
            }
            Some(_) => false,
            None => return None,
        };
        if live {
            Some(id)
        } else {
            sessions.remove(&id);
            tracing::debug!(session = %id.0, "Session expired");
            None
        }
    }

    /// Return the given session if live, otherwise open a fresh one
    pub async fn resolve(&self, candidate: Option<SessionId>) -> (SessionId, bool) {
        if let Some(id) = self.lookup(candidate).await {
            return (id, false);
        }

        let mut sessions = self.sessions.write().await;
        self.prune(&mut sessions);

        let id = SessionId(Uuid::new_v4());
        sessions.insert(id, Entry::new(&self.default_model));
        tracing::debug!(session = %id.0, live = sessions.len(), "Opened new session");
        (id, true)
    }

    /// Drop idle sessions, then evict the least recently seen until there is room for one more
    fn prune(&self, sessions: &mut HashMap<SessionId, Entry>) {
        let cutoff = Utc::now() - self.idle_ttl;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen >= cutoff);

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Pruned sessions");
        }
    }

    pub async fn get(&self, id: SessionId) -> SessionState {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|entry| entry.state.clone())
            .unwrap_or_else(|| SessionState::new(&self.default_model))
    }

    /// Apply `f` to the session state, creating it if it has gone missing
    pub async fn update<F>(&self, id: SessionId, f: F) -> SessionState
    where
        F: FnOnce(&mut SessionState),
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .entry(id)
            .or_insert_with(|| Entry::new(&self.default_model));
        entry.last_seen = Utc::now();
        f(&mut entry.state);
        entry.state.clone()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
