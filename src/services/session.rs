use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::core::SwipeState;
use crate::models::CurrentUser;

/// One mounted swipe screen: the acting user plus queue and cursor
#[derive(Debug)]
pub struct SwipeSession {
    pub user: CurrentUser,
    pub state: SwipeState,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// In-process store of live swipe sessions
///
/// Backed by a TTL cache: a session the client never closes expires the way
/// an unmounted screen would. Each session is wrapped in an async mutex so
/// operations against one queue are serialized; no two decides can be in
/// flight against the same state.
#[derive(Clone)]
pub struct SessionStore {
    sessions: moka::future::Cache<String, Arc<Mutex<SwipeSession>>>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(ttl_secs))
            .build();

        Self { sessions }
    }

    /// Store a new session and return its id
    pub async fn create(&self, user: CurrentUser, state: SwipeState) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();

        let session = SwipeSession {
            user,
            state,
            created_at: chrono::Utc::now(),
        };

        self.sessions
            .insert(session_id.clone(), Arc::new(Mutex::new(session)))
            .await;

        tracing::debug!("Created swipe session: {}", session_id);

        session_id
    }

    /// Look up a live session
    pub async fn get(&self, session_id: &str) -> Option<Arc<Mutex<SwipeSession>>> {
        self.sessions.get(session_id).await
    }

    /// Discard a session (screen unmount)
    pub async fn remove(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
        tracing::debug!("Removed swipe session: {}", session_id);
    }

    pub fn live_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
