//! Session management
//!
//! Each session exclusively owns its agent, dialog state and conversation
//! log; no mutable state crosses session boundaries. The manager enforces a
//! capacity limit and expires idle sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use nearby_agent_core::{LocationProvider, PlacesLookup};

use crate::agent::{AgentConfig, NearbyAgent};
use crate::AgentError;

/// Session state
pub struct Session {
    /// Session ID
    pub id: String,
    /// Agent instance
    pub agent: Arc<NearbyAgent>,
    /// Creation time
    pub created_at: Instant,
    /// Last activity
    last_activity: RwLock<Instant>,
}

impl Session {
    fn new(
        id: impl Into<String>,
        config: AgentConfig,
        places: Arc<dyn PlacesLookup>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        let id = id.into();
        Self {
            agent: Arc::new(NearbyAgent::new(&id, config, places, location)),
            id,
            created_at: Instant::now(),
            last_activity: RwLock::new(Instant::now()),
        }
    }

    /// Update last activity
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    /// Check if session is expired
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }
}

/// Session manager
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    config: AgentConfig,
    places: Arc<dyn PlacesLookup>,
    location: Arc<dyn LocationProvider>,
    max_sessions: usize,
    session_timeout: Duration,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(
        config: AgentConfig,
        places: Arc<dyn PlacesLookup>,
        location: Arc<dyn LocationProvider>,
        max_sessions: usize,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            places,
            location,
            max_sessions,
            session_timeout: Duration::from_secs(3600),
        }
    }

    /// Override the idle timeout
    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    /// Create a new session
    pub fn create(&self) -> Result<Arc<Session>, AgentError> {
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);
            if sessions.len() >= self.max_sessions {
                return Err(AgentError::Session("Max sessions reached".to_string()));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(
            &id,
            self.config.clone(),
            Arc::clone(&self.places),
            Arc::clone(&self.location),
        ));
        sessions.insert(id.clone(), session.clone());

        tracing::info!("Created session: {}", id);

        Ok(session)
    }

    /// Get a session by ID
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove a session
    pub fn remove(&self, id: &str) {
        if self.sessions.write().remove(id).is_some() {
            tracing::info!("Removed session: {}", id);
        }
    }

    /// Active session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Cleanup expired sessions
    pub fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions);
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<Session>>) {
        let timeout = self.session_timeout;
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| session.is_expired(timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            sessions.remove(&id);
            tracing::info!("Expired session: {}", id);
        }
    }

    /// List all session IDs
    pub fn list(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nearby_agent_core::{
        Category, Coordinates, LocationError, LookupError, PlaceResult,
    };

    struct NoPlaces;

    #[async_trait]
    impl PlacesLookup for NoPlaces {
        async fn lookup_places(
            &self,
            _coords: Coordinates,
            _category: Category,
            _radius_km: f64,
        ) -> Result<Vec<PlaceResult>, LookupError> {
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "none"
        }
    }

    struct NoLocation;

    #[async_trait]
    impl LocationProvider for NoLocation {
        async fn request_location(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::Unavailable)
        }
    }

    fn manager(max_sessions: usize) -> SessionManager {
        SessionManager::new(
            AgentConfig::default(),
            Arc::new(NoPlaces),
            Arc::new(NoLocation),
            max_sessions,
        )
    }

    #[test]
    fn test_create_and_get() {
        let manager = manager(10);
        let session = manager.create().unwrap();

        let retrieved = manager.get(&session.id);
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().id, session.id);
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_remove() {
        let manager = manager(10);
        let session = manager.create().unwrap();

        manager.remove(&session.id);
        assert!(manager.get(&session.id).is_none());
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_capacity_limit() {
        let manager = manager(1);
        let _session = manager.create().unwrap();
        assert!(manager.create().is_err());
    }

    #[test]
    fn test_expiry() {
        let manager = manager(10).with_session_timeout(Duration::from_millis(0));
        let session = manager.create().unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert!(session.is_expired(Duration::from_millis(0)));
        manager.cleanup_expired();
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let manager = manager(10);
        let a = manager.create().unwrap();
        let b = manager.create().unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.agent.turn_count(), 0);
        assert_eq!(b.agent.turn_count(), 0);
    }
}
