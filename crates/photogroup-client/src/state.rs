//! Application state shared by every screen.
//!
//! [`AppState`] lives behind `Arc<Mutex<>>` inside [`AppContext`], which is
//! cheap to clone and handed to each screen.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use photogroup_net::Backend;
use photogroup_store::{Database, Session};

use crate::error::{ClientError, ClientResult};
use crate::events::{AppEvent, EventBus};
use crate::ports::Devices;

/// Central application state.
pub struct AppState {
    /// The logged-in user. `None` on the login and registration screens.
    pub session: Option<Session>,

    /// Device storage. `None` only when running without persistence.
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(database: Option<Database>) -> Self {
        Self {
            session: None,
            database,
        }
    }
}

/// Everything a screen needs: state, backend, platform services, events.
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<Mutex<AppState>>,
    pub backend: Arc<dyn Backend>,
    pub devices: Devices,
    pub events: EventBus,
}

impl AppContext {
    pub fn new(state: AppState, backend: Arc<dyn Backend>, devices: Devices) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            backend,
            devices,
            events: EventBus::default(),
        }
    }

    fn lock(&self) -> ClientResult<MutexGuard<'_, AppState>> {
        self.state
            .lock()
            .map_err(|_| ClientError::InvalidState("app state lock poisoned"))
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().ok().and_then(|s| s.session.clone())
    }

    pub fn require_session(&self) -> ClientResult<Session> {
        self.session().ok_or(ClientError::NotLoggedIn)
    }

    /// Loads the persisted session into memory, if any.
    pub fn restore_session(&self) -> ClientResult<Option<Session>> {
        let mut state = self.lock()?;
        let restored = match state.database.as_ref() {
            Some(db) => db.load_session()?,
            None => None,
        };
        if let Some(session) = &restored {
            info!(user_id = %session.user_id, "Session restored");
        }
        state.session = restored.clone();
        Ok(restored)
    }

    /// Persists `session` and makes it current.
    pub fn begin_session(&self, session: Session) -> ClientResult<()> {
        let user_id = session.user_id;
        {
            let mut state = self.lock()?;
            match state.database.as_ref() {
                Some(db) => db.save_session(&session)?,
                None => warn!("No device storage, session will not survive a restart"),
            }
            state.session = Some(session);
        }
        info!(%user_id, "Session started");
        self.events.emit(AppEvent::SessionStarted { user_id });
        Ok(())
    }

    /// Clears the persisted session (logout, account deletion).
    pub fn end_session(&self) -> ClientResult<()> {
        {
            let mut state = self.lock()?;
            if let Some(db) = state.database.as_ref() {
                db.clear_session()?;
            }
            state.session = None;
        }
        info!("Session ended");
        self.events.emit(AppEvent::SessionEnded);
        Ok(())
    }
}
