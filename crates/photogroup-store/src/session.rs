//! The persisted session record.

use photogroup_shared::constants::SESSION_STORAGE_KEY;

use crate::database::Database;
use crate::error::Result;
use crate::models::Session;

impl Database {
    pub fn save_session(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.set_value(SESSION_STORAGE_KEY, &json)?;
        tracing::debug!(user_id = %session.user_id, "session saved");
        Ok(())
    }

    /// Load the stored session. A record that no longer parses is logged
    /// and treated as signed out.
    pub fn load_session(&self) -> Result<Option<Session>> {
        let Some(json) = self.get_value(SESSION_STORAGE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Session>(&json) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session record");
                Ok(None)
            }
        }
    }

    pub fn clear_session(&self) -> Result<()> {
        if self.remove_value(SESSION_STORAGE_KEY)? {
            tracing::debug!("session cleared");
        }
        Ok(())
    }
}
