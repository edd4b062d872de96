//! Persistence of the signed-in username across restarts.

use nasugview_shared::constants::SESSION_USERNAME_KEY;

use crate::database::Database;
use crate::error::Result;

impl Database {
    pub fn load_username(&self) -> Result<Option<String>> {
        Ok(self
            .get_item(SESSION_USERNAME_KEY)?
            .filter(|name| !name.is_empty()))
    }

    pub fn save_username(&self, username: &str) -> Result<()> {
        tracing::debug!(username, "persisting session username");
        self.set_item(SESSION_USERNAME_KEY, username)
    }

    pub fn clear_username(&self) -> Result<bool> {
        self.remove_item(SESSION_USERNAME_KEY)
    }
}
