use tower_sessions::Session;

use crate::auth::current_user;
use crate::error::Result;
use crate::flash::{take_flashes, Flash};

/// Data every page layout needs: pending notices and who is logged in.
pub struct PageContext {
    pub flashes: Vec<Flash>,
    pub username: Option<String>,
}

impl PageContext {
    /// Loads the context and consumes the pending flashes.
    pub async fn load(session: &Session) -> Result<Self> {
        let flashes = take_flashes(session).await?;
        let username = current_user(session).await?.map(|user| user.username);
        Ok(Self { flashes, username })
    }
}
