//! Kingdom of Loathing collaborators: session handling, player search and
//! ascension history.
mod parse;
mod session;

pub use session::KolSession;

use crate::ascension::RunRecord;
use crate::error::Result;

pub type PlayerId = u64;

/// One row of a player search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMatch {
    pub user_name: String,
    pub user_id: PlayerId,
}

pub trait GameSession {
    fn login(&mut self, user: &str, passwd: &str) -> Result<()>;
    fn logout(&mut self) -> Result<()>;
}

pub trait PlayerSearch {
    /// Every player the game's search returns for `name`, exact or not.
    fn search(&self, name: &str) -> Result<Vec<PlayerMatch>>;
}

pub trait HistoryFetch {
    /// A player's full ascension history, as the game lists it.
    fn fetch(&self, user_id: PlayerId) -> Result<Vec<RunRecord>>;
}
