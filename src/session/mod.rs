// Remote mpd session - everything panmenu asks of the daemon goes through here
// One handle, strictly sequential calls, no retries at this level

pub mod mpc;
pub mod status;
pub mod track;

pub use mpc::MpcSession;
pub use status::{PlayOption, PlayState, Status, StatusParser};
pub use track::Track;

use crate::error::Result;
use crate::menu::query::AtomicQuery;

/// Exact (`find`) or fuzzy (`search`) tag matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Find,
    Search,
}

impl MatchMode {
    pub fn command(self) -> &'static str {
        match self {
            MatchMode::Find => "find",
            MatchMode::Search => "search",
        }
    }
}

pub trait Session {
    fn status(&mut self) -> Result<Status>;
    fn current_track(&mut self) -> Result<Option<Track>>;
    /// Queue contents, every track carrying its `pos`
    fn playlist_tracks(&mut self) -> Result<Vec<Track>>;

    // Playback control
    fn play(&mut self, pos: Option<usize>) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn next(&mut self) -> Result<()>;
    fn previous(&mut self) -> Result<()>;
    fn seek(&mut self, position: &str) -> Result<()>;
    fn set_option(&mut self, option: PlayOption, enabled: bool) -> Result<()>;
    fn set_volume(&mut self, volume: u8) -> Result<()>;

    // Current queue
    fn clear(&mut self) -> Result<()>;
    fn add(&mut self, file: &str) -> Result<()>;
    fn delete(&mut self, pos: usize) -> Result<()>;
    fn move_track(&mut self, from: usize, to: usize) -> Result<()>;
    fn shuffle(&mut self) -> Result<()>;

    // Stored playlists
    /// Fails with `Error::AlreadyExists` when the name is taken
    fn save(&mut self, name: &str) -> Result<()>;
    fn remove_playlist(&mut self, name: &str) -> Result<()>;
    fn load_playlist(&mut self, name: &str) -> Result<()>;
    fn rename_playlist(&mut self, from: &str, to: &str) -> Result<()>;
    fn list_playlists(&mut self) -> Result<Vec<String>>;
    fn playlist_contents(&mut self, name: &str) -> Result<Vec<Track>>;

    // Database
    fn tag_types(&mut self) -> Result<Vec<String>>;
    fn list_values(&mut self, field: &str, query: &AtomicQuery) -> Result<Vec<String>>;
    fn find(&mut self, mode: MatchMode, query: &AtomicQuery) -> Result<Vec<Track>>;
    /// Append every match straight to the queue
    fn find_add(&mut self, mode: MatchMode, query: &AtomicQuery) -> Result<()>;
}
