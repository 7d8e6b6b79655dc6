// Top-level command menu - the first thing panmenu shows
// Each entry maps onto one small handler; errors from mpd are offered a retry

mod playback;
mod queue;
mod stored;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::menu::{save_queue, QueryBuilder, Search};
use crate::picker::{Picker, Selection};
use crate::session::{MatchMode, Session};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Resume,
    Pause,
    Stop,
    Toggle,
    CurrentSong,
    Previous,
    Next,
    Clear,
    Search,
    Find,
    Play,
    Playlist,
    SavePlaylist,
    AllPlaylists,
    Options,
    Shuffle,
}

impl Command {
    /// Menu order
    pub const ALL: [Command; 16] = [
        Command::Resume,
        Command::Pause,
        Command::Stop,
        Command::Toggle,
        Command::CurrentSong,
        Command::Previous,
        Command::Next,
        Command::Clear,
        Command::Search,
        Command::Find,
        Command::Play,
        Command::Playlist,
        Command::SavePlaylist,
        Command::AllPlaylists,
        Command::Options,
        Command::Shuffle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::Resume => "resume",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Toggle => "toggle",
            Command::CurrentSong => "current song",
            Command::Previous => "previous",
            Command::Next => "next",
            Command::Clear => "clear",
            Command::Search => "search",
            Command::Find => "find",
            Command::Play => "play",
            Command::Playlist => "playlist",
            Command::SavePlaylist => "save playlist",
            Command::AllPlaylists => "all playlists",
            Command::Options => "options",
            Command::Shuffle => "shuffle",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// The main loop: pick a command, run it, repeat until cancelled
pub struct Menu<'a> {
    session: &'a mut dyn Session,
    picker: &'a mut dyn Picker,
    search: SearchConfig,
}

impl<'a> Menu<'a> {
    pub fn new(session: &'a mut dyn Session, picker: &'a mut dyn Picker, search: SearchConfig) -> Self {
        Self {
            session,
            picker,
            search,
        }
    }

    /// Runs until the user cancels the command menu or closes an error
    /// prompt. Only invariant violations come back as `Err`.
    pub fn run(&mut self) -> Result<()> {
        let labels: Vec<&str> = Command::ALL.iter().map(|c| c.label()).collect();
        loop {
            let command = match self.picker.pick_str(&labels, "Action:")? {
                Selection::Cancelled => {
                    debug!("command menu cancelled");
                    return Ok(());
                }
                Selection::Empty => continue,
                Selection::Chosen(picked) => match Command::from_label(&picked[0]) {
                    Some(command) => command,
                    None => continue,
                },
            };

            info!("Running command '{}'", command.label());
            match self.execute(command) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    if !self.offer_retry(&e)? {
                        return Ok(());
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Shows `{retry, close}` for a failed command; true means keep going
    fn offer_retry(&mut self, err: &Error) -> Result<bool> {
        error!("Command failed: {}", err);
        let prompt = match err {
            Error::ConnectionLost(_) => "Connection error".to_string(),
            other => other.to_string(),
        };
        let answer = self.picker.pick_str(&["retry", "close"], &prompt)?;
        let retry = answer.into_first().as_deref() == Some("retry");
        if !retry {
            warn!("Closing after error");
        }
        Ok(retry)
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        let config = &self.search;
        let range_mode = config.range_mode;
        let session = &mut *self.session;
        let picker = &mut *self.picker;

        match command {
            Command::Resume => session.play(None),
            Command::Pause => session.pause(),
            Command::Stop => session.stop(),
            Command::Toggle => playback::toggle(session),
            Command::CurrentSong => playback::current_song(session, picker),
            Command::Previous => session.previous(),
            Command::Next => session.next(),
            Command::Clear => session.clear(),
            Command::Search => search(session, picker, config, MatchMode::Search),
            Command::Find => search(session, picker, config, MatchMode::Find),
            Command::Play => queue::play(session, picker),
            Command::Playlist => queue::edit(session, picker, range_mode),
            Command::SavePlaylist => save_queue(session, picker, "Playlist name:").map(|_| ()),
            Command::AllPlaylists => stored::browse(session, picker, range_mode),
            Command::Options => playback::options(session, picker),
            Command::Shuffle => queue::shuffle(session, picker),
        }
    }
}

fn search(session: &mut dyn Session, picker: &mut dyn Picker, config: &SearchConfig, mode: MatchMode) -> Result<()> {
    let fields = session.tag_types()?;
    let builder = QueryBuilder::new(fields, config.free_text_fields.clone());
    Search::new(session, picker, mode, builder, config.range_mode).run()
}
