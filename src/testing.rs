// Test doubles shared by the unit tests: a picker that replays canned
// answers and an in-memory mpd that records every call it gets

use crate::error::{Error, Result};
use crate::menu::query::{AtomicQuery, ANY_FIELD};
use crate::picker::{Picker, Selection};
use crate::session::{MatchMode, PlayOption, PlayState, Session, Status, Track};
use std::collections::{BTreeMap, VecDeque};

/// Replays queued answers in order; runs out into `Cancelled`
#[derive(Default)]
pub struct ScriptedPicker {
    responses: VecDeque<Selection<String>>,
    prompts: Vec<(Vec<String>, String, bool)>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(mut self, lines: &[&str]) -> Self {
        let lines = lines.iter().map(|s| s.to_string()).collect();
        self.responses.push_back(Selection::Chosen(lines));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.responses.push_back(Selection::Cancelled);
        self
    }

    pub fn empty(mut self) -> Self {
        self.responses.push_back(Selection::Empty);
        self
    }

    /// `(items, prompt, free_text)` of every pick so far
    pub fn prompts(&self) -> &[(Vec<String>, String, bool)] {
        &self.prompts
    }

    pub fn prompt_names(&self) -> Vec<&str> {
        self.prompts.iter().map(|(_, p, _)| p.as_str()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Picker for ScriptedPicker {
    fn pick(&mut self, items: &[String], prompt: &str, free_text: bool) -> Result<Selection<String>> {
        self.prompts
            .push((items.to_vec(), prompt.to_string(), free_text));
        Ok(self.responses.pop_front().unwrap_or(Selection::Cancelled))
    }
}

#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub track: Track,
    pub tags: Vec<(String, String)>,
}

impl LibraryEntry {
    fn tag(&self, field: &str) -> Vec<&str> {
        match field {
            "file" => vec![self.track.file.as_str()],
            "artist" => self.track.artist.as_deref().into_iter().collect(),
            "title" => self.track.title.as_deref().into_iter().collect(),
            ANY_FIELD => {
                let mut all: Vec<&str> = self.track.artist.as_deref().into_iter().collect();
                all.extend(self.track.title.as_deref());
                all.extend(self.tags.iter().map(|(_, v)| v.as_str()));
                all
            }
            other => self
                .tags
                .iter()
                .filter(|(f, _)| f == other)
                .map(|(_, v)| v.as_str())
                .collect(),
        }
    }

    fn matches(&self, mode: MatchMode, query: &AtomicQuery) -> bool {
        query.terms().iter().all(|(field, wanted)| {
            self.tag(&field.to_lowercase()).iter().any(|have| match mode {
                MatchMode::Find => have == wanted,
                MatchMode::Search => have.to_lowercase().contains(&wanted.to_lowercase()),
            })
        })
    }
}

/// In-memory stand-in for mpd
#[derive(Default)]
pub struct FakeSession {
    pub library: Vec<LibraryEntry>,
    pub queue: Vec<Track>,
    pub current: Option<usize>,
    pub playlists: BTreeMap<String, Vec<Track>>,
    pub status: Status,
    pub calls: Vec<String>,
    /// Command name that fails with `ConnectionLost`
    pub fail_on: Option<String>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library() -> Self {
        let mut session = Self::new();
        let songs = [
            ("jazz/so_what.flac", Some("Miles Davis"), Some("So What"), "Jazz"),
            ("jazz/blue_in_green.flac", Some("Miles Davis"), Some("Blue in Green"), "Jazz"),
            ("jazz/take_five.flac", Some("Dave Brubeck"), Some("Take Five"), "Jazz"),
            ("rock/teen_spirit.mp3", Some("Nirvana"), Some("Smells Like Teen Spirit"), "Rock"),
            ("rock/come_as_you_are.mp3", Some("Nirvana"), Some("Come as You Are"), "Rock"),
            ("funk/untagged.mp3", None, None, "Funk"),
        ];
        for (file, artist, title, genre) in songs {
            let track = Track {
                file: file.to_string(),
                artist: artist.map(str::to_string),
                title: title.map(str::to_string),
                pos: None,
            };
            session.library.push(LibraryEntry {
                track,
                tags: vec![("genre".to_string(), genre.to_string())],
            });
        }
        session.status.volume = Some(50);
        session
    }

    /// Put library files straight into the queue, bypassing the call log
    pub fn queued(mut self, files: &[&str]) -> Self {
        for file in files {
            let track = self.lookup(file);
            self.queue.push(track);
        }
        self
    }

    pub fn queue_files(&self) -> Vec<&str> {
        self.queue.iter().map(|t| t.file.as_str()).collect()
    }

    fn lookup(&self, file: &str) -> Track {
        self.library
            .iter()
            .find(|e| e.track.file == file)
            .map(|e| e.track.clone())
            .unwrap_or_else(|| Track::new(file))
    }

    fn record(&mut self, call: String) -> Result<()> {
        let name = call.split(' ').next().unwrap_or_default().to_string();
        self.calls.push(call);
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(Error::ConnectionLost(format!("{} refused", name)));
        }
        Ok(())
    }

    fn describe(query: &AtomicQuery) -> String {
        query
            .terms()
            .iter()
            .map(|(f, v)| format!("{} {}", f, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn matching(&self, mode: MatchMode, query: &AtomicQuery) -> Vec<Track> {
        self.library
            .iter()
            .filter(|e| e.matches(mode, query))
            .map(|e| e.track.clone())
            .collect()
    }
}

impl Session for FakeSession {
    fn status(&mut self) -> Result<Status> {
        self.record("status".into())?;
        Ok(self.status.clone())
    }

    fn current_track(&mut self) -> Result<Option<Track>> {
        self.record("current".into())?;
        Ok(self
            .current
            .and_then(|i| self.queue.get(i).map(|t| t.clone().at(i))))
    }

    fn playlist_tracks(&mut self) -> Result<Vec<Track>> {
        self.record("playlist".into())?;
        Ok(self
            .queue
            .iter()
            .enumerate()
            .map(|(i, t)| t.clone().at(i))
            .collect())
    }

    fn play(&mut self, pos: Option<usize>) -> Result<()> {
        match pos {
            Some(p) => self.record(format!("play {}", p))?,
            None => self.record("play".into())?,
        }
        self.status.state = PlayState::Play;
        self.current = pos.or(self.current).or(if self.queue.is_empty() { None } else { Some(0) });
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record("pause".into())?;
        self.status.state = PlayState::Pause;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.record("stop".into())?;
        self.status.state = PlayState::Stop;
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        self.record("next".into())
    }

    fn previous(&mut self) -> Result<()> {
        self.record("previous".into())
    }

    fn seek(&mut self, position: &str) -> Result<()> {
        self.record(format!("seek {}", position))
    }

    fn set_option(&mut self, option: PlayOption, enabled: bool) -> Result<()> {
        self.record(format!("{} {}", option.name(), enabled))?;
        match option {
            PlayOption::Random => self.status.random = enabled,
            PlayOption::Repeat => self.status.repeat = enabled,
            PlayOption::Single => self.status.single = enabled,
            PlayOption::Consume => self.status.consume = enabled,
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.record(format!("volume {}", volume))?;
        self.status.volume = Some(volume);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.record("clear".into())?;
        self.queue.clear();
        self.current = None;
        Ok(())
    }

    fn add(&mut self, file: &str) -> Result<()> {
        self.record(format!("add {}", file))?;
        let track = self.lookup(file);
        self.queue.push(track);
        Ok(())
    }

    fn delete(&mut self, pos: usize) -> Result<()> {
        self.record(format!("delete {}", pos))?;
        if pos >= self.queue.len() {
            return Err(Error::Backend {
                command: "delete".into(),
                message: "Bad song index".into(),
            });
        }
        self.queue.remove(pos);
        Ok(())
    }

    fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        self.record(format!("move {} {}", from, to))?;
        let track = self.queue.remove(from);
        self.queue.insert(to, track);
        Ok(())
    }

    fn shuffle(&mut self) -> Result<()> {
        self.record("shuffle".into())
    }

    fn save(&mut self, name: &str) -> Result<()> {
        self.record(format!("save {}", name))?;
        if self.playlists.contains_key(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        self.playlists.insert(name.to_string(), self.queue.clone());
        Ok(())
    }

    fn remove_playlist(&mut self, name: &str) -> Result<()> {
        self.record(format!("rm {}", name))?;
        self.playlists
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::Backend {
                command: "rm".into(),
                message: "No such playlist".into(),
            })
    }

    fn load_playlist(&mut self, name: &str) -> Result<()> {
        self.record(format!("load {}", name))?;
        let tracks = self.playlists.get(name).cloned().unwrap_or_default();
        self.queue.extend(tracks);
        Ok(())
    }

    fn rename_playlist(&mut self, from: &str, to: &str) -> Result<()> {
        self.record(format!("rename {} {}", from, to))?;
        if self.playlists.contains_key(to) {
            return Err(Error::AlreadyExists(to.to_string()));
        }
        let tracks = self.playlists.remove(from).unwrap_or_default();
        self.playlists.insert(to.to_string(), tracks);
        Ok(())
    }

    fn list_playlists(&mut self) -> Result<Vec<String>> {
        self.record("lsplaylists".into())?;
        Ok(self.playlists.keys().cloned().collect())
    }

    fn playlist_contents(&mut self, name: &str) -> Result<Vec<Track>> {
        self.record(format!("listplaylist {}", name))?;
        Ok(self.playlists.get(name).cloned().unwrap_or_default())
    }

    fn tag_types(&mut self) -> Result<Vec<String>> {
        self.record("tagtypes".into())?;
        Ok(vec!["Artist".into(), "Genre".into(), "Title".into()])
    }

    fn list_values(&mut self, field: &str, query: &AtomicQuery) -> Result<Vec<String>> {
        self.record(format!("list {} {}", field, Self::describe(query)).trim_end().to_string())?;
        let mut values: Vec<String> = Vec::new();
        for entry in self.library.iter().filter(|e| e.matches(MatchMode::Find, query)) {
            for v in entry.tag(&field.to_lowercase()) {
                if !values.iter().any(|have| have == v) {
                    values.push(v.to_string());
                }
            }
        }
        Ok(values)
    }

    fn find(&mut self, mode: MatchMode, query: &AtomicQuery) -> Result<Vec<Track>> {
        self.record(format!("{} {}", mode.command(), Self::describe(query)))?;
        Ok(self.matching(mode, query))
    }

    fn find_add(&mut self, mode: MatchMode, query: &AtomicQuery) -> Result<()> {
        self.record(format!("{}add {}", mode.command(), Self::describe(query)))?;
        let tracks = self.matching(mode, query);
        self.queue.extend(tracks);
        Ok(())
    }
}
