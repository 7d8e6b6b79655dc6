use super::{MatchMode, PlayOption, Session, Status, StatusParser, Track};
use crate::config::MpdConfig;
use crate::error::{Error, Result};
use crate::menu::query::AtomicQuery;
use std::process::Command;
use tracing::debug;

/// Listing format for database results
const TRACK_FORMAT: &str = "%file%\t[%artist%]\t[%title%]";
/// Listing format for queue results, mpc positions are 1-based
const QUEUE_FORMAT: &str = "%file%\t[%artist%]\t[%title%]\t[%position%]";

/// `Session` backed by the `mpc` command line client.
///
/// Every call runs one `mpc` process against the configured daemon, so
/// there is no connection state to lose between calls.
pub struct MpcSession {
    binary: String,
    host: String,
    port: u16,
    tag_types: Vec<String>,
    status_parser: StatusParser,
}

impl MpcSession {
    pub fn new(config: &MpdConfig) -> Self {
        let host = match &config.password {
            Some(password) => format!("{}@{}", password, config.host),
            None => config.host.clone(),
        };

        Self {
            binary: config.mpc_binary.clone(),
            host,
            port: config.port,
            tag_types: config.tag_types.clone(),
            status_parser: StatusParser::new(),
        }
    }

    /// Fails early when mpc is missing or mpd is down
    pub fn check(&mut self) -> Result<()> {
        self.run(&["version"]).map(|_| ())
    }

    fn run<S: AsRef<str>>(&mut self, args: &[S]) -> Result<String> {
        self.run_with(&[], args)
    }

    /// `options` go before `--`, so tag values and playlist names in
    /// `args` are never read as flags even when they start with `-`
    fn run_with<S: AsRef<str>>(&mut self, options: &[&str], args: &[S]) -> Result<String> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!("mpc {:?} {:?}", options, args);

        let output = Command::new(&self.binary)
            .arg("--host")
            .arg(&self.host)
            .arg("--port")
            .arg(self.port.to_string())
            .args(options)
            .arg("--")
            .args(&args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let command = args.first().copied().unwrap_or_default();
            return Err(classify_failure(command, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_tracks(&mut self, format: &str, args: &[&str]) -> Result<Vec<Track>> {
        let out = self.run_with(&["-f", format], args)?;
        Ok(out.lines().filter_map(Track::from_mpc_line).collect())
    }
}

/// Turn mpc's stderr into the matching error kind
fn classify_failure(command: &str, stderr: &str) -> Error {
    let lower = stderr.to_lowercase();
    if lower.contains("connection") || lower.contains("connect to") || lower.contains("timeout") {
        Error::ConnectionLost(stderr.to_string())
    } else {
        Error::Backend {
            command: command.to_string(),
            message: stderr.to_string(),
        }
    }
}

/// mpd refuses to overwrite a stored playlist; surface that as a name conflict
fn name_conflict(result: Result<String>, name: &str) -> Result<()> {
    match result {
        Err(Error::Backend { message, .. }) if message.to_lowercase().contains("exist") => {
            Err(Error::AlreadyExists(name.to_string()))
        }
        other => other.map(|_| ()),
    }
}

/// Flatten `(tag, value)` terms into mpc's positional filter arguments
fn filter_args(query: &AtomicQuery) -> Vec<&str> {
    query
        .terms()
        .iter()
        .flat_map(|(field, value)| [field.as_str(), value.as_str()])
        .collect()
}

fn lines(out: &str) -> Vec<String> {
    out.lines()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

impl Session for MpcSession {
    fn status(&mut self) -> Result<Status> {
        let out = self.run(&["status"])?;
        Ok(self.status_parser.parse(&out))
    }

    fn current_track(&mut self) -> Result<Option<Track>> {
        Ok(self
            .run_tracks(QUEUE_FORMAT, &["current"])?
            .into_iter()
            .next())
    }

    fn playlist_tracks(&mut self) -> Result<Vec<Track>> {
        let tracks = self.run_tracks(QUEUE_FORMAT, &["playlist"])?;
        // older mpc builds print nothing for %position%
        Ok(tracks
            .into_iter()
            .enumerate()
            .map(|(i, mut t)| {
                t.pos = t.pos.or(Some(i));
                t
            })
            .collect())
    }

    fn play(&mut self, pos: Option<usize>) -> Result<()> {
        match pos {
            Some(pos) => self.run(&["play".to_string(), (pos + 1).to_string()]),
            None => self.run(&["play"]),
        }
        .map(|_| ())
    }

    fn pause(&mut self) -> Result<()> {
        self.run(&["pause"]).map(|_| ())
    }

    fn stop(&mut self) -> Result<()> {
        self.run(&["stop"]).map(|_| ())
    }

    fn next(&mut self) -> Result<()> {
        self.run(&["next"]).map(|_| ())
    }

    fn previous(&mut self) -> Result<()> {
        self.run(&["prev"]).map(|_| ())
    }

    fn seek(&mut self, position: &str) -> Result<()> {
        self.run(&["seek", position]).map(|_| ())
    }

    fn set_option(&mut self, option: PlayOption, enabled: bool) -> Result<()> {
        let state = if enabled { "on" } else { "off" };
        self.run(&[option.name(), state]).map(|_| ())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.run(&["volume".to_string(), volume.min(100).to_string()])
            .map(|_| ())
    }

    fn clear(&mut self) -> Result<()> {
        self.run(&["clear"]).map(|_| ())
    }

    fn add(&mut self, file: &str) -> Result<()> {
        self.run(&["add", file]).map(|_| ())
    }

    fn delete(&mut self, pos: usize) -> Result<()> {
        self.run(&["del".to_string(), (pos + 1).to_string()])
            .map(|_| ())
    }

    fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        self.run(&[
            "move".to_string(),
            (from + 1).to_string(),
            (to + 1).to_string(),
        ])
        .map(|_| ())
    }

    fn shuffle(&mut self) -> Result<()> {
        self.run(&["shuffle"]).map(|_| ())
    }

    fn save(&mut self, name: &str) -> Result<()> {
        let result = self.run(&["save", name]);
        name_conflict(result, name)
    }

    fn remove_playlist(&mut self, name: &str) -> Result<()> {
        self.run(&["rm", name]).map(|_| ())
    }

    fn load_playlist(&mut self, name: &str) -> Result<()> {
        self.run(&["load", name]).map(|_| ())
    }

    fn rename_playlist(&mut self, from: &str, to: &str) -> Result<()> {
        let result = self.run(&["renplaylist", from, to]);
        name_conflict(result, to)
    }

    fn list_playlists(&mut self) -> Result<Vec<String>> {
        let out = self.run(&["lsplaylists"])?;
        Ok(lines(&out))
    }

    fn playlist_contents(&mut self, name: &str) -> Result<Vec<Track>> {
        self.run_tracks(TRACK_FORMAT, &["playlist", name])
    }

    fn tag_types(&mut self) -> Result<Vec<String>> {
        Ok(self.tag_types.clone())
    }

    fn list_values(&mut self, field: &str, query: &AtomicQuery) -> Result<Vec<String>> {
        let mut args = vec!["list", field];
        args.extend(filter_args(query));
        let out = self.run(args.as_slice())?;
        Ok(lines(&out))
    }

    fn find(&mut self, mode: MatchMode, query: &AtomicQuery) -> Result<Vec<Track>> {
        let mut args = vec![mode.command()];
        args.extend(filter_args(query));
        self.run_tracks(TRACK_FORMAT, &args)
    }

    fn find_add(&mut self, mode: MatchMode, query: &AtomicQuery) -> Result<()> {
        let command = match mode {
            MatchMode::Find => "findadd",
            MatchMode::Search => "searchadd",
        };
        let mut args = vec![command];
        args.extend(filter_args(query));
        self.run(args.as_slice()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification() {
        assert!(matches!(
            classify_failure("status", "MPD error: Connection refused"),
            Error::ConnectionLost(_)
        ));
        match classify_failure("add", "MPD error: No such directory") {
            Error::Backend { command, message } => {
                assert_eq!(command, "add");
                assert_eq!(message, "MPD error: No such directory");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_filter_args_flatten_in_order() {
        let query = AtomicQuery::from_terms(vec![
            ("genre".to_string(), "Jazz".to_string()),
            ("artist".to_string(), "Miles Davis".to_string()),
        ]);
        assert_eq!(filter_args(&query), vec!["genre", "Jazz", "artist", "Miles Davis"]);
    }

    #[cfg(unix)]
    mod stub_binary {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Write a fake `mpc` that logs its arguments and prints canned output
        fn stub(dir: &TempDir, body: &str) -> MpdConfig {
            let path = dir.path().join("mpc");
            let log = dir.path().join("calls.log");
            let script = format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\n{}\n",
                log.display(),
                body
            );
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

            MpdConfig {
                mpc_binary: path.display().to_string(),
                ..MpdConfig::default()
            }
        }

        fn calls(dir: &TempDir) -> String {
            fs::read_to_string(dir.path().join("calls.log")).unwrap_or_default()
        }

        #[test]
        fn test_queue_listing_uses_zero_based_positions() {
            let dir = TempDir::new().unwrap();
            let config = stub(&dir, "printf 'a.mp3\\tA\\tOne\\t1\\nb.mp3\\t\\tTwo\\t2\\n'");
            let mut session = MpcSession::new(&config);

            let tracks = session.playlist_tracks().unwrap();
            assert_eq!(tracks.len(), 2);
            assert_eq!(tracks[0].pos, Some(0));
            assert_eq!(tracks[1].pos, Some(1));
            assert_eq!(tracks[1].artist, None);
            assert!(calls(&dir).contains("--host localhost --port 6600 -f"));
        }

        #[test]
        fn test_positions_are_sent_one_based() {
            let dir = TempDir::new().unwrap();
            let config = stub(&dir, "true");
            let mut session = MpcSession::new(&config);

            session.play(Some(0)).unwrap();
            session.move_track(2, 5).unwrap();
            session.delete(4).unwrap();

            let log = calls(&dir);
            assert!(log.contains("play 1"));
            assert!(log.contains("move 3 6"));
            assert!(log.contains("del 5"));
        }

        #[test]
        fn test_save_conflict_maps_to_already_exists() {
            let dir = TempDir::new().unwrap();
            let config = stub(&dir, "echo 'MPD error: Playlist already exists' >&2; exit 1");
            let mut session = MpcSession::new(&config);

            assert!(matches!(session.save("mix"), Err(Error::AlreadyExists(name)) if name == "mix"));
        }

        #[test]
        fn test_rename_uses_renplaylist() {
            let dir = TempDir::new().unwrap();
            let body = "case \"$*\" in *renplaylist*taken*) echo 'MPD error: Playlist already exists' >&2; exit 1;; esac";
            let config = stub(&dir, body);
            let mut session = MpcSession::new(&config);

            session.rename_playlist("old", "new").unwrap();
            assert!(calls(&dir).contains("-- renplaylist old new"));
            assert_eq!(calls(&dir).lines().count(), 1);

            let err = session.rename_playlist("old", "taken").unwrap_err();
            assert!(matches!(err, Error::AlreadyExists(name) if name == "taken"));
        }

        #[test]
        fn test_user_values_follow_double_dash() {
            let dir = TempDir::new().unwrap();
            let config = stub(&dir, "true");
            let mut session = MpcSession::new(&config);

            let query = AtomicQuery::from_terms(vec![("artist".to_string(), "-M-".to_string())]);
            session.find(MatchMode::Find, &query).unwrap();
            session.save("-mix").unwrap();

            let log = calls(&dir);
            let mut lines = log.lines();
            let find = lines.next().unwrap();
            assert!(find.starts_with("--host localhost --port 6600 -f "));
            assert!(find.ends_with(" -- find artist -M-"));
            assert_eq!(lines.next(), Some("--host localhost --port 6600 -- save -mix"));
        }

        #[test]
        fn test_missing_binary_is_spawn_error() {
            let config = MpdConfig {
                mpc_binary: "/nonexistent/panmenu-mpc".to_string(),
                ..MpdConfig::default()
            };
            let mut session = MpcSession::new(&config);
            assert!(matches!(session.check(), Err(Error::Spawn { .. })));
        }
    }
}
