use crate::error::{Error, Result};
use crate::menu::{load_tracks, select_tracks, IndexBy};
use crate::picker::{Picker, Selection};
use crate::session::{Session, Track};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaylistAction {
    Add,
    Play,
    Remove,
    List,
    Rename,
}

impl PlaylistAction {
    const LABELS: [&'static str; 5] = ["add", "play", "remove", "list", "rename"];

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "add" => Some(PlaylistAction::Add),
            "play" => Some(PlaylistAction::Play),
            "remove" => Some(PlaylistAction::Remove),
            "list" => Some(PlaylistAction::List),
            "rename" => Some(PlaylistAction::Rename),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackAction {
    Add,
    Play,
    Delete,
    Crop,
}

impl TrackAction {
    const LABELS: [&'static str; 4] = ["add", "play", "delete", "crop"];

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "add" => Some(TrackAction::Add),
            "play" => Some(TrackAction::Play),
            "delete" => Some(TrackAction::Delete),
            "crop" => Some(TrackAction::Crop),
            _ => None,
        }
    }
}

/// How the track-level menu ended
enum Outcome {
    /// Backed out, show the playlist actions again
    Back,
    /// Queue was changed
    Done,
}

fn actions_prompt(names: &[String]) -> String {
    match names {
        [only] => format!("Playlist: {}", only),
        [first, ..] => format!("Playlists: {} ...", first),
        [] => "Playlists:".to_string(),
    }
}

/// Pick stored playlists, then act on them
pub fn browse(session: &mut dyn Session, picker: &mut dyn Picker, range_mode: bool) -> Result<()> {
    let available = session.list_playlists()?;
    let Selection::Chosen(names) = picker.pick(&available, "Playlists:", false)? else {
        return Ok(());
    };

    let prompt = actions_prompt(&names);
    loop {
        let action = match picker.pick_str(&PlaylistAction::LABELS, &prompt)? {
            Selection::Cancelled => return Ok(()),
            Selection::Empty => continue,
            Selection::Chosen(picked) => match PlaylistAction::from_label(&picked[0]) {
                Some(action) => action,
                None => return Ok(()),
            },
        };
        debug!("playlist action {:?} on {:?}", action, names);

        match action {
            PlaylistAction::Add => {
                for name in &names {
                    session.load_playlist(name)?;
                }
            }
            PlaylistAction::Play => {
                session.clear()?;
                for name in &names {
                    session.load_playlist(name)?;
                }
                session.play(None)?;
            }
            PlaylistAction::Remove => {
                for name in &names {
                    session.remove_playlist(name)?;
                }
                info!("Removed {} stored playlists", names.len());
            }
            PlaylistAction::List => {
                if let Outcome::Back = list_tracks(session, picker, &names, range_mode)? {
                    continue;
                }
            }
            PlaylistAction::Rename => rename(session, picker, &names)?,
        }
        return Ok(());
    }
}

/// Track-level menu over the concatenated contents of `names`.
/// Delete and crop only edit the working list shown here.
fn list_tracks(
    session: &mut dyn Session,
    picker: &mut dyn Picker,
    names: &[String],
    range_mode: bool,
) -> Result<Outcome> {
    let mut tracks: Vec<Track> = Vec::new();
    for name in names {
        tracks.extend(session.playlist_contents(name)?);
    }
    // number entries once so labels stay put while the list shrinks
    let mut tracks: Vec<Track> = tracks
        .into_iter()
        .enumerate()
        .map(|(i, t)| t.at(i))
        .collect();

    loop {
        let chosen = match select_tracks(picker, &tracks, "Select tracks:", IndexBy::Position, range_mode)? {
            Selection::Cancelled => return Ok(Outcome::Back),
            Selection::Empty => continue,
            Selection::Chosen(chosen) => chosen,
        };

        let action = match picker.pick_str(&TrackAction::LABELS, "Action:")? {
            Selection::Chosen(picked) => TrackAction::from_label(&picked[0]),
            _ => None,
        };
        let Some(action) = action else {
            continue;
        };

        match action {
            TrackAction::Add => {
                for track in &chosen {
                    session.add(&track.file)?;
                }
                info!("Added {} playlist tracks to queue", chosen.len());
                return Ok(Outcome::Done);
            }
            TrackAction::Play => {
                load_tracks(session, picker, &chosen, false)?;
                session.play(None)?;
                return Ok(Outcome::Done);
            }
            TrackAction::Delete => tracks.retain(|t| !chosen.iter().any(|c| c.pos == t.pos)),
            TrackAction::Crop => tracks.retain(|t| chosen.iter().any(|c| c.pos == t.pos)),
        }
    }
}

/// Rename each playlist in turn; a taken name asks again
fn rename(session: &mut dyn Session, picker: &mut dyn Picker, names: &[String]) -> Result<()> {
    for name in names {
        let mut prompt = "Rename:".to_string();
        loop {
            let new_name = match picker.ask(std::slice::from_ref(name), &prompt)? {
                Selection::Cancelled => break,
                Selection::Empty => continue,
                Selection::Chosen(picked) => picked[0].clone(),
            };
            if new_name == *name {
                break;
            }
            match session.rename_playlist(name, &new_name) {
                Ok(()) => {
                    info!("Renamed playlist '{}' to '{}'", name, new_name);
                    break;
                }
                Err(Error::AlreadyExists(_)) => prompt = format!("{} exists. Rename:", new_name),
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}
