use crate::error::{Error, Result};
use crate::menu::{select_tracks, IndexBy};
use crate::picker::{Picker, Selection};
use crate::session::{Session, Track};
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueueAction {
    Play,
    Delete,
    Crop,
}

impl QueueAction {
    const LABELS: [&'static str; 3] = ["play", "delete", "crop"];

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "play" => Some(QueueAction::Play),
            "delete" => Some(QueueAction::Delete),
            "crop" => Some(QueueAction::Crop),
            _ => None,
        }
    }
}

/// Queue with the playing track moved to the front
fn queue_with_current_first(session: &mut dyn Session) -> Result<Vec<Track>> {
    let current = session.current_track()?;
    let mut tracks = session.playlist_tracks()?;
    if let Some(current) = current {
        if let Some(i) = tracks.iter().position(|t| t.pos == current.pos) {
            let track = tracks.remove(i);
            tracks.insert(0, track);
        }
    }
    Ok(tracks)
}

fn position(track: &Track) -> Result<usize> {
    track
        .pos
        .ok_or_else(|| Error::invariant(format!("queue track {} has no position", track.file)))
}

/// Delete queue positions, highest first so the rest keep their numbers
fn delete_positions(session: &mut dyn Session, mut positions: Vec<usize>) -> Result<()> {
    positions.sort_unstable();
    positions.dedup();
    for pos in positions.into_iter().rev() {
        session.delete(pos)?;
    }
    Ok(())
}

/// Jump to a queued track
pub fn play(session: &mut dyn Session, picker: &mut dyn Picker) -> Result<()> {
    let tracks = queue_with_current_first(session)?;
    let Selection::Chosen(chosen) = select_tracks(picker, &tracks, "Play:", IndexBy::Position, false)? else {
        return Ok(());
    };
    session.play(Some(position(&chosen[0])?))
}

/// Pick queued tracks, then play, delete or crop to them
pub fn edit(session: &mut dyn Session, picker: &mut dyn Picker, range_mode: bool) -> Result<()> {
    let tracks = queue_with_current_first(session)?;
    let Selection::Chosen(chosen) = select_tracks(picker, &tracks, "Playlist:", IndexBy::Position, range_mode)?
    else {
        return Ok(());
    };

    let action = loop {
        match picker.pick_str(&QueueAction::LABELS, "Action:")? {
            Selection::Cancelled => return Ok(()),
            Selection::Empty => continue,
            Selection::Chosen(picked) => match QueueAction::from_label(&picked[0]) {
                Some(action) => break action,
                None => return Ok(()),
            },
        }
    };

    let chosen_positions = chosen.iter().map(position).collect::<Result<Vec<_>>>()?;
    match action {
        QueueAction::Play => session.play(Some(chosen_positions[0])),
        QueueAction::Delete => {
            info!("Deleting {} tracks from queue", chosen_positions.len());
            delete_positions(session, chosen_positions)
        }
        QueueAction::Crop => {
            let others = tracks
                .iter()
                .map(position)
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .filter(|pos| !chosen_positions.contains(pos))
                .collect();
            info!("Cropping queue to {} tracks", chosen_positions.len());
            delete_positions(session, others)
        }
    }
}

/// Shuffle the whole queue, or only the span between the picked tracks
pub fn shuffle(session: &mut dyn Session, picker: &mut dyn Picker) -> Result<()> {
    let tracks = session.playlist_tracks()?;
    match select_tracks(picker, &tracks, "Select range:", IndexBy::Position, false)? {
        Selection::Cancelled => Ok(()),
        Selection::Chosen(chosen) if chosen.len() >= 2 => {
            let positions = chosen.iter().map(position).collect::<Result<Vec<_>>>()?;
            let start = positions.iter().copied().min().unwrap_or_default();
            let end = positions.iter().copied().max().unwrap_or_default();
            shuffle_span(session, start, end, &mut rand::thread_rng())
        }
        _ => session.shuffle(),
    }
}

/// Uniform shuffle of queue positions `start..=end` using only moves:
/// each slot in turn receives a random track from those not yet placed.
pub fn shuffle_span<R: Rng + ?Sized>(session: &mut dyn Session, start: usize, end: usize, rng: &mut R) -> Result<()> {
    debug!("shuffling queue positions {}..={}", start, end);
    for slot in start..end {
        let from = rng.gen_range(slot..=end);
        if from != slot {
            session.move_track(from, slot)?;
        }
    }
    Ok(())
}
