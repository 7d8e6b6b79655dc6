use crate::error::{Error, Result};
use crate::picker::Picker;
use crate::session::{Session, Track};
use tracing::info;

/// Save the current queue under a typed name.
///
/// An empty name or cancel saves nothing. A taken name asks before
/// overwriting; declining goes back to the name prompt. Returns the name
/// actually used.
pub fn save_queue(session: &mut dyn Session, picker: &mut dyn Picker, prompt: &str) -> Result<Option<String>> {
    loop {
        let Some(name) = picker.ask(&[], prompt)?.into_first() else {
            return Ok(None);
        };

        match session.save(&name) {
            Ok(()) => {}
            Err(Error::AlreadyExists(_)) => {
                let answer = picker.pick_str(&["Yes", "No"], "Playlist exists. Overwrite?")?;
                if answer.into_first().as_deref() != Some("Yes") {
                    continue;
                }
                session.remove_playlist(&name)?;
                session.save(&name)?;
                info!("Overwrote playlist '{}'", name);
            }
            Err(e) => return Err(e),
        }

        info!("Saved queue as '{}'", name);
        return Ok(Some(name));
    }
}

/// Put `tracks` into the queue.
///
/// Unless appending, a non-empty queue is offered for saving and then
/// cleared first.
pub fn load_tracks(
    session: &mut dyn Session,
    picker: &mut dyn Picker,
    tracks: &[Track],
    append: bool,
) -> Result<()> {
    if !append {
        replace_queue(session, picker)?;
    }
    for track in tracks {
        session.add(&track.file)?;
    }
    Ok(())
}

/// Offer to save a non-empty queue, then clear it
pub fn replace_queue(session: &mut dyn Session, picker: &mut dyn Picker) -> Result<()> {
    if !session.playlist_tracks()?.is_empty() {
        save_queue(session, picker, "Save playlist?")?;
    }
    session.clear()
}
