use crate::error::Result;
use crate::menu::{select_tracks, IndexBy};
use crate::picker::{Picker, Selection};
use crate::session::{PlayOption, PlayState, Session};
use tracing::{debug, info, warn};

pub fn toggle(session: &mut dyn Session) -> Result<()> {
    if session.status()?.state == PlayState::Play {
        session.pause()
    } else {
        session.play(None)
    }
}

/// Show what's playing; the pick itself is ignored
pub fn current_song(session: &mut dyn Session, picker: &mut dyn Picker) -> Result<()> {
    let Some(track) = session.current_track()? else {
        info!("Nothing is playing");
        return Ok(());
    };
    select_tracks(picker, &[track], "Current:", IndexBy::Position, false)?;
    Ok(())
}

/// Toggle playback switches and adjust the volume
pub fn options(session: &mut dyn Session, picker: &mut dyn Picker) -> Result<()> {
    let status = session.status()?;

    let mut lines: Vec<String> = PlayOption::ALL
        .iter()
        .map(|&opt| format!("{} : {}", opt.name(), status.option(opt)))
        .collect();
    if let Some(volume) = status.volume {
        lines.push(format!("volume : {}%", volume));
    }

    let Selection::Chosen(chosen) = picker.pick(&lines, "Options:", false)? else {
        return Ok(());
    };

    for line in chosen {
        let name = line.split(" : ").next().unwrap_or_default();
        if let Some(opt) = PlayOption::from_name(name) {
            let enabled = !status.option(opt);
            debug!("setting {} to {}", opt.name(), enabled);
            session.set_option(opt, enabled)?;
        } else if name == "volume" {
            if let Some(current) = status.volume {
                set_volume(session, picker, current)?;
            }
        }
    }
    Ok(())
}

fn set_volume(session: &mut dyn Session, picker: &mut dyn Picker, current: u8) -> Result<()> {
    let Some(input) = picker.ask(&[current.to_string()], "Volume:")?.into_first() else {
        return Ok(());
    };
    match parse_volume(&input, current) {
        Some(volume) => session.set_volume(volume),
        None => {
            warn!("Ignoring volume input '{}'", input);
            Ok(())
        }
    }
}

/// `N` sets, `+N`/`-N` adjust relative to `current`. A trailing `%` is
/// allowed and the result is clamped to 0..=100.
pub fn parse_volume(input: &str, current: u8) -> Option<u8> {
    let input = input.trim();
    let number = input
        .trim_start_matches(['+', '-'])
        .trim_end_matches('%')
        .trim();
    let amount: i64 = number.parse().ok()?;
    let current = i64::from(current);

    let volume = if input.starts_with('+') {
        current + amount
    } else if input.starts_with('-') {
        current - amount
    } else {
        amount
    };
    u8::try_from(volume.clamp(0, 100)).ok()
}
