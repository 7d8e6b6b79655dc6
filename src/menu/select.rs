use super::format::{format_track, parse_index};
use super::range::RangeSet;
use crate::error::{Error, Result};
use crate::picker::{Picker, Selection};
use crate::session::Track;
use std::collections::BTreeMap;
use tracing::debug;

/// Which number a track is labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBy {
    /// Place in the list being shown
    Ordinal,
    /// The queue position mpd assigned
    Position,
}

/// How several picked indices are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    /// Exactly the picked tracks
    Set,
    /// Consecutive picks are `[a, b]` endpoints
    Ranges,
}

impl PickMode {
    const LABELS: [&'static str; 2] = ["set", "ranges"];

    fn from_label(label: &str) -> Self {
        if label == "ranges" {
            PickMode::Ranges
        } else {
            PickMode::Set
        }
    }
}

/// Let the user pick a subset of `tracks`.
///
/// With `allow_ranges` and more than one track picked, a second prompt
/// offers to read the picks as range endpoints; cancelling it goes back
/// to the track list.
pub fn select_tracks(
    picker: &mut dyn Picker,
    tracks: &[Track],
    prompt: &str,
    index_by: IndexBy,
    allow_ranges: bool,
) -> Result<Selection<Track>> {
    let indexed = index_tracks(tracks, index_by)?;
    let labels: Vec<String> = indexed
        .iter()
        .map(|(i, track)| format_track(*i, track))
        .collect();

    loop {
        let chosen = match picker.pick(&labels, prompt, false)? {
            Selection::Cancelled => return Ok(Selection::Cancelled),
            Selection::Empty => return Ok(Selection::Empty),
            Selection::Chosen(chosen) => chosen,
        };
        let indices = chosen
            .iter()
            .map(|label| parse_index(label))
            .collect::<Result<Vec<_>>>()?;

        let mode = if !allow_ranges || indices.len() == 1 {
            PickMode::Set
        } else {
            match picker.pick_str(&PickMode::LABELS, "Mode:")? {
                Selection::Cancelled => continue,
                Selection::Empty => PickMode::Set,
                Selection::Chosen(modes) => PickMode::from_label(&modes[0]),
            }
        };

        debug!("selecting {:?} from {:?}", mode, indices);
        return materialize(&indexed, &indices, mode).map(Selection::from_vec);
    }
}

fn index_tracks(tracks: &[Track], index_by: IndexBy) -> Result<Vec<(usize, &Track)>> {
    tracks
        .iter()
        .enumerate()
        .map(|(ordinal, track)| match index_by {
            IndexBy::Ordinal => Ok((ordinal, track)),
            IndexBy::Position => track
                .pos
                .map(|pos| (pos, track))
                .ok_or_else(|| Error::invariant(format!("queue track {} has no position", track.file))),
        })
        .collect()
}

/// Turn picked indices into tracks, in list order for sets and range by
/// range for ranges.
pub fn materialize(indexed: &[(usize, &Track)], indices: &[usize], mode: PickMode) -> Result<Vec<Track>> {
    let by_index: BTreeMap<usize, &Track> = indexed.iter().map(|&(i, t)| (i, t)).collect();
    if let Some(missing) = indices.iter().find(|i| !by_index.contains_key(*i)) {
        return Err(Error::invariant(format!("picked index {} has no track", missing)));
    }

    let tracks = match mode {
        PickMode::Set => indexed
            .iter()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, t)| (*t).clone())
            .collect(),
        PickMode::Ranges => RangeSet::from_endpoints(indices)
            .ranges()
            .iter()
            .flat_map(|r| by_index.range(r.start..=r.end).map(|(_, t)| (*t).clone()))
            .collect(),
    };
    Ok(tracks)
}
