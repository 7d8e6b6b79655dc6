use crate::error::{Error, Result};
use crate::session::Track;

/// Render a track as `"<index> <artist> - <title>"`, dropping to
/// `"<index> <title>"` or `"<index> <file>"` as tags go missing.
pub fn format_track(index: usize, track: &Track) -> String {
    match (&track.artist, &track.title) {
        (Some(artist), Some(title)) => format!("{} {} - {}", index, artist, title),
        (None, Some(title)) => format!("{} {}", index, title),
        _ => format!("{} {}", index, track.file),
    }
}

/// Recover the leading index of a label built by [`format_track`]
pub fn parse_index(label: &str) -> Result<usize> {
    let prefix = label.split(' ').next().unwrap_or_default();
    prefix
        .parse::<usize>()
        .map_err(|_| Error::Format(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_shapes() {
        let full = Track::new("x.mp3").with_artist("A").with_title("T");
        assert_eq!(format_track(3, &full), "3 A - T");

        let titled = Track::new("x.mp3").with_title("T");
        assert_eq!(format_track(3, &titled), "3 T");

        assert_eq!(format_track(3, &Track::new("x.mp3")), "3 x.mp3");

        // artist alone is not enough to be useful
        let artist_only = Track::new("dir/x.mp3").with_artist("A");
        assert_eq!(format_track(0, &artist_only), "0 dir/x.mp3");
    }

    #[test]
    fn test_parse_index_roundtrip() {
        let tracks = vec![
            Track::new("a.mp3").with_artist("Miles Davis").with_title("So What"),
            Track::new("b.mp3").with_title("12 Bar Blues"),
            Track::new("c d e.mp3"),
        ];
        for (i, track) in tracks.iter().enumerate() {
            let idx = i * 7 + 10;
            assert_eq!(parse_index(&format_track(idx, track)).unwrap(), idx);
        }
    }

    #[test]
    fn test_parse_index_rejects_foreign_labels() {
        assert!(matches!(parse_index("So What"), Err(Error::Format(_))));
        assert!(matches!(parse_index(""), Err(Error::Format(_))));
        assert!(matches!(parse_index("-1 x"), Err(Error::Format(_))));
    }
}
