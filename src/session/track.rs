/// A song as mpd reports it.
///
/// `pos` is only present when the track came out of the live queue; it is
/// assigned by mpd and unique within one queue snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub file: String,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub pos: Option<usize>,
}

impl Track {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn at(mut self, pos: usize) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Parse one line of the tab-separated listing produced by
    /// `mpc -f "%file%\t[%artist%]\t[%title%]\t[%position%]"`.
    /// Empty columns become `None`; mpc positions are 1-based.
    pub fn from_mpc_line(line: &str) -> Option<Self> {
        let mut cols = line.split('\t');
        let file = cols.next().filter(|f| !f.is_empty())?;
        let non_empty = |s: Option<&str>| s.filter(|v| !v.is_empty()).map(str::to_string);

        let artist = non_empty(cols.next());
        let title = non_empty(cols.next());
        let pos = cols
            .next()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .and_then(|p| p.checked_sub(1));

        Some(Self {
            file: file.to_string(),
            artist,
            title,
            pos,
        })
    }
}
