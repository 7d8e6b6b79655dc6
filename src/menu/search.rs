use super::expand::{narrow_values, run_expanded};
use super::format::format_track;
use super::query::{Query, QueryBuilder};
use super::queue::{load_tracks, replace_queue};
use super::select::{select_tracks, IndexBy};
use crate::error::Result;
use crate::picker::{Picker, Selection};
use crate::session::{MatchMode, Session, Track};
use tracing::{debug, info};

/// What to do with the filter built so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    /// Add more constraints
    Filter,
    /// Append every match to the queue
    Add,
    /// Show matches, then come back here
    List,
    /// Pick among matches, then add or play them
    Select,
    /// Replace the queue with every match and start playing
    Play,
}

impl SearchAction {
    pub const ALL: [SearchAction; 5] = [
        SearchAction::Filter,
        SearchAction::Add,
        SearchAction::List,
        SearchAction::Select,
        SearchAction::Play,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchAction::Filter => "filter",
            SearchAction::Add => "add",
            SearchAction::List => "list",
            SearchAction::Select => "select",
            SearchAction::Play => "play",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label)
    }
}

enum Flow {
    Continue,
    Done,
}

/// Filter-then-act loop behind the `search` and `find` commands
pub struct Search<'a> {
    session: &'a mut dyn Session,
    picker: &'a mut dyn Picker,
    mode: MatchMode,
    builder: QueryBuilder,
    allow_ranges: bool,
}

impl<'a> Search<'a> {
    pub fn new(
        session: &'a mut dyn Session,
        picker: &'a mut dyn Picker,
        mode: MatchMode,
        builder: QueryBuilder,
        allow_ranges: bool,
    ) -> Self {
        Self {
            session,
            picker,
            mode,
            builder,
            allow_ranges,
        }
    }

    /// Build a filter, then loop on the action menu until an action
    /// finishes or the user backs out. Nothing touches mpd when the very
    /// first filter prompt is cancelled.
    pub fn run(&mut self) -> Result<()> {
        let mut query = self.refine(Query::new())?;
        if query.is_empty() {
            debug!("{} aborted before any filter", self.mode.command());
            return Ok(());
        }

        let labels: Vec<&str> = SearchAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let picked = self.picker.pick_str(&labels, "Action:")?;
            let Some(action) = picked.into_first().as_deref().and_then(SearchAction::from_label) else {
                return Ok(());
            };
            debug!("{} action {:?} on {:?}", self.mode.command(), action, query);

            let flow = match action {
                SearchAction::Filter => {
                    query = self.refine(query)?;
                    Flow::Continue
                }
                SearchAction::Add => self.add(&query)?,
                SearchAction::List => self.list(&query)?,
                SearchAction::Select => self.select(&query)?,
                SearchAction::Play => self.play(&query)?,
            };
            if let Flow::Done = flow {
                return Ok(());
            }
        }
    }

    fn refine(&mut self, existing: Query) -> Result<Query> {
        let session = &mut *self.session;
        self.builder
            .build(&mut *self.picker, existing, |q, field| narrow_values(session, q, field))
    }

    fn matches(&mut self, query: &Query) -> Result<Vec<Track>> {
        let mode = self.mode;
        let session = &mut *self.session;
        run_expanded(query, |atomic| session.find(mode, atomic))
    }

    fn add_matches(&mut self, query: &Query) -> Result<()> {
        let mode = self.mode;
        let session = &mut *self.session;
        run_expanded(query, |atomic| session.find_add(mode, atomic).map(|()| Vec::<()>::new()))?;
        Ok(())
    }

    fn add(&mut self, query: &Query) -> Result<Flow> {
        self.add_matches(query)?;
        info!("Added matches of {} constraints to queue", query.len());
        Ok(Flow::Done)
    }

    fn list(&mut self, query: &Query) -> Result<Flow> {
        let tracks = self.matches(query)?;
        let labels: Vec<String> = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| format_track(i, t))
            .collect();
        // view only, whatever gets picked is ignored
        self.picker.pick(&labels, "Selected:", false)?;
        Ok(Flow::Continue)
    }

    fn select(&mut self, query: &Query) -> Result<Flow> {
        let tracks = self.matches(query)?;
        let chosen = match select_tracks(
            &mut *self.picker,
            &tracks,
            "Selected:",
            IndexBy::Ordinal,
            self.allow_ranges,
        )? {
            Selection::Chosen(chosen) => chosen,
            _ => return Ok(Flow::Continue),
        };

        match self.picker.pick_str(&["add", "play"], "With selected:")? {
            Selection::Cancelled => Ok(Flow::Continue),
            Selection::Chosen(then) if then[0] == "play" => {
                load_tracks(&mut *self.session, &mut *self.picker, &chosen, false)?;
                self.session.play(None)?;
                Ok(Flow::Done)
            }
            _ => {
                load_tracks(&mut *self.session, &mut *self.picker, &chosen, true)?;
                info!("Added {} selected tracks to queue", chosen.len());
                Ok(Flow::Done)
            }
        }
    }

    fn play(&mut self, query: &Query) -> Result<Flow> {
        replace_queue(&mut *self.session, &mut *self.picker)?;
        self.add_matches(query)?;
        self.session.play(None)?;
        Ok(Flow::Done)
    }
}
