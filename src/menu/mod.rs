// Menu building blocks - everything between a raw picker round trip and an mpd call
// Formatting, range picking, filter building and the search action loop

pub mod expand;
pub mod format;
pub mod query;
pub mod queue;
pub mod range;
pub mod search;
pub mod select;

pub use expand::{expand, narrow_values, run_expanded};
pub use format::{format_track, parse_index};
pub use query::{AtomicQuery, Constraint, Query, QueryBuilder, Value, ANY_FIELD};
pub use queue::{load_tracks, replace_queue, save_queue};
pub use range::{Range, RangeSet};
pub use search::{Search, SearchAction};
pub use select::{select_tracks, IndexBy, PickMode};
