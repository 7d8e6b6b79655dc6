// Picker adapter - the only way panmenu talks to the user
// Any line selector (dmenu, rofi -dmenu, fzf, ...) sits behind the `Picker` trait

pub mod process;

pub use process::ProcessPicker;

use crate::error::Result;

/// Outcome of one picker round trip.
///
/// `Chosen` is never empty: an empty pick is normalised to `Empty` so
/// callers can tell "confirmed nothing" apart from "cancelled".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Cancelled,
    Empty,
    Chosen(Vec<T>),
}

impl<T> Selection<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            Selection::Empty
        } else {
            Selection::Chosen(items)
        }
    }

    /// First chosen item, `None` for cancel and empty alike
    pub fn into_first(self) -> Option<T> {
        match self {
            Selection::Chosen(items) => items.into_iter().next(),
            _ => None,
        }
    }
}

pub trait Picker {
    /// Offer `items` under `prompt`. With `free_text` the user may type a
    /// line that was never offered; otherwise such lines are dropped.
    fn pick(&mut self, items: &[String], prompt: &str, free_text: bool) -> Result<Selection<String>>;

    /// Convenience for fixed menus
    fn pick_str(&mut self, items: &[&str], prompt: &str) -> Result<Selection<String>> {
        let items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        self.pick(&items, prompt, false)
    }

    /// Free-text prompt, pre-filled with `suggestions`
    fn ask(&mut self, suggestions: &[String], prompt: &str) -> Result<Selection<String>> {
        self.pick(suggestions, prompt, true)
    }
}

/// Filter raw picker output down to what the caller may accept.
/// Blank lines never count as a choice.
pub fn accept_lines(offered: &[String], lines: Vec<String>, free_text: bool) -> Selection<String> {
    let accepted = lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .filter(|line| free_text || offered.contains(line))
        .collect();
    Selection::from_vec(accepted)
}
