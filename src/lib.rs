// panmenu library - dmenu-style front end for mpd
// The picker and the mpd session sit behind traits so any selector or backend can be swapped in

pub mod commands;  // top-level command menu and its handlers
pub mod config;    // settings and preferences
pub mod error;     // error taxonomy shared by every module
pub mod menu;      // formatting, range picking, filter building, search loop
pub mod picker;    // line selector adapter (dmenu, rofi, fzf, ...)
pub mod session;   // mpd access through mpc

#[cfg(test)]
mod testing;

// Export the stuff the binary actually uses
pub use commands::{Command, Menu};
pub use config::Config;
pub use error::{Error, Result};
pub use picker::{Picker, ProcessPicker, Selection};
pub use session::{MpcSession, Session, Track};
