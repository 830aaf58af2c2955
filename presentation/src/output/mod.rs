//! Output formatting for command results

pub mod console;
pub mod formatter;
pub mod json;

/// Enable or disable ANSI colors for everything printed afterwards
pub fn set_color(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
