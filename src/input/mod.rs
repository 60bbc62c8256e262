pub mod command_mode;
pub mod insert_mode;
pub mod normal_mode;
pub mod settings_mode;

use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};
use crate::document::MenuTab;

/// Routes a key to the handler of the current mode and tab.
pub fn dispatch(key: KeyCode, state: &mut AppState) {
    if state.show_help {
        match key {
            KeyCode::Char('j') | KeyCode::Down => state.help_scroll += 1,
            KeyCode::Char('k') | KeyCode::Up => state.help_scroll = state.help_scroll.saturating_sub(1),
            _ => state.show_help = false,
        }
        return;
    }

    match state.mode {
        Mode::Command => command_mode::handle_key(key, state),
        Mode::Insert => insert_mode::handle_key(key, state),
        Mode::Confirm => settings_mode::handle_confirm_key(key, state),
        Mode::Normal => match state.active_tab() {
            MenuTab::Calendar => normal_mode::handle_key(key, state),
            MenuTab::Settings => settings_mode::handle_key(key, state),
        },
    }
}
