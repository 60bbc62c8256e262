use crossterm::event::KeyCode;

use crate::app::{AppState, FormField};

/// Keys while the person form is open.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Esc => {
            state.close_person_form();
            return;
        }
        KeyCode::Enter => {
            // Validation errors land in the status bar and keep the form open.
            let _ = state.submit_person_form();
            return;
        }
        _ => {}
    }

    let Some(form) = state.person_form.as_mut() else {
        return;
    };

    match (form.active_field, key) {
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => form.next_field(),
        (FormField::Name, KeyCode::Backspace) => {
            form.name.pop();
        }
        (FormField::Name, KeyCode::Char(c)) => form.name.push(c),
        (FormField::Color, KeyCode::Right) => form.cycle_hue(true),
        (FormField::Color, KeyCode::Left) => form.cycle_hue(false),
        (FormField::Color, KeyCode::Up) => form.step_shade(true),
        (FormField::Color, KeyCode::Down) => form.step_shade(false),
        (FormField::Color, KeyCode::Backspace) => {
            form.color_input.pop();
            form.commit_color_input();
        }
        (FormField::Color, KeyCode::Char(c)) => {
            if c.is_ascii_alphanumeric() || c == '-' {
                form.color_input.push(c);
                form.commit_color_input();
            }
        }
        _ => {}
    }
}
