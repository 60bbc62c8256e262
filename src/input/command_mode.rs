use std::path::PathBuf;

use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppState, Mode, Request};
use crate::calendar::dates;
use crate::document::{ColorToken, Role, Slot};
use crate::export::ExportTarget;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Write,
    WriteQuit,
    Help,
    Year(i32),
    Goto(NaiveDate),
    AddPerson { name: String, color: String },
    Color { role: Role, slot: Slot, token: ColorToken },
    Export(ExportTarget),
    File(PathBuf),
    Theme(String),
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };
    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "w" | "write" => Command::Write,
        "wq" | "x" => Command::WriteQuit,
        "help" => Command::Help,
        "year" => match parts.get(1).map(|p| p.parse::<i32>()) {
            Some(Ok(year)) => Command::Year(year),
            Some(Err(_)) => Command::Error(format!("Invalid year: {}", parts[1])),
            None => Command::Error("year requires a year argument".to_string()),
        },
        "goto" => {
            if parts.len() < 2 {
                Command::Error("goto requires a date argument".to_string())
            } else if let Ok(date) = NaiveDate::parse_from_str(parts[1], "%Y-%m-%d") {
                Command::Goto(date)
            } else {
                Command::Error(format!("Invalid date format: {}", parts[1]))
            }
        }
        "person" => {
            if parts.len() < 3 {
                Command::Error("person requires a name and a color".to_string())
            } else {
                let color = parts[parts.len() - 1].to_string();
                let name = parts[1..parts.len() - 1].join(" ");
                Command::AddPerson { name, color }
            }
        }
        "color" => parse_color(&parts[1..]),
        "export" => match parts.get(1) {
            None => Command::Export(ExportTarget::Year),
            Some(month) => match dates::parse_month(month) {
                Some(month) => Command::Export(ExportTarget::Month(month)),
                None => Command::Error(format!("Invalid month: {}", month)),
            },
        },
        "file" => {
            if parts.len() < 2 {
                Command::Error("file requires a path".to_string())
            } else {
                Command::File(PathBuf::from(parts[1..].join(" ")))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

fn parse_color(args: &[&str]) -> Command {
    let [role, slot, token] = args else {
        return Command::Error("color requires ROLE SLOT COLOR".to_string());
    };
    let role = match role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return Command::Error(e),
    };
    let slot = match slot.parse::<Slot>() {
        Ok(slot) => slot,
        Err(e) => return Command::Error(e),
    };
    match token.parse::<ColorToken>() {
        Ok(token) => Command::Color { role, slot, token },
        Err(e) => Command::Error(e.to_string()),
    }
}

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            execute(command, state);
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
        }
        KeyCode::Char(c) => state.command_buffer.push(c),
        _ => {}
    }
}

/// Applies what can be done in memory and queues the rest for the session.
pub fn execute(command: Command, state: &mut AppState) {
    match command {
        Command::Quit => state.request(Request::Quit),
        Command::Write => state.request(Request::SaveNow),
        Command::WriteQuit => {
            state.request(Request::SaveNow);
            state.request(Request::Quit);
        }
        Command::Help => {
            state.show_help = true;
            state.help_scroll = 0;
        }
        Command::Year(year) => state.set_year(year),
        Command::Goto(date) => state.select_date(date),
        Command::AddPerson { name, color } => state.add_person(&name, &color),
        Command::Color { role, slot, token } => {
            state.set_theme_color(role, slot, token);
            state.info(format!("{:?} {:?} set to {}", role, slot, token));
        }
        Command::Export(target) => state.request(Request::Export(target)),
        Command::File(path) => state.request(Request::OpenDataFile(path)),
        Command::Theme(name) => state.request(Request::SetTheme(name)),
        Command::Error(message) => state.error(message),
    }
}
