use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};

use crate::document::{
    ColorToken, Document, Hue, MenuTab, PersonDraft, Role, Shade, Slot, StoreError,
};
use crate::export::ExportTarget;
use crate::ui::theme::Theme;

/// Years the calendar can be moved to.
pub const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Side effects the input layer asks the session to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Quit,
    SaveNow,
    Export(ExportTarget),
    OpenDataFile(PathBuf),
    SetTheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonForm {
    pub name: String,
    pub color: Option<ColorToken>,
    pub color_input: String,
    pub active_field: FormField,
    pub edit_index: Option<usize>,
}

impl PersonForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            color: None,
            color_input: String::new(),
            active_field: FormField::Name,
            edit_index: None,
        }
    }

    pub fn for_person(document: &Document, index: usize) -> Option<Self> {
        let person = document.persons().get(index)?;
        Some(Self {
            name: person.name.clone(),
            color: Some(person.color),
            color_input: person.color.to_string(),
            active_field: FormField::Name,
            edit_index: Some(index),
        })
    }

    pub fn is_editing(&self) -> bool {
        self.edit_index.is_some()
    }

    pub fn next_field(&mut self) {
        self.commit_color_input();
        self.active_field = match self.active_field {
            FormField::Name => FormField::Color,
            FormField::Color => FormField::Name,
        };
    }

    /// Parses the typed token. A blank or invalid entry clears the color.
    pub fn commit_color_input(&mut self) {
        self.color = self.color_input.parse().ok();
    }

    pub fn cycle_hue(&mut self, forward: bool) {
        let current = self.color.unwrap_or(ColorToken::new(Hue::Slate, Shade::S300));
        let hue = if forward { current.hue.next() } else { current.hue.prev() };
        self.set_color(ColorToken::new(hue, current.shade));
    }

    pub fn step_shade(&mut self, lighter: bool) {
        let current = self.color.unwrap_or(ColorToken::new(Hue::Slate, Shade::S300));
        let shade = if lighter { current.shade.lighter() } else { current.shade.darker() };
        self.set_color(ColorToken::new(current.hue, shade));
    }

    fn set_color(&mut self, token: ColorToken) {
        self.color = Some(token);
        self.color_input = token.to_string();
    }

    pub fn draft(&self) -> PersonDraft {
        PersonDraft::new(self.name.clone(), self.color)
    }
}

impl Default for PersonForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the document and everything the terminal UI needs around it.
pub struct AppState {
    pub mode: Mode,
    pub document: Document,
    pub year: i32,
    pub selected_date: NaiveDate,
    /// `None` is the eraser: assigning clears the date.
    pub selected_person: Option<usize>,
    pub settings_cursor: usize,
    pub command_buffer: String,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub show_week_numbers: bool,
    pub person_form: Option<PersonForm>,
    pub delete_confirmation: Option<usize>,
    pub data_file: PathBuf,
    pub requests: Vec<Request>,
    revision: u64,
}

impl AppState {
    pub fn new(document: Document) -> Self {
        let today = Local::now().date_naive();
        let selected_person = (!document.persons().is_empty()).then_some(0);
        Self {
            mode: Mode::Normal,
            document,
            year: today.year(),
            selected_date: today,
            selected_person,
            settings_cursor: 0,
            command_buffer: String::new(),
            status: None,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            show_week_numbers: true,
            person_form: None,
            delete_confirmation: None,
            data_file: PathBuf::new(),
            requests: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.set_year(year);
        self
    }

    /// Bumped by every document mutation; the session persists on change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), kind: StatusKind::Info });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), kind: StatusKind::Error });
    }

    pub fn active_tab(&self) -> MenuTab {
        self.document.state.menu.active
    }

    pub fn set_tab(&mut self, tab: MenuTab) {
        if self.document.state.menu.active != tab {
            self.document.state.menu.active = tab;
            self.touch();
        }
    }

    pub fn toggle_tab(&mut self) {
        let next = match self.active_tab() {
            MenuTab::Calendar => MenuTab::Settings,
            MenuTab::Settings => MenuTab::Calendar,
        };
        self.set_tab(next);
    }

    /// Clamped to [`YEAR_RANGE`].
    pub fn set_year(&mut self, year: i32) {
        let year = year.clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end());
        self.year = year;
        if self.selected_date.year() != year {
            let day = self.selected_date.day();
            let month = self.selected_date.month();
            self.selected_date = (1..=day)
                .rev()
                .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
                .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1))
                .unwrap_or(self.selected_date);
        }
    }

    /// Moves the cursor; the displayed year follows it.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.year = date.year();
    }

    pub fn select_person(&mut self, person: Option<usize>) {
        match person {
            Some(idx) if idx >= self.document.persons().len() => {
                self.error(format!("No person #{}", idx + 1));
            }
            Some(idx) => {
                self.selected_person = Some(idx);
                let name = self.document.persons()[idx].name.clone();
                self.info(format!("Brush: {}", name));
            }
            None => {
                self.selected_person = None;
                self.info("Brush: eraser");
            }
        }
    }

    /// Applies the current brush to the selected date.
    pub fn assign_selected(&mut self) {
        let date = self.selected_date;
        match self.document.assign_date(date, self.selected_person) {
            Ok(_) => self.touch(),
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn clear_selected(&mut self) {
        if self.document.remove_assignment(self.selected_date).is_some() {
            self.touch();
        }
    }

    pub fn toggle_special_selected(&mut self) {
        let flagged = self.document.toggle_special(self.selected_date);
        self.touch();
        self.info(if flagged { "Marked for attention" } else { "Attention mark removed" });
    }

    pub fn open_new_person_form(&mut self) {
        self.person_form = Some(PersonForm::new());
        self.mode = Mode::Insert;
    }

    pub fn open_edit_person_form(&mut self, index: usize) {
        if let Some(form) = PersonForm::for_person(&self.document, index) {
            self.person_form = Some(form);
            self.mode = Mode::Insert;
        }
    }

    pub fn close_person_form(&mut self) {
        self.person_form = None;
        self.mode = Mode::Normal;
    }

    /// Validates and stores the open form. On failure the form stays open
    /// and the document is untouched.
    pub fn submit_person_form(&mut self) -> Result<(), StoreError> {
        let Some(form) = self.person_form.as_mut() else {
            return Ok(());
        };
        form.commit_color_input();
        let draft = form.draft();
        let edit_index = form.edit_index;

        match self.document.upsert_person(draft, edit_index) {
            Ok(index) => {
                self.touch();
                self.settings_cursor = index;
                if self.selected_person.is_none() {
                    self.selected_person = Some(index);
                }
                self.close_person_form();
                self.info("Person saved");
                Ok(())
            }
            Err(e) => {
                self.error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn add_person(&mut self, name: &str, color: &str) {
        let color = match color.parse::<ColorToken>() {
            Ok(token) => Some(token),
            Err(e) => {
                self.error(e.to_string());
                return;
            }
        };
        match self.document.upsert_person(PersonDraft::new(name, color), None) {
            Ok(_) => {
                self.touch();
                self.info(format!("Added {}", name));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn request_delete_person(&mut self, index: usize) {
        if index < self.document.persons().len() {
            self.delete_confirmation = Some(index);
            self.mode = Mode::Confirm;
        }
    }

    pub fn confirm_delete(&mut self, confirmed: bool) {
        let pending = self.delete_confirmation.take();
        self.mode = Mode::Normal;
        let (Some(index), true) = (pending, confirmed) else {
            return;
        };

        match self.document.delete_person(index) {
            Ok(person) => {
                self.touch();
                self.selected_person = match self.selected_person {
                    Some(sel) if sel == index => None,
                    Some(sel) if sel > index => Some(sel - 1),
                    other => other,
                };
                let count = self.document.persons().len();
                self.settings_cursor = self.settings_cursor.min(count.saturating_sub(1));
                self.info(format!("Deleted {}", person.name));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn set_theme_color(&mut self, role: Role, slot: Slot, token: ColorToken) {
        self.document.set_theme_color(role, slot, token);
        self.touch();
    }

    /// Swaps in a document read from another file. Not a mutation.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        if self.selected_person.is_some_and(|idx| idx >= self.document.persons().len()) {
            self.selected_person = None;
        }
        self.settings_cursor = 0;
    }

    pub fn request(&mut self, request: Request) {
        self.requests.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }
}
