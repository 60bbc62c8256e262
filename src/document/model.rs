use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::palette::{self, ColorToken, Hue, Shade};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub color: ColorToken,
}

/// A date owned by a person. Name and color are copied from the person at
/// assignment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayAssignment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "palette::optional_token")]
    pub color: Option<ColorToken>,
    #[serde(default)]
    pub special: bool,
}

impl WorkdayAssignment {
    pub fn for_person(date: NaiveDate, person: &Person) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            name: person.name.clone(),
            color: Some(person.color),
            special: false,
        }
    }

    /// A bare attention mark without an owner.
    pub fn special_mark(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            name: String::new(),
            color: None,
            special: true,
        }
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month() && self.day == date.day()
    }

    pub fn key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn has_owner(&self) -> bool {
        !self.name.is_empty() || self.color.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Holiday,
    Vacation,
    Attention,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "holiday" => Ok(Role::Holiday),
            "vacation" => Ok(Role::Vacation),
            "attention" => Ok(Role::Attention),
            other => Err(format!("Unknown color role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Background,
    Border,
    Text,
}

impl std::str::FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bg" | "background" => Ok(Slot::Background),
            "border" => Ok(Slot::Border),
            "text" => Ok(Slot::Text),
            other => Err(format!("Unknown color slot: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorTheme {
    pub holiday_bg: ColorToken,
    pub holiday_border: ColorToken,
    pub holiday_text: ColorToken,
    pub vacation_bg: ColorToken,
    pub vacation_border: ColorToken,
    pub vacation_text: ColorToken,
    pub attention_bg: ColorToken,
    pub attention_border: ColorToken,
    pub attention_text: ColorToken,
}

impl ColorTheme {
    pub fn get(&self, role: Role, slot: Slot) -> ColorToken {
        match (role, slot) {
            (Role::Holiday, Slot::Background) => self.holiday_bg,
            (Role::Holiday, Slot::Border) => self.holiday_border,
            (Role::Holiday, Slot::Text) => self.holiday_text,
            (Role::Vacation, Slot::Background) => self.vacation_bg,
            (Role::Vacation, Slot::Border) => self.vacation_border,
            (Role::Vacation, Slot::Text) => self.vacation_text,
            (Role::Attention, Slot::Background) => self.attention_bg,
            (Role::Attention, Slot::Border) => self.attention_border,
            (Role::Attention, Slot::Text) => self.attention_text,
        }
    }

    pub fn set(&mut self, role: Role, slot: Slot, token: ColorToken) {
        let target = match (role, slot) {
            (Role::Holiday, Slot::Background) => &mut self.holiday_bg,
            (Role::Holiday, Slot::Border) => &mut self.holiday_border,
            (Role::Holiday, Slot::Text) => &mut self.holiday_text,
            (Role::Vacation, Slot::Background) => &mut self.vacation_bg,
            (Role::Vacation, Slot::Border) => &mut self.vacation_border,
            (Role::Vacation, Slot::Text) => &mut self.vacation_text,
            (Role::Attention, Slot::Background) => &mut self.attention_bg,
            (Role::Attention, Slot::Border) => &mut self.attention_border,
            (Role::Attention, Slot::Text) => &mut self.attention_text,
        };
        *target = token;
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        let orange = ColorToken::new(Hue::Orange, Shade::S500);
        let yellow = ColorToken::new(Hue::Yellow, Shade::S500);
        let red = ColorToken::new(Hue::Red, Shade::S500);
        Self {
            holiday_bg: orange,
            holiday_border: orange,
            holiday_text: orange,
            vacation_bg: yellow,
            vacation_border: yellow,
            vacation_text: yellow,
            attention_bg: red,
            attention_border: red,
            attention_text: red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuTab {
    #[default]
    Calendar,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub active: MenuTab,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarData {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub workdays: Vec<WorkdayAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarState {
    #[serde(default)]
    pub menu: Menu,
    #[serde(rename = "DATA", default)]
    pub data: CalendarData,
}

/// The persisted root: `{ state: { menu, DATA }, colors }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub state: CalendarState,
    #[serde(default)]
    pub colors: ColorTheme,
}

impl Document {
    pub fn persons(&self) -> &[Person] {
        &self.state.data.persons
    }

    pub fn workdays(&self) -> &[WorkdayAssignment] {
        &self.state.data.workdays
    }
}
