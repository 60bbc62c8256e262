//! Mutations on the in-memory [`Document`].
//!
//! None of these perform I/O; the caller decides when to persist.

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Document, Person, Role, Slot, WorkdayAssignment};
use super::palette::ColorToken;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("A color must be chosen")]
    MissingColor,
    #[error("No person at position {0}")]
    UnknownPerson(usize),
}

/// Form input for creating or editing a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub color: Option<ColorToken>,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, color: Option<ColorToken>) -> Self {
        Self { name: name.into(), color }
    }

    fn validate(self) -> Result<Person, StoreError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let color = self.color.ok_or(StoreError::MissingColor)?;
        Ok(Person { name, color })
    }
}

impl From<&Person> for PersonDraft {
    fn from(person: &Person) -> Self {
        Self { name: person.name.clone(), color: Some(person.color) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Inserted,
    Replaced,
    Removed,
    Unchanged,
}

impl Document {
    fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.state.data.workdays.iter().position(|w| w.is_on(date))
    }

    pub fn assignment_on(&self, date: NaiveDate) -> Option<&WorkdayAssignment> {
        self.state.data.workdays.iter().find(|w| w.is_on(date))
    }

    /// Binds `date` to the person at `person`, or clears it when `None`.
    pub fn assign_date(&mut self, date: NaiveDate, person: Option<usize>) -> Result<AssignOutcome, StoreError> {
        let Some(index) = person else {
            return Ok(match self.remove_assignment(date) {
                Some(_) => AssignOutcome::Removed,
                None => AssignOutcome::Unchanged,
            });
        };

        let person = self
            .state
            .data
            .persons
            .get(index)
            .cloned()
            .ok_or(StoreError::UnknownPerson(index))?;

        match self.position_of(date) {
            Some(pos) => {
                let existing = &mut self.state.data.workdays[pos];
                existing.name = person.name;
                existing.color = Some(person.color);
                Ok(AssignOutcome::Replaced)
            }
            None => {
                self.state.data.workdays.push(WorkdayAssignment::for_person(date, &person));
                Ok(AssignOutcome::Inserted)
            }
        }
    }

    /// Flips the attention flag on `date` and returns its new value.
    pub fn toggle_special(&mut self, date: NaiveDate) -> bool {
        match self.position_of(date) {
            Some(pos) => {
                let existing = &mut self.state.data.workdays[pos];
                existing.special = !existing.special;
                existing.special
            }
            None => {
                self.state.data.workdays.push(WorkdayAssignment::special_mark(date));
                true
            }
        }
    }

    pub fn remove_assignment(&mut self, date: NaiveDate) -> Option<WorkdayAssignment> {
        let pos = self.position_of(date)?;
        Some(self.state.data.workdays.remove(pos))
    }

    /// Inserts a person, or replaces the one at `edit_index`.
    ///
    /// Editing rewrites every assignment whose name OR color equals the
    /// person's previous value. Another person sharing the old color gets
    /// rewritten too.
    pub fn upsert_person(&mut self, draft: PersonDraft, edit_index: Option<usize>) -> Result<usize, StoreError> {
        let person = draft.validate()?;

        let Some(index) = edit_index else {
            self.state.data.persons.push(person);
            return Ok(self.state.data.persons.len() - 1);
        };

        let slot = self
            .state
            .data
            .persons
            .get_mut(index)
            .ok_or(StoreError::UnknownPerson(index))?;
        let previous = std::mem::replace(slot, person.clone());

        if previous != person {
            let mut rewritten = 0;
            for assignment in &mut self.state.data.workdays {
                if assignment.name == previous.name || assignment.color == Some(previous.color) {
                    assignment.name = person.name.clone();
                    assignment.color = Some(person.color);
                    rewritten += 1;
                }
            }
            tracing::debug!(
                "Renamed {} ({}) to {} ({}), rewrote {} assignments",
                previous.name, previous.color, person.name, person.color, rewritten
            );
        }

        Ok(index)
    }

    /// Removes a person. Their assignments keep the copied name and color.
    pub fn delete_person(&mut self, index: usize) -> Result<Person, StoreError> {
        if index >= self.state.data.persons.len() {
            return Err(StoreError::UnknownPerson(index));
        }
        Ok(self.state.data.persons.remove(index))
    }

    pub fn set_theme_color(&mut self, role: Role, slot: Slot, token: ColorToken) {
        self.colors.set(role, slot, token);
    }

    /// Collapses duplicate dates, keeping the last entry for each. Returns the
    /// number of entries dropped.
    pub fn dedupe_assignments(&mut self) -> usize {
        let workdays = &mut self.state.data.workdays;
        let mut last_index: HashMap<(i32, u32, u32), usize> = HashMap::new();
        for (idx, assignment) in workdays.iter().enumerate() {
            last_index.insert(assignment.key(), idx);
        }

        let before = workdays.len();
        let mut idx = 0;
        workdays.retain(|assignment| {
            let keep = last_index.get(&assignment.key()) == Some(&idx);
            idx += 1;
            keep
        });
        before - workdays.len()
    }
}
