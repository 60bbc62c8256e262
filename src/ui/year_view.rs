//! Resolves a year of day cells from the document and the holiday table.
//!
//! Pure: the same document and year always produce the same layout.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::calendar::dates::{self, GRID_WEEKS};
use crate::calendar::holidays::{self, Holiday, VacationRange};
use crate::document::{ColorToken, Document, WorkdayAssignment};

#[derive(Debug, Clone, PartialEq)]
pub struct YearLayout {
    pub year: i32,
    pub months: Vec<MonthGrid>,
    /// Set when the holiday table has no data for `year`.
    pub notice: Option<&'static str>,
    pub attention_color: ColorToken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub month: u32,
    pub name: &'static str,
    pub weeks: Vec<WeekRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    pub iso_week: u32,
    pub days: Vec<DayCell>,
}

/// Border accent of a cell, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderAccent {
    Holiday(ColorToken),
    Vacation(ColorToken),
    Assignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub fill_color: Option<ColorToken>,
    pub border: Option<BorderAccent>,
    pub is_special: bool,
    pub tooltip: String,
    pub owner: Option<String>,
}

impl DayCell {
    fn outside(date: NaiveDate) -> Self {
        Self {
            date,
            in_month: false,
            fill_color: None,
            border: None,
            is_special: false,
            tooltip: String::new(),
            owner: None,
        }
    }
}

/// Per-date lookups for the displayed year. Cells of neighbouring months
/// are never annotated, so other years are not needed.
struct Lookup<'a> {
    holidays: HashMap<NaiveDate, &'a Holiday>,
    vacations: HashMap<NaiveDate, &'a VacationRange>,
    assignments: HashMap<NaiveDate, &'a WorkdayAssignment>,
}

impl<'a> Lookup<'a> {
    fn build(document: &'a Document, year: i32) -> Self {
        let holidays = holidays::get_holidays(year)
            .iter()
            .filter_map(|h| h.date().map(|d| (d, h)))
            .collect();

        let vacations = holidays::get_vacation_days(year)
            .iter()
            .flat_map(|v| v.days().map(move |d| (d, v)))
            .collect();

        let assignments = document
            .workdays()
            .iter()
            .filter(|w| w.year == year)
            .filter_map(|w| w.date().map(|d| (d, w)))
            .collect();

        Self { holidays, vacations, assignments }
    }
}

pub fn calculate_layout(document: &Document, year: i32) -> YearLayout {
    let lookup = Lookup::build(document, year);

    let months = (1..=12)
        .filter_map(|month| month_layout(document, &lookup, year, month))
        .collect();

    YearLayout {
        year,
        months,
        notice: holidays::coverage_notice(year),
        attention_color: document.colors.attention_border,
    }
}

/// A single month, for exports of one month.
pub fn calculate_month(document: &Document, year: i32, month: u32) -> Option<MonthGrid> {
    let lookup = Lookup::build(document, year);
    month_layout(document, &lookup, year, month)
}

fn month_layout(document: &Document, lookup: &Lookup<'_>, year: i32, month: u32) -> Option<MonthGrid> {
    let grid = dates::month_grid(year, month)?;
    let mut weeks = Vec::with_capacity(GRID_WEEKS);

    for row in grid {
        let days = row
            .iter()
            .map(|date| resolve_cell(document, lookup, *date, month))
            .collect();
        weeks.push(WeekRow { iso_week: dates::iso_week_number(row[0]), days });
    }

    Some(MonthGrid { month, name: dates::month_name(month), weeks })
}

fn resolve_cell(document: &Document, lookup: &Lookup<'_>, date: NaiveDate, month: u32) -> DayCell {
    if date.month() != month {
        return DayCell::outside(date);
    }

    let holiday = lookup.holidays.get(&date);
    let vacation = lookup.vacations.get(&date);
    let assignment = lookup.assignments.get(&date);

    let border = if holiday.is_some() {
        Some(BorderAccent::Holiday(document.colors.holiday_border))
    } else if vacation.is_some() {
        Some(BorderAccent::Vacation(document.colors.vacation_border))
    } else {
        assignment.map(|_| BorderAccent::Assignment)
    };

    let tooltip = holiday
        .map(|h| h.name.clone())
        .or_else(|| vacation.map(|v| v.name.clone()))
        .unwrap_or_default();

    DayCell {
        date,
        in_month: true,
        fill_color: assignment.and_then(|a| a.color),
        border,
        is_special: assignment.is_some_and(|a| a.special),
        tooltip,
        owner: assignment
            .filter(|a| !a.name.is_empty())
            .map(|a| a.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ColorTheme, Hue, PersonDraft, Shade};
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn blue() -> ColorToken {
        ColorToken::new(Hue::Blue, Shade::S300)
    }

    fn document_with_dennis() -> Document {
        let mut doc = Document::default();
        doc.upsert_person(PersonDraft::new("Dennis", Some(blue())), None).unwrap();
        doc
    }

    fn cell(layout: &YearLayout, d: NaiveDate) -> &DayCell {
        layout.months[(d.month() - 1) as usize]
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .find(|c| c.date == d && c.in_month)
            .unwrap()
    }

    #[test]
    fn year_layout_has_twelve_six_by_seven_months() {
        let layout = calculate_layout(&Document::default(), 2025);

        assert_eq!(layout.year, 2025);
        assert_eq!(layout.months.len(), 12);
        for month in &layout.months {
            assert_eq!(month.weeks.len(), 6);
            for week in &month.weeks {
                assert_eq!(week.days.len(), 7);
            }
        }
    }

    #[test]
    fn week_column_uses_iso_week_of_monday() {
        let layout = calculate_layout(&Document::default(), 2025);
        let january = &layout.months[0];

        assert_eq!(january.weeks[0].days[0].date, date(2024, 12, 30));
        assert_eq!(january.weeks[0].iso_week, 1);
        assert_eq!(january.weeks[1].iso_week, 2);
    }

    #[test]
    fn out_of_month_cells_are_blank() {
        let mut doc = document_with_dennis();
        doc.assign_date(date(2024, 12, 31), Some(0)).unwrap();

        let layout = calculate_layout(&doc, 2025);
        let leading = &layout.months[0].weeks[0].days[1];

        assert_eq!(leading.date, date(2024, 12, 31));
        assert!(!leading.in_month);
        assert_eq!(leading.fill_color, None);
        assert_eq!(leading.border, None);
        assert!(leading.tooltip.is_empty());
    }

    #[test]
    fn holiday_cell_has_holiday_border_and_name() {
        let layout = calculate_layout(&Document::default(), 2025);
        let new_year = cell(&layout, date(2025, 1, 1));

        assert_eq!(new_year.border, Some(BorderAccent::Holiday(ColorTheme::default().holiday_border)));
        assert_eq!(new_year.tooltip, "Neujahr");
        assert_eq!(new_year.fill_color, None);
    }

    #[test]
    fn vacation_cell_has_vacation_border_and_name() {
        let layout = calculate_layout(&Document::default(), 2025);
        let autumn = cell(&layout, date(2025, 10, 15));

        assert_eq!(autumn.border, Some(BorderAccent::Vacation(ColorTheme::default().vacation_border)));
        assert_eq!(autumn.tooltip, "Herbstferien");
    }

    #[test]
    fn holiday_inside_vacation_prefers_holiday() {
        // New Year's Day falls inside the Christmas break.
        let layout = calculate_layout(&Document::default(), 2026);
        let new_year = cell(&layout, date(2026, 1, 1));

        assert!(matches!(new_year.border, Some(BorderAccent::Holiday(_))));
        assert_eq!(new_year.tooltip, "Neujahr");
    }

    #[test]
    fn assignment_on_holiday_fills_and_keeps_holiday_border() {
        let mut doc = document_with_dennis();
        doc.assign_date(date(2025, 1, 1), Some(0)).unwrap();

        let layout = calculate_layout(&doc, 2025);
        let new_year = cell(&layout, date(2025, 1, 1));

        assert_eq!(new_year.fill_color, Some(blue()));
        assert!(matches!(new_year.border, Some(BorderAccent::Holiday(_))));
        assert_eq!(new_year.owner.as_deref(), Some("Dennis"));
    }

    #[test]
    fn plain_assignment_gets_marker_border() {
        let mut doc = document_with_dennis();
        doc.assign_date(date(2025, 3, 4), Some(0)).unwrap();

        let layout = calculate_layout(&doc, 2025);
        let day = cell(&layout, date(2025, 3, 4));

        assert_eq!(day.border, Some(BorderAccent::Assignment));
        assert_eq!(day.fill_color, Some(blue()));
        assert!(day.tooltip.is_empty());
    }

    #[test]
    fn special_flag_overlays_any_state() {
        let mut doc = document_with_dennis();
        doc.toggle_special(date(2025, 10, 14));
        doc.toggle_special(date(2025, 3, 5));

        let layout = calculate_layout(&doc, 2025);

        let in_vacation = cell(&layout, date(2025, 10, 14));
        assert!(in_vacation.is_special);
        assert!(matches!(in_vacation.border, Some(BorderAccent::Vacation(_))));
        assert_eq!(in_vacation.fill_color, None);
        assert_eq!(in_vacation.owner, None);

        assert!(cell(&layout, date(2025, 3, 5)).is_special);
        assert_eq!(layout.attention_color, doc.colors.attention_border);
    }

    #[test]
    fn assignments_of_other_years_do_not_leak() {
        let mut doc = document_with_dennis();
        doc.assign_date(date(2026, 3, 4), Some(0)).unwrap();

        let layout = calculate_layout(&doc, 2025);

        assert_eq!(cell(&layout, date(2025, 3, 4)).fill_color, None);
    }

    #[test]
    fn unsupported_year_has_notice_and_no_annotations() {
        let layout = calculate_layout(&Document::default(), 2035);

        assert_eq!(layout.notice, Some(holidays::COVERAGE_NOTICE));
        assert!(layout
            .months
            .iter()
            .flat_map(|m| &m.weeks)
            .flat_map(|w| &w.days)
            .all(|c| c.border.is_none() && c.tooltip.is_empty()));
    }

    #[test]
    fn layout_is_idempotent() {
        let mut doc = document_with_dennis();
        doc.assign_date(date(2025, 6, 1), Some(0)).unwrap();
        doc.toggle_special(date(2025, 6, 2));

        assert_eq!(calculate_layout(&doc, 2025), calculate_layout(&doc, 2025));
    }

    #[test]
    fn single_month_matches_year_layout() {
        let doc = document_with_dennis();
        let year = calculate_layout(&doc, 2027);

        assert_eq!(calculate_month(&doc, 2027, 5).as_ref(), Some(&year.months[4]));
        assert!(calculate_month(&doc, 2027, 13).is_none());
    }
}
