//! Static public holiday and school vacation table.
//!
//! Data covers North Rhine-Westphalia for 2025 through 2030. Movable feasts
//! are placed relative to the Easter Sunday listed per year; vacations are
//! listed as date spans and split into per-month ranges when the table is
//! built.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2025..=2030;

pub const COVERAGE_NOTICE: &str = "Holiday and vacation data only available for 2025–2030";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub name: String,
}

impl Holiday {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRange {
    pub year: i32,
    pub month: u32,
    pub first_day: u32,
    pub last_day: u32,
    pub name: String,
}

impl VacationRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year
            && date.month() == self.month
            && (self.first_day..=self.last_day).contains(&date.day())
    }

    /// Every date covered by the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (self.first_day..=self.last_day)
            .filter_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
    }
}

#[derive(Debug, Default)]
struct YearData {
    holidays: Vec<Holiday>,
    vacations: Vec<VacationRange>,
}

const FIXED_HOLIDAYS: [(u32, u32, &str); 6] = [
    (1, 1, "Neujahr"),
    (5, 1, "Tag der Arbeit"),
    (10, 3, "Tag der Deutschen Einheit"),
    (11, 1, "Allerheiligen"),
    (12, 25, "1. Weihnachtstag"),
    (12, 26, "2. Weihnachtstag"),
];

/// Offsets in days from Easter Sunday.
const EASTER_HOLIDAYS: [(i64, &str); 5] = [
    (-2, "Karfreitag"),
    (1, "Ostermontag"),
    (39, "Christi Himmelfahrt"),
    (50, "Pfingstmontag"),
    (60, "Fronleichnam"),
];

const EASTER_SUNDAYS: [(i32, u32, u32); 6] = [
    (2025, 4, 20),
    (2026, 4, 5),
    (2027, 3, 28),
    (2028, 4, 16),
    (2029, 4, 1),
    (2030, 4, 21),
];

type Span = ((i32, u32, u32), (i32, u32, u32), &'static str);

const VACATION_SPANS: &[Span] = &[
    ((2024, 12, 23), (2025, 1, 6), "Weihnachtsferien"),
    ((2025, 4, 14), (2025, 4, 26), "Osterferien"),
    ((2025, 6, 10), (2025, 6, 10), "Pfingstferien"),
    ((2025, 7, 14), (2025, 8, 26), "Sommerferien"),
    ((2025, 10, 13), (2025, 10, 25), "Herbstferien"),
    ((2025, 12, 22), (2026, 1, 6), "Weihnachtsferien"),
    ((2026, 3, 30), (2026, 4, 11), "Osterferien"),
    ((2026, 5, 26), (2026, 5, 26), "Pfingstferien"),
    ((2026, 7, 20), (2026, 9, 1), "Sommerferien"),
    ((2026, 10, 17), (2026, 10, 31), "Herbstferien"),
    ((2026, 12, 23), (2027, 1, 6), "Weihnachtsferien"),
    ((2027, 3, 22), (2027, 4, 3), "Osterferien"),
    ((2027, 5, 18), (2027, 5, 18), "Pfingstferien"),
    ((2027, 7, 19), (2027, 8, 31), "Sommerferien"),
    ((2027, 10, 23), (2027, 11, 6), "Herbstferien"),
    ((2027, 12, 24), (2028, 1, 8), "Weihnachtsferien"),
    ((2028, 4, 10), (2028, 4, 22), "Osterferien"),
    ((2028, 6, 6), (2028, 6, 6), "Pfingstferien"),
    ((2028, 7, 10), (2028, 8, 22), "Sommerferien"),
    ((2028, 10, 14), (2028, 10, 28), "Herbstferien"),
    ((2028, 12, 21), (2029, 1, 5), "Weihnachtsferien"),
    ((2029, 3, 26), (2029, 4, 7), "Osterferien"),
    ((2029, 5, 22), (2029, 5, 22), "Pfingstferien"),
    ((2029, 7, 2), (2029, 8, 14), "Sommerferien"),
    ((2029, 10, 6), (2029, 10, 20), "Herbstferien"),
    ((2029, 12, 21), (2030, 1, 5), "Weihnachtsferien"),
    ((2030, 4, 15), (2030, 4, 27), "Osterferien"),
    ((2030, 6, 11), (2030, 6, 11), "Pfingstferien"),
    ((2030, 6, 24), (2030, 8, 6), "Sommerferien"),
    ((2030, 10, 5), (2030, 10, 19), "Herbstferien"),
    ((2030, 12, 21), (2031, 1, 4), "Weihnachtsferien"),
];

static TABLE: LazyLock<HashMap<i32, YearData>> = LazyLock::new(build_table);

fn build_table() -> HashMap<i32, YearData> {
    let mut table: HashMap<i32, YearData> = SUPPORTED_YEARS
        .map(|year| (year, YearData::default()))
        .collect();

    for (year, data) in table.iter_mut() {
        data.holidays = holidays_for(*year);
    }

    for &(start, end, name) in VACATION_SPANS {
        let (Some(start), Some(end)) = (to_date(start), to_date(end)) else {
            tracing::warn!("Skipping malformed vacation span {}", name);
            continue;
        };
        for range in split_by_month(start, end, name) {
            if let Some(data) = table.get_mut(&range.year) {
                data.vacations.push(range);
            }
        }
    }

    for data in table.values_mut() {
        data.holidays.sort_by_key(|h| (h.month, h.day));
        data.vacations.sort_by_key(|v| (v.month, v.first_day));
    }

    table
}

fn to_date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn holidays_for(year: i32) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = FIXED_HOLIDAYS
        .iter()
        .map(|&(month, day, name)| Holiday { year, month, day, name: name.to_string() })
        .collect();

    let easter = EASTER_SUNDAYS
        .iter()
        .find(|(y, _, _)| *y == year)
        .and_then(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));

    if let Some(easter) = easter {
        for &(offset, name) in &EASTER_HOLIDAYS {
            let date = if offset < 0 {
                easter.checked_sub_days(Days::new(offset.unsigned_abs()))
            } else {
                easter.checked_add_days(Days::new(offset as u64))
            };
            if let Some(date) = date {
                holidays.push(Holiday {
                    year: date.year(),
                    month: date.month(),
                    day: date.day(),
                    name: name.to_string(),
                });
            }
        }
    }

    holidays
}

fn split_by_month(start: NaiveDate, end: NaiveDate, name: &str) -> Vec<VacationRange> {
    let mut ranges = Vec::new();
    let mut cursor = start;

    while cursor <= end {
        let month_end = cursor
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.with_day(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(cursor);
        let last = month_end.min(end);

        ranges.push(VacationRange {
            year: cursor.year(),
            month: cursor.month(),
            first_day: cursor.day(),
            last_day: last.day(),
            name: name.to_string(),
        });

        let Some(next) = last.succ_opt() else { break };
        cursor = next;
    }

    ranges
}

pub fn is_supported_year(year: i32) -> bool {
    SUPPORTED_YEARS.contains(&year)
}

/// Advisory shown alongside the grid when the table has no data for `year`.
pub fn coverage_notice(year: i32) -> Option<&'static str> {
    (!is_supported_year(year)).then_some(COVERAGE_NOTICE)
}

pub fn get_holidays(year: i32) -> &'static [Holiday] {
    TABLE.get(&year).map(|data| data.holidays.as_slice()).unwrap_or(&[])
}

pub fn get_vacation_days(year: i32) -> &'static [VacationRange] {
    TABLE.get(&year).map(|data| data.vacations.as_slice()).unwrap_or(&[])
}

pub fn holiday_on(date: NaiveDate) -> Option<&'static Holiday> {
    get_holidays(date.year())
        .iter()
        .find(|h| h.month == date.month() && h.day == date.day())
}

pub fn vacation_on(date: NaiveDate) -> Option<&'static VacationRange> {
    get_vacation_days(date.year()).iter().find(|v| v.contains(date))
}
