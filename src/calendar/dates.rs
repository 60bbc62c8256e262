use chrono::{Datelike, Days, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Rows in a month grid. Six weeks cover every month regardless of the
/// weekday it starts on.
pub const GRID_WEEKS: usize = 6;

pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Monday on or before the first day of `month` (1-based).
pub fn month_grid_start(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_monday() as u64;
    first.checked_sub_days(Days::new(offset))
}

/// Every date shown in the 6×7 grid of `month`, row by row.
pub fn month_grid(year: i32, month: u32) -> Option<[[NaiveDate; 7]; GRID_WEEKS]> {
    let start = month_grid_start(year, month)?;
    let mut grid = [[start; 7]; GRID_WEEKS];

    for (week, row) in grid.iter_mut().enumerate() {
        for (weekday, cell) in row.iter_mut().enumerate() {
            let offset = (week * 7 + weekday) as u64;
            *cell = start.checked_add_days(Days::new(offset))?;
        }
    }

    Some(grid)
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("???")
}

/// Accepts `3`, `03`, `mar` or `March`.
pub fn parse_month(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }

    let lower = trimmed.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.to_lowercase().starts_with(&lower))
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn first_of_january_2025_is_week_one() {
        assert_eq!(iso_week_number(date(2025, 1, 1)), 1);
    }

    #[test]
    fn last_day_of_2024_belongs_to_week_one_of_2025() {
        assert_eq!(iso_week_number(date(2024, 12, 31)), 1);
    }

    #[test]
    fn mid_june_2025_is_week_24() {
        assert_eq!(iso_week_number(date(2025, 6, 15)), 24);
    }

    #[test]
    fn year_with_53_weeks() {
        assert_eq!(iso_week_number(date(2026, 12, 31)), 53);
        assert_eq!(iso_week_number(date(2027, 1, 1)), 53);
    }

    #[test]
    fn january_2025_grid_starts_on_monday_before_first() {
        let start = month_grid_start(2025, 1).unwrap();
        assert_eq!(start, date(2024, 12, 30));
        assert_eq!(start.weekday(), Weekday::Mon);
    }

    #[test]
    fn february_2025_grid_starts_on_or_before_first() {
        let start = month_grid_start(2025, 2).unwrap();
        assert_eq!(start.weekday(), Weekday::Mon);
        assert!(start <= date(2025, 2, 1));
        assert_eq!(start, date(2025, 1, 27));
    }

    #[test]
    fn month_starting_on_monday_anchors_on_itself() {
        assert_eq!(month_grid_start(2025, 9).unwrap(), date(2025, 9, 1));
    }

    #[test]
    fn invalid_month_has_no_grid() {
        assert!(month_grid_start(2025, 13).is_none());
        assert!(month_grid(2025, 0).is_none());
    }

    #[test]
    fn month_names_resolve() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "???");
    }

    #[test]
    fn parses_months_by_number_and_name() {
        assert_eq!(parse_month("3"), Some(3));
        assert_eq!(parse_month("mar"), Some(3));
        assert_eq!(parse_month("December"), Some(12));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("ju"), None);
    }

    proptest! {
        #[test]
        fn grid_covers_whole_month(year in 1990i32..2100, month in 1u32..=12) {
            let grid = month_grid(year, month).unwrap();
            let first = date(year, month, 1);
            let last = first
                .checked_add_months(chrono::Months::new(1))
                .and_then(|d| d.pred_opt())
                .unwrap();

            prop_assert!(grid[0][0] <= first);
            prop_assert!(grid[GRID_WEEKS - 1][6] >= last);
            prop_assert_eq!(grid[0][0].weekday(), Weekday::Mon);
        }

        #[test]
        fn week_number_in_iso_range(days in 0i64..40_000) {
            let d = date(1970, 1, 1) + chrono::Duration::days(days);
            let week = iso_week_number(d);
            prop_assert!((1..=53).contains(&week));
        }
    }
}
