pub mod dates;
pub mod holidays;

pub use dates::{iso_week_number, month_grid, month_grid_start, month_name};
pub use holidays::{Holiday, VacationRange, coverage_notice, get_holidays, get_vacation_days};
