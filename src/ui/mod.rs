pub mod theme;
pub mod year_view;
