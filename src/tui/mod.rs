mod session;
mod presentation;
mod sample_data;
mod settings_view;
mod calendar_views;
mod dialogs;

pub use sample_data::add_sample_data;
pub use session::{run_tui, SessionOptions};
