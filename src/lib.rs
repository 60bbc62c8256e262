pub mod calendar;
pub mod document;
pub mod input;
pub mod ui;
pub mod storage;
pub mod export;
pub mod app;

pub use app::{AppState, Mode};
pub use document::Document;

pub use input::{normal_mode, command_mode};
