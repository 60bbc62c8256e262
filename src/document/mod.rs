pub mod model;
pub mod palette;
pub mod store;

pub use model::{
    CalendarData, CalendarState, ColorTheme, Document, Menu, MenuTab, Person, Role, Slot,
    WorkdayAssignment,
};
pub use palette::{ColorToken, Hue, PaletteError, Shade};
pub use store::{AssignOutcome, PersonDraft, StoreError};
