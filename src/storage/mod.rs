pub mod config;
pub mod flush;
pub mod gateway;

pub use config::Config;
pub use flush::DebouncedWriter;
pub use gateway::{DocumentStore, JsonFileStore, PersistenceError, hydrate, resolve_data_file};
