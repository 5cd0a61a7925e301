//! Core library surface for the Library Manager TUI application.
//!
//! `models` and `codec` hold the catalog and its text format and know nothing
//! about files or terminals. `store` puts the codec on disk, `config` turns
//! command-line flags into paths, and `ui` drives everything from the keyboard.
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;

pub use codec::{deserialize, read_library, serialize, write_library};
pub use config::{Cli, Config, LogLevel, Variant};
pub use error::LibraryError;
pub use models::{create_library, Book, BookInput, Detail, Isbn, Library, PhotoPath};
pub use store::{list_library_files, load_library, save_library};
pub use ui::{run_app, App};
