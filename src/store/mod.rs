//! File persistence split across logical submodules.

mod files;
mod location;

pub use files::{library_path, list_library_files, load_library, save_library, FILE_EXTENSION};
pub use location::{data_dir, default_library_dir, ensure_dir};
