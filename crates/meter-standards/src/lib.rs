//! Column catalog definitions.
//!
//! - **builtin**: the catalog of the deployed meter installation
//! - **loader**: TOML catalog files for other installations

#![deny(unsafe_code)]

mod builtin;
mod error;
mod loader;

pub use builtin::builtin_catalog;
pub use error::StandardsError;
pub use loader::{load_catalog, parse_catalog};
