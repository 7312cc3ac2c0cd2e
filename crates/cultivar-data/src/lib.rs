//! Data-driven content for the Cultivar engine: serde schema structs for
//! production definitions, a file loader (RON/JSON/TOML), and the built-in
//! seed catalog.

pub mod catalog;
pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_into, load_productions};
