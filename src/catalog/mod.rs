//! Planet catalog module
//!
//! The catalog is the static, ordered list of planet definitions that drives
//! scene construction. It is loaded once at startup and never mutated.

pub mod loader;
pub mod types;

pub use loader::{CATALOG_ENV_VAR, DEFAULT_CATALOG_PATH, catalog_path_from_env};
pub use types::{PlanetCatalog, PlanetDef, RingDef, RingSpec};
