//! Manifest reading
//!
//! Reads dependency declarations from a package.json. The manifest is never
//! written back; callers receive the upgraded declarations instead.

mod package_json;

pub use package_json::{parse_dependencies, read_dependencies};
