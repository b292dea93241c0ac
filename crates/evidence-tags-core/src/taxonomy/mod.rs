//! # Taxonomy Module
//!
//! Category profiles and the registry that holds them.
//!
//! ## Module layout
//!
//! - `profile`: runtime category profile
//! - `builtin`: hand-authored builtin categories
//! - `extensions`: file extension fallback table
//! - `loader`: external section -> tags registry source
//! - `registry`: merged, frozen slug -> profile table
//!
//! ## Example
//!
//! ```rust
//! use evidence_tags_core::taxonomy::Registry;
//!
//! let sections = vec![(
//!     "exhibits".to_string(),
//!     vec!["Witness Statement".to_string()],
//! )];
//! let registry = Registry::builtin().with_section_map(&sections);
//!
//! assert!(registry.get("billing").is_some());
//! let statement = registry.get("witness_statement").unwrap();
//! assert_eq!(statement.label, "Witness Statement");
//! assert_eq!(statement.primary_section.as_deref(), Some("exhibits"));
//! ```

mod builtin;
mod extensions;
mod loader;
mod profile;
mod registry;

pub use builtin::{builtin_profiles, BuiltinProfile, BUILTIN_PROFILES, UNCATEGORIZED};
pub use extensions::{default_category_for_path, EXTENSION_CATEGORIES};
pub use loader::{load_section_map, parse_section_map, profiles_from_section_map, SectionMap};
pub use profile::{CategoryProfile, DEFAULT_PRIORITY};
pub use registry::{merge_profiles, Registry};
