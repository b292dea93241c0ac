//! # evidence-tags-core
//!
//! Shared evidence-tag taxonomy. Collaborators hand in whatever they know
//! about an item (a declared category, free-form tags, a file path) and get
//! back one canonical category, a normalized tag set and the document
//! sections the category is filed under.
//!
//! ```rust
//! use evidence_tags_core::{Registry, ResolveQuery};
//!
//! let registry = Registry::builtin();
//! let res = registry.resolve(&ResolveQuery::new().tags(["#Surveillance"]));
//! assert_eq!(res.category.as_deref(), Some("field_notes"));
//! assert_eq!(res.primary_section.as_deref(), Some("field_activity"));
//!
//! let all = registry.candidates(["surveillance"]);
//! assert_eq!(all, vec!["field_notes", "media_video"]);
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod normalize;
pub mod resolve;
pub mod scan;
pub mod taxonomy;

pub use config::{resolve_base_dir, Config, RegistryConfig};
pub use error::{Result, TaxonomyError};
pub use global::{
    candidate_categories_from_tags, install_registry, registry, resolve_tags, REGISTRY_ENV,
};
pub use normalize::{canonical_tag, normalize_tag, normalize_tags};
pub use resolve::{MatchSource, ResolveQuery, Resolution};
pub use scan::{scan_directory, ScanOptions, ScannedFile};
pub use taxonomy::{
    default_category_for_path, CategoryProfile, Registry, EXTENSION_CATEGORIES, UNCATEGORIZED,
};
