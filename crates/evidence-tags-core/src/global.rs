//! Process-wide registry
//!
//! Built at most once, on first use, and never mutated afterwards. Hosts
//! that need a custom registry install it before anything reads it.

use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::error::{Result, TaxonomyError};
use crate::resolve::{ResolveQuery, Resolution};
use crate::taxonomy::Registry;

/// Env var naming the external section map used for the default registry
pub const REGISTRY_ENV: &str = "EVIDENCE_TAGS_REGISTRY";

static REGISTRY: OnceCell<Registry> = OnceCell::new();

/// The shared registry, building it from [`REGISTRY_ENV`] on first use
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let source = env::var_os(REGISTRY_ENV).map(PathBuf::from);
        build_logged(source.as_deref())
    })
}

/// Install `registry` as the shared registry
///
/// Fails once the shared registry has been installed or read.
pub fn install_registry(registry: Registry) -> Result<&'static Registry> {
    REGISTRY
        .set(registry)
        .map_err(|_| TaxonomyError::RegistryAlreadyInitialized)?;
    REGISTRY
        .get()
        .ok_or(TaxonomyError::RegistryAlreadyInitialized)
}

/// Build a registry from the builtin table and an optional external source
pub fn build_logged(source: Option<&Path>) -> Registry {
    let registry = Registry::load(source);
    let builtin = Registry::builtin().len();
    tracing::info!(
        profiles = registry.len(),
        external = registry.len().saturating_sub(builtin),
        source = ?source,
        "Built evidence tag registry"
    );
    registry
}

/// Resolve against the shared registry
pub fn resolve_tags(query: &ResolveQuery) -> Resolution {
    registry().resolve(query)
}

/// Every matching slug for `tags` in the shared registry
pub fn candidate_categories_from_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    registry().candidates(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests share one process-wide cell, so only read-side behavior that
    // holds for any installed registry is asserted here.

    #[test]
    fn test_registry_is_cached() {
        let a = registry() as *const Registry;
        let b = registry() as *const Registry;
        assert_eq!(a, b);
    }

    #[test]
    fn test_install_after_use_fails() {
        let _ = registry();
        assert!(matches!(
            install_registry(Registry::default()),
            Err(TaxonomyError::RegistryAlreadyInitialized)
        ));
    }

    #[test]
    fn test_shared_resolution() {
        let res = resolve_tags(&ResolveQuery::new().category("billing"));
        assert_eq!(res.category.as_deref(), Some("billing"));
        assert!(candidate_categories_from_tags(Vec::<String>::new()).is_empty());
    }
}
