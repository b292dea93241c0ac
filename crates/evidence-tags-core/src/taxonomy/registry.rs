//! Taxonomy Registry
//!
//! Frozen slug -> profile table. Built from the builtin table and, when
//! present, profiles derived from an external section map.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::builtin::builtin_profiles;
use super::loader::{load_section_map, profiles_from_section_map, SectionMap};
use super::profile::CategoryProfile;

/// Immutable category registry
///
/// Profiles keep insertion order (builtin table first, then slugs that only
/// an external source introduced). Keyword matching walks them by descending
/// priority, falling back to insertion order on ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    profiles: Vec<CategoryProfile>,
    keywords: Vec<BTreeSet<String>>,
    index: HashMap<String, usize>,
    ranked: Vec<usize>,
}

impl Registry {
    /// Registry holding only the builtin profiles
    pub fn builtin() -> Self {
        Self::from_profiles(builtin_profiles())
    }

    /// Two-phase construction: builtin table, then an optional external source
    pub fn load(source: Option<&Path>) -> Self {
        let registry = Self::builtin();
        match source {
            Some(path) => registry.with_section_map(&load_section_map(path)),
            None => registry,
        }
    }

    /// Build a registry; a repeated slug is merged into its first occurrence
    pub fn from_profiles<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = CategoryProfile>,
    {
        let mut merged: Vec<CategoryProfile> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for profile in profiles {
            match index.get(&profile.slug).copied() {
                Some(i) => merged[i] = merge_profiles(&merged[i], &profile),
                None => {
                    index.insert(profile.slug.clone(), merged.len());
                    merged.push(profile);
                }
            }
        }

        Self::freeze(merged, index)
    }

    /// Merge profiles derived from an external section map into this registry
    pub fn with_section_map(self, sections: &SectionMap) -> Self {
        if sections.is_empty() {
            return self;
        }
        let external = Self::from_profiles(profiles_from_section_map(sections));
        self.merge(&external)
    }

    /// Combine two registries keyed by slug
    ///
    /// Slugs present in both are merged with `self` as the base; slugs only
    /// present in `other` are appended in `other`'s order.
    pub fn merge(&self, other: &Registry) -> Registry {
        let mut profiles = self.profiles.clone();
        let mut appended = Vec::new();

        for profile in &other.profiles {
            match self.index.get(&profile.slug) {
                Some(&i) => profiles[i] = merge_profiles(&profiles[i], profile),
                None => appended.push(profile.clone()),
            }
        }

        profiles.extend(appended);
        Self::from_profiles(profiles)
    }

    /// Override priorities for the given slugs; unknown slugs are ignored
    pub fn with_priorities(self, priorities: &HashMap<String, i32>) -> Self {
        if priorities.is_empty() {
            return self;
        }

        let profiles = self.profiles.into_iter().map(|profile| {
            match priorities.get(&profile.slug) {
                Some(&priority) => profile.with_priority(priority),
                None => profile,
            }
        });
        Self::from_profiles(profiles)
    }

    /// Profile by exact slug
    pub fn get(&self, slug: &str) -> Option<&CategoryProfile> {
        self.index.get(slug).map(|&i| &self.profiles[i])
    }

    /// All profiles in insertion order
    pub fn profiles(&self) -> &[CategoryProfile] {
        &self.profiles
    }

    /// Slugs in insertion order
    pub fn slugs(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles paired with their normalized keywords, in match order
    pub fn ranked(&self) -> impl Iterator<Item = (&CategoryProfile, &BTreeSet<String>)> {
        self.ranked
            .iter()
            .map(move |&i| (&self.profiles[i], &self.keywords[i]))
    }

    /// Normalized keywords of a profile
    pub fn keywords(&self, slug: &str) -> Option<&BTreeSet<String>> {
        self.index.get(slug).map(|&i| &self.keywords[i])
    }

    /// SHA-256 over the registry content, independent of insertion order
    pub fn fingerprint(&self) -> String {
        let mut order: Vec<usize> = (0..self.profiles.len()).collect();
        order.sort_by(|&a, &b| self.profiles[a].slug.cmp(&self.profiles[b].slug));

        let mut hasher = Sha256::new();
        for i in order {
            let profile = &self.profiles[i];
            hasher.update(profile.slug.as_bytes());
            hasher.update([0u8]);
            for keyword in &self.keywords[i] {
                hasher.update(keyword.as_bytes());
                hasher.update([0u8]);
            }
            hasher.update([1u8]);
            if let Some(primary) = &profile.primary_section {
                hasher.update(primary.as_bytes());
            }
            hasher.update([1u8]);
            for section in &profile.related_sections {
                hasher.update(section.as_bytes());
                hasher.update([0u8]);
            }
            hasher.update(profile.priority.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }

    fn freeze(mut profiles: Vec<CategoryProfile>, index: HashMap<String, usize>) -> Self {
        // Profiles built as struct literals bypass the builder
        for profile in &mut profiles {
            profile.enforce_section_invariant();
        }

        let keywords = profiles.iter().map(CategoryProfile::all_keywords).collect();

        // Stable sort keeps insertion order among equal priorities
        let mut ranked: Vec<usize> = (0..profiles.len()).collect();
        ranked.sort_by(|&a, &b| profiles[b].priority.cmp(&profiles[a].priority));

        Self {
            profiles,
            keywords,
            index,
            ranked,
        }
    }
}

/// Merge `overlay` into `base` (same slug)
///
/// Tags, aliases and related sections are unioned. The base keeps its label,
/// priority and primary section; the overlay's primary is only used when the
/// base has none.
pub fn merge_profiles(base: &CategoryProfile, overlay: &CategoryProfile) -> CategoryProfile {
    let label = if base.label.is_empty() {
        overlay.label.clone()
    } else {
        base.label.clone()
    };

    let primary_section = base
        .primary_section
        .clone()
        .or_else(|| overlay.primary_section.clone());

    let mut related_sections: BTreeSet<String> = base
        .related_sections
        .union(&overlay.related_sections)
        .cloned()
        .collect();
    if let Some(primary) = &primary_section {
        related_sections.remove(primary);
    }

    CategoryProfile {
        slug: base.slug.clone(),
        label,
        tags: base.tags.union(&overlay.tags).cloned().collect(),
        aliases: base.aliases.union(&overlay.aliases).cloned().collect(),
        primary_section,
        related_sections,
        priority: base.priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::builtin::UNCATEGORIZED;

    fn external() -> SectionMap {
        vec![
            (
                "exhibits".to_string(),
                vec!["Billing".to_string(), "Supporting Documents".to_string()],
            ),
            ("financials".to_string(), vec!["billing".to_string()]),
            ("appendix".to_string(), vec!["supporting-documents".to_string()]),
        ]
    }

    #[test]
    fn test_builtin_registry() {
        let registry = Registry::builtin();
        assert!(registry.get("billing").is_some());
        assert!(registry.get("media_photo").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.slugs().first(), Some(&"intake_form"));
    }

    #[test]
    fn test_merge_with_self_is_identity() {
        let registry = Registry::builtin().with_section_map(&external());
        assert_eq!(registry.merge(&registry), registry);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let registry = Registry::builtin();
        assert_eq!(registry.merge(&Registry::default()), registry);
        assert_eq!(Registry::default().merge(&registry), registry);
        assert_eq!(registry.clone().with_section_map(&Vec::new()), registry);
    }

    #[test]
    fn test_merge_overlapping_slug() {
        let registry = Registry::builtin().with_section_map(&external());
        let billing = registry.get("billing").unwrap();

        // Builtin primary wins; only related sets are unioned, so the
        // external primary ("exhibits") is not carried over
        assert_eq!(billing.primary_section.as_deref(), Some("financials"));
        assert_eq!(billing.related_section_list(), vec!["agreements"]);

        // Tags are unioned
        assert!(billing.tags.contains("invoice"));
        assert!(billing.tags.contains("billing"));
        assert_eq!(billing.label, "Billing");
    }

    #[test]
    fn test_external_only_slug_appended() {
        let registry = Registry::builtin().with_section_map(&external());
        let builtin_len = Registry::builtin().len();
        assert_eq!(registry.len(), builtin_len + 1);
        assert_eq!(registry.slugs().last(), Some(&"supporting_documents"));

        let docs = registry.get("supporting_documents").unwrap();
        assert_eq!(docs.primary_section.as_deref(), Some("exhibits"));
        assert_eq!(docs.related_section_list(), vec!["appendix"]);
        assert!(registry
            .keywords("supporting_documents")
            .unwrap()
            .contains("supporting-documents"));
    }

    #[test]
    fn test_primary_falls_back_to_overlay() {
        let base = CategoryProfile::new("x", "X").with_related_sections(["a"]);
        let overlay = CategoryProfile::new("x", "")
            .with_related_sections(["b"])
            .with_primary_section("a");
        let merged = merge_profiles(&base, &overlay);
        assert_eq!(merged.primary_section.as_deref(), Some("a"));
        assert_eq!(merged.related_section_list(), vec!["b"]);
        assert_eq!(merged.label, "X");
    }

    #[test]
    fn test_literal_profile_primary_removed_from_related() {
        let mut literal = CategoryProfile::new("x", "X").with_tags(["x"]);
        literal.primary_section = Some("a".to_string());
        literal.related_sections = ["a".to_string(), "b".to_string()].into();

        let registry = Registry::from_profiles([literal]);
        let x = registry.get("x").unwrap();
        assert_eq!(x.primary_section.as_deref(), Some("a"));
        assert_eq!(x.related_section_list(), vec!["b"]);

        let res = registry.resolve(&crate::ResolveQuery::new().category("x"));
        assert_eq!(res.primary_section.as_deref(), Some("a"));
        assert_eq!(res.related_sections, vec!["b"]);
    }

    #[test]
    fn test_duplicate_slugs_in_from_profiles_merge() {
        let registry = Registry::from_profiles([
            CategoryProfile::new("x", "X").with_tags(["one"]),
            CategoryProfile::new("x", "Other").with_tags(["two"]),
        ]);
        assert_eq!(registry.len(), 1);
        let x = registry.get("x").unwrap();
        assert_eq!(x.label, "X");
        assert_eq!(x.tags.len(), 2);
    }

    #[test]
    fn test_ranked_orders_by_priority_then_insertion() {
        let registry = Registry::builtin();
        let ranked: Vec<_> = registry.ranked().map(|(p, _)| p.slug.as_str()).collect();
        assert_eq!(ranked.last(), Some(&UNCATEGORIZED));
        assert_eq!(ranked.first(), Some(&"intake_form"));

        let priorities: HashMap<String, i32> = [("media_video".to_string(), 500)].into();
        let registry = registry.with_priorities(&priorities);
        let first = registry.ranked().next().map(|(p, _)| p.slug.clone());
        assert_eq!(first.as_deref(), Some("media_video"));
        // Insertion order is untouched by priorities
        assert_eq!(registry.slugs().first(), Some(&"intake_form"));
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let a = Registry::builtin();
        let b = Registry::builtin();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let c = Registry::builtin().with_section_map(&external());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_load_without_source_is_builtin() {
        assert_eq!(Registry::load(None), Registry::builtin());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("sections.json");
        assert_eq!(Registry::load(Some(&missing)), Registry::builtin());
    }
}
