//! Category Profile
//!
//! Immutable descriptor of one evidence category.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::normalize::canonical_tag;

/// Priority assigned when a profile does not declare one
pub const DEFAULT_PRIORITY: i32 = 100;

/// Runtime category profile
///
/// Built from the static table or from an external section map. Spelling
/// variants are kept as authored; [`CategoryProfile::all_keywords`] yields
/// their normalized forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProfile {
    /// Canonical identifier, unique within a registry
    pub slug: String,
    /// Display name
    pub label: String,
    /// Synonyms identifying the subject matter (no hashtag forms)
    pub tags: BTreeSet<String>,
    /// Hashtag forms and punctuation variants
    pub aliases: BTreeSet<String>,
    /// Section the category is filed under by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_section: Option<String>,
    /// Secondary sections, never containing `primary_section`
    pub related_sections: BTreeSet<String>,
    /// Tie-break order for keyword matching, higher wins
    pub priority: i32,
}

impl CategoryProfile {
    /// Create an empty profile for `slug`
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            tags: BTreeSet::new(),
            aliases: BTreeSet::new(),
            primary_section: None,
            related_sections: BTreeSet::new(),
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_primary_section(mut self, section: impl Into<String>) -> Self {
        self.primary_section = Some(section.into());
        self.enforce_section_invariant();
        self
    }

    pub fn with_related_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_sections
            .extend(sections.into_iter().map(Into::into));
        self.enforce_section_invariant();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// `{slug} ∪ tags ∪ aliases`, each normalized, empties dropped
    pub fn all_keywords(&self) -> BTreeSet<String> {
        std::iter::once(self.slug.as_str())
            .chain(self.tags.iter().map(String::as_str))
            .chain(self.aliases.iter().map(String::as_str))
            .map(canonical_tag)
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Normalized tag tokens in sorted order, duplicates folded
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for tag in &self.tags {
            crate::normalize::push_unique(&mut tokens, canonical_tag(tag.as_str()));
        }
        tokens
    }

    /// Related sections as an ordered list
    pub fn related_section_list(&self) -> Vec<String> {
        self.related_sections.iter().cloned().collect()
    }

    /// Drop the primary section from the related set
    pub(crate) fn enforce_section_invariant(&mut self) {
        if let Some(primary) = &self.primary_section {
            self.related_sections.remove(primary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryProfile {
        CategoryProfile::new("field_notes", "Field Notes")
            .with_tags(["field notes", "surveillance", "field-notes"])
            .with_aliases(["#fieldnotes", "#Surveillance"])
            .with_primary_section("field_activity")
            .with_related_sections(["field_activity", "case_summary"])
    }

    #[test]
    fn test_all_keywords_normalized() {
        let keywords = sample().all_keywords();
        let expected: BTreeSet<String> = ["field_notes", "surveillance", "fieldnotes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_primary_never_in_related() {
        let profile = sample();
        assert_eq!(profile.primary_section.as_deref(), Some("field_activity"));
        assert!(!profile.related_sections.contains("field_activity"));
        assert_eq!(profile.related_section_list(), vec!["case_summary"]);

        // Setting the primary after the related sections still removes it
        let profile = CategoryProfile::new("x", "X")
            .with_related_sections(["a", "b"])
            .with_primary_section("b");
        assert_eq!(profile.related_section_list(), vec!["a"]);
    }

    #[test]
    fn test_normalized_tags_folds_variants() {
        assert_eq!(
            sample().normalized_tags(),
            vec!["field_notes", "surveillance"]
        );
    }
}
