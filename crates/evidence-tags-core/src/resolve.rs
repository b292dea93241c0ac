//! Category Resolution
//!
//! Turns a partial, possibly ambiguous description of an item (declared
//! category, free-form tags, file path) into one category plus its tag and
//! section projection.
//!
//! Precedence, first match wins:
//!
//! 1. declared category is a registry slug
//! 2. declared category is a keyword of some profile
//! 3. a tag is a keyword of some profile
//! 4. the file extension has a default category
//!
//! Steps 2 and 3 walk the registry by descending priority.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::normalize::{canonical_tag, normalize_tag, normalize_tags, push_unique};
use crate::taxonomy::{default_category_for_path, CategoryProfile, Registry, UNCATEGORIZED};

/// Input to [`Registry::resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveQuery {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub file_path: Option<PathBuf>,
}

impl ResolveQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}

/// Which precedence step produced the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Slug,
    CategoryKeyword,
    Tag,
    Extension,
}

/// Outcome of a resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Matched slug, or the normalized declared category when nothing matched
    pub category: Option<String>,
    /// Normalized input tags followed by the matched profile's tags
    pub tags: Vec<String>,
    pub primary_section: Option<String>,
    pub related_sections: Vec<String>,
    /// `None` when no profile matched
    pub matched_by: Option<MatchSource>,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        self.matched_by.is_some()
    }
}

impl Registry {
    /// Resolve a query against this registry. Never fails.
    pub fn resolve(&self, query: &ResolveQuery) -> Resolution {
        let declared = normalize_tag(query.category.as_deref());
        let tokens = normalize_tags(&query.tags);

        let Some((profile, source)) =
            self.find_profile(&declared, &tokens, query.file_path.as_deref())
        else {
            return Resolution {
                category: (!declared.is_empty()).then_some(declared),
                tags: tokens,
                ..Resolution::default()
            };
        };

        let mut tags = tokens;
        for tag in profile.normalized_tags() {
            push_unique(&mut tags, tag);
        }

        Resolution {
            category: Some(profile.slug.clone()),
            tags,
            primary_section: profile.primary_section.clone(),
            related_sections: profile.related_section_list(),
            matched_by: Some(source),
        }
    }

    /// Every slug whose keywords intersect `tags`, in match order
    ///
    /// No tags gives an empty list; tags that match nothing give
    /// `["uncategorized"]`.
    pub fn candidates<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = normalize_tags(tags);
        if tokens.is_empty() {
            return Vec::new();
        }

        let matched: Vec<String> = self
            .ranked()
            .filter(|(_, keywords)| tokens.iter().any(|t| keywords.contains(t)))
            .map(|(profile, _)| profile.slug.clone())
            .collect();

        if matched.is_empty() {
            vec![UNCATEGORIZED.to_string()]
        } else {
            matched
        }
    }

    fn find_profile(
        &self,
        declared: &str,
        tokens: &[String],
        file_path: Option<&Path>,
    ) -> Option<(&CategoryProfile, MatchSource)> {
        if !declared.is_empty() {
            if let Some(profile) = self.get(declared) {
                return Some((profile, MatchSource::Slug));
            }

            let keyword = canonical_tag(declared);
            if let Some((profile, _)) = self.ranked().find(|(_, kw)| kw.contains(&keyword)) {
                return Some((profile, MatchSource::CategoryKeyword));
            }
        }

        if let Some((profile, _)) = self
            .ranked()
            .find(|(_, kw)| tokens.iter().any(|t| kw.contains(t)))
        {
            return Some((profile, MatchSource::Tag));
        }

        file_path
            .and_then(default_category_for_path)
            .and_then(|slug| self.get(slug))
            .map(|profile| (profile, MatchSource::Extension))
    }
}
