//! External Registry Loader
//!
//! Reads a section -> tags mapping (JSON object of string arrays) and turns
//! every distinct tag into a [`CategoryProfile`].
//!
//! ```json
//! {
//!   "field_activity": ["Field Notes", "stakeout"],
//!   "timeline": ["field-notes"]
//! }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, TaxonomyError};
use crate::normalize::{humanize, normalize_tag};

use super::profile::CategoryProfile;

/// Sections in document order, each with its raw tag strings
pub type SectionMap = Vec<(String, Vec<String>)>;

/// Parse a section map, rejecting any shape other than `{section: [tag, ...]}`
pub fn parse_section_map(text: &str) -> Result<SectionMap> {
    sections_from_value(serde_json::from_str(text)?, true)
}

/// Load a section map from disk
///
/// A missing, unreadable or non-object source yields an empty map. Sections
/// that are not lists and tags that are not strings are skipped; the rest
/// of the source is kept. Failures are only logged.
pub fn load_section_map(path: &Path) -> SectionMap {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Ignoring registry source {}: {}", path.display(), e);
            return SectionMap::new();
        }
    };

    let parsed = serde_json::from_str(&text)
        .map_err(TaxonomyError::from)
        .and_then(|value| sections_from_value(value, false));

    match parsed {
        Ok(sections) => sections,
        Err(e) => {
            tracing::debug!("Ignoring malformed registry source {}: {}", path.display(), e);
            SectionMap::new()
        }
    }
}

/// Walk `{section: [tag, ...]}`; `strict` turns bad entries into errors
fn sections_from_value(value: Value, strict: bool) -> Result<SectionMap> {
    let Value::Object(object) = value else {
        return Err(TaxonomyError::InvalidRegistryShape {
            message: "top level must be an object of section -> tag list".to_string(),
        });
    };

    let mut sections = Vec::with_capacity(object.len());
    for (section, tags) in object {
        let Value::Array(items) = tags else {
            let message = format!("section '{}' must map to a list of tags", section);
            if strict {
                return Err(TaxonomyError::InvalidRegistryShape { message });
            }
            tracing::debug!("Skipping registry entry: {}", message);
            continue;
        };

        let mut raw_tags = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(tag) => raw_tags.push(tag),
                other => {
                    let message =
                        format!("section '{}' contains a non-string tag: {}", section, other);
                    if strict {
                        return Err(TaxonomyError::InvalidRegistryShape { message });
                    }
                    tracing::debug!("Skipping registry entry: {}", message);
                }
            }
        }
        sections.push((section, raw_tags));
    }

    Ok(sections)
}

#[derive(Debug)]
struct Accumulated {
    slug: String,
    label: String,
    variants: BTreeSet<String>,
    primary_section: String,
    sections: BTreeSet<String>,
}

/// Convert a section map into one profile per distinct tag slug
///
/// Profiles come out in first-seen order. The first section a tag appears
/// under becomes its primary section; every other section is related.
pub fn profiles_from_section_map(sections: &SectionMap) -> Vec<CategoryProfile> {
    let mut accumulated: Vec<Accumulated> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (section, tags) in sections {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        for raw in tags {
            let slug = normalize_tag(raw.as_str());
            if slug.is_empty() {
                continue;
            }

            let position = match index.get(&slug).copied() {
                Some(i) => i,
                None => {
                    index.insert(slug.clone(), accumulated.len());
                    accumulated.push(Accumulated {
                        slug: slug.clone(),
                        label: humanize(raw),
                        variants: BTreeSet::new(),
                        primary_section: section.to_string(),
                        sections: BTreeSet::new(),
                    });
                    accumulated.len() - 1
                }
            };

            let entry = &mut accumulated[position];
            entry.variants.extend(spelling_variants(raw, &slug));
            entry.sections.insert(section.to_string());
        }
    }

    accumulated
        .into_iter()
        .map(|acc| {
            let aliases: Vec<String> = acc
                .variants
                .iter()
                .flat_map(|v| [v.clone(), format!("#{}", v)])
                .collect();

            CategoryProfile::new(acc.slug, acc.label)
                .with_tags(acc.variants)
                .with_aliases(aliases)
                .with_related_sections(acc.sections)
                .with_primary_section(acc.primary_section)
        })
        .collect()
}

/// Underscore and hyphen spellings of `raw`, plus its slug
fn spelling_variants(raw: &str, slug: &str) -> Vec<String> {
    let base = raw.trim().trim_start_matches('#').to_lowercase();
    let underscored: String = base
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    let hyphenated: String = base
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect();

    [underscored, hyphenated, slug.to_string()]
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect()
}
