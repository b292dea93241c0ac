//! Builtin Taxonomy
//!
//! Hand-authored evidence categories available without any external registry.

use super::profile::{CategoryProfile, DEFAULT_PRIORITY};

/// Slug of the catch-all category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Builtin category table, in registry order
pub const BUILTIN_PROFILES: &[BuiltinProfile] = &[
    BuiltinProfile {
        slug: "intake_form",
        label: "Intake Form",
        tags: &["intake", "intake form", "questionnaire", "client intake", "onboarding"],
        aliases: &["#intake", "#intakeform", "intake-form"],
        primary_section: Some("case_intake"),
        related_sections: &["case_summary"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "background_check",
        label: "Background Check",
        tags: &["background", "background check", "criminal record", "due diligence", "screening"],
        aliases: &["#background", "#bgcheck", "background-check"],
        primary_section: Some("background"),
        related_sections: &["case_summary", "compliance"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "contract",
        label: "Contract",
        tags: &["contract", "agreement", "retainer", "engagement letter", "nda"],
        aliases: &["#contract", "#agreement", "engagement-letter"],
        primary_section: Some("agreements"),
        related_sections: &["compliance"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "billing",
        label: "Billing",
        tags: &["billing", "invoice", "receipt", "expense", "payment", "timesheet"],
        aliases: &["#billing", "#invoice", "#expenses"],
        primary_section: Some("financials"),
        related_sections: &["agreements"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "field_notes",
        label: "Field Notes",
        tags: &["field notes", "surveillance", "observation", "activity log", "stakeout"],
        aliases: &["#fieldnotes", "#surveillance", "field-notes"],
        primary_section: Some("field_activity"),
        related_sections: &["case_summary", "timeline"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "data_report",
        label: "Data Report",
        tags: &["report", "analytics", "data", "spreadsheet", "statistics", "analysis"],
        aliases: &["#analytics", "#data", "data-report"],
        primary_section: Some("analysis"),
        related_sections: &["case_summary"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "communications",
        label: "Communications",
        tags: &["email", "message", "correspondence", "chat", "sms", "call log", "letter"],
        aliases: &["#email", "#comms", "call-log"],
        primary_section: Some("correspondence"),
        related_sections: &["timeline"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "media_photo",
        label: "Photo",
        tags: &["photo", "image", "picture", "screenshot", "still"],
        aliases: &["#photo", "#image", "#screenshot"],
        primary_section: Some("media_exhibits"),
        related_sections: &["field_activity"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "media_video",
        label: "Video",
        tags: &["video", "footage", "recording", "surveillance", "dashcam", "bodycam"],
        aliases: &["#video", "#footage", "#surveillance"],
        primary_section: Some("media_exhibits"),
        related_sections: &["field_activity", "timeline"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "media_audio",
        label: "Audio",
        tags: &["audio", "voicemail", "voice memo", "interview recording", "wiretap"],
        aliases: &["#audio", "#voicemail", "voice-memo"],
        primary_section: Some("media_exhibits"),
        related_sections: &["correspondence"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "geospatial",
        label: "Geospatial",
        tags: &["gps", "location", "map", "geolocation", "gps track", "coordinates"],
        aliases: &["#gps", "#geo", "#location", "gps-track"],
        primary_section: Some("location_data"),
        related_sections: &["field_activity", "timeline"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: "disclosure",
        label: "Disclosure & Compliance",
        tags: &["disclosure", "compliance", "consent", "privacy notice", "regulatory", "license"],
        aliases: &["#disclosure", "#compliance", "privacy-notice"],
        primary_section: Some("compliance"),
        related_sections: &["agreements"],
        priority: DEFAULT_PRIORITY,
    },
    BuiltinProfile {
        slug: UNCATEGORIZED,
        label: "Uncategorized",
        tags: &["misc", "other", "unsorted"],
        aliases: &["#misc", "#other"],
        primary_section: None,
        related_sections: &[],
        priority: 0,
    },
];

/// Static definition of a builtin category
#[derive(Debug, Clone)]
pub struct BuiltinProfile {
    pub slug: &'static str,
    pub label: &'static str,
    pub tags: &'static [&'static str],
    pub aliases: &'static [&'static str],
    pub primary_section: Option<&'static str>,
    pub related_sections: &'static [&'static str],
    pub priority: i32,
}

impl From<&BuiltinProfile> for CategoryProfile {
    fn from(builtin: &BuiltinProfile) -> Self {
        let profile = CategoryProfile::new(builtin.slug, builtin.label)
            .with_tags(builtin.tags.iter().copied())
            .with_aliases(builtin.aliases.iter().copied())
            .with_related_sections(builtin.related_sections.iter().copied())
            .with_priority(builtin.priority);

        match builtin.primary_section {
            Some(section) => profile.with_primary_section(section),
            None => profile,
        }
    }
}

/// Builtin profiles converted to runtime form
pub fn builtin_profiles() -> Vec<CategoryProfile> {
    BUILTIN_PROFILES.iter().map(CategoryProfile::from).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_profiles_exist() {
        assert!(!BUILTIN_PROFILES.is_empty());
        for slug in [
            "intake_form",
            "background_check",
            "contract",
            "billing",
            "field_notes",
            "data_report",
            "communications",
            "media_photo",
            "media_video",
            "media_audio",
            "geospatial",
            "disclosure",
            UNCATEGORIZED,
        ] {
            assert!(
                BUILTIN_PROFILES.iter().any(|p| p.slug == slug),
                "missing builtin {}",
                slug
            );
        }
    }

    #[test]
    fn test_builtin_slugs_unique_and_normalized() {
        let mut seen = HashSet::new();
        for builtin in BUILTIN_PROFILES {
            assert!(seen.insert(builtin.slug), "duplicate slug {}", builtin.slug);
            assert_eq!(crate::normalize_tag(builtin.slug), builtin.slug);
        }
    }

    #[test]
    fn test_builtin_section_invariant() {
        for profile in builtin_profiles() {
            if let Some(primary) = &profile.primary_section {
                assert!(
                    !profile.related_sections.contains(primary),
                    "{} lists its primary section as related",
                    profile.slug
                );
            }
        }
    }

    #[test]
    fn test_surveillance_shared_keyword() {
        let declaring: Vec<_> = builtin_profiles()
            .into_iter()
            .filter(|p| p.all_keywords().contains("surveillance"))
            .map(|p| p.slug)
            .collect();
        assert_eq!(declaring, vec!["field_notes", "media_video"]);
    }

    #[test]
    fn test_uncategorized_lowest_priority() {
        let profiles = builtin_profiles();
        let uncategorized = profiles.iter().find(|p| p.slug == UNCATEGORIZED).unwrap();
        assert!(profiles
            .iter()
            .all(|p| p.slug == UNCATEGORIZED || p.priority > uncategorized.priority));
    }
}
