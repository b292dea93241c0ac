//! Tag Normalization
//!
//! Free-form tags (`#Field-Notes`, `field notes`, `FIELD_NOTES`) are folded
//! into one token (`field_notes`) before any lookup happens. Two tags are
//! equivalent iff their tokens are equal.

/// Known alternate spellings folded onto a single token after normalization.
pub const TAG_REMAPS: &[(&str, &str)] = &[
    ("supporting_documents", "supporting-documents"),
    ("supporting_docs", "supporting-documents"),
    ("bg_check", "background_check"),
    ("comms", "communications"),
    ("photos", "photo"),
    ("videos", "video"),
];

/// Normalize a single tag into its token form.
///
/// Lower-cases, strips leading `#`, turns whitespace and hyphens into
/// underscores, collapses runs of underscores and trims them from both ends.
/// `None` and empty input yield `""`.
///
/// ```
/// use evidence_tags_core::normalize_tag;
///
/// assert_eq!(normalize_tag("#Field-Notes "), "field_notes");
/// assert_eq!(normalize_tag(None), "");
/// ```
pub fn normalize_tag<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(value) = value.into() else {
        return String::new();
    };

    let lowered: String = value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect();

    let collapsed = lowered
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    // Stripping '#' can expose another underscore, so trim both together
    collapsed
        .trim_start_matches(['#', '_'])
        .to_string()
}

/// Normalize a tag and fold it through [`TAG_REMAPS`].
pub fn canonical_tag<'a>(value: impl Into<Option<&'a str>>) -> String {
    let token = normalize_tag(value);
    match TAG_REMAPS.iter().find(|(from, _)| *from == token) {
        Some((_, to)) => (*to).to_string(),
        None => token,
    }
}

/// Normalize a list of tags into an ordered, duplicate-free token list.
///
/// Empty tokens are dropped and first-seen order is preserved.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens: Vec<String> = Vec::new();
    for tag in tags {
        push_unique(&mut tokens, canonical_tag(tag.as_ref()));
    }
    tokens
}

/// Append `token` unless it is empty or already present.
pub(crate) fn push_unique(tokens: &mut Vec<String>, token: String) {
    if !token.is_empty() && !tokens.contains(&token) {
        tokens.push(token);
    }
}

/// Turn a raw tag into a display label (`field-notes` -> `Field Notes`).
pub fn humanize(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('#')
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
