//! Extension fallback table
//!
//! Last-resort mapping from a file extension to a default category. Only
//! consulted when neither the declared category nor any tag matched.

use std::path::Path;

/// Lower-cased extension (with the dot) to default category slug
pub const EXTENSION_CATEGORIES: &[(&str, &str)] = &[
    (".jpg", "media_photo"),
    (".jpeg", "media_photo"),
    (".png", "media_photo"),
    (".gif", "media_photo"),
    (".heic", "media_photo"),
    (".tif", "media_photo"),
    (".tiff", "media_photo"),
    (".webp", "media_photo"),
    (".mp4", "media_video"),
    (".mov", "media_video"),
    (".avi", "media_video"),
    (".mkv", "media_video"),
    (".webm", "media_video"),
    (".mp3", "media_audio"),
    (".wav", "media_audio"),
    (".m4a", "media_audio"),
    (".ogg", "media_audio"),
    (".flac", "media_audio"),
    (".gpx", "geospatial"),
    (".kml", "geospatial"),
    (".kmz", "geospatial"),
    (".geojson", "geospatial"),
    (".shp", "geospatial"),
    (".csv", "data_report"),
    (".xls", "data_report"),
    (".xlsx", "data_report"),
    (".parquet", "data_report"),
    (".eml", "communications"),
    (".msg", "communications"),
    (".mbox", "communications"),
];

/// Lower-cased extension of `path` including the leading dot
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Default category slug for a file path, if its extension is known
pub fn default_category_for_path(path: &Path) -> Option<&'static str> {
    let ext = extension_of(path)?;
    EXTENSION_CATEGORIES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, slug)| *slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::builtin::BUILTIN_PROFILES;

    #[test]
    fn test_default_category_for_path() {
        assert_eq!(
            default_category_for_path(Path::new("evidence.jpg")),
            Some("media_photo")
        );
        assert_eq!(
            default_category_for_path(Path::new("dir/CLIP.MOV")),
            Some("media_video")
        );
        assert_eq!(
            default_category_for_path(Path::new("track.gpx")),
            Some("geospatial")
        );
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(default_category_for_path(Path::new("notes.pdf")), None);
        assert_eq!(default_category_for_path(Path::new("README")), None);
        assert_eq!(default_category_for_path(Path::new(".hidden")), None);
    }

    #[test]
    fn test_every_extension_targets_builtin() {
        for (ext, slug) in EXTENSION_CATEGORIES {
            assert!(ext.starts_with('.'));
            assert_eq!(*ext, ext.to_lowercase());
            assert!(
                BUILTIN_PROFILES.iter().any(|b| b.slug == *slug),
                "{} maps to unknown {}",
                ext,
                slug
            );
        }
    }
}
