//! Image naming for uploads and URL resolution for display.

use std::path::Path;

use crate::constants::{DEFAULT_COVER_IMAGE, DEFAULT_PROFILE_IMAGE, REVIEW_IMAGE_DIR};
use crate::error::ValidationError;
use crate::types::PhotoKind;

/// Lower-cased extension of a picked image, without the dot.
pub fn image_extension(path: &Path) -> Result<String, ValidationError> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ValidationError::MissingImageExtension(path.display().to_string()))
}

/// MIME type inferred from the extension alone.
pub fn mime_for_extension(ext: &str) -> String {
    match ext {
        "jpg" => "image/jpeg".to_string(),
        other => format!("image/{other}"),
    }
}

/// Part name for a review photo.
pub fn review_photo_name(ext: &str) -> String {
    format!("photo.{ext}")
}

/// `{username}_{profile|cover}_{millis}.{ext}`, unique per user and moment.
pub fn profile_photo_name(username: &str, kind: PhotoKind, unix_millis: i64, ext: &str) -> String {
    format!("{username}_{}_{unix_millis}.{ext}", kind.as_str())
}

/// Post photos keep the picked file's own name.
pub fn original_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("post.jpg")
        .to_string()
}

/// Absolute URL for a server-relative path such as `uploads/x.jpg`.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Review photos listed on "my reviews" live under their own directory.
pub fn review_image_url(base_url: &str, image_path: &str) -> String {
    resolve_url(
        base_url,
        &format!("{REVIEW_IMAGE_DIR}/{}", image_path.trim_start_matches('/')),
    )
}

/// Where a profile or cover image is displayed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Bundled(&'static str),
}

pub fn photo_source(base_url: &str, kind: PhotoKind, path: Option<&str>) -> ImageSource {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => ImageSource::Remote(resolve_url(base_url, p)),
        None => ImageSource::Bundled(match kind {
            PhotoKind::Profile => DEFAULT_PROFILE_IMAGE,
            PhotoKind::Cover => DEFAULT_COVER_IMAGE,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(image_extension(Path::new("/tmp/IMG_001.JPG")).unwrap(), "jpg");
        assert!(image_extension(Path::new("/tmp/noext")).is_err());
    }

    #[test]
    fn test_mime_inference() {
        assert_eq!(mime_for_extension("jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("png"), "image/png");
        assert_eq!(mime_for_extension("jpeg"), "image/jpeg");
    }

    #[test]
    fn test_profile_photo_name() {
        assert_eq!(
            profile_photo_name("ana", PhotoKind::Cover, 1719000000000, "png"),
            "ana_cover_1719000000000.png"
        );
    }

    #[test]
    fn test_resolve_url_joins_once() {
        assert_eq!(
            resolve_url("http://h/NasugView/", "/uploads/a.jpg"),
            "http://h/NasugView/uploads/a.jpg"
        );
        assert_eq!(
            review_image_url("http://h/NasugView", "r1.jpg"),
            "http://h/NasugView/reviews/r1.jpg"
        );
    }

    #[test]
    fn test_photo_source_fallbacks() {
        assert_eq!(
            photo_source("http://h", PhotoKind::Profile, None),
            ImageSource::Bundled(DEFAULT_PROFILE_IMAGE)
        );
        assert_eq!(
            photo_source("http://h", PhotoKind::Cover, Some("")),
            ImageSource::Bundled(DEFAULT_COVER_IMAGE)
        );
        assert_eq!(
            photo_source("http://h", PhotoKind::Profile, Some("p/ana.png")),
            ImageSource::Remote("http://h/p/ana.png".into())
        );
    }
}
