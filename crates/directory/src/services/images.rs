//! Headshot URLs from the Cloudinary image store.
//!
//! URLs are built locally from the cloud name and public ID; nothing here
//! talks to Cloudinary.

use url::Url;

use crate::config::ImageStoreConfig;

/// Image shown for employees without a headshot.
pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.svg";

const DELIVERY_ORIGIN: &str = "https://res.cloudinary.com/";

/// Resolves photo IDs to delivery URLs.
#[derive(Debug, Clone)]
pub struct ImageStore {
    cloud_name: String,
    folder: String,
}

impl ImageStore {
    #[must_use]
    pub fn new(config: &ImageStoreConfig) -> Self {
        Self {
            cloud_name: config.cloud_name.clone(),
            folder: config.folder.clone(),
        }
    }

    /// URL for a headshot, or the placeholder when there is no photo.
    #[must_use]
    pub fn photo_url(&self, photo_id: Option<&str>) -> String {
        let Some(photo_id) = photo_id.filter(|id| !id.trim().is_empty()) else {
            return PLACEHOLDER_IMAGE.to_owned();
        };

        let Ok(mut url) = Url::parse(DELIVERY_ORIGIN) else {
            return PLACEHOLDER_IMAGE.to_owned();
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                self.cloud_name.as_str(),
                "image",
                "upload",
                self.folder.as_str(),
                photo_id,
            ]);
        }
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ImageStore {
        ImageStore::new(&ImageStoreConfig {
            cloud_name: "jcpao".to_string(),
            folder: "JCPAO_headshots".to_string(),
        })
    }

    #[test]
    fn test_photo_url() {
        assert_eq!(
            store().photo_url(Some("adams_alice")),
            "https://res.cloudinary.com/jcpao/image/upload/JCPAO_headshots/adams_alice"
        );
    }

    #[test]
    fn test_photo_url_encodes_segments() {
        assert_eq!(
            store().photo_url(Some("pat obrien")),
            "https://res.cloudinary.com/jcpao/image/upload/JCPAO_headshots/pat%20obrien"
        );
    }

    #[test]
    fn test_missing_photo_uses_placeholder() {
        assert_eq!(store().photo_url(None), PLACEHOLDER_IMAGE);
        assert_eq!(store().photo_url(Some("  ")), PLACEHOLDER_IMAGE);
    }
}
