//! Portfolio image records and their write DTOs.

use serde::{Deserialize, Serialize};

use crate::category::{to_ui_category, StorageCategory, UiCategory};
use crate::error::CoreError;
use crate::types::{ImageId, Timestamp};

/// Maximum length of an image title.
pub const MAX_TITLE_LEN: usize = 200;

/// A portfolio record as persisted by the backing store.
///
/// `category` holds the raw stored value, which may not be a known
/// [`StorageCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImage {
    pub id: ImageId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub created_at: Timestamp,
}

/// The gallery-facing projection of a [`StoredImage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioImage {
    pub id: ImageId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: UiCategory,
    pub created_at: Timestamp,
}

impl From<StoredImage> for PortfolioImage {
    fn from(stored: StoredImage) -> Self {
        let category = to_ui_category(&stored.category);
        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            image_url: stored.image_url,
            category,
            created_at: stored.created_at,
        }
    }
}

/// DTO for creating a portfolio image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPortfolioImage {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: StorageCategory,
}

impl NewPortfolioImage {
    /// Check field constraints before the record is sent to the store.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_image_url(&self.image_url)
    }
}

/// DTO for editing a portfolio image. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioImagePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<StorageCategory>,
}

impl PortfolioImagePatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(url) = &self.image_url {
            validate_image_url(url)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
    }
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation("Image URL must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn stored(category: &str) -> StoredImage {
        StoredImage {
            id: "img-1".into(),
            title: "Canapés".into(),
            description: None,
            image_url: "/images/canapes.jpg".into(),
            category: category.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn projection_translates_category() {
        let image = PortfolioImage::from(stored("snack-box"));
        assert_eq!(image.category, UiCategory::Buffet);
        assert_eq!(image.id, "img-1");
    }

    #[test]
    fn projection_falls_back_on_unknown_category() {
        let image = PortfolioImage::from(stored("brunch"));
        assert_eq!(image.category, UiCategory::SpecialDishes);
    }

    #[test]
    fn new_image_requires_title() {
        let input = NewPortfolioImage {
            title: "   ".into(),
            description: None,
            image_url: "/images/a.jpg".into(),
            category: StorageCategory::Buffet,
        };
        assert_matches!(input.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn new_image_requires_url() {
        let input = NewPortfolioImage {
            title: "Buffet table".into(),
            description: None,
            image_url: String::new(),
            category: StorageCategory::Buffet,
        };
        assert_matches!(input.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn patch_validates_only_supplied_fields() {
        let patch = PortfolioImagePatch {
            description: Some("Updated".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        assert!(!patch.is_empty());

        let bad = PortfolioImagePatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_matches!(bad.validate(), Err(CoreError::Validation(_)));
        assert!(PortfolioImagePatch::default().is_empty());
    }
}
