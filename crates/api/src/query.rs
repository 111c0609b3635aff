//! Query parameter types shared by gallery handlers.

use catering_core::category::UiCategory;
use catering_core::error::CoreError;
use serde::Deserialize;

/// Gallery listing parameters (`?category=&page=&page_size=`).
///
/// `page` and `page_size` default in `PageRequest::from_params`.
#[derive(Debug, Deserialize)]
pub struct GalleryParams {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Optional category filter (`?category=`).
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

/// Parse an optional category slug. An absent or blank value means "all".
pub fn parse_category(raw: Option<&str>) -> Result<Option<UiCategory>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(slug) => slug.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_and_all_mean_unfiltered() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(parse_category(Some("  ")).unwrap(), None);
        assert_eq!(parse_category(Some("all")).unwrap(), None);
    }

    #[test]
    fn known_slug_parses() {
        assert_eq!(
            parse_category(Some("cocktail")).unwrap(),
            Some(UiCategory::Cocktail)
        );
    }

    #[test]
    fn unknown_slug_is_a_validation_error() {
        assert_matches!(
            parse_category(Some("nonexistent-xyz")),
            Err(CoreError::Validation(_))
        );
    }
}
