//! Portfolio category vocabularies and the translation between them.
//!
//! Records are stored with a fine-grained [`StorageCategory`]; the gallery
//! filters on the coarser [`UiCategory`]. Stored values are plain text and
//! are not type-checked by the database, so the storage-to-UI direction must
//! accept arbitrary strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// UI categories
// ---------------------------------------------------------------------------

/// Category tags exposed to gallery filtering controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiCategory {
    Wedding,
    Corporate,
    FineDining,
    Buffet,
    Cocktail,
    SpecialDishes,
}

/// Category assigned to stored records whose category is not recognised.
pub const FALLBACK_UI_CATEGORY: UiCategory = UiCategory::SpecialDishes;

impl UiCategory {
    /// Every UI category, in display order.
    pub const ALL: [UiCategory; 6] = [
        UiCategory::Wedding,
        UiCategory::Corporate,
        UiCategory::FineDining,
        UiCategory::Buffet,
        UiCategory::Cocktail,
        UiCategory::SpecialDishes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UiCategory::Wedding => "wedding",
            UiCategory::Corporate => "corporate",
            UiCategory::FineDining => "fine-dining",
            UiCategory::Buffet => "buffet",
            UiCategory::Cocktail => "cocktail",
            UiCategory::SpecialDishes => "special-dishes",
        }
    }
}

impl fmt::Display for UiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: {}",
                    UiCategory::ALL.map(UiCategory::as_str).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Storage categories
// ---------------------------------------------------------------------------

/// Category values as persisted in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageCategory {
    Wedding,
    Corporate,
    FineDining,
    Buffet,
    Cocktail,
    CoffeeBreak,
    SnackBox,
    SpecialDishes,
    Signature,
}

impl StorageCategory {
    pub const ALL: [StorageCategory; 9] = [
        StorageCategory::Wedding,
        StorageCategory::Corporate,
        StorageCategory::FineDining,
        StorageCategory::Buffet,
        StorageCategory::Cocktail,
        StorageCategory::CoffeeBreak,
        StorageCategory::SnackBox,
        StorageCategory::SpecialDishes,
        StorageCategory::Signature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageCategory::Wedding => "wedding",
            StorageCategory::Corporate => "corporate",
            StorageCategory::FineDining => "fine-dining",
            StorageCategory::Buffet => "buffet",
            StorageCategory::Cocktail => "cocktail",
            StorageCategory::CoffeeBreak => "coffee-break",
            StorageCategory::SnackBox => "snack-box",
            StorageCategory::SpecialDishes => "special-dishes",
            StorageCategory::Signature => "signature",
        }
    }

    /// The UI category this storage category is displayed under.
    pub fn ui_category(self) -> UiCategory {
        match self {
            StorageCategory::Wedding => UiCategory::Wedding,
            StorageCategory::Corporate | StorageCategory::CoffeeBreak => UiCategory::Corporate,
            StorageCategory::FineDining => UiCategory::FineDining,
            StorageCategory::Buffet | StorageCategory::SnackBox => UiCategory::Buffet,
            StorageCategory::Cocktail => UiCategory::Cocktail,
            StorageCategory::SpecialDishes | StorageCategory::Signature => {
                UiCategory::SpecialDishes
            }
        }
    }
}

impl fmt::Display for StorageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid storage category '{s}'. Must be one of: {}",
                    StorageCategory::ALL.map(StorageCategory::as_str).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

const WEDDING: &[StorageCategory] = &[StorageCategory::Wedding];
const CORPORATE: &[StorageCategory] = &[StorageCategory::Corporate, StorageCategory::CoffeeBreak];
const FINE_DINING: &[StorageCategory] = &[StorageCategory::FineDining];
const BUFFET: &[StorageCategory] = &[StorageCategory::Buffet, StorageCategory::SnackBox];
const COCKTAIL: &[StorageCategory] = &[StorageCategory::Cocktail];
const SPECIAL_DISHES: &[StorageCategory] =
    &[StorageCategory::SpecialDishes, StorageCategory::Signature];

/// Storage categories to query when the gallery is filtered by `category`.
///
/// Never empty.
pub fn to_storage_categories(category: UiCategory) -> &'static [StorageCategory] {
    match category {
        UiCategory::Wedding => WEDDING,
        UiCategory::Corporate => CORPORATE,
        UiCategory::FineDining => FINE_DINING,
        UiCategory::Buffet => BUFFET,
        UiCategory::Cocktail => COCKTAIL,
        UiCategory::SpecialDishes => SPECIAL_DISHES,
    }
}

/// Map a raw stored category string to its UI category.
///
/// Unrecognised values map to [`FALLBACK_UI_CATEGORY`].
pub fn to_ui_category(stored: &str) -> UiCategory {
    stored
        .parse::<StorageCategory>()
        .map(StorageCategory::ui_category)
        .unwrap_or(FALLBACK_UI_CATEGORY)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
