//! Sticker catalog
//!
//! Static configuration loaded once per process: the ordered tag categories and
//! the weighted stickers that vote for tags. The catalog is immutable after
//! construction and validated on the way in, so aggregation never has to deal
//! with empty categories or negative weights.

use crate::tags::CATEGORY_COUNT;
use crate::{Error, Result};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// One classification axis with its ordered tag set
///
/// Tag order matters: the first tag is the fallback and wins weight ties.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub tags: Vec<String>,
}

impl Category {
    pub fn new<S: Into<String>>(name: impl Into<String>, tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// First declared tag (fallback for an empty accumulation)
    pub fn default_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Named weighted contributor to tag preference
///
/// Tags not listed weigh 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    pub name: String,
    pub weights: BTreeMap<String, f64>,
}

impl Sticker {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        weights: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            weights: weights.into_iter().map(|(tag, w)| (tag.into(), w)).collect(),
        }
    }

    /// Weight this sticker assigns to `tag` (0.0 when absent)
    pub fn weight(&self, tag: &str) -> f64 {
        self.weights.get(tag).copied().unwrap_or(0.0)
    }
}

/// Validated categories and stickers
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: [Category; CATEGORY_COUNT],
    stickers: BTreeMap<String, Sticker>,
}

impl Catalog {
    /// Build and validate a catalog
    ///
    /// **Validation:**
    /// - Exactly `CATEGORY_COUNT` categories
    /// - Every category has at least one tag, with no duplicates
    /// - Every sticker weight is finite and non-negative
    ///
    /// Sticker tags that belong to no category are dropped with a warning.
    pub fn new(categories: Vec<Category>, stickers: Vec<Sticker>) -> Result<Self> {
        let count = categories.len();
        let categories: [Category; CATEGORY_COUNT] = categories.try_into().map_err(|_| {
            Error::Catalog(format!(
                "expected {} categories, found {}",
                CATEGORY_COUNT, count
            ))
        })?;

        for category in &categories {
            if category.tags.is_empty() {
                return Err(Error::Catalog(format!(
                    "category '{}' has no tags",
                    category.name
                )));
            }
            let mut seen = HashSet::new();
            for tag in &category.tags {
                if !seen.insert(tag.as_str()) {
                    return Err(Error::Catalog(format!(
                        "duplicate tag '{}' in category '{}'",
                        tag, category.name
                    )));
                }
            }
        }

        let mut by_name = BTreeMap::new();
        for mut sticker in stickers {
            for (tag, weight) in &sticker.weights {
                if !weight.is_finite() || *weight < 0.0 {
                    return Err(Error::Catalog(format!(
                        "sticker '{}' has invalid weight {} for tag '{}'",
                        sticker.name, weight, tag
                    )));
                }
            }

            sticker.weights.retain(|tag, _| {
                let known = categories.iter().any(|c| c.contains(tag));
                if !known {
                    warn!(
                        sticker = %sticker.name,
                        tag = %tag,
                        "Sticker tag not in any category, ignoring"
                    );
                }
                known
            });

            if by_name.contains_key(&sticker.name) {
                return Err(Error::Catalog(format!(
                    "duplicate sticker '{}'",
                    sticker.name
                )));
            }
            by_name.insert(sticker.name.clone(), sticker);
        }

        Ok(Self {
            categories,
            stickers: by_name,
        })
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[Category; CATEGORY_COUNT] {
        &self.categories
    }

    pub fn sticker(&self, name: &str) -> Option<&Sticker> {
        self.stickers.get(name)
    }

    /// Sticker names in sorted order
    pub fn sticker_names(&self) -> impl Iterator<Item = &str> {
        self.stickers.keys().map(String::as_str)
    }

    /// Replace the sticker table, keeping categories
    pub fn with_stickers(self, stickers: Vec<Sticker>) -> Result<Self> {
        Self::new(self.categories.into(), stickers)
    }

    /// Reference categories: weather, season, scene, color, animal
    pub fn reference_categories() -> [Category; CATEGORY_COUNT] {
        [
            Category::new("weather", ["sunny", "rainy", "cloudy", "snowy"]),
            Category::new("season", ["spring", "summer", "autumn", "winter"]),
            Category::new("scene", ["forest", "beach", "desert", "mountain"]),
            Category::new("color", ["pink", "blue", "yellow", "green"]),
            Category::new("animal", ["cat", "fish", "elephant", "butterfly"]),
        ]
    }

    /// Reference sticker table (20 stickers: logo, keyboard and badge sets)
    #[rustfmt::skip]
    pub fn reference_stickers() -> Vec<Sticker> {
        vec![
            Sticker::new("logo1", [("sunny", 0.1), ("summer", 0.1), ("beach", 0.1), ("pink", 0.1), ("elephant", 0.1)]),
            Sticker::new("logo2", [("cloudy", 0.1), ("autumn", 0.1), ("desert", 0.1), ("pink", 0.1), ("butterfly", 0.1)]),
            Sticker::new("logo3", [("rainy", 0.1), ("spring", 0.1), ("forest", 0.1), ("pink", 0.1), ("cat", 0.1)]),
            Sticker::new("logo4", [("snowy", 0.1), ("winter", 0.1), ("mountain", 0.1), ("pink", 0.1), ("fish", 0.1)]),
            Sticker::new("logo5", [("cloudy", 0.1), ("summer", 0.1), ("beach", 0.1), ("pink", 0.1), ("butterfly", 0.1)]),
            Sticker::new("logo6", [("sunny", 0.1), ("autumn", 0.1), ("forest", 0.1), ("pink", 0.1), ("elephant", 0.1)]),
            Sticker::new("kb1", [("rainy", 0.5), ("winter", 0.5), ("desert", 0.1), ("blue", 0.5), ("cat", 0.1)]),
            Sticker::new("kbr1", [("cloudy", 0.3), ("winter", 0.5), ("mountain", 0.1), ("blue", 0.5), ("fish", 0.1)]),
            Sticker::new("kb2", [("sunny", 0.1), ("spring", 0.5), ("beach", 0.1), ("pink", 0.6), ("butterfly", 0.1)]),
            Sticker::new("kbr2", [("cloudy", 0.3), ("spring", 0.5), ("forest", 0.1), ("pink", 0.6), ("elephant", 0.1)]),
            Sticker::new("kb3", [("sunny", 0.1), ("summer", 0.5), ("desert", 0.1), ("yellow", 0.6), ("cat", 0.1)]),
            Sticker::new("kbr3", [("snowy", 0.5), ("summer", 0.5), ("mountain", 0.1), ("blue", 0.5), ("fish", 0.1)]),
            Sticker::new("kb4", [("sunny", 0.2), ("autumn", 0.5), ("beach", 0.1), ("yellow", 0.6), ("butterfly", 0.1)]),
            Sticker::new("kbr4", [("sunny", 0.3), ("autumn", 0.5), ("forest", 0.1), ("yellow", 0.6), ("elephant", 0.1)]),
            Sticker::new("b1", [("snowy", 0.1), ("spring", 0.1), ("desert", 0.1), ("pink", 0.5), ("cat", 0.1)]),
            Sticker::new("b2", [("rainy", 0.3), ("winter", 0.1), ("mountain", 0.1), ("blue", 0.4), ("fish", 0.1)]),
            Sticker::new("b3", [("sunny", 0.1), ("summer", 0.1), ("beach", 0.1), ("yellow", 0.5), ("butterfly", 0.1)]),
            Sticker::new("b4", [("snowy", 0.3), ("autumn", 0.1), ("forest", 0.1), ("blue", 0.4), ("elephant", 0.1)]),
            Sticker::new("b5", [("rainy", 0.1), ("spring", 0.1), ("desert", 0.1), ("green", 1.2), ("cat", 0.1)]),
            Sticker::new("b6", [("cloudy", 0.2), ("winter", 0.1), ("mountain", 0.1), ("green", 1.1), ("fish", 0.1)]),
        ]
    }

    /// Compiled-in reference catalog
    pub fn reference() -> Self {
        Self {
            categories: Self::reference_categories(),
            stickers: Self::reference_stickers()
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}
