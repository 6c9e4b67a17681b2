//! Tag vectors
//!
//! A tag vector holds exactly one tag per category, in category order. Both the
//! aggregated sticker preference and every decoded candidate filename use this
//! representation, so arity is fixed by the type rather than checked at runtime.

use serde::Serialize;
use std::fmt;

/// Number of tag categories (weather, season, scene, color, animal)
pub const CATEGORY_COUNT: usize = 5;

/// One tag per category, in category order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagVector {
    tags: [String; CATEGORY_COUNT],
}

impl TagVector {
    /// Create a tag vector from per-category tags
    pub fn new(tags: [String; CATEGORY_COUNT]) -> Self {
        Self { tags }
    }

    /// Build a tag vector from exactly `CATEGORY_COUNT` components
    ///
    /// Returns `None` when the component count differs.
    pub fn from_components<I, S>(components: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = components.into_iter().map(Into::into).collect();
        let tags: [String; CATEGORY_COUNT] = tags.try_into().ok()?;
        Some(Self { tags })
    }

    /// Tag for the category at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    /// Tags in category order
    pub fn tags(&self) -> &[String; CATEGORY_COUNT] {
        &self.tags
    }

    /// Iterate tags in category order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Per-category exact-equality indicators against `other`
    pub fn slot_matches(&self, other: &TagVector) -> [bool; CATEGORY_COUNT] {
        std::array::from_fn(|i| self.tags[i] == other.tags[i])
    }
}

impl fmt::Display for TagVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.tags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(tags: [&str; CATEGORY_COUNT]) -> TagVector {
        TagVector::new(tags.map(String::from))
    }

    #[test]
    fn test_from_components_requires_exact_arity() {
        assert!(TagVector::from_components(["a", "b", "c", "d"]).is_none());
        assert!(TagVector::from_components(["a", "b", "c", "d", "e", "f"]).is_none());

        let v = TagVector::from_components(["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(v.get(0), Some("a"));
        assert_eq!(v.get(4), Some("e"));
        assert_eq!(v.get(5), None);
    }

    #[test]
    fn test_slot_matches() {
        let a = vector(["sunny", "spring", "beach", "pink", "cat"]);
        let b = vector(["sunny", "winter", "beach", "blue", "cat"]);

        assert_eq!(a.slot_matches(&b), [true, false, true, false, true]);
        assert_eq!(a.slot_matches(&a), [true; CATEGORY_COUNT]);
    }

    #[test]
    fn test_display() {
        let v = vector(["sunny", "spring", "beach", "pink", "cat"]);
        assert_eq!(v.to_string(), "[sunny, spring, beach, pink, cat]");
    }
}
