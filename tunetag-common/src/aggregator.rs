//! Sticker Aggregator
//!
//! Turns a selection of sticker names into a target tag vector.
//!
//! # Algorithm
//! 1. Per category, accumulate each declared tag's weight over all selected
//!    stickers (absent tags contribute 0)
//! 2. Unknown sticker names are skipped with a warning
//! 3. Per category, pick the tag with the greatest total, scanning tags in
//!    declaration order; the first tag reaching the maximum wins ties
//!
//! # Example
//! ```rust
//! use tunetag_common::{Catalog, TagAggregator};
//!
//! let catalog = Catalog::reference();
//! let aggregator = TagAggregator::new(&catalog);
//! let target = aggregator.aggregate(&["logo1", "kb2"]);
//! assert_eq!(target.get(1), Some("spring"));
//! ```

use crate::catalog::Catalog;
use crate::tags::{TagVector, CATEGORY_COUNT};
use tracing::{debug, warn};

/// Aggregation result with diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Winning tag per category
    pub tag_vector: TagVector,
    /// Selected names with no catalog entry, in input order
    pub skipped: Vec<String>,
    /// Accumulated weight per declared tag, per category (declaration order)
    pub totals: [Vec<(String, f64)>; CATEGORY_COUNT],
}

/// Sticker aggregator
///
/// Borrows the catalog; holds no state between calls, so every
/// aggregation is independent.
pub struct TagAggregator<'a> {
    catalog: &'a Catalog,
}

impl<'a> TagAggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Aggregate selected stickers into a target tag vector
    pub fn aggregate<S: AsRef<str>>(&self, selected: &[S]) -> TagVector {
        self.aggregate_detailed(selected).tag_vector
    }

    /// Aggregate selected stickers, keeping skipped names and per-tag totals
    pub fn aggregate_detailed<S: AsRef<str>>(&self, selected: &[S]) -> Aggregation {
        let categories = self.catalog.categories();

        // Accumulators follow declared tag order, never map key order
        let mut totals: [Vec<(String, f64)>; CATEGORY_COUNT] = std::array::from_fn(|i| {
            categories[i]
                .tags
                .iter()
                .map(|tag| (tag.clone(), 0.0))
                .collect()
        });
        let mut skipped = Vec::new();

        for name in selected {
            let name = name.as_ref();
            let Some(sticker) = self.catalog.sticker(name) else {
                warn!(sticker = %name, "Sticker not found in catalog, skipping");
                skipped.push(name.to_string());
                continue;
            };

            for bucket in totals.iter_mut() {
                for (tag, total) in bucket.iter_mut() {
                    *total += sticker.weight(tag);
                }
            }
        }

        let tags: [String; CATEGORY_COUNT] = std::array::from_fn(|i| {
            pick_max(&totals[i])
                .or_else(|| categories[i].default_tag())
                .unwrap_or_default()
                .to_string()
        });
        let tag_vector = TagVector::new(tags);

        debug!(
            selected = selected.len(),
            skipped = skipped.len(),
            tags = %tag_vector,
            "Sticker aggregation complete"
        );

        Aggregation {
            tag_vector,
            skipped,
            totals,
        }
    }
}

/// First tag holding the strictly greatest total
///
/// Returns `None` only for an empty bucket.
fn pick_max(bucket: &[(String, f64)]) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for (tag, total) in bucket {
        match best {
            Some((_, best_total)) if *total <= best_total => {}
            _ => best = Some((tag.as_str(), *total)),
        }
    }
    best.map(|(tag, _)| tag)
}
