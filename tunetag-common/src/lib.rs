//! # TuneTag Common Library
//!
//! Shared code for the TuneTag sticker matcher including:
//! - Tag categories and the sticker catalog
//! - Tag vectors (one tag per category)
//! - Sticker aggregation into a target tag vector
//! - Weighted match selection over filename-encoded candidates
//! - Configuration loading

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod tags;

pub use aggregator::{Aggregation, TagAggregator};
pub use catalog::{Catalog, Category, Sticker};
pub use error::{Error, Result};
pub use matcher::{BestMatch, MatchSelector, ScoredCandidate};
pub use tags::{TagVector, CATEGORY_COUNT};
