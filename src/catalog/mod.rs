//! Content catalog for NetLearn
//!
//! Provides:
//! - Content item types (category, difficulty, lifecycle status)
//! - The in-memory catalog store with the builtin learner-facing items
//! - Listing/filtering plus the admin management operations

pub mod store;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use store::{Catalog, CatalogFilter, ItemUpdate, NewItem};

/// Content category shown in the tutorials sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basics,
    Security,
    Advanced,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Basics => write!(f, "basics"),
            Category::Security => write!(f, "security"),
            Category::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basics" => Ok(Category::Basics),
            "security" => Ok(Category::Security),
            "advanced" => Ok(Category::Advanced),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Difficulty rating shown on item cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Publication lifecycle for admin-authored items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Visible only on the admin dashboard
    #[default]
    Draft,
    /// Visible in the learner-facing catalog
    Published,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Opaque item identifier
    pub id: String,
    pub title: String,
    pub description: String,
    /// Estimated duration in minutes
    pub duration_minutes: u32,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Premium items are gated by the entitlement evaluator.
    /// Immutable once the item is published.
    pub premium: bool,
    pub status: ItemStatus,
    /// Learner access counter
    pub views: u64,
    /// Devices featured in the walkthrough
    pub devices: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
