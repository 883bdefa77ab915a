//! In-memory catalog store
//!
//! The learner-facing catalog is statically seeded; admin-authored items
//! are created/edited/deleted through the management operations below.
//! Listing carries no ordering guarantee.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{Category, ContentItem, Difficulty, ItemStatus};
use crate::types::{NetLearnError, Result};

/// Filter predicate for catalog listing
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Keep only items in this category
    pub category: Option<Category>,
    /// Keep only items whose title contains this substring (case-insensitive)
    pub title_contains: Option<String>,
    /// Include drafts (admin dashboard view)
    pub include_drafts: bool,
}

/// Fields for an admin-created item; status defaults to draft, views to zero
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub category: Category,
    pub difficulty: Difficulty,
    pub premium: bool,
    pub devices: Vec<String>,
}

/// Partial update for an existing item
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<u32>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub premium: Option<bool>,
    pub status: Option<ItemStatus>,
}

/// In-memory content catalog
pub struct Catalog {
    items: DashMap<String, ContentItem>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Create a catalog seeded with the builtin learner-facing items
    pub fn with_builtin() -> Self {
        let catalog = Self::new();
        for item in builtin_items() {
            catalog.items.insert(item.id.clone(), item);
        }
        catalog
    }

    /// Number of items, drafts included
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// List items matching the filter
    pub fn list(&self, filter: &CatalogFilter) -> Vec<ContentItem> {
        let needle = filter
            .title_contains
            .as_ref()
            .map(|s| s.to_lowercase());

        self.items
            .iter()
            .filter(|entry| {
                let item = entry.value();
                if !filter.include_drafts && item.status == ItemStatus::Draft {
                    return false;
                }
                if let Some(category) = filter.category {
                    if item.category != category {
                        return false;
                    }
                }
                if let Some(ref needle) = needle {
                    if !item.title.to_lowercase().contains(needle) {
                        return false;
                    }
                }
                true
            })
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Fetch a single item by id
    pub fn get(&self, id: &str) -> Option<ContentItem> {
        self.items.get(id).map(|entry| entry.value().clone())
    }

    /// Create a new admin-authored item (status draft, views zero)
    pub fn create(&self, new: NewItem) -> ContentItem {
        let item = ContentItem {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            duration_minutes: new.duration_minutes,
            category: new.category,
            difficulty: new.difficulty,
            premium: new.premium,
            status: ItemStatus::Draft,
            views: 0,
            devices: new.devices,
            created_at: Utc::now(),
        };

        debug!(id = %item.id, title = %item.title, "Catalog item created");
        self.items.insert(item.id.clone(), item.clone());
        item
    }

    /// Apply a partial update to an item
    ///
    /// The premium flag is immutable once the item is published.
    pub fn update(&self, id: &str, update: ItemUpdate) -> Result<ContentItem> {
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| NetLearnError::NotFound(format!("catalog item {id}")))?;
        let item = entry.value_mut();

        if let Some(premium) = update.premium {
            if item.status == ItemStatus::Published && premium != item.premium {
                return Err(NetLearnError::Validation(
                    "premium flag is immutable once published".to_string(),
                ));
            }
            item.premium = premium;
        }

        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(duration_minutes) = update.duration_minutes {
            item.duration_minutes = duration_minutes;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(difficulty) = update.difficulty {
            item.difficulty = difficulty;
        }
        if let Some(status) = update.status {
            item.status = status;
        }

        Ok(item.clone())
    }

    /// Delete an item
    pub fn delete(&self, id: &str) -> Result<()> {
        self.items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| NetLearnError::NotFound(format!("catalog item {id}")))
    }

    /// Increment the view counter for a learner access
    ///
    /// Returns the new count, or None if the item does not exist.
    pub fn record_view(&self, id: &str) -> Option<u64> {
        self.items.get_mut(id).map(|mut entry| {
            entry.views += 1;
            entry.views
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin(
    id: &str,
    title: &str,
    description: &str,
    duration_minutes: u32,
    category: Category,
    difficulty: Difficulty,
    premium: bool,
    devices: &[&str],
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration_minutes,
        category,
        difficulty,
        premium,
        status: ItemStatus::Published,
        views: 0,
        devices: devices.iter().map(|d| d.to_string()).collect(),
        created_at: Utc::now(),
    }
}

/// The statically defined learner-facing catalog
fn builtin_items() -> Vec<ContentItem> {
    vec![
        builtin(
            "network-fundamentals",
            "Network Fundamentals",
            "Learn the basics of networking including OSI model, TCP/IP, and network topologies.",
            45,
            Category::Basics,
            Difficulty::Beginner,
            false,
            &["Router", "Switch", "Computer"],
        ),
        builtin(
            "router-configuration-basics",
            "Router Configuration Basics",
            "Step-by-step guide to configuring routers including static routing and basic security.",
            60,
            Category::Basics,
            Difficulty::Beginner,
            false,
            &["Router", "Switch"],
        ),
        builtin(
            "firewall-implementation",
            "Firewall Implementation",
            "Advanced firewall configuration and security policies for enterprise networks.",
            90,
            Category::Security,
            Difficulty::Advanced,
            true,
            &["Firewall", "Router", "Switch"],
        ),
        builtin(
            "vpn-setup",
            "VPN Setup and Configuration",
            "Learn how to set up secure VPN connections for remote access and site-to-site connectivity.",
            75,
            Category::Security,
            Difficulty::Intermediate,
            true,
            &["VPN Gateway", "Router", "Firewall"],
        ),
        builtin(
            "advanced-vlan-configuration",
            "Advanced VLAN Configuration",
            "Master VLAN configuration, trunking, and inter-VLAN routing for complex networks.",
            120,
            Category::Advanced,
            Difficulty::Advanced,
            true,
            &["Layer 3 Switch", "Router", "VLAN"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_item(catalog: &Catalog) -> ContentItem {
        catalog.create(NewItem {
            title: "VLAN Implementation Guide".to_string(),
            description: "Draft walkthrough".to_string(),
            duration_minutes: 50,
            category: Category::Advanced,
            difficulty: Difficulty::Intermediate,
            premium: true,
            devices: vec!["Layer 3 Switch".to_string()],
        })
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::with_builtin();
        assert_eq!(catalog.len(), 5);

        let free: Vec<_> = catalog
            .list(&CatalogFilter::default())
            .into_iter()
            .filter(|i| !i.premium)
            .collect();
        assert_eq!(free.len(), 2);
    }

    #[test]
    fn test_list_filters_by_category() {
        let catalog = Catalog::with_builtin();
        let security = catalog.list(&CatalogFilter {
            category: Some(Category::Security),
            ..Default::default()
        });
        assert_eq!(security.len(), 2);
        assert!(security.iter().all(|i| i.category == Category::Security));
    }

    #[test]
    fn test_list_title_substring_is_case_insensitive() {
        let catalog = Catalog::with_builtin();
        let hits = catalog.list(&CatalogFilter {
            title_contains: Some("VLAN".to_string()),
            ..Default::default()
        });
        assert_eq!(hits.len(), 1);

        let hits = catalog.list(&CatalogFilter {
            title_contains: Some("vlan".to_string()),
            ..Default::default()
        });
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_drafts_hidden_unless_requested() {
        let catalog = Catalog::with_builtin();
        let draft = draft_item(&catalog);
        assert_eq!(draft.status, ItemStatus::Draft);
        assert_eq!(draft.views, 0);

        assert_eq!(catalog.list(&CatalogFilter::default()).len(), 5);

        let with_drafts = catalog.list(&CatalogFilter {
            include_drafts: true,
            ..Default::default()
        });
        assert_eq!(with_drafts.len(), 6);
    }

    #[test]
    fn test_premium_flag_immutable_once_published() {
        let catalog = Catalog::with_builtin();
        let draft = draft_item(&catalog);

        // Mutable while in draft
        let updated = catalog
            .update(
                &draft.id,
                ItemUpdate {
                    premium: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.premium);

        // Publish, then attempt to flip
        catalog
            .update(
                &draft.id,
                ItemUpdate {
                    status: Some(ItemStatus::Published),
                    ..Default::default()
                },
            )
            .unwrap();

        let err = catalog
            .update(
                &draft.id,
                ItemUpdate {
                    premium: Some(true),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, NetLearnError::Validation(_)));

        // Setting the same value is not a flip
        assert!(catalog
            .update(
                &draft.id,
                ItemUpdate {
                    premium: Some(false),
                    ..Default::default()
                },
            )
            .is_ok());
    }

    #[test]
    fn test_record_view_increments() {
        let catalog = Catalog::with_builtin();
        assert_eq!(catalog.record_view("network-fundamentals"), Some(1));
        assert_eq!(catalog.record_view("network-fundamentals"), Some(2));
        assert_eq!(catalog.record_view("missing"), None);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let catalog = Catalog::with_builtin();
        assert!(catalog.delete("network-fundamentals").is_ok());
        assert!(matches!(
            catalog.delete("network-fundamentals"),
            Err(NetLearnError::NotFound(_))
        ));
    }
}
