//! Ad hoc search over the entity store
//!
//! Stateless linear scan, recomputed per call. The zone filter is asymmetric
//! on purpose: substring against an item's preferred zone, exact against a
//! container's zone. Existing callers depend on that behavior, so it stays.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::StowageError;
use crate::model::{Container, Item};
use crate::stowage::Stowage;

/// Which store(s) a search or export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Item,
    Container,
}

impl SearchScope {
    pub fn includes_items(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Item)
    }

    pub fn includes_containers(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Container)
    }
}

impl FromStr for SearchScope {
    type Err = StowageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchScope::All),
            "item" => Ok(SearchScope::Item),
            "container" => Ok(SearchScope::Container),
            other => Err(StowageError::MalformedInput(format!(
                "Unknown search type: {other} (expected all, item or container)"
            ))),
        }
    }
}

/// Matching records, one list per store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub items: Vec<Item>,
    pub containers: Vec<Container>,
}

fn text_matches(query: &str, id: &str, name: Option<&str>, description: Option<&str>) -> bool {
    if query.is_empty() {
        return true;
    }
    id.to_lowercase().contains(query)
        || name.map_or(false, |n| n.to_lowercase().contains(query))
        || description.map_or(false, |d| d.to_lowercase().contains(query))
}

impl Stowage {
    /// Case-insensitive substring search over id, name and description,
    /// optionally narrowed by zone. No ranking, no pagination.
    pub fn search(&self, query: &str, scope: SearchScope, zone: Option<&str>) -> SearchResults {
        let query = query.to_lowercase();
        // An empty zone (e.g. `?zone=`) means no zone filter.
        let zone = zone.filter(|z| !z.is_empty());
        let mut results = SearchResults::default();

        if scope.includes_items() {
            for item in self.store.items.values() {
                let text_ok = text_matches(
                    &query,
                    &item.item_id,
                    item.name.as_deref(),
                    item.description.as_deref(),
                );
                // Substring match for items.
                let zone_ok = zone.map_or(true, |z| {
                    item.preferred_zone.as_deref().unwrap_or("").contains(z)
                });
                if text_ok && zone_ok {
                    results.items.push(item.clone());
                }
            }
        }

        if scope.includes_containers() {
            for container in self.store.containers.values() {
                let text_ok = text_matches(
                    &query,
                    &container.container_id,
                    container.name.as_deref(),
                    container.description.as_deref(),
                );
                // Exact match for containers.
                let zone_ok = zone.map_or(true, |z| container.zone == z);
                if text_ok && zone_ok {
                    results.containers.push(container.clone());
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_engine() -> Stowage {
        let mut engine = Stowage::new();
        let mut c1 = Container::new("C1", "Alpha");
        c1.name = Some("Food locker".into());
        engine.store.containers.put("C1", c1);
        engine
            .store
            .containers
            .put("C2", Container::new("C2", "Alpha-2"));

        let mut i1 = Item::new("I1").with_preferred_zone("Alpha");
        i1.name = Some("Ration pack".into());
        engine.store.items.put("I1", i1);

        let mut i2 = Item::new("I2").with_preferred_zone("Beta");
        i2.description = Some("Spare food container seals".into());
        engine.store.items.put("I2", i2);

        engine
    }

    #[test]
    fn test_empty_query_matches_all() {
        let engine = sample_engine();
        let results = engine.search("", SearchScope::All, None);
        assert_eq!(results.items.len(), 2);
        assert_eq!(results.containers.len(), 2);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let engine = sample_engine();
        let results = engine.search("FOOD", SearchScope::All, None);
        // "Food locker" container, "Spare food..." item description.
        assert_eq!(results.containers.len(), 1);
        assert_eq!(results.items.len(), 1);
        assert_eq!(results.items[0].item_id, "I2");
    }

    #[test]
    fn test_scope_narrows_stores() {
        let engine = sample_engine();

        let items_only = engine.search("", SearchScope::Item, None);
        assert_eq!(items_only.items.len(), 2);
        assert!(items_only.containers.is_empty());

        let containers_only = engine.search("", SearchScope::Container, None);
        assert!(containers_only.items.is_empty());
        assert_eq!(containers_only.containers.len(), 2);
    }

    #[test]
    fn test_zone_asymmetry() {
        let engine = sample_engine();
        let results = engine.search("", SearchScope::All, Some("Alpha"));

        // Items: substring — "Alpha" matches preferredZone "Alpha" only.
        assert_eq!(results.items.len(), 1);
        assert_eq!(results.items[0].item_id, "I1");

        // Containers: exact — zone "Alpha-2" is excluded.
        assert_eq!(results.containers.len(), 1);
        assert_eq!(results.containers[0].container_id, "C1");

        // A zone prefix still substring-matches the item preference but
        // exactly matches no container zone.
        let results = engine.search("", SearchScope::All, Some("Alph"));
        assert_eq!(results.items.len(), 1);
        assert!(results.containers.is_empty());
    }

    #[test]
    fn test_empty_zone_means_no_filter() {
        let engine = sample_engine();

        let results = engine.search("", SearchScope::All, Some(""));
        assert_eq!(results.items.len(), 2);
        assert_eq!(results.containers.len(), 2);

        let absent = engine.search("", SearchScope::All, None);
        assert_eq!(results, absent);
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("all".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert_eq!("item".parse::<SearchScope>().unwrap(), SearchScope::Item);
        assert_eq!(
            "container".parse::<SearchScope>().unwrap(),
            SearchScope::Container
        );
        assert!(matches!(
            "boxes".parse::<SearchScope>().unwrap_err(),
            StowageError::MalformedInput(_)
        ));
    }
}
