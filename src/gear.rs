use serde::Serialize;
use tracing::debug;

use crate::models::{total_weight, GearCategory, GearId, GearItem};

/// The user's equipment inventory, kept in insertion order
#[derive(Debug, Clone, Default, Serialize)]
pub struct GearCatalog {
    items: Vec<GearItem>,
}

impl GearCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the example inventory
    pub fn with_examples() -> Self {
        Self {
            items: vec![
                GearItem::new("GORUCK Rucker 4.0", 45.0, GearCategory::Backpack),
                GearItem::new("20lb Plate", 20.0, GearCategory::Vest),
                GearItem::new("30lb Sandbag", 30.0, GearCategory::Sandbag),
                GearItem::new("40lb Stone", 40.0, GearCategory::Stone),
            ],
        }
    }

    pub fn list(&self) -> &[GearItem] {
        &self.items
    }

    pub fn get(&self, id: GearId) -> Option<&GearItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a new item. Name and weight are stored as given.
    pub fn add(&mut self, name: impl Into<String>, weight: f64, category: GearCategory) -> GearItem {
        let item = GearItem::new(name, weight, category);
        debug!(id = %item.id, name = %item.name, weight, %category, "gear added");
        self.items.push(item.clone());
        item
    }

    /// Replace the stored item with the same id.
    ///
    /// Returns `false` and leaves the catalog untouched when no item matches.
    pub fn update(&mut self, item: GearItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                debug!(id = %item.id, "gear updated");
                *existing = item;
                true
            }
            None => {
                debug!(id = %item.id, "gear update ignored, no such item");
                false
            }
        }
    }

    /// Remove the item with the given id, if present
    pub fn delete(&mut self, id: GearId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        debug!(%id, removed, "gear delete");
        removed
    }

    /// Combined weight of the catalog items whose ids appear in `ids`
    pub fn total_weight(&self, ids: &[GearId]) -> f64 {
        total_weight(self.items.iter().filter(|item| ids.contains(&item.id)))
    }

    /// Items grouped by category, categories sorted by name.
    ///
    /// Categories without items are omitted; items keep catalog order.
    pub fn grouped_by_category(&self) -> Vec<(GearCategory, Vec<&GearItem>)> {
        let mut categories: Vec<GearCategory> = GearCategory::ALL.to_vec();
        categories.sort_by_key(|category| category.name());

        categories
            .into_iter()
            .filter_map(|category| {
                let items: Vec<&GearItem> = self
                    .items
                    .iter()
                    .filter(|item| item.category == category)
                    .collect();
                (!items.is_empty()).then_some((category, items))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    #[test]
    fn test_examples() {
        let catalog = GearCatalog::with_examples();
        let names: Vec<&str> = catalog.list().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["GORUCK Rucker 4.0", "20lb Plate", "30lb Sandbag", "40lb Stone"]
        );
        assert_eq!(catalog.list()[0].weight, 45.0);
        assert_eq!(catalog.list()[0].category, GearCategory::Backpack);
        assert_eq!(catalog.list()[1].category, GearCategory::Vest);
    }

    #[test]
    fn test_add_appends_with_fresh_id() {
        let mut catalog = GearCatalog::with_examples();
        let existing: Vec<GearId> = catalog.list().iter().map(|g| g.id).collect();

        let added = catalog.add("Weight Vest", 25.0, GearCategory::Vest);

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.list().last(), Some(&added));
        assert!(!existing.contains(&added.id));
    }

    #[test]
    fn test_add_accepts_unvalidated_input() {
        let mut catalog = GearCatalog::new();
        let added = catalog.add("", -5.0, GearCategory::Stone);
        assert_eq!(added.name, "");
        assert_eq!(added.weight, -5.0);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_update_replaces_matching_item() {
        let mut catalog = GearCatalog::with_examples();
        let mut plate = catalog.list()[1].clone();
        plate.name = "25lb Plate".to_string();
        plate.weight = 25.0;

        assert!(catalog.update(plate.clone()));

        assert_eq!(catalog.get(plate.id), Some(&plate));
        assert_eq!(catalog.list()[1].id, plate.id);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_update_missing_item_is_noop() {
        let mut catalog = GearCatalog::with_examples();
        let before = catalog.list().to_vec();

        let stranger = GearItem::new("Ghost", 1.0, GearCategory::Stone);
        assert!(!catalog.update(stranger));

        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn test_delete() {
        let mut catalog = GearCatalog::with_examples();
        let stone = catalog.list()[3].id;

        assert!(catalog.delete(stone));
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get(stone).is_none());

        assert!(!catalog.delete(stone));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_total_weight_of_selection() {
        let catalog = GearCatalog::with_examples();
        let ids = vec![catalog.list()[0].id, catalog.list()[1].id, Uuid::new_v4()];
        assert_eq!(catalog.total_weight(&ids), 65.0);
        assert_eq!(catalog.total_weight(&[]), 0.0);
    }

    #[test]
    fn test_grouped_by_category() {
        let mut catalog = GearCatalog::with_examples();
        catalog.add("Second Pack", 10.0, GearCategory::Backpack);

        let groups = catalog.grouped_by_category();
        let order: Vec<GearCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                GearCategory::Backpack,
                GearCategory::Sandbag,
                GearCategory::Stone,
                GearCategory::Vest
            ]
        );

        let packs: Vec<&str> = groups[0].1.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(packs, vec!["GORUCK Rucker 4.0", "Second Pack"]);
    }

    #[test]
    fn test_grouped_by_category_skips_empty_groups() {
        let mut catalog = GearCatalog::new();
        catalog.add("Stone", 40.0, GearCategory::Stone);
        let groups = catalog.grouped_by_category();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, GearCategory::Stone);
    }

    #[test]
    fn test_list_is_stable_without_mutation() {
        let catalog = GearCatalog::with_examples();
        assert_eq!(catalog.list(), catalog.list());
    }

    fn category_strategy() -> impl Strategy<Value = GearCategory> {
        prop::sample::select(GearCategory::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_add_then_list_contains_exactly_one_new_item(
            name in ".{0,24}",
            weight in -100.0f64..500.0,
            category in category_strategy(),
        ) {
            let mut catalog = GearCatalog::with_examples();
            let before = catalog.list().to_vec();

            let added = catalog.add(name.clone(), weight, category);

            prop_assert_eq!(catalog.len(), before.len() + 1);
            prop_assert_eq!(&catalog.list()[..before.len()], before.as_slice());
            let matching: Vec<&GearItem> = catalog.list().iter().filter(|g| g.id == added.id).collect();
            prop_assert_eq!(matching.len(), 1);
            prop_assert_eq!(&matching[0].name, &name);
            prop_assert_eq!(matching[0].weight, weight);
            prop_assert_eq!(matching[0].category, category);
        }

        #[test]
        fn test_delete_removes_exactly_one(index in 0usize..4) {
            let mut catalog = GearCatalog::with_examples();
            let target = catalog.list()[index].id;
            let survivors: Vec<GearItem> = catalog
                .list()
                .iter()
                .filter(|g| g.id != target)
                .cloned()
                .collect();

            prop_assert!(catalog.delete(target));
            prop_assert_eq!(catalog.list(), survivors.as_slice());
        }
    }
}
