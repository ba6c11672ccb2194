//! Read-only material catalog.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::{MaterialCategory, MaterialRecord};
use crate::error::AppError;

/// Materials keyed by id. Built once per session and never mutated.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    by_id: BTreeMap<u32, MaterialRecord>,
}

impl MaterialCatalog {
    /// Build a catalog. When two records share an id, the first one wins.
    /// Records without a finite positive price are dropped.
    pub fn new(records: Vec<MaterialRecord>) -> Self {
        let mut by_id = BTreeMap::new();
        for record in records {
            if !(record.unit_price.is_finite() && record.unit_price > 0.0) {
                warn!(
                    id = record.id,
                    name = %record.name,
                    price = record.unit_price,
                    "material price is not positive; skipping"
                );
                continue;
            }
            if by_id.contains_key(&record.id) {
                warn!(id = record.id, name = %record.name, "duplicate material id; keeping first record");
                continue;
            }
            by_id.insert(record.id, record);
        }
        Self { by_id }
    }

    pub fn lookup(&self, id: u32) -> Option<&MaterialRecord> {
        self.by_id.get(&id)
    }

    /// Strict lookup: an unknown id is an error.
    pub fn get(&self, id: u32) -> Result<&MaterialRecord, AppError> {
        self.lookup(id).ok_or(AppError::MaterialNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &MaterialRecord> {
        self.by_id.values()
    }

    pub fn in_category<'a>(
        &'a self,
        category: &'a MaterialCategory,
    ) -> impl Iterator<Item = &'a MaterialRecord> + 'a {
        self.iter().filter(move |m| &m.category == category)
    }

    /// Resolve selected ids to records, skipping ids the catalog does not know.
    pub fn resolve(&self, ids: &[u32]) -> Vec<&MaterialRecord> {
        ids.iter()
            .filter_map(|&id| {
                let found = self.lookup(id);
                if found.is_none() {
                    warn!(id, "selected material not in catalog; skipping");
                }
                found
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(id: u32, name: &str, category: &str) -> MaterialRecord {
        priced(id, name, category, 10.0)
    }

    fn priced(id: u32, name: &str, category: &str, unit_price: f64) -> MaterialRecord {
        MaterialRecord {
            id,
            name: name.to_string(),
            category: category.into(),
            unit: "bag".to_string(),
            unit_price,
            image: None,
        }
    }

    #[test]
    fn lookup_finds_known_ids_only() {
        let catalog = MaterialCatalog::new(vec![material(1, "OPC 53", "Cement & Concrete")]);
        assert_eq!(catalog.lookup(1).map(|m| m.name.as_str()), Some("OPC 53"));
        assert!(catalog.lookup(2).is_none());
        assert!(matches!(catalog.get(2), Err(AppError::MaterialNotFound(2))));
    }

    #[test]
    fn first_duplicate_wins() {
        let catalog = MaterialCatalog::new(vec![
            material(4, "first", "Bricks & Blocks"),
            material(4, "second", "Bricks & Blocks"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup(4).unwrap().name, "first");
    }

    #[test]
    fn non_positive_prices_are_dropped() {
        let catalog = MaterialCatalog::new(vec![
            priced(1, "refund", "Tiles & Flooring", -100.0),
            priced(2, "free", "Paints & Finishes", 0.0),
            priced(3, "broken", "Cement & Concrete", f64::NAN),
            priced(4, "infinite", "Bricks & Blocks", f64::INFINITY),
            priced(5, "ok", "Bricks & Blocks", 8.5),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup(1).is_none());
        assert!(matches!(catalog.get(2), Err(AppError::MaterialNotFound(2))));
        assert!(catalog.resolve(&[1, 2, 3, 4]).is_empty());
        assert_eq!(catalog.lookup(5).map(|m| m.unit_price), Some(8.5));
    }

    #[test]
    fn bad_price_does_not_shadow_a_later_duplicate() {
        let catalog = MaterialCatalog::new(vec![
            priced(7, "typo", "Tiles & Flooring", -45.0),
            priced(7, "fixed", "Tiles & Flooring", 45.0),
        ]);
        assert_eq!(catalog.lookup(7).map(|m| m.name.as_str()), Some("fixed"));
    }

    #[test]
    fn resolve_skips_unknown_ids() {
        let catalog = MaterialCatalog::new(vec![
            material(1, "a", "Tiles & Flooring"),
            material(2, "b", "Paints & Finishes"),
        ]);
        let resolved = catalog.resolve(&[2, 99, 1]);
        let ids: Vec<u32> = resolved.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn category_filter() {
        let catalog = MaterialCatalog::new(vec![
            material(1, "a", "Tiles & Flooring"),
            material(2, "b", "Paints & Finishes"),
            material(3, "c", "Tiles & Flooring"),
        ]);
        let tiles = MaterialCategory::TilesAndFlooring;
        assert_eq!(catalog.in_category(&tiles).count(), 2);
    }
}
