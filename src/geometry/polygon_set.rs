use std::collections::HashMap;

use super::Polygon;

/// Identity of the `index`-th polygon traced for `owner`.
#[must_use]
pub fn polygon_id(owner: &str, index: usize) -> String {
    format!("{owner}__{index}")
}

/// An ordered identity → polygon mapping for one owner.
///
/// Entries keep discovery order; lookups by identity go through an index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSet {
    entries: Vec<(String, Polygon)>,
    index: HashMap<String, usize>,
}

impl PolygonSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. A repeated identity replaces the earlier polygon in
    /// place.
    pub fn insert(&mut self, id: String, polygon: Polygon) {
        if let Some(&i) = self.index.get(&id) {
            self.entries[i].1 = polygon;
            return;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, polygon));
    }

    /// Polygon registered under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Polygon> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Returns true if `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of polygons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set holds no polygon.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(id, polygon)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Polygon)> {
        self.entries.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Identities in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Total vertex count across all polygons.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.len()).sum()
    }
}

impl IntoIterator for PolygonSet {
    type Item = (String, Polygon);
    type IntoIter = std::vec::IntoIter<(String, Polygon)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Cell;

    #[test]
    fn ids_are_owner_and_index() {
        assert_eq!(polygon_id("A", 0), "A__0");
        assert_eq!(polygon_id("42", 11), "42__11");
    }

    #[test]
    fn insert_keeps_order_and_replaces() {
        let mut set = PolygonSet::new();
        set.insert("t__0".into(), Polygon::cell_square(Cell::new(0, 0), 1.0));
        set.insert("t__1".into(), Polygon::cell_square(Cell::new(5, 0), 1.0));
        set.insert("t__0".into(), Polygon::cell_square(Cell::new(9, 9), 1.0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["t__0", "t__1"]);
        assert_eq!(
            set.get("t__0"),
            Some(&Polygon::cell_square(Cell::new(9, 9), 1.0))
        );
        assert!(!set.contains("t__2"));
        assert_eq!(set.vertex_count(), 8);
    }
}
