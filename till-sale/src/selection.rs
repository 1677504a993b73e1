//! Selection set: which catalog entries are in the pending sale

use serde::Serialize;
use shared::util::parse_leading_int;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    pub catalog_entry_id: String,
    pub quantity: u32,
}

/// Ordered set of selected entries. Insertion order is submission order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at quantity 1 if absent, remove if present.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.insert(id);
                true
            }
        }
    }

    /// Set the quantity of a selected entry from user text.
    ///
    /// The leading integer of `requested` is used. Missing or non-positive
    /// values become 1 and values above `max_stock` are clamped down to it.
    /// Returns the stored quantity, or `None` when `id` is not selected.
    pub fn set_quantity(&mut self, id: &str, requested: &str, max_stock: u32) -> Option<u32> {
        let index = self.position(id)?;
        let quantity = clamp_quantity(parse_leading_int(requested), max_stock);
        self.entries[index].quantity = quantity;
        Some(quantity)
    }

    /// Add one unit, bounded by `max_stock`. Returns the new quantity, or
    /// `None` when already at the bound or not selected.
    pub(crate) fn increment(&mut self, id: &str, max_stock: u32) -> Option<u32> {
        let entry = self.entries.iter_mut().find(|e| e.catalog_entry_id == id)?;
        if entry.quantity >= max_stock {
            return None;
        }
        entry.quantity += 1;
        Some(entry.quantity)
    }

    pub(crate) fn insert(&mut self, id: &str) {
        if !self.contains(id) {
            self.entries.push(SelectionEntry {
                catalog_entry_id: id.to_string(),
                quantity: 1,
            });
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.position(id).map(|i| self.entries[i].quantity)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take recorded quantities out of the set.
    ///
    /// Entries left with no units are removed. Units selected after
    /// `recorded` was taken stay in the set.
    pub(crate) fn settle(&mut self, recorded: &[SelectionEntry]) {
        for done in recorded {
            let Some(index) = self.position(&done.catalog_entry_id) else {
                continue;
            };
            let entry = &mut self.entries[index];
            if entry.quantity > done.quantity {
                entry.quantity -= done.quantity;
            } else {
                self.entries.remove(index);
            }
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.catalog_entry_id == id)
    }
}

fn clamp_quantity(requested: Option<i64>, max_stock: u32) -> u32 {
    let max = i64::from(max_stock.max(1));
    match requested {
        Some(n) if n >= 1 => n.min(max) as u32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_parity() {
        let mut selection = SelectionSet::new();
        for n in 1..=6 {
            let selected = selection.toggle("a");
            assert_eq!(selected, n % 2 == 1);
            assert_eq!(selection.contains("a"), n % 2 == 1);
        }
    }

    #[test]
    fn test_toggle_in_starts_at_one() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        selection.set_quantity("a", "4", 10);
        selection.toggle("a");
        selection.toggle("a");
        assert_eq!(selection.quantity_of("a"), Some(1));
    }

    #[test]
    fn test_set_quantity_bounds() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");

        let cases = [
            ("3", 3),
            ("0", 1),
            ("-4", 1),
            ("", 1),
            ("abc", 1),
            ("12", 5),
            ("7kg", 5),
            (" 2", 2),
            ("2.9", 2),
        ];
        for (text, expected) in cases {
            assert_eq!(selection.set_quantity("a", text, 5), Some(expected), "input {text:?}");
            let q = selection.quantity_of("a").unwrap();
            assert!((1..=5).contains(&q));
        }
    }

    #[test]
    fn test_set_quantity_zero_stock_keeps_one() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        assert_eq!(selection.set_quantity("a", "3", 0), Some(1));
    }

    #[test]
    fn test_set_quantity_unselected_is_noop() {
        let mut selection = SelectionSet::new();
        assert_eq!(selection.set_quantity("a", "3", 5), None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut selection = SelectionSet::new();
        selection.toggle("c");
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("a");
        selection.toggle("a");
        let ids: Vec<&str> = selection
            .entries()
            .iter()
            .map(|e| e.catalog_entry_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_increment_stops_at_stock() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        assert_eq!(selection.increment("a", 2), Some(2));
        assert_eq!(selection.increment("a", 2), None);
        assert_eq!(selection.quantity_of("a"), Some(2));
    }

    #[test]
    fn test_settle_keeps_later_units() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        selection.set_quantity("a", "2", 10);
        selection.toggle("b");
        let recorded = selection.entries().to_vec();

        selection.increment("a", 10);
        selection.toggle("c");
        selection.settle(&recorded);

        assert_eq!(
            selection.entries(),
            &[
                SelectionEntry {
                    catalog_entry_id: "a".into(),
                    quantity: 1,
                },
                SelectionEntry {
                    catalog_entry_id: "c".into(),
                    quantity: 1,
                },
            ]
        );
    }
}
