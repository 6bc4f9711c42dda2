//! One catalog collection and its id/merge rules.

use serde_json::Value;

use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_entity::content::CatalogItem;

/// Ordered entries of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: CatalogItem> Collection<T> {
    /// Wrap existing entries.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Every entry, in insertion order.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Entries shown publicly.
    pub fn visible(&self) -> Vec<T> {
        self.items.iter().filter(|i| i.is_visible()).cloned().collect()
    }

    /// Entry with `id`.
    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// `max(ids, 0) + 1`.
    pub fn next_id(&self) -> u64 {
        self.items.iter().map(CatalogItem::id).max().unwrap_or(0) + 1
    }

    /// Append `item` under a freshly assigned id and return the stored entry.
    pub fn add(&mut self, mut item: T) -> T {
        item.set_id(self.next_id());
        self.items.push(item.clone());
        item
    }

    /// Merge the fields of `patch` (a JSON object) into entry `id`.
    ///
    /// The id cannot be changed; a patched entry that no longer forms a
    /// valid record is rejected and nothing changes.
    pub fn update(&mut self, id: u64, patch: &Value) -> AppResult<T> {
        let Some(fields) = patch.as_object() else {
            return Err(AppError::validation("Update must be a JSON object"));
        };
        let position = self.position(id)?;

        let mut merged = serde_json::to_value(&self.items[position])?;
        if let Some(target) = merged.as_object_mut() {
            for (field, value) in fields {
                if field != "id" {
                    target.insert(field.clone(), value.clone());
                }
            }
        }

        let mut updated: T = serde_json::from_value(merged).map_err(|e| {
            AppError::validation(format!("Invalid {} update: {e}", T::COLLECTION))
        })?;
        updated.set_id(id);
        self.items[position] = updated.clone();
        Ok(updated)
    }

    /// Remove entry `id` and return it.
    pub fn delete(&mut self, id: u64) -> AppResult<T> {
        let position = self.position(id)?;
        Ok(self.items.remove(position))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: u64) -> AppResult<usize> {
        self.items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} entry {id} not found", T::COLLECTION)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liorian_entity::content::{Course, CourseStatus};
    use serde_json::json;

    fn course(id: u64, name: &str) -> Course {
        Course {
            id,
            name: name.to_string(),
            description: String::new(),
            duration: "6 weeks".to_string(),
            level: "Beginner".to_string(),
            price: "$499".to_string(),
            instructor: "Staff".to_string(),
            status: CourseStatus::Active,
        }
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let mut c: Collection<Course> = Collection::new(Vec::new());
        assert_eq!(c.add(course(0, "A")).id, 1);

        let mut c = Collection::new(vec![course(3, "A"), course(7, "B")]);
        assert_eq!(c.add(course(99, "C")).id, 8);
        c.delete(7).unwrap();
        assert_eq!(c.next_id(), 9);
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let mut c = Collection::new(vec![course(1, "Networking")]);
        let updated = c
            .update(1, &json!({"id": 42, "price": "$599", "status": "Inactive"}))
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.price, "$599");
        assert_eq!(updated.name, "Networking");
        assert!(c.visible().is_empty());
    }

    #[test]
    fn test_invalid_update_changes_nothing() {
        let mut c = Collection::new(vec![course(1, "Networking")]);
        let before = c.clone();
        assert!(c.update(1, &json!({"status": "Archived"})).is_err());
        assert!(c.update(1, &json!("name")).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut c = Collection::new(vec![course(1, "A"), course(2, "B")]);
        assert!(c.delete(5).unwrap_err().is_not_found());
        assert!(c.update(5, &json!({})).unwrap_err().is_not_found());
        c.delete(1).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.all()[0].id, 2);
    }
}
