use quill_core::CategoryId;
use quill_domain::Category;

use super::{Collection, StoreError};

/// Typed facade over the category collection.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Collection<CategoryId, Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, category: Category) -> Result<(), StoreError> {
        self.categories.insert(category.id, category)
    }

    pub fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, StoreError> {
        self.categories.get(id)
    }

    pub fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.categories.find(|_| true)?;
        categories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(categories)
    }

    pub fn delete(&self, id: &CategoryId) -> Result<Option<Category>, StoreError> {
        self.categories.remove(id)
    }
}
