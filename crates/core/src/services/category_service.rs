use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::{default_categories, Category, NewCategory};
use crate::models::event::ChangeEvent;
use crate::storage::traits::Store;

use super::notifier::ChangeNotifier;

pub const MAX_CATEGORY_NAME_LEN: usize = 50;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex colour pattern is valid"));

/// Category CRUD. Deleting a category never touches transactions; analytics
/// reports their now-dangling ids as an unknown category.
pub struct CategoryService {
    store: Arc<dyn Store>,
    notifier: ChangeNotifier,
}

impl CategoryService {
    pub fn new(store: Arc<dyn Store>, notifier: ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    pub async fn create(&self, user_id: &str, category: NewCategory) -> Result<Category, CoreError> {
        let category = Self::validate(category)?;
        let mut created = self
            .store
            .insert_categories(user_id, std::slice::from_ref(&category))
            .await?;
        let created = created
            .pop()
            .ok_or_else(|| CoreError::Persistence("store returned no category".into()))?;
        self.announce(user_id);
        Ok(created)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
        self.store.list_categories(user_id).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        category: NewCategory,
    ) -> Result<(), CoreError> {
        let category = Self::validate(category)?;
        self.store.update_category(user_id, id, &category).await?;
        self.announce(user_id);
        Ok(())
    }

    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.store.delete_category(user_id, id).await?;
        self.announce(user_id);
        Ok(())
    }

    /// Write the starter categories for a freshly registered user in one batch.
    pub async fn seed_defaults(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
        let created = self
            .store
            .insert_categories(user_id, &default_categories())
            .await?;
        info!(user_id, count = created.len(), "default categories created");
        self.announce(user_id);
        Ok(created)
    }

    /// Trim the name and check both fields.
    fn validate(category: NewCategory) -> Result<NewCategory, CoreError> {
        let name = category.name.trim().to_string();
        let len = name.chars().count();
        if len == 0 {
            return Err(CoreError::Validation("Category name is required".into()));
        }
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Category name is too long ({len} characters, maximum {MAX_CATEGORY_NAME_LEN})"
            )));
        }
        if !HEX_COLOR.is_match(&category.color) {
            return Err(CoreError::Validation(format!(
                "Invalid colour {:?}, expected #RRGGBB",
                category.color
            )));
        }
        Ok(NewCategory {
            name,
            color: category.color,
        })
    }

    fn announce(&self, user_id: &str) {
        self.notifier.publish(ChangeEvent::CategoriesChanged {
            user_id: user_id.to_string(),
        });
    }
}
