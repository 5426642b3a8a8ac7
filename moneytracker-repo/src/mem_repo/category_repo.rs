use crate::category_repo::CategoryRepoError::{CategoryAlreadyExists, CategoryNotFound};
use crate::category_repo::{Category, CategoryRepo, CategoryRepoError, NewCategory};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Entry {
    owner: Option<String>,
    category: Category,
}

struct State {
    categories: HashMap<i32, Entry>,
    next_id: i32,
}

pub struct MemCategoryRepo {
    state: RwLock<State>,
}

impl MemCategoryRepo {
    pub fn with_defaults(defaults: Vec<NewCategory>) -> MemCategoryRepo {
        let mut categories = HashMap::new();
        let mut next_id = 1;
        for default in defaults {
            categories.insert(
                next_id,
                Entry {
                    owner: None,
                    category: default.into_category(next_id, true),
                },
            );
            next_id += 1;
        }
        MemCategoryRepo {
            state: RwLock::new(State {
                categories,
                next_id,
            }),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

fn visible_to(entry: &Entry, user: &str) -> bool {
    match &entry.owner {
        None => true,
        Some(owner) => owner == user,
    }
}

impl State {
    /// Mirrors the store's unique index over (type, owner-or-default, name).
    /// Defaults live in their own scope, so a user may shadow a default name.
    fn name_taken(&self, user: &str, new_category: &NewCategory, exclude_id: Option<i32>) -> bool {
        self.categories.values().any(|entry| {
            Some(entry.category.id) != exclude_id
                && entry.owner.as_deref() == Some(user)
                && entry.category.category_type == new_category.category_type
                && entry.category.name == new_category.name
        })
    }
}

#[async_trait]
impl CategoryRepo for MemCategoryRepo {
    async fn get_categories(&self, user: &str) -> Result<Vec<Category>, CategoryRepoError> {
        let read_guard = self.read_lock()?;
        let mut categories: Vec<Category> = read_guard
            .categories
            .values()
            .filter(|entry| visible_to(entry, user))
            .map(|entry| entry.category.clone())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(
        &self,
        user: &str,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError> {
        let read_guard = self.read_lock()?;
        read_guard
            .categories
            .get(&category_id)
            .filter(|entry| visible_to(entry, user))
            .map(|entry| entry.category.clone())
            .ok_or(CategoryNotFound(category_id))
    }

    async fn create_category(
        &self,
        user: &str,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.name_taken(user, &new_category, None) {
            return Err(CategoryAlreadyExists(new_category.name));
        }

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let category = new_category.into_category(id, false);
        write_guard.categories.insert(
            id,
            Entry {
                owner: Some(user.to_owned()),
                category: category.clone(),
            },
        );
        Ok(category)
    }

    async fn update_category(
        &self,
        user: &str,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        let owned = write_guard
            .categories
            .get(&category_id)
            .map(|entry| entry.owner.as_deref() == Some(user))
            .unwrap_or(false);
        if !owned {
            return Err(CategoryNotFound(category_id));
        }

        if write_guard.name_taken(user, &updated_category, Some(category_id)) {
            return Err(CategoryAlreadyExists(updated_category.name));
        }

        let category = updated_category.into_category(category_id, false);
        let entry = write_guard
            .categories
            .get_mut(&category_id)
            .expect("ownership was checked under the same lock");
        entry.category = category.clone();
        Ok(category)
    }

    async fn delete_category(
        &self,
        user: &str,
        category_id: i32,
    ) -> Result<(), CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        let owned = write_guard
            .categories
            .get(&category_id)
            .map(|entry| entry.owner.as_deref() == Some(user))
            .unwrap_or(false);
        if !owned {
            return Err(CategoryNotFound(category_id));
        }

        write_guard.categories.remove(&category_id);
        Ok(())
    }
}
