use crate::transaction_repo::TransactionType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait CategoryRepo: Sync + Send {
    /// The system default categories plus the user's own, ordered by name.
    async fn get_categories(&self, user: &str) -> Result<Vec<Category>, CategoryRepoError>;

    /// A single category visible to the user: either owned by them or a
    /// system default. Other users' categories are reported as not found.
    async fn get_category(&self, user: &str, category_id: i32)
        -> Result<Category, CategoryRepoError>;

    /// Creates a custom category owned by the user. Name uniqueness within
    /// the (type, owner-or-default) scope is enforced by the store; a
    /// concurrent duplicate surfaces as [CategoryAlreadyExists].
    ///
    /// [CategoryAlreadyExists]: CategoryRepoError::CategoryAlreadyExists
    async fn create_category(
        &self,
        user: &str,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError>;

    /// Updates one of the user's own categories. Default categories are not
    /// owned by any user and therefore report not found here.
    async fn update_category(
        &self,
        user: &str,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, CategoryRepoError>;

    async fn delete_category(&self, user: &str, category_id: i32)
        -> Result<(), CategoryRepoError>;
}

#[derive(Error, Debug)]
pub enum CategoryRepoError {
    #[error("Category with id {0} not found")]
    CategoryNotFound(i32),
    #[error("Category {0} already exists")]
    CategoryAlreadyExists(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub is_default: bool,
    pub subcategories: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl NewCategory {
    pub fn into_category(self, id: i32, is_default: bool) -> Category {
        Category {
            id,
            name: self.name,
            color: self.color,
            icon: self.icon,
            category_type: self.category_type,
            is_default,
            subcategories: self.subcategories,
        }
    }
}
