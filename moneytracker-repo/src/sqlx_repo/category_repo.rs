use crate::category_repo::CategoryRepoError::{CategoryAlreadyExists, CategoryNotFound};
use crate::category_repo::{Category, CategoryRepo, CategoryRepoError, NewCategory};
use crate::sqlx_repo::SQLxRepo;
use crate::transaction_repo::TransactionType;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::error::ErrorKind;
use tracing::instrument;

const CATEGORY_COLUMNS: &str = "id, name, color, icon, type, is_default, subcategories";

#[derive(sqlx::FromRow)]
struct CategoryEntry {
    id: i32,
    name: String,
    color: String,
    icon: String,
    #[sqlx(rename = "type")]
    category_type: String,
    is_default: bool,
    subcategories: Vec<String>,
}

impl TryFrom<CategoryEntry> for Category {
    type Error = anyhow::Error;

    fn try_from(value: CategoryEntry) -> Result<Self, Self::Error> {
        let category_type: TransactionType = value.category_type.parse()?;
        Ok(Category {
            id: value.id,
            name: value.name,
            color: value.color,
            icon: value.icon,
            category_type,
            is_default: value.is_default,
            subcategories: value.subcategories,
        })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => {
            matches!(db_error.kind(), ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[async_trait]
impl CategoryRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_categories(&self, user: &str) -> Result<Vec<Category>, CategoryRepoError> {
        let entries: Vec<CategoryEntry> = sqlx::query_as(&format!(
            "SELECT {} FROM categories WHERE user_id IS NULL OR user_id = $1 ORDER BY name",
            CATEGORY_COLUMNS
        ))
        .bind(user.to_owned())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get categories for user {}", user))?;

        let categories = entries
            .into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<Category>, anyhow::Error>>()?;
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn get_category(
        &self,
        user: &str,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError> {
        let entry: Option<CategoryEntry> = sqlx::query_as(&format!(
            "SELECT {} FROM categories WHERE id = $1 AND (user_id = $2 OR user_id IS NULL)",
            CATEGORY_COLUMNS
        ))
        .bind(category_id)
        .bind(user.to_owned())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get category {}", category_id))?;

        let entry = entry.ok_or(CategoryNotFound(category_id))?;
        Ok(entry.try_into()?)
    }

    #[instrument(skip(self, new_category))]
    async fn create_category(
        &self,
        user: &str,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let result: Result<(i32,), sqlx::Error> = sqlx::query_as(
            "INSERT INTO categories(name, color, icon, type, user_id, is_default, subcategories) \
             VALUES ($1, $2, $3, $4, $5, FALSE, $6) RETURNING id",
        )
        .bind(new_category.name.clone())
        .bind(new_category.color.clone())
        .bind(new_category.icon.clone())
        .bind(new_category.category_type.to_string())
        .bind(user.to_owned())
        .bind(new_category.subcategories.clone())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(new_category.into_category(id, false)),
            Err(e) if is_unique_violation(&e) => Err(CategoryAlreadyExists(new_category.name)),
            Err(e) => Err(anyhow::Error::new(e)
                .context("Unable to insert category")
                .into()),
        }
    }

    #[instrument(skip(self, updated_category))]
    async fn update_category(
        &self,
        user: &str,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let result = sqlx::query(
            "UPDATE categories SET name = $1, color = $2, icon = $3, type = $4, \
             subcategories = $5 WHERE id = $6 AND user_id = $7",
        )
        .bind(updated_category.name.clone())
        .bind(updated_category.color.clone())
        .bind(updated_category.icon.clone())
        .bind(updated_category.category_type.to_string())
        .bind(updated_category.subcategories.clone())
        .bind(category_id)
        .bind(user.to_owned())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(CategoryNotFound(category_id)),
            Ok(_) => Ok(updated_category.into_category(category_id, false)),
            Err(e) if is_unique_violation(&e) => Err(CategoryAlreadyExists(updated_category.name)),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Unable to update category {}", category_id))
                .into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete_category(
        &self,
        user: &str,
        category_id: i32,
    ) -> Result<(), CategoryRepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(category_id)
            .bind(user.to_owned())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete category {}", category_id))?;

        if result.rows_affected() == 0 {
            Err(CategoryNotFound(category_id))
        } else {
            Ok(())
        }
    }
}
