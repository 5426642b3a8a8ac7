use crate::sqlx_repo::SQLxRepo;
use crate::transaction_repo::TransactionRepoError::TransactionNotFound;
use crate::transaction_repo::{
    Filter, NewTransaction, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
    TransactionType,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use tracing::instrument;

const TRANSACTION_COLUMNS: &str =
    "id, amount, type, category, subcategory, description, date, created_at";

#[derive(sqlx::FromRow)]
struct TransactionEntry {
    id: i32,
    amount: Decimal,
    #[sqlx(rename = "type")]
    transaction_type: String,
    category: String,
    subcategory: String,
    description: Option<String>,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionEntry> for Transaction {
    type Error = anyhow::Error;

    fn try_from(value: TransactionEntry) -> Result<Self, Self::Error> {
        let transaction_type: TransactionType = value.transaction_type.parse()?;
        Ok(Transaction::new(
            value.id,
            value.amount,
            transaction_type,
            value.category,
            value.subcategory,
            value.description,
            value.date,
            value.created_at,
        ))
    }
}

/// Appends the conjunctive WHERE clause shared by the row-selecting and the
/// row-counting queries, so the reported total always matches the page.
fn push_filters<'a>(query_builder: &mut QueryBuilder<'a, Postgres>, user: &str, filter: &Filter) {
    query_builder
        .push(" WHERE user_id = ")
        .push_bind(user.to_owned());
    if let Some(category) = &filter.category {
        query_builder
            .push(" AND category = ")
            .push_bind(category.clone());
    }
    if let Some(transaction_type) = filter.transaction_type {
        query_builder
            .push(" AND type = ")
            .push_bind(transaction_type.to_string());
    }
    if let Some(from) = filter.from {
        query_builder.push(" AND date >= ").push_bind(from);
    }
    if let Some(until) = filter.until {
        query_builder.push(" AND date <= ").push_bind(until);
    }
}

#[async_trait]
impl TransactionRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_all_transactions(
        &self,
        user: &str,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let mut query_builder = QueryBuilder::new(format!(
            "SELECT {} FROM transactions",
            TRANSACTION_COLUMNS
        ));
        push_filters(&mut query_builder, user, &filter);
        query_builder.push(" ORDER BY date DESC, created_at DESC, id DESC");
        if let Some(page_options) = page_options {
            // LIMIT and OFFSET are bound as integers, never interpolated.
            query_builder
                .push(" LIMIT ")
                .push_bind(page_options.limit)
                .push(" OFFSET ")
                .push_bind(page_options.offset);
        }

        let transaction_entries: Vec<TransactionEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get transactions for user {}", user))?;
        let transactions = transaction_entries
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<Transaction>, anyhow::Error>>()?;
        Ok(transactions)
    }

    #[instrument(skip(self))]
    async fn count_transactions(
        &self,
        user: &str,
        filter: Filter,
    ) -> Result<i64, TransactionRepoError> {
        let mut query_builder = QueryBuilder::new("SELECT COUNT(*) FROM transactions");
        push_filters(&mut query_builder, user, &filter);

        let total: i64 = query_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Unable to count transactions for user {}", user))?;
        Ok(total)
    }

    #[instrument(skip(self, new_transaction))]
    async fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let (id, created_at): (i32, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO transactions(user_id, amount, type, category, subcategory, description, date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id, created_at",
        )
        .bind(user.to_owned())
        .bind(new_transaction.amount)
        .bind(new_transaction.transaction_type.to_string())
        .bind(new_transaction.category.clone())
        .bind(new_transaction.subcategory.clone())
        .bind(new_transaction.description.clone())
        .bind(new_transaction.date)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert transaction")?;

        Ok(new_transaction.into_transaction(id, created_at))
    }

    #[instrument(skip(self, updated_transaction))]
    async fn update_transaction(
        &self,
        user: &str,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let created_at: Option<(DateTime<Utc>,)> = sqlx::query_as(
            "UPDATE transactions SET amount = $1, type = $2, category = $3, subcategory = $4, \
             description = $5, date = $6 WHERE user_id = $7 AND id = $8 RETURNING created_at",
        )
        .bind(updated_transaction.amount)
        .bind(updated_transaction.transaction_type.to_string())
        .bind(updated_transaction.category.clone())
        .bind(updated_transaction.subcategory.clone())
        .bind(updated_transaction.description.clone())
        .bind(updated_transaction.date)
        .bind(user.to_owned())
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update transaction {}", transaction_id))?;

        match created_at {
            Some((created_at,)) => {
                Ok(updated_transaction.into_transaction(transaction_id, created_at))
            }
            None => Err(TransactionNotFound(transaction_id)),
        }
    }

    #[instrument(skip(self))]
    async fn delete_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError> {
        let transaction_entry: Option<TransactionEntry> = sqlx::query_as(&format!(
            "DELETE FROM transactions WHERE user_id = $1 AND id = $2 RETURNING {}",
            TRANSACTION_COLUMNS
        ))
        .bind(user.to_owned())
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete transaction {}", transaction_id))?;

        let transaction_entry =
            transaction_entry.ok_or(TransactionNotFound(transaction_id))?;
        Ok(transaction_entry.try_into()?)
    }

    #[instrument(skip(self))]
    async fn count_with_category(
        &self,
        user: &str,
        category: &str,
    ) -> Result<i64, TransactionRepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE user_id = $1 AND category = $2",
        )
        .bind(user.to_owned())
        .bind(category.to_owned())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Unable to count transactions in category {}", category))?;
        Ok(count)
    }
}
