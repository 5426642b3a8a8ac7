use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => f.write_str("income"),
            TransactionType::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(anyhow!("unknown transaction type {:?}", other)),
        }
    }
}

/// Conjunctive filter over a user's transactions. Absent fields are omitted
/// from the predicate, never defaulted to match-all sentinel values.
#[derive(Clone, Default, Debug)]
pub struct Filter {
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl Filter {
    pub const NONE: Filter = Filter {
        category: None,
        transaction_type: None,
        from: None,
        until: None,
    };
}

#[derive(Clone, Copy, Debug)]
pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

#[async_trait]
pub trait TransactionRepo: Sync + Send {
    /// Matching transactions ordered by date descending, then creation time
    /// descending. The filter predicate is shared with [count_transactions],
    /// so a reported total is always consistent with the returned page.
    ///
    /// [count_transactions]: TransactionRepo::count_transactions
    async fn get_all_transactions(
        &self,
        user: &str,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError>;

    async fn count_transactions(
        &self,
        user: &str,
        filter: Filter,
    ) -> Result<i64, TransactionRepoError>;

    async fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    async fn update_transaction(
        &self,
        user: &str,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    async fn delete_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Number of the user's transactions recorded under the given category
    /// name. Used to refuse deleting a category that is still referenced.
    async fn count_with_category(
        &self,
        user: &str,
        category: &str,
    ) -> Result<i64, TransactionRepoError>;
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error("Transaction with id {0} not found")]
    TransactionNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Transaction {
    pub id: i32,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub subcategory: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: i32,
        amount: Decimal,
        transaction_type: TransactionType,
        category: String,
        subcategory: String,
        description: Option<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            transaction_type,
            category,
            subcategory,
            description,
            date,
            created_at,
        }
    }
}

impl Eq for Transaction {}

impl Ord for Transaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.created_at.cmp(&other.created_at))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub subcategory: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub const fn new(
        amount: Decimal,
        transaction_type: TransactionType,
        category: String,
        subcategory: String,
        description: Option<String>,
        date: NaiveDate,
    ) -> NewTransaction {
        NewTransaction {
            amount,
            transaction_type,
            category,
            subcategory,
            description,
            date,
        }
    }

    pub fn into_transaction(self, id: i32, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            subcategory: self.subcategory,
            description: self.description,
            date: self.date,
            created_at,
        }
    }
}
