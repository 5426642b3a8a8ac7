use crate::transaction_repo::TransactionRepoError::TransactionNotFound;
use crate::transaction_repo::{
    Filter, NewTransaction, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    transactions: HashMap<i32, Transaction>,
    user_transactions: HashMap<String, HashSet<i32>>,
    next_id: i32,
}

pub struct MemTransactionRepo {
    state: RwLock<State>,
}

impl MemTransactionRepo {
    pub fn new() -> MemTransactionRepo {
        let state = State {
            transactions: HashMap::new(),
            user_transactions: HashMap::new(),
            next_id: 1,
        };
        MemTransactionRepo {
            state: RwLock::new(state),
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

impl Default for MemTransactionRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(transaction: &Transaction, filter: &Filter) -> bool {
    if let Some(category) = &filter.category {
        if &transaction.category != category {
            return false;
        }
    }
    if let Some(transaction_type) = filter.transaction_type {
        if transaction.transaction_type != transaction_type {
            return false;
        }
    }
    if let Some(from) = filter.from {
        if transaction.date < from {
            return false;
        }
    }
    if let Some(until) = filter.until {
        if transaction.date > until {
            return false;
        }
    }
    true
}

impl MemTransactionRepo {
    fn filtered_transactions(
        &self,
        user: &str,
        filter: &Filter,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let read_guard = self.read_lock()?;

        let Some(transaction_ids) = read_guard.user_transactions.get(user) else {
            return Ok(Vec::new());
        };

        let transactions = transaction_ids
            .iter()
            .map(|id| {
                read_guard
                    .transactions
                    .get(id)
                    .expect("transactions should contain same ids as user_transactions")
            })
            .filter(|t| matches(t, filter))
            .cloned()
            .collect();
        Ok(transactions)
    }
}

#[async_trait]
impl TransactionRepo for MemTransactionRepo {
    async fn get_all_transactions(
        &self,
        user: &str,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let mut transactions = self.filtered_transactions(user, &filter)?;
        transactions.sort_by(|a, b| b.cmp(a));

        if let Some(page_options) = page_options {
            transactions = transactions
                .into_iter()
                .skip(page_options.offset as usize)
                .take(page_options.limit as usize)
                .collect();
        }

        Ok(transactions)
    }

    async fn count_transactions(
        &self,
        user: &str,
        filter: Filter,
    ) -> Result<i64, TransactionRepoError> {
        let transactions = self.filtered_transactions(user, &filter)?;
        Ok(transactions.len() as i64)
    }

    async fn create_new_transaction(
        &self,
        user: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let transaction = new_transaction.into_transaction(id, Utc::now());

        write_guard.transactions.insert(id, transaction.clone());
        write_guard
            .user_transactions
            .entry(user.to_owned())
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        user: &str,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        let Some(transaction_ids) = write_guard.user_transactions.get(user) else {
            return Err(TransactionNotFound(transaction_id));
        };
        if !transaction_ids.contains(&transaction_id) {
            return Err(TransactionNotFound(transaction_id));
        }

        let Some(existing) = write_guard.transactions.get_mut(&transaction_id) else {
            return Err(TransactionNotFound(transaction_id));
        };
        let transaction = updated_transaction.into_transaction(transaction_id, existing.created_at);
        *existing = transaction.clone();
        Ok(transaction)
    }

    async fn delete_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        let owned = write_guard
            .user_transactions
            .get(user)
            .map(|ids| ids.contains(&transaction_id))
            .unwrap_or(false);
        if !owned {
            return Err(TransactionNotFound(transaction_id));
        }

        let transaction = write_guard
            .transactions
            .remove(&transaction_id)
            .ok_or(TransactionNotFound(transaction_id))?;
        write_guard
            .user_transactions
            .get_mut(user)
            .expect("ids in transactions should be present in user_transactions")
            .remove(&transaction_id);
        Ok(transaction)
    }

    async fn count_with_category(
        &self,
        user: &str,
        category: &str,
    ) -> Result<i64, TransactionRepoError> {
        let filter = Filter {
            category: Some(category.to_owned()),
            ..Filter::NONE
        };
        self.count_transactions(user, filter).await
    }
}
