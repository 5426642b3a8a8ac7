use chrono::NaiveDate;
use moneytracker_repo::transaction_repo::{NewTransaction, TransactionType};
use moneytracker_repo::user_repo::{User, UserRepo};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct TestUser {
    pub id: String,
    repo: Arc<dyn UserRepo>,
}

impl TestUser {
    pub async fn new(user_repo: &Arc<dyn UserRepo>) -> TestUser {
        let user_id = "test-user-".to_owned() + &Uuid::new_v4().to_string();
        let user = User::new(user_id.clone(), "not a real hash".to_owned());
        user_repo.create_user(user).await.unwrap();
        info!(%user_id, "Created user");
        TestUser {
            id: user_id,
            repo: user_repo.clone(),
        }
    }

    pub async fn delete(&self) {
        self.repo.delete_user(&self.id).await.unwrap()
    }
}

pub fn new_transaction(
    amount: &str,
    transaction_type: TransactionType,
    category: &str,
    date: &str,
) -> NewTransaction {
    NewTransaction::new(
        Decimal::from_str(amount).unwrap(),
        transaction_type,
        category.to_owned(),
        "General".to_owned(),
        None,
        NaiveDate::from_str(date).unwrap(),
    )
}
