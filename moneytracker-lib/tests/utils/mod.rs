use std::sync::Arc;

use moneytracker_lib::user::UserId;
use rstest::*;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

use moneytracker_repo::category_repo::CategoryRepo;
use moneytracker_repo::geo_repo::GeoRepo;
use moneytracker_repo::transaction_repo::TransactionRepo;
use moneytracker_repo::user_repo::User;
use moneytracker_repo::user_repo::UserRepo;

pub mod mock;

pub type Repos = (
    Arc<dyn TransactionRepo>,
    Arc<dyn CategoryRepo>,
    Arc<dyn UserRepo>,
    Arc<dyn GeoRepo>,
);

macro_rules! build_app {
    ($transaction_repo:ident, $category_repo:ident, $user_id:expr) => {{
        let app = App::new()
            .app_data(Data::new($transaction_repo))
            .app_data(Data::new($category_repo))
            .wrap(moneytracker_lib::tracing::create_middleware())
            .service(
                moneytracker_lib::transaction::transaction_service()
                    .wrap(MockAuthentication { user_id: $user_id }),
            )
            .service(
                moneytracker_lib::category::category_service()
                    .wrap(MockAuthentication { user_id: $user_id }),
            )
            .service(
                moneytracker_lib::report::report_service()
                    .wrap(MockAuthentication { user_id: $user_id }),
            );
        tracing::info!("Built app");
        app
    }};
}

macro_rules! create_transaction {
    (&$service:ident, $new_transaction:ident) => {{
        let request = TestRequest::post()
            .uri("/transactions")
            .set_json(&$new_transaction)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert!(
            response.status().is_success(),
            "Got {} response when creating transaction",
            response.status()
        );
        test::read_body_json(response).await
    }};
}

pub struct TestUser {
    pub user_id: UserId,
    repo: Arc<dyn UserRepo>,
}

impl TestUser {
    pub async fn new(user_repo: Arc<dyn UserRepo>) -> TestUser {
        let user_id = "test-user-".to_owned() + &Uuid::new_v4().to_string();
        let user = User::new(
            user_id.to_string(),
            moneytracker_lib::auth::password::encode_password("pass".to_string()).unwrap(),
        );
        user_repo.create_user(user).await.unwrap();
        info!(%user_id, "Created user");
        TestUser {
            user_id,
            repo: user_repo,
        }
    }

    pub async fn delete(&self) {
        self.repo.delete_user(&self.user_id).await.unwrap()
    }
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> Repos {
    moneytracker_repo::mem_repo::create_repos()
}
