extern crate futures_util;
extern crate rstest;
extern crate serde_json;

use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::App;
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::utils::mock::MockAuthentication;
use moneytracker_repo::transaction_repo::{NewTransaction, Transaction, TransactionType};
use utils::repos;
use utils::tracing_setup;
use utils::Repos;
use utils::TestUser;

#[macro_use]
mod utils;

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_delete_transaction(_tracing_setup: &(), repos: Repos) {
    let (transaction_repo, category_repo, user_repo, _geo_repo) = repos;
    let test_user = TestUser::new(user_repo).await;
    let app = build_app!(transaction_repo, category_repo, test_user.user_id.clone());
    let service = test::init_service(app).await;

    let new_transaction = NewTransaction::new(
        Decimal::from(12000),
        TransactionType::Expense,
        "Entretenimiento".to_string(),
        "Cine".to_string(),
        None,
        NaiveDate::from_str("2024-03-15").unwrap(),
    );
    let created: Transaction = create_transaction!(&service, new_transaction);

    let request = TestRequest::delete()
        .uri(&format!("/transactions/{}", created.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(
        response.status().is_success(),
        "Got {} response when deleting transaction",
        response.status()
    );
    let deleted: Transaction = test::read_body_json(response).await;
    assert_eq!(deleted, created);

    // a second delete finds nothing
    let request = TestRequest::delete()
        .uri(&format!("/transactions/{}", created.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    test_user.delete().await
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_delete_missing_transaction_is_404(_tracing_setup: &(), repos: Repos) {
    let (transaction_repo, category_repo, user_repo, _geo_repo) = repos;
    let test_user = TestUser::new(user_repo).await;
    let app = build_app!(transaction_repo, category_repo, test_user.user_id.clone());
    let service = test::init_service(app).await;

    let request = TestRequest::delete().uri("/transactions/404").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    test_user.delete().await
}
