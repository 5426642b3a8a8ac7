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
use moneytracker_lib::report::export;
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
async fn test_export_returns_xlsx_attachment(_tracing_setup: &(), repos: Repos) {
    let (transaction_repo, category_repo, user_repo, _geo_repo) = repos;
    let test_user = TestUser::new(user_repo).await;
    let app = build_app!(transaction_repo, category_repo, test_user.user_id.clone());
    let service = test::init_service(app).await;

    let new_transaction = NewTransaction::new(
        Decimal::from(25000),
        TransactionType::Expense,
        "Alimentación".to_string(),
        "Restaurantes".to_string(),
        Some("Almuerzo".to_string()),
        NaiveDate::from_str("2024-01-05").unwrap(),
    );
    let _: Transaction = create_transaction!(&service, new_transaction);

    let request = TestRequest::get()
        .uri("/reports/export/excel")
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert_eq!(content_type, export::CONTENT_TYPE);

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(
        disposition.contains("transactions.xlsx"),
        "unexpected content disposition: {}",
        disposition
    );

    let body = test::read_body(response).await;
    // xlsx is zip under the hood
    assert_eq!(&body[..2], b"PK");

    test_user.delete().await
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_export_all_dumps_full_history(_tracing_setup: &(), repos: Repos) {
    let (transaction_repo, category_repo, user_repo, _geo_repo) = repos;
    let test_user = TestUser::new(user_repo).await;
    let app = build_app!(transaction_repo, category_repo, test_user.user_id.clone());
    let service = test::init_service(app).await;

    // an empty history refuses to produce a document
    let request = TestRequest::get()
        .uri("/reports/export/excel/all")
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let new_transaction = NewTransaction::new(
        Decimal::from(99000),
        TransactionType::Income,
        "Salario".to_string(),
        "Mensual".to_string(),
        None,
        NaiveDate::from_str("2024-02-01").unwrap(),
    );
    let _: Transaction = create_transaction!(&service, new_transaction);

    let request = TestRequest::get()
        .uri("/reports/export/excel/all")
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = test::read_body(response).await;
    assert_eq!(&body[..2], b"PK");

    test_user.delete().await
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_export_with_no_matching_rows_is_404(_tracing_setup: &(), repos: Repos) {
    let (transaction_repo, category_repo, user_repo, _geo_repo) = repos;
    let test_user = TestUser::new(user_repo).await;
    let app = build_app!(transaction_repo, category_repo, test_user.user_id.clone());
    let service = test::init_service(app).await;

    let request = TestRequest::get()
        .uri("/reports/export/excel")
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    test_user.delete().await
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_export_honors_filters(_tracing_setup: &(), repos: Repos) {
    let (transaction_repo, category_repo, user_repo, _geo_repo) = repos;
    let test_user = TestUser::new(user_repo).await;
    let app = build_app!(transaction_repo, category_repo, test_user.user_id.clone());
    let service = test::init_service(app).await;

    let new_transaction = NewTransaction::new(
        Decimal::from(25000),
        TransactionType::Expense,
        "Alimentación".to_string(),
        "Restaurantes".to_string(),
        None,
        NaiveDate::from_str("2024-01-05").unwrap(),
    );
    let _: Transaction = create_transaction!(&service, new_transaction);

    // income filter matches nothing, so even with data the export is a 404
    let request = TestRequest::get()
        .uri("/reports/export/excel?type=income")
        .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    test_user.delete().await
}
