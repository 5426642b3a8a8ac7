use crate::error::HandlerError;
use crate::pagination::{validate_page_params, Pagination};
use crate::report::aggregate::{self, CategoryTotal, Summary};
use crate::transaction::{validate_new_transaction, FilterQuery};
use crate::user::UserId;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use moneytracker_repo::transaction_repo::{Filter, NewTransaction, Transaction, TransactionRepo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize, Debug)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

#[get("")]
pub async fn get_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    filter_query: web::Query<FilterQuery>,
    page_query: web::Query<PageQuery>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let (page, limit) = validate_page_params(page_query.page, page_query.limit)?;
    let filter = filter_query.into_inner().into_filter()?;

    // Count and list share the same filter so the pagination envelope and
    // the rows can never disagree.
    let total = transaction_repo
        .count_transactions(&user_id, filter.clone())
        .await?;
    let pagination = Pagination::new(page, limit, total);
    let transactions = transaction_repo
        .get_all_transactions(&user_id, filter, Some(pagination.page_options()))
        .await?;

    Ok(HttpResponse::Ok().json(TransactionPage {
        transactions,
        pagination,
    }))
}

#[post("")]
pub async fn create_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    new_transaction: web::Json<NewTransaction>,
) -> Result<impl Responder, HandlerError> {
    let new_transaction = new_transaction.into_inner();
    validate_new_transaction(&new_transaction)?;

    let transaction = transaction_repo
        .create_new_transaction(&user_id.into_inner(), new_transaction)
        .await?;
    Ok(HttpResponse::Created().json(transaction))
}

#[put("/{transaction_id}")]
pub async fn update_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    transaction_id: web::Path<i32>,
    updated_transaction: web::Json<NewTransaction>,
) -> Result<impl Responder, HandlerError> {
    let updated_transaction = updated_transaction.into_inner();
    validate_new_transaction(&updated_transaction)?;

    let transaction = transaction_repo
        .update_transaction(
            &user_id.into_inner(),
            transaction_id.into_inner(),
            updated_transaction,
        )
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[delete("/{transaction_id}")]
pub async fn delete_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    transaction_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let transaction = transaction_repo
        .delete_transaction(&user_id.into_inner(), transaction_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[derive(Deserialize, Debug)]
pub struct StatsQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Stats {
    pub summary: Summary,
    pub category_breakdown: Vec<CategoryTotal>,
}

/// Totals and an expense breakdown over an optional month or year window.
/// With no parameters the stats cover the user's full history.
#[get("/stats")]
pub async fn get_stats(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    query: web::Query<StatsQuery>,
) -> Result<impl Responder, HandlerError> {
    let mut filter = Filter::NONE;
    match (query.month, query.year) {
        (Some(month), Some(year)) => {
            let (from, until) = aggregate::month_span(year, month)?;
            filter.from = Some(from);
            filter.until = Some(until);
        }
        (None, Some(year)) => {
            let (from, until) = aggregate::year_span(year)?;
            filter.from = Some(from);
            filter.until = Some(until);
        }
        (Some(_), None) => {
            return Err(HandlerError::Validation(
                "month requires a year".to_owned(),
            ));
        }
        (None, None) => {}
    }

    let transactions = transaction_repo
        .get_all_transactions(&user_id.into_inner(), filter, None)
        .await?;
    Ok(HttpResponse::Ok().json(Stats {
        summary: aggregate::summarize(&transactions),
        category_breakdown: aggregate::category_breakdown(&transactions),
    }))
}
