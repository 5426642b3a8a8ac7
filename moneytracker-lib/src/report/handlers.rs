use crate::error::HandlerError;
use crate::report::aggregate::{
    self, CategoryTotal, DailyTotal, MonthTotal, Summary, MONTH_NAMES,
};
use crate::report::export;
use crate::transaction::FilterQuery;
use crate::user::UserId;
use actix_web::http::header::ContentDisposition;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::{Datelike, Utc};
use moneytracker_repo::transaction_repo::{Filter, TransactionRepo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize, Debug)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub month_name: String,
    pub summary: Summary,
    pub category_breakdown: Vec<CategoryTotal>,
    pub daily_trend: Vec<DailyTotal>,
    pub count: usize,
}

/// Reports the month named in the query, or the current month when the
/// query leaves it out.
#[get("/monthly")]
pub async fn monthly_report(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    query: web::Query<MonthlyReportQuery>,
) -> Result<impl Responder, HandlerError> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let (from, until) = aggregate::month_span(year, month)?;
    let filter = Filter {
        from: Some(from),
        until: Some(until),
        ..Filter::NONE
    };
    let transactions = transaction_repo
        .get_all_transactions(&user_id.into_inner(), filter, None)
        .await?;

    Ok(HttpResponse::Ok().json(MonthlyReport {
        year,
        month,
        label: format!("{:04}-{:02}", year, month),
        month_name: MONTH_NAMES[(month - 1) as usize].to_owned(),
        summary: aggregate::summarize(&transactions),
        category_breakdown: aggregate::category_breakdown(&transactions),
        daily_trend: aggregate::daily_trend(&transactions),
        count: transactions.len(),
    }))
}

#[derive(Deserialize, Debug)]
pub struct YearlyReportQuery {
    pub year: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct YearlyReport {
    pub year: i32,
    pub summary: Summary,
    pub monthly_breakdown: Vec<MonthTotal>,
    pub category_breakdown: Vec<CategoryTotal>,
}

#[get("/yearly")]
pub async fn yearly_report(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    query: web::Query<YearlyReportQuery>,
) -> Result<impl Responder, HandlerError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let (from, until) = aggregate::year_span(year)?;
    let filter = Filter {
        from: Some(from),
        until: Some(until),
        ..Filter::NONE
    };
    let transactions = transaction_repo
        .get_all_transactions(&user_id.into_inner(), filter, None)
        .await?;

    Ok(HttpResponse::Ok().json(YearlyReport {
        year,
        summary: aggregate::summarize(&transactions),
        monthly_breakdown: aggregate::monthly_breakdown(&transactions),
        category_breakdown: aggregate::category_breakdown(&transactions),
    }))
}

/// Streams the filtered transactions as an xlsx attachment. An empty result
/// is a 404 so clients never download a workbook with nothing in it.
#[get("/export/excel")]
pub async fn export_excel(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    filter_query: web::Query<FilterQuery>,
) -> Result<impl Responder, HandlerError> {
    let filter = filter_query.into_inner().into_filter()?;
    let transactions = transaction_repo
        .get_all_transactions(&user_id.into_inner(), filter, None)
        .await?;
    if transactions.is_empty() {
        return Err(HandlerError::NotFound(
            "no transactions match the given filters".to_owned(),
        ));
    }

    let workbook = export::build_workbook(&transactions)?;
    Ok(HttpResponse::Ok()
        .content_type(export::CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment("transactions.xlsx"))
        .body(workbook))
}

/// Unfiltered dump of the user's full history, row ids and creation
/// timestamps included.
#[get("/export/excel/all")]
pub async fn export_all(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let transactions = transaction_repo
        .get_all_transactions(&user_id.into_inner(), Filter::NONE, None)
        .await?;
    if transactions.is_empty() {
        return Err(HandlerError::NotFound(
            "no transactions to export".to_owned(),
        ));
    }

    let workbook = export::build_full_workbook(&transactions)?;
    Ok(HttpResponse::Ok()
        .content_type(export::CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment("transactions.xlsx"))
        .body(workbook))
}
