use crate::error::HandlerError;
use actix_web::{web, Scope};
use chrono::NaiveDate;
use moneytracker_repo::transaction_repo::{Filter, NewTransaction, TransactionType};
use rust_decimal::Decimal;
use serde::Deserialize;

pub mod handlers;

pub fn transaction_service() -> Scope {
    web::scope("/transactions")
        .service(handlers::get_stats)
        .service(handlers::get_transactions)
        .service(handlers::create_transaction)
        .service(handlers::update_transaction)
        .service(handlers::delete_transaction)
}

/// Optional listing/export filters, combined conjunctively.
#[derive(Deserialize, Debug)]
pub struct FilterQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterQuery {
    /// An inverted date range fails closed instead of being silently
    /// swapped.
    pub fn into_filter(self) -> Result<Filter, HandlerError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(HandlerError::Validation(
                    "start_date must not be after end_date".to_owned(),
                ));
            }
        }
        Ok(Filter {
            category: self.category,
            transaction_type: self.transaction_type,
            from: self.start_date,
            until: self.end_date,
        })
    }
}

const MAX_NAME_LENGTH: usize = 50;
const MAX_DESCRIPTION_LENGTH: usize = 500;

pub fn validate_new_transaction(new_transaction: &NewTransaction) -> Result<(), HandlerError> {
    if new_transaction.amount <= Decimal::ZERO {
        return Err(HandlerError::Validation(
            "amount must be positive".to_owned(),
        ));
    }
    if new_transaction.amount.normalize().scale() > 2 {
        return Err(HandlerError::Validation(
            "amount must have at most 2 decimal places".to_owned(),
        ));
    }
    for (field, value) in [
        ("category", &new_transaction.category),
        ("subcategory", &new_transaction.subcategory),
    ] {
        if value.is_empty() || value.chars().count() > MAX_NAME_LENGTH {
            return Err(HandlerError::Validation(format!(
                "{} must be between 1 and {} characters",
                field, MAX_NAME_LENGTH
            )));
        }
    }
    if let Some(description) = &new_transaction.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(HandlerError::Validation(format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }
    Ok(())
}
