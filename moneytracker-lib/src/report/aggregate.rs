use crate::error::HandlerError;
use chrono::{Datelike, NaiveDate};
use moneytracker_repo::transaction_repo::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// First and last day of the given month.
pub fn month_span(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), HandlerError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| HandlerError::Validation("month must be between 1 and 12".to_owned()))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| HandlerError::Validation("year out of range".to_owned()))?;
    let last = next_month
        .pred_opt()
        .ok_or_else(|| HandlerError::Validation("year out of range".to_owned()))?;
    Ok((first, last))
}

/// First and last day of the given year.
pub fn year_span(year: i32) -> Result<(NaiveDate, NaiveDate), HandlerError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| HandlerError::Validation("year out of range".to_owned()))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| HandlerError::Validation("year out of range".to_owned()))?;
    Ok((first, last))
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Income, expense and balance totals. Totals are zero, never absent, when
/// no rows match.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => income += transaction.amount,
            TransactionType::Expense => expenses += transaction.amount,
        }
    }
    Summary {
        income,
        expenses,
        balance: income - expenses,
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: i64,
}

/// Expense transactions grouped by category name, largest total first.
/// Equal totals fall back to name order so the result is deterministic.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, (Decimal, i64)> = HashMap::new();
    for transaction in transactions {
        if transaction.transaction_type != TransactionType::Expense {
            continue;
        }
        let entry = totals
            .entry(transaction.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += transaction.amount;
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_owned(),
            total,
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    breakdown
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Per-date income/expense totals for each distinct date present, in
/// ascending date order.
pub fn daily_trend(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for transaction in transactions {
        let entry = days
            .entry(transaction.date)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match transaction.transaction_type {
            TransactionType::Income => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }
    days.into_iter()
        .map(|(date, (income, expenses))| DailyTotal {
            date,
            income,
            expenses,
        })
        .collect()
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MonthTotal {
    pub month: u32,
    pub month_name: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Exactly 12 month buckets regardless of data sparsity; unpopulated months
/// carry zero values. Callers pass transactions already filtered to one
/// year.
pub fn monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthTotal> {
    let mut months: Vec<MonthTotal> = (1..=12)
        .map(|month| MonthTotal {
            month,
            month_name: MONTH_NAMES[(month - 1) as usize].to_owned(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            balance: Decimal::ZERO,
        })
        .collect();

    for transaction in transactions {
        let bucket = &mut months[transaction.date.month0() as usize];
        match transaction.transaction_type {
            TransactionType::Income => bucket.income += transaction.amount,
            TransactionType::Expense => bucket.expenses += transaction.amount,
        }
    }
    for bucket in &mut months {
        bucket.balance = bucket.income - bucket.expenses;
    }
    months
}
