use crate::category_repo::{CategoryRepo, NewCategory};
use crate::geo_repo::GeoRepo;
use crate::transaction_repo::{TransactionRepo, TransactionType};
use crate::user_repo::UserRepo;
use std::sync::Arc;

mod category_repo;
mod geo_repo;
mod transaction_repo;
mod user_repo;

pub fn create_repos() -> (
    Arc<dyn TransactionRepo>,
    Arc<dyn CategoryRepo>,
    Arc<dyn UserRepo>,
    Arc<dyn GeoRepo>,
) {
    let transaction_repo = transaction_repo::MemTransactionRepo::new();
    let category_repo = category_repo::MemCategoryRepo::with_defaults(default_categories());
    let user_repo = user_repo::MemUserRepo::new();
    let geo_repo = geo_repo::MemGeoRepo::with_seed_data();

    (
        Arc::new(transaction_repo),
        Arc::new(category_repo),
        Arc::new(user_repo),
        Arc::new(geo_repo),
    )
}

/// Same default category set the database migration seeds.
fn default_categories() -> Vec<NewCategory> {
    let category = |name: &str, color: &str, icon: &str, category_type| NewCategory {
        name: name.to_owned(),
        color: color.to_owned(),
        icon: icon.to_owned(),
        category_type,
        subcategories: Vec::new(),
    };
    vec![
        category("Salario", "#4CAF50", "briefcase", TransactionType::Income),
        category("Inversiones", "#8BC34A", "trending-up", TransactionType::Income),
        category("Otros ingresos", "#CDDC39", "plus-circle", TransactionType::Income),
        category("Alimentación", "#F44336", "shopping-cart", TransactionType::Expense),
        category("Transporte", "#FF9800", "truck", TransactionType::Expense),
        category("Vivienda", "#795548", "home", TransactionType::Expense),
        category("Entretenimiento", "#9C27B0", "film", TransactionType::Expense),
        category("Salud", "#2196F3", "heart", TransactionType::Expense),
        category("Otros gastos", "#607D8B", "more-horizontal", TransactionType::Expense),
    ]
}
