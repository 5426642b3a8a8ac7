mod category_repo;
mod geo_repo;
mod transaction_repo;
mod user_repo;

use crate::category_repo::CategoryRepo;
use crate::geo_repo::GeoRepo;
use crate::transaction_repo::TransactionRepo;
use crate::user_repo::UserRepo;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }
}

/// Connects a bounded pool, runs the embedded migrations and hands out the
/// repository handles. The pool is shared; sessions are returned on every
/// exit path by the driver.
pub async fn create_repos(
    database_url: &str,
    max_pool_size: u32,
) -> Result<
    (
        Arc<dyn TransactionRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn UserRepo>,
        Arc<dyn GeoRepo>,
    ),
    anyhow::Error,
> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(database_url)
        .await
        .context("Unable to connect to database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Unable to run migrations")?;

    let repo = Arc::new(SQLxRepo::new(pool));
    let transaction_repo: Arc<dyn TransactionRepo> = repo.clone();
    let category_repo: Arc<dyn CategoryRepo> = repo.clone();
    let user_repo: Arc<dyn UserRepo> = repo.clone();
    let geo_repo: Arc<dyn GeoRepo> = repo;
    Ok((transaction_repo, category_repo, user_repo, geo_repo))
}
