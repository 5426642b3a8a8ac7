use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read-only hierarchical lookup data used for profile address selection.
/// There is no application write path; rows come from the seed data.
#[async_trait]
pub trait GeoRepo: Sync + Send {
    async fn get_countries(&self) -> Result<Vec<Country>, GeoRepoError>;
    async fn get_cities(&self, country_id: i32) -> Result<Vec<City>, GeoRepoError>;
    async fn get_neighborhoods(&self, city_id: i32) -> Result<Vec<Neighborhood>, GeoRepoError>;
}

#[derive(Error, Debug)]
pub enum GeoRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Country {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct City {
    pub id: i32,
    pub country_id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Neighborhood {
    pub id: i32,
    pub city_id: i32,
    pub name: String,
}
