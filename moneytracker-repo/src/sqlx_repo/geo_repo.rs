use crate::geo_repo::{City, Country, GeoRepo, GeoRepoError, Neighborhood};
use crate::sqlx_repo::SQLxRepo;
use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
impl GeoRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_countries(&self) -> Result<Vec<Country>, GeoRepoError> {
        let rows: Vec<(i32, String)> =
            sqlx::query_as("SELECT id, name FROM countries ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get countries")?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Country { id, name })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_cities(&self, country_id: i32) -> Result<Vec<City>, GeoRepoError> {
        let rows: Vec<(i32, i32, String)> = sqlx::query_as(
            "SELECT id, country_id, name FROM cities WHERE country_id = $1 ORDER BY name",
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get cities for country {}", country_id))?;
        Ok(rows
            .into_iter()
            .map(|(id, country_id, name)| City {
                id,
                country_id,
                name,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_neighborhoods(&self, city_id: i32) -> Result<Vec<Neighborhood>, GeoRepoError> {
        let rows: Vec<(i32, i32, String)> = sqlx::query_as(
            "SELECT id, city_id, name FROM neighborhoods WHERE city_id = $1 ORDER BY name",
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get neighborhoods for city {}", city_id))?;
        Ok(rows
            .into_iter()
            .map(|(id, city_id, name)| Neighborhood { id, city_id, name })
            .collect())
    }
}
