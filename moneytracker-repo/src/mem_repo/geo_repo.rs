use crate::geo_repo::{City, Country, GeoRepo, GeoRepoError, Neighborhood};
use async_trait::async_trait;

pub struct MemGeoRepo {
    countries: Vec<Country>,
    cities: Vec<City>,
    neighborhoods: Vec<Neighborhood>,
}

impl MemGeoRepo {
    pub fn new(
        countries: Vec<Country>,
        cities: Vec<City>,
        neighborhoods: Vec<Neighborhood>,
    ) -> MemGeoRepo {
        MemGeoRepo {
            countries,
            cities,
            neighborhoods,
        }
    }

    /// A small fixed dataset matching the shape of the migration seed.
    pub fn with_seed_data() -> MemGeoRepo {
        let country = |id, name: &str| Country {
            id,
            name: name.to_owned(),
        };
        let city = |id, country_id, name: &str| City {
            id,
            country_id,
            name: name.to_owned(),
        };
        let neighborhood = |id, city_id, name: &str| Neighborhood {
            id,
            city_id,
            name: name.to_owned(),
        };
        MemGeoRepo::new(
            vec![country(1, "Colombia"), country(2, "México")],
            vec![
                city(1, 1, "Bogotá"),
                city(2, 1, "Medellín"),
                city(3, 2, "Ciudad de México"),
            ],
            vec![
                neighborhood(1, 1, "Chapinero"),
                neighborhood(2, 1, "Usaquén"),
                neighborhood(3, 2, "El Poblado"),
            ],
        )
    }
}

#[async_trait]
impl GeoRepo for MemGeoRepo {
    async fn get_countries(&self) -> Result<Vec<Country>, GeoRepoError> {
        let mut countries = self.countries.clone();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn get_cities(&self, country_id: i32) -> Result<Vec<City>, GeoRepoError> {
        let mut cities: Vec<City> = self
            .cities
            .iter()
            .filter(|city| city.country_id == country_id)
            .cloned()
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    async fn get_neighborhoods(&self, city_id: i32) -> Result<Vec<Neighborhood>, GeoRepoError> {
        let mut neighborhoods: Vec<Neighborhood> = self
            .neighborhoods
            .iter()
            .filter(|n| n.city_id == city_id)
            .cloned()
            .collect();
        neighborhoods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(neighborhoods)
    }
}
