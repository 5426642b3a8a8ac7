use crate::error::HandlerError;
use actix_web::{get, web, HttpResponse, Responder};
use moneytracker_repo::geo_repo::GeoRepo;
use std::sync::Arc;

#[get("/countries")]
pub async fn get_countries(
    geo_repo: web::Data<Arc<dyn GeoRepo>>,
) -> Result<impl Responder, HandlerError> {
    let countries = geo_repo.get_countries().await?;
    Ok(HttpResponse::Ok().json(countries))
}

#[get("/cities/{country_id}")]
pub async fn get_cities(
    geo_repo: web::Data<Arc<dyn GeoRepo>>,
    country_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let cities = geo_repo.get_cities(country_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cities))
}

#[get("/neighborhoods/{city_id}")]
pub async fn get_neighborhoods(
    geo_repo: web::Data<Arc<dyn GeoRepo>>,
    city_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let neighborhoods = geo_repo.get_neighborhoods(city_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(neighborhoods))
}
