extern crate rstest;

use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::App;
use rstest::rstest;
use tracing::instrument;

use moneytracker_repo::geo_repo::{City, Country, Neighborhood};
use utils::repos;
use utils::tracing_setup;
use utils::Repos;

#[macro_use]
mod utils;

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_geo_lookups_need_no_authentication(_tracing_setup: &(), repos: Repos) {
    let (_transaction_repo, _category_repo, _user_repo, geo_repo) = repos;
    let app = App::new()
        .app_data(Data::new(geo_repo))
        .wrap(moneytracker_lib::tracing::create_middleware())
        .service(moneytracker_lib::geo::geo_service());
    let service = test::init_service(app).await;

    let request = TestRequest::get().uri("/geo/countries").to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let countries: Vec<Country> = test::read_body_json(response).await;
    assert!(!countries.is_empty());

    let country = &countries[0];
    let request = TestRequest::get()
        .uri(&format!("/geo/cities/{}", country.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let cities: Vec<City> = test::read_body_json(response).await;
    assert!(cities.iter().all(|c| c.country_id == country.id));

    let city = &cities[0];
    let request = TestRequest::get()
        .uri(&format!("/geo/neighborhoods/{}", city.id))
        .to_request();
    let response = test::call_service(&service, request).await;
    assert!(response.status().is_success());
    let _neighborhoods: Vec<Neighborhood> = test::read_body_json(response).await;
}
