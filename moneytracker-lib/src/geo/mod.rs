mod handlers;

use actix_web::{web, Scope};

/// Lookup data for address selection. Mounted without authentication; the
/// rows are the same for every caller.
pub fn geo_service() -> Scope {
    web::scope("/geo")
        .service(handlers::get_countries)
        .service(handlers::get_cities)
        .service(handlers::get_neighborhoods)
}
