pub mod aggregate;
pub mod export;
pub mod handlers;

use actix_web::{web, Scope};

pub fn report_service() -> Scope {
    web::scope("/reports")
        .service(handlers::monthly_report)
        .service(handlers::yearly_report)
        .service(handlers::export_all)
        .service(handlers::export_excel)
}
