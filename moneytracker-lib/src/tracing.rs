use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder, TracingLogger};

pub struct RequestRootSpanBuilder;

impl RootSpanBuilder for RequestRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> ::tracing::Span {
        tracing_actix_web::root_span!(request, user_id = ::tracing::field::Empty)
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: ::tracing::Span,
        outcome: &Result<ServiceResponse<B>, Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

pub fn create_middleware() -> TracingLogger<RequestRootSpanBuilder> {
    TracingLogger::<RequestRootSpanBuilder>::new()
}
