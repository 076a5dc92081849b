//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, web};
use mockable::Clock;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::inbound::http::validation::json_config;
use crate::middleware::Trace;
use crate::outbound::memory::InMemoryUserRepository;

/// State wired to a fresh in-memory store.
pub fn memory_state(clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_repository(Arc::new(InMemoryUserRepository::new(clock)))
}

/// Users routes under `/api/v1`, wrapped the way the server wraps them.
pub fn users_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(NormalizePath::trim())
                .configure(users::configure),
        )
}
