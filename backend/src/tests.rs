//! Tests for the application bootstrap: readiness signalling and route
//! wiring.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::server::{AppDependencies, ServerConfig, build_app, create_server};
use users_api::inbound::http::health::HealthState;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::memory::InMemoryUserRepository;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

fn deps(health_state: web::Data<HealthState>) -> AppDependencies {
    AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::from_repository(Arc::new(
            InMemoryUserRepository::new(Arc::new(DefaultClock)),
        ))),
    }
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>) {
    assert!(!health_state.is_ready(), "state should start unready");

    let config = ServerConfig::new(("127.0.0.1".into(), 0));
    let server = create_server(health_state.clone(), config).expect("server binds");

    assert!(health_state.is_ready(), "state should be ready once bound");
    server.handle().stop(false).await;
}

#[rstest]
#[actix_web::test]
async fn app_serves_health_and_api(health_state: web::Data<HealthState>) {
    let app = test::init_service(build_app(deps(health_state))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"status": "ok"}));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_web::test]
async fn readiness_probe_reflects_state(health_state: web::Data<HealthState>) {
    let app = test::init_service(build_app(deps(health_state.clone()))).await;

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let res =
        test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn openapi_document_is_served(health_state: web::Data<HealthState>) {
    let app = test::init_service(build_app(deps(health_state))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = test::read_body_json(res).await;
    assert!(doc["paths"]["/api/v1/users/{id}"].is_object());
}
