//! Request tracing middleware.
//!
//! Each incoming request runs inside a [`TraceId`] scope so handlers, the
//! service layer, and error payloads share one correlation identifier. A
//! caller-supplied `trace-id` header is reused when it parses as a UUID;
//! otherwise a fresh identifier is generated.

use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware that scopes a [`TraceId`] around each request and echoes it in
/// the `trace-id` response header.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, %trace_id, "failed to encode trace identifier header");
                }
            }
            info!(
                %trace_id,
                %method,
                path,
                status = res.status().as_u16(),
                elapsed_ms = elapsed_ms(started.elapsed()),
                "request completed"
            );
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test, web};

    async fn call_with_handler<F, Fut, Res>(
        handler: F,
        inbound: Option<&str>,
    ) -> (ServiceResponse<actix_web::body::BoxBody>, String)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = inbound {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, trace_id)
    }

    #[actix_web::test]
    async fn handler_sees_the_header_trace_id() {
        let (res, trace_id) = call_with_handler(
            || async move {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            },
            None,
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[actix_web::test]
    async fn reuses_a_valid_inbound_trace_id() {
        let inbound = "6f1c1f0e-8d2b-4a53-9d5e-2f7f3b7a9c10";
        let (_, trace_id) =
            call_with_handler(|| async { HttpResponse::Ok().finish() }, Some(inbound)).await;
        assert_eq!(trace_id, inbound);
    }

    #[actix_web::test]
    async fn replaces_a_malformed_inbound_trace_id() {
        let (_, trace_id) =
            call_with_handler(|| async { HttpResponse::Ok().finish() }, Some("not-a-uuid")).await;
        assert_ne!(trace_id, "not-a-uuid");
        assert!(trace_id.parse::<TraceId>().is_ok());
    }

    #[core::prelude::v1::test]
    fn elapsed_milliseconds_saturate() {
        assert_eq!(elapsed_ms(Duration::from_millis(1_500)), 1_500);
        assert_eq!(elapsed_ms(Duration::MAX), u64::MAX);
    }

    #[actix_web::test]
    async fn error_bodies_carry_the_trace_id() {
        let (res, trace_id) = call_with_handler(
            || async move { Result::<HttpResponse, DomainError>::Err(DomainError::not_found("gone")) },
            None,
        )
        .await;
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(trace_id.as_str()));
    }
}
