//! Users API library modules.
//!
//! Layout follows ports and adapters: [`domain`] holds the entity, ports,
//! and service; [`inbound`] the HTTP handlers; [`outbound`] the stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
