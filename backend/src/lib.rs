//! User registry library modules.
//!
//! A hexagonal layout: [`domain`] holds the user model, ports and services;
//! [`outbound`] adapts PostgreSQL to the ports; [`inbound`] exposes them over
//! HTTP.

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
