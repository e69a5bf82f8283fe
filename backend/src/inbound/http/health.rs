//! Health endpoints: store health report plus liveness and readiness probes.
//!
//! `/health` reports the store probe and pool counters. `/health/live` and
//! `/health/ready` are lightweight probes for orchestrators.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::HealthReport;
use crate::domain::ports::StoreHealthProbe;

/// Shared health state for readiness and store checks.
pub struct HealthState {
    ready: AtomicBool,
    probe: Arc<dyn StoreHealthProbe>,
}

impl HealthState {
    /// Create a new health state, not yet ready, over the given store probe.
    pub fn new(probe: Arc<dyn StoreHealthProbe>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            probe,
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Store health report. Returns 200 when the store answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Store is up", body = HealthReport),
        (status = 503, description = "Store is down", body = HealthReport)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let report = state.probe.check().await;
    let mut response = if report.is_up() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}

/// Readiness probe. Return 200 once the server is bound and the store is up.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ready = state.is_ready() && state.probe.check().await.is_up();
    HealthState::probe_response(ready)
}

/// Liveness probe. Return 200 while the process can serve requests.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Server is alive"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HealthState::probe_response(true)
}
