//! Optional Prometheus middleware.
//!
//! `App::wrap` needs one concrete middleware type whether or not metrics are
//! configured, so both arms are boxed to the same service type.

use std::sync::Arc;

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;

/// Namespace prefixed to every exported metric.
pub(crate) const METRICS_NAMESPACE: &str = "user_directory";

/// Build the Prometheus middleware serving `/metrics`.
///
/// # Errors
/// Returns the registry error when the default collectors cannot be
/// registered.
pub fn prometheus() -> Result<PrometheusMetrics, Box<dyn std::error::Error + Send + Sync>> {
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint("/metrics")
        .build()
}

#[derive(Clone)]
pub(crate) struct MetricsLayer(Option<Arc<PrometheusMetrics>>);

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics.map(Arc::new))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        if let Some(metrics) = self.0.clone() {
            let fut = Compat::new((*metrics).clone()).new_transform(service);
            return Box::pin(async move { Ok(boxed::service(fut.await?)) });
        }
        Box::pin(async move {
            let passthrough = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
            Ok(boxed::service(passthrough))
        })
    }
}
