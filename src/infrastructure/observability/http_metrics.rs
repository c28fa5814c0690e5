use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Histogram, Meter, UpDownCounter};

/// HTTP server instruments following the OpenTelemetry semantic conventions.
///
/// Instruments record through the global meter provider, which is a no-op
/// until OTLP export is enabled.
pub struct HttpMetrics {
    request_duration: Histogram<f64>,
    active_requests: UpDownCounter<i64>,
}

impl HttpMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            request_duration: meter
                .f64_histogram("http.server.request.duration")
                .with_unit("s")
                .with_description("Duration of HTTP server requests, including simulated delay")
                .build(),
            active_requests: meter
                .i64_up_down_counter("http.server.active_requests")
                .with_unit("{request}")
                .with_description("Number of in-flight HTTP server requests")
                .build(),
        }
    }

    pub fn from_global() -> Self {
        Self::new(&opentelemetry::global::meter(env!("CARGO_PKG_NAME")))
    }
}

pub async fn http_metrics_middleware(
    State(metrics): State<Arc<HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = KeyValue::new("http.request.method", request.method().to_string());
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| KeyValue::new("http.route", p.as_str().to_string()));

    let in_flight = InFlight::enter(&metrics.active_requests, method.clone());
    let response = next.run(request).await;
    drop(in_flight);

    let mut attributes = vec![
        method,
        KeyValue::new(
            "http.response.status_code",
            i64::from(response.status().as_u16()),
        ),
    ];
    attributes.extend(route);
    metrics
        .request_duration
        .record(start.elapsed().as_secs_f64(), &attributes);

    response
}

// Decrements on drop so cancelled requests leave the gauge balanced.
struct InFlight<'a> {
    counter: &'a UpDownCounter<i64>,
    attributes: [KeyValue; 1],
}

impl<'a> InFlight<'a> {
    fn enter(counter: &'a UpDownCounter<i64>, method: KeyValue) -> Self {
        let attributes = [method];
        counter.add(1, &attributes);
        Self {
            counter,
            attributes,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.add(-1, &self.attributes);
    }
}
