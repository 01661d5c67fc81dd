use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Other,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Redirect,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "portal_http_requests",
            "Total number of HTTP requests served by the portal",
            self.request_counter.clone(),
        );
        registry.register(
            "portal_http_request_duration_seconds",
            "Histogram of portal request durations",
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum GuardKind {
    Protected,
    Dashboard,
    Public,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum GuardOutcome {
    Children,
    Loading,
    Inactive,
    ConfigurationError,
    Redirect,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum GuardMode {
    Optimistic,
    Resolved,
    TimedOut,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct GuardLabels {
    pub guard: GuardKind,
    pub outcome: GuardOutcome,
    pub mode: GuardMode,
}

/// Counts guard decisions by outcome.
#[derive(Clone, Debug, Default)]
pub struct GuardMetrics {
    pub decisions: Family<GuardLabels, Counter>,
}

impl GuardMetrics {
    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "portal_guard_decisions",
            "Route guard decisions by guard kind and outcome",
            self.decisions.clone(),
        );
    }

    pub fn record(&self, guard: GuardKind, outcome: GuardOutcome, mode: GuardMode) {
        self.decisions
            .get_or_create(&GuardLabels {
                guard,
                outcome,
                mode,
            })
            .inc();
    }
}
