mod logs;
mod metrics;
mod otel;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{
    GuardKind, GuardLabels, GuardMetrics, GuardMode, GuardOutcome, Labels, Method, Metrics, Status,
};
pub use self::otel::Telemetry;
pub use self::shutdown::shutdown_signal;
