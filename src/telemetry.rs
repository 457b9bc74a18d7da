//! Request-scoped trace IDs and one-time tracing setup.
//!
//! Every request runs inside a [`TraceContext`] held in task-local storage;
//! [`crate::error::ApiError`] reads it back when building problem responses.

use std::any::type_name_of_val;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::task_local;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::AppConfig;

/// Correlation ID carried for the duration of one request.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: String,
}

impl TraceContext {
    /// Fresh context with a random `trace-` prefixed ID.
    pub fn generate() -> Self {
        let trace_id = format!("trace-{}", uuid::Uuid::new_v4());
        Self { trace_id }
    }
}

task_local! {
    static ACTIVE_TRACE_CONTEXT: TraceContext;
}

/// Failures while installing the global tracing pipeline.
#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("failed to install log tracer bridge: {0}")]
    LogTracer(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Sets up tracing once per process. Later calls are no-ops, so tests and
/// embedded use can call this freely.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    bridge_log_macros();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // JSON is the deployment default; "pretty" is for local terminals.
    let output = if config.log_format == "pretty" {
        fmt::layer().pretty().boxed()
    } else {
        fmt::layer().json().boxed()
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
    {
        TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
        eprintln!("warning: tracing subscriber not installed ({err}); keeping the existing one");
    }

    Ok(())
}

/// Routes `log::` macro output (SeaORM, sqlx) into the tracing pipeline.
fn bridge_log_macros() {
    let result = LogTracer::builder()
        .with_max_level(log::LevelFilter::Trace)
        .init();

    if let Err(err) = result {
        // A LogTracer installed by an earlier init counts as success.
        if !type_name_of_val(log::logger()).contains("LogTracer") {
            eprintln!("warning: log bridge not installed ({err}); `log::` output will be lost");
        }
    }
}

/// Runs `future` with `context` visible to [`current_trace_id`] for its duration.
pub async fn with_trace_context<Fut, R>(context: TraceContext, future: Fut) -> R
where
    Fut: std::future::Future<Output = R>,
{
    ACTIVE_TRACE_CONTEXT.scope(context, future).await
}

/// Trace ID of the surrounding request, if the task carries one.
pub fn current_trace_id() -> Option<String> {
    ACTIVE_TRACE_CONTEXT
        .try_with(|ctx| ctx.trace_id.clone())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_is_scoped_to_the_task() {
        assert!(current_trace_id().is_none());

        let context = TraceContext {
            trace_id: "trace-test".to_string(),
        };
        let seen = with_trace_context(context, async { current_trace_id() }).await;
        assert_eq!(seen.as_deref(), Some("trace-test"));

        assert!(current_trace_id().is_none());
    }

    #[test]
    fn generated_ids_carry_the_prefix_and_differ() {
        let a = TraceContext::generate();
        let b = TraceContext::generate();
        assert!(a.trace_id.starts_with("trace-"));
        assert_ne!(a.trace_id, b.trace_id);
    }
}
