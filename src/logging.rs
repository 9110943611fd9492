// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::engine::LogWriter;
use crate::observability::messages::workers::RUN_LOG_TARGET;

/// Install the global subscriber: human-readable events on stderr and, when a
/// writer is given, the same events appended to the run log.
///
/// `RUST_LOG` wins over `debug`. Calling this twice is harmless.
pub fn init_logging(debug: bool, run_log: Option<LogWriter>) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(run_log.map(run_log_layer))
        .try_init();
}

/// A `fmt` layer writing into the run log.
///
/// Events about the run log itself stay on the other layers; a flush
/// failure written back into the log it failed to flush would never drain.
pub fn run_log_layer<S>(writer: LogWriter) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    // LogWriter stamps its own time prefix
    fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(writer)
        .with_filter(filter_fn(|metadata| metadata.target() != RUN_LOG_TARGET))
}
