//! src/logging.rs
//! ============================================================================
//! # Logging: file-only tracing subscriber
//!
//! The terminal belongs to the TUI, so every event goes to a daily rolling
//! file (`{log_dir}/jobdesk.YYYY-MM-DD`) through the non-blocking writer.
//! Lines are prefixed with a process-wide sequence number.

use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing::Metadata;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
        time::{ChronoLocal, FormatTime},
    },
    prelude::*,
};

use crate::config::LoggingConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main` and keep the guard alive until
    /// exit; dropping it flushes the writer.
    pub fn init_tracing(cfg: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
        fs::create_dir_all(&cfg.log_dir)?;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&cfg.level).map_err(|e| LoggingError::InvalidLevel {
                level: cfg.level.clone(),
                reason: e.to_string(),
            })?,
        };

        let (writer, guard) = tracing_appender::non_blocking(daily(&cfg.log_dir, "jobdesk"));

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(file_layer)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

        Ok(guard)
    }
}

static SEQ: AtomicUsize = AtomicUsize::new(1);

/// Custom formatter: `SEQ TIME LEVEL [file:line mod::path] span{fields}: message`
pub struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);

        write!(w, "{seq:06} ")?;
        ChronoLocal::rfc_3339().format_time(&mut w)?;

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            " {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        // innermost span last, with its recorded fields
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(w, "{}", span.name())?;
                let ext = span.extensions();
                if let Some(fields) = ext.get::<fmt::FormattedFields<N>>()
                    && !fields.is_empty()
                {
                    write!(w, "{{{fields}}}")?;
                }
                w.write_str(": ")?;
            }
        }

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::{info, info_span};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_lines_carry_increasing_sequence() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(SeqFileMod)
                .with_writer(move || sink.clone())
                .with_ansi(false),
        );

        tracing::subscriber::with_default(subscriber, || {
            info!("first");
            let span = info_span!("fetch", generation = 7);
            let _entered = span.enter();
            info!("second");
        });

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let seq = |line: &str| line[..6].parse::<usize>().unwrap();
        assert!(seq(lines[1]) > seq(lines[0]));
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].contains("fetch{generation=7}: second"));
    }
}
