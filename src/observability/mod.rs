//! Tracing setup with optional file-based OpenTelemetry export.
//!
//! ```text
//! tracing spans ──┬─> fmt layer ──────────────────────────────> stderr
//!                 └─> tracing-opentelemetry ─> FileSpanExporter ─> abtube-otlp.json
//! ```
//!
//! The export file lives in the data directory and rotates at 10 MiB,
//! keeping three backups. See [`init_tracing`] for how the level is chosen.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{FileWriter, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{init_tracing, TRACE_FILE_NAME};
