//! Output sinks.
//!
//! # Responsibilities
//! - Receive exactly one serialized record per write
//! - Preserve call order
//!
//! # Design Decisions
//! - No batching or buffering beyond what the underlying writer does
//! - Write failures are returned, never swallowed

mod memory;
mod stdout;
mod writer;

pub use memory::MemorySink;
pub use stdout::StdoutSink;
pub use writer::WriterSink;

/// Destination for serialized records.
pub trait Sink: Send + Sync {
    /// Write one line. The line carries no trailing newline.
    fn write_line(&self, line: &str) -> std::io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        (**self).write_line(line)
    }
}
