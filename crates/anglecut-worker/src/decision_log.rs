//! JSON Lines log of per-tick decisions.
//!
//! One object per tick, in tick order, for offline review of why the
//! director cut where it did.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anglecut_models::TickDecision;

/// Appends tick decisions to a writer as JSON Lines.
pub struct DecisionLog<W: Write = BufWriter<File>> {
    writer: W,
    records: u64,
}

impl DecisionLog {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> DecisionLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    /// Write one decision as a single line.
    pub fn record(&mut self, decision: &TickDecision) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, decision)?;
        self.writer.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    /// Number of decisions written.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
