use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ClassLabel;
use crate::error::Result;
use crate::sensor::SensorConfig;

pub const SUMMARY_FILE_NAME: &str = "run_summary.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub class: ClassLabel,
    pub discovered: usize,
    pub succeeded: usize,
    pub failures: Vec<FileFailure>,
}

impl ClassSummary {
    pub fn new(class: ClassLabel, discovered: usize) -> Self {
        Self {
            class,
            discovered,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, file: String, error: String) {
        self.failures.push(FileFailure { file, error });
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Failures in file name order, so reports do not depend on directory
    /// enumeration or thread scheduling.
    pub fn sort_failures(&mut self) {
        self.failures.sort_by(|a, b| a.file.cmp(&b.file));
    }
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub img_size: usize,
    pub sensor: SensorConfig,
    pub classes: Vec<ClassSummary>,
}

impl RunSummary {
    pub fn class(&self, label: ClassLabel) -> Option<&ClassSummary> {
        self.classes.iter().find(|c| c.class == label)
    }

    pub fn total_succeeded(&self) -> usize {
        self.classes.iter().map(|c| c.succeeded).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.classes.iter().map(|c| c.failed()).sum()
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        // Flushing on drop would swallow a failed write.
        writer.flush()?;
        Ok(())
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for class in &self.classes {
            writeln!(
                f,
                "  {:<6} {} found, {} saved, {} failed",
                class.class.to_string(),
                class.discovered,
                class.succeeded,
                class.failed()
            )?;
        }
        write!(
            f,
            "  Total: {} saved, {} failed in {:.1}s",
            self.total_succeeded(),
            self.total_failed(),
            (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
        )
    }
}
