// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Diagnostic logging capability
//!
//! The validator never logs through a hidden global: it is handed a
//! [`Reporter`]. [`LogReporter`] forwards to the `log` facade, and
//! [`RecordingReporter`] keeps lines in memory so tests can inspect them.

use log::Level;
use parking_lot::Mutex;

/// Log target used by [`LogReporter`]
pub const LOG_TARGET: &str = "api_assert";

/// Sink for validation diagnostics
pub trait Reporter: Send + Sync {
    /// Record one line at `level`
    fn log(&self, level: Level, message: &str);

    /// Record an informational line
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Record a warning
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    /// Record an error
    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards every line to the `log` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{message}");
    }
}

/// One captured line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Severity
    pub level: Level,
    /// Message text
    pub message: String,
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    records: Mutex<Vec<Record>>,
}

impl RecordingReporter {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Messages recorded at exactly `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.level == level)
            .map(|record| record.message.clone())
            .collect()
    }

    /// Check if any line at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|record| record.level == level && record.message.contains(needle))
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Reporter for RecordingReporter {
    fn log(&self, level: Level, message: &str) {
        self.records.lock().push(Record {
            level,
            message: message.to_string(),
        });
    }
}
