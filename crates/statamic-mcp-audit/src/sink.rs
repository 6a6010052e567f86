// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audit sinks.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::error::AuditError;
use crate::record::{AuditRecord, Outcome};

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Writes one record.
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Emits records as structured `tracing` events on the `audit` target.
///
/// Started and successful invocations log at info, failures at error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let arguments = serde_json::to_string(&record.arguments)?;
        match record.outcome {
            Outcome::Started => info!(
                target: "statamic_mcp::audit",
                invocation_id = %record.invocation_id,
                tool = %record.tool,
                action = %record.action,
                target_name = %record.target,
                actor = record.actor.as_deref().unwrap_or("-"),
                context = %record.context,
                arguments = %arguments,
                "tool invocation started"
            ),
            Outcome::Success => info!(
                target: "statamic_mcp::audit",
                invocation_id = %record.invocation_id,
                tool = %record.tool,
                action = %record.action,
                target_name = %record.target,
                actor = record.actor.as_deref().unwrap_or("-"),
                context = %record.context,
                duration_ms = record.duration_ms.unwrap_or_default(),
                "tool invocation completed"
            ),
            Outcome::Failure => error!(
                target: "statamic_mcp::audit",
                invocation_id = %record.invocation_id,
                tool = %record.tool,
                action = %record.action,
                target_name = %record.target,
                actor = record.actor.as_deref().unwrap_or("-"),
                context = %record.context,
                duration_ms = record.duration_ms.unwrap_or_default(),
                error_kind = record.error_kind.as_deref().unwrap_or("-"),
                error = record.error.as_deref().unwrap_or("-"),
                "tool invocation failed"
            ),
        }
        Ok(())
    }
}

/// Appends records to a file as JSON lines.
pub struct JsonlAuditSink {
    file: Mutex<File>,
}

impl JsonlAuditSink {
    /// Opens (or creates) the log file in append mode.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let payload = serde_json::to_string(record)?;
        let mut file = self.file.lock().map_err(|_| AuditError::Poisoned)?;
        writeln!(file, "{payload}")?;
        file.flush()?;
        Ok(())
    }
}

/// Keeps records in memory. Used by tests and the `call` command.
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        self.records
            .lock()
            .map_err(|_| AuditError::Poisoned)?
            .push(record.clone());
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _record: &AuditRecord) -> Result<(), AuditError> {
        Ok(())
    }
}

/// Writes to several sinks. Every sink is attempted; the first error wins.
#[derive(Default, Clone)]
pub struct FanoutAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl FanoutAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn AuditSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AuditSink for FanoutAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.record(record) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
