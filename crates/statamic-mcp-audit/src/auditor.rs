// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The audit wrapper placed around every domain handler.
//!
//! A started record is written before the handler runs and a finished record
//! after it returns, fails, or panics. A panic is converted into an
//! `Unexpected` error so the caller still receives an envelope. Sink failures
//! are logged and never change the handler's result.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use statamic_mcp_core::{ExecutionContext, ToolError};
use statamic_mcp_security::Sanitizer;
use tracing::warn;
use uuid::Uuid;

use crate::record::{AuditRecord, Invocation};
use crate::sink::{AuditSink, NoopAuditSink};

pub struct Auditor {
    sink: Arc<dyn AuditSink>,
    sanitizer: Sanitizer,
    enabled: bool,
}

impl std::fmt::Debug for Auditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auditor")
            .field("sanitizer", &self.sanitizer)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Auditor {
    pub fn new(sink: Arc<dyn AuditSink>, sanitizer: Sanitizer) -> Self {
        Self {
            sink,
            sanitizer,
            enabled: true,
        }
    }

    /// An auditor that runs handlers without recording anything.
    pub fn disabled() -> Self {
        Self {
            sink: Arc::new(NoopAuditSink),
            sanitizer: Sanitizer::default(),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Describes an invocation. The arguments are sanitized here, so the raw
    /// values never reach a sink.
    pub fn invocation(
        &self,
        tool: &str,
        action: &str,
        target: impl Into<String>,
        context: &ExecutionContext,
        arguments: &Value,
    ) -> Invocation {
        Invocation {
            id: Uuid::new_v4(),
            tool: tool.to_string(),
            action: action.to_string(),
            target: target.into(),
            actor: context.actor().map(|a| a.id.clone()),
            context: context.kind(),
            arguments: self.sanitizer.sanitize_arguments(arguments),
        }
    }

    /// Runs `handler` between a started and a finished record.
    pub fn run<F>(&self, invocation: &Invocation, handler: F) -> Result<Value, ToolError>
    where
        F: FnOnce() -> Result<Value, ToolError>,
    {
        let started = AuditRecord::started(invocation);
        self.emit(&started);

        let clock = Instant::now();
        let result = match panic::catch_unwind(AssertUnwindSafe(handler)) {
            Ok(result) => result,
            Err(payload) => Err(ToolError::Unexpected(panic_message(payload.as_ref()))),
        };

        self.emit(&started.finished(clock.elapsed(), result.as_ref().err()));
        result
    }

    fn emit(&self, record: &AuditRecord) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.sink.record(record) {
            warn!(
                invocation_id = %record.invocation_id,
                tool = %record.tool,
                error = %e,
                "failed to write audit record"
            );
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("handler panicked: {detail}")
}
